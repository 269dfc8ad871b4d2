//! One operation per CLI verb.
//!
//! An operation takes validated options, issues its requests in order
//! through an [`EndpointRequestor`] and post-processes the responses. Each
//! has a closed error enum: named domain failures plus `Api` for transport,
//! status and decode errors, which pass through unchanged.

mod apps;
mod builds;
mod certificates;
mod invitations;
mod pre_release_versions;
mod users;

pub use apps::{GetAppsError, GetAppsOperation, ListAppsError, ListAppsOperation, ListAppsOptions};
pub use builds::{
    ListBuildLocalizationsError, ListBuildLocalizationsOperation, ListBuildLocalizationsOptions,
    ListBuildsError, ListBuildsOperation, ListBuildsOptions,
};
pub use certificates::{
    ListCertificatesError, ListCertificatesOperation, ListCertificatesOptions,
};
pub use invitations::{
    CancelUserInvitationError, CancelUserInvitationOperation, InviteUserError,
    InviteUserOperation, InviteUserOptions, ListUserInvitationsError,
    ListUserInvitationsOperation, ListUserInvitationsOptions,
};
pub use pre_release_versions::{
    ListPreReleaseVersionsError, ListPreReleaseVersionsOperation, ListPreReleaseVersionsOptions,
};
pub use users::{
    GetUserInfoError, GetUserInfoOperation, GetUserInfoOptions, ListUsersError, ListUsersOperation,
    ListUsersOptions, UserRole,
};

use crate::requestor::EndpointRequestor;

pub trait ApiOperation {
    type Output;
    type Error;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<Self::Output, Self::Error>;
}
