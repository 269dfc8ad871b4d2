use crate::asc::{AppStoreConnectClient, Config};
use crate::error::ApiError;
use crate::model::{
    App, Build, BuildLocalization, Certificate, PreReleaseVersion, User, UserInvitation,
};
use crate::operations::*;
use crate::requestor::{BlockingRequestor, EndpointRequestor};

/// Entry point for the CLI layer: one method per operation.
pub struct AppStoreConnectService<R: EndpointRequestor = BlockingRequestor> {
    requestor: R,
}

impl AppStoreConnectService<BlockingRequestor> {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = AppStoreConnectClient::new(config)?;
        Ok(Self::with_requestor(BlockingRequestor::new(client)?))
    }
}

impl<R: EndpointRequestor> AppStoreConnectService<R> {
    pub fn with_requestor(requestor: R) -> Self {
        Self { requestor }
    }

    pub fn list_users(&self, options: ListUsersOptions) -> Result<Vec<User>, ListUsersError> {
        ListUsersOperation::new(options).execute(&self.requestor)
    }

    pub fn get_user_info(&self, options: GetUserInfoOptions) -> Result<User, GetUserInfoError> {
        GetUserInfoOperation::new(options).execute(&self.requestor)
    }

    pub fn list_user_invitations(
        &self,
        options: ListUserInvitationsOptions,
    ) -> Result<Vec<UserInvitation>, ListUserInvitationsError> {
        ListUserInvitationsOperation::new(options).execute(&self.requestor)
    }

    pub fn invite_user(&self, options: InviteUserOptions) -> Result<UserInvitation, InviteUserError> {
        InviteUserOperation::new(options).execute(&self.requestor)
    }

    pub fn cancel_user_invitation(&self, email: &str) -> Result<(), CancelUserInvitationError> {
        CancelUserInvitationOperation::new(email).execute(&self.requestor)
    }

    pub fn get_apps(&self, bundle_ids: Vec<String>) -> Result<Vec<App>, GetAppsError> {
        GetAppsOperation::new(bundle_ids).execute(&self.requestor)
    }

    pub fn list_apps(&self, options: ListAppsOptions) -> Result<Vec<App>, ListAppsError> {
        ListAppsOperation::new(options).execute(&self.requestor)
    }

    pub fn list_certificates(
        &self,
        options: ListCertificatesOptions,
    ) -> Result<Vec<Certificate>, ListCertificatesError> {
        ListCertificatesOperation::new(options).execute(&self.requestor)
    }

    pub fn list_builds(&self, options: ListBuildsOptions) -> Result<Vec<Build>, ListBuildsError> {
        ListBuildsOperation::new(options).execute(&self.requestor)
    }

    pub fn list_build_localizations(
        &self,
        options: ListBuildLocalizationsOptions,
    ) -> Result<Vec<BuildLocalization>, ListBuildLocalizationsError> {
        ListBuildLocalizationsOperation::new(options).execute(&self.requestor)
    }

    pub fn list_pre_release_versions(
        &self,
        options: ListPreReleaseVersionsOptions,
    ) -> Result<Vec<PreReleaseVersion>, ListPreReleaseVersionsError> {
        ListPreReleaseVersionsOperation::new(options).execute(&self.requestor)
    }
}
