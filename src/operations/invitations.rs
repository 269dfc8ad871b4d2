use serde_json::json;
use thiserror::Error;
use tracing::info;

use super::users::{UserRole, role_names};
use super::{ApiOperation, GetAppsError, GetAppsOperation};
use crate::endpoint;
use crate::error::ApiError;
use crate::model::UserInvitation;
use crate::requestor::EndpointRequestor;
use crate::resources::UserInvitationCreateAttributes;

#[derive(Debug, Clone, Default)]
pub struct ListUserInvitationsOptions {
    pub emails: Vec<String>,
    pub roles: Vec<UserRole>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListUserInvitationsError {
    #[error("No pending invitations found matching filters: {0}")]
    NoInvitationsFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct ListUserInvitationsOperation {
    options: ListUserInvitationsOptions,
}

impl ListUserInvitationsOperation {
    pub fn new(options: ListUserInvitationsOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListUserInvitationsOperation {
    type Output = Vec<UserInvitation>;
    type Error = ListUserInvitationsError;

    fn execute<R: EndpointRequestor>(
        &self,
        requestor: &R,
    ) -> Result<Vec<UserInvitation>, ListUserInvitationsError> {
        let options = &self.options;
        let endpoint = endpoint::user_invitations()
            .filter("email", &options.emails)
            .filter("roles", &role_names(&options.roles))
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListUserInvitationsError::NoInvitationsFound(
                endpoint.request().describe_filters(),
            ));
        }
        Ok(response.data.iter().map(UserInvitation::from).collect())
    }
}

#[derive(Debug, Clone)]
pub struct InviteUserOptions {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<UserRole>,
    pub all_apps_visible: bool,
    pub provisioning_allowed: bool,
    /// Apps the invitee may see when `all_apps_visible` is off.
    pub bundle_ids: Vec<String>,
}

#[derive(Debug, Error)]
pub enum InviteUserError {
    #[error(transparent)]
    Apps(#[from] GetAppsError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct InviteUserOperation {
    options: InviteUserOptions,
}

impl InviteUserOperation {
    pub fn new(options: InviteUserOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for InviteUserOperation {
    type Output = UserInvitation;
    type Error = InviteUserError;

    fn execute<R: EndpointRequestor>(
        &self,
        requestor: &R,
    ) -> Result<UserInvitation, InviteUserError> {
        let options = &self.options;

        let visible_app_ids: Vec<String> = if options.bundle_ids.is_empty() {
            Vec::new()
        } else {
            GetAppsOperation::new(options.bundle_ids.clone())
                .execute(requestor)?
                .into_iter()
                .map(|app| app.id)
                .collect()
        };

        let attributes = UserInvitationCreateAttributes {
            email: options.email.clone(),
            first_name: options.first_name.clone(),
            last_name: options.last_name.clone(),
            roles: role_names(&options.roles)
                .into_iter()
                .map(str::to_string)
                .collect(),
            all_apps_visible: options.all_apps_visible,
            provisioning_allowed: options.provisioning_allowed,
        };
        let mut data = json!({
            "type": "userInvitations",
            "attributes": attributes,
        });
        if !visible_app_ids.is_empty() {
            let apps: Vec<_> = visible_app_ids
                .iter()
                .map(|id| json!({ "type": "apps", "id": id }))
                .collect();
            data["relationships"] = json!({ "visibleApps": { "data": apps } });
        }

        let response = requestor.request(&endpoint::invite_user(json!({ "data": data })))?;
        info!(email = %options.email, "invitation sent");
        Ok(UserInvitation::from(&response.data))
    }
}

#[derive(Debug, Error)]
pub enum CancelUserInvitationError {
    #[error("No pending invitation found for email: {0}")]
    InvitationNotFound(String),

    #[error("Found {count} pending invitations for email {email}, expected exactly one")]
    MultipleInvitationsFound { email: String, count: usize },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Resolves a pending invitation by email, then deletes it.
#[derive(Debug, Clone)]
pub struct CancelUserInvitationOperation {
    email: String,
}

impl CancelUserInvitationOperation {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    fn invitation_id<R: EndpointRequestor>(
        &self,
        requestor: &R,
    ) -> Result<String, CancelUserInvitationError> {
        let endpoint = endpoint::user_invitations().filter("email", &[self.email.as_str()]);
        let response = requestor.request(&endpoint)?;

        match response.data.as_slice() {
            [] => Err(CancelUserInvitationError::InvitationNotFound(
                self.email.clone(),
            )),
            [invitation] => Ok(invitation.id.clone()),
            invitations => Err(CancelUserInvitationError::MultipleInvitationsFound {
                email: self.email.clone(),
                count: invitations.len(),
            }),
        }
    }
}

impl ApiOperation for CancelUserInvitationOperation {
    type Output = ();
    type Error = CancelUserInvitationError;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<(), CancelUserInvitationError> {
        let id = self.invitation_id(requestor)?;
        info!(email = %self.email, invitation = %id, "cancelling invitation");
        requestor.request_empty(&endpoint::cancel_user_invitation(&id))?;
        Ok(())
    }
}
