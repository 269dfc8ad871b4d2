use clap::ValueEnum;
use thiserror::Error;

use super::ApiOperation;
use crate::endpoint;
use crate::error::ApiError;
use crate::model::User;
use crate::requestor::EndpointRequestor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Finance,
    Technical,
    Sales,
    Marketing,
    Developer,
    AccountHolder,
    ReadOnly,
    AppManager,
    AccessToReports,
    CustomerSupport,
    CreateApps,
    CloudManagedDeveloperId,
    CloudManagedAppDistribution,
}

impl UserRole {
    pub fn as_api_str(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Finance => "FINANCE",
            UserRole::Technical => "TECHNICAL",
            UserRole::Sales => "SALES",
            UserRole::Marketing => "MARKETING",
            UserRole::Developer => "DEVELOPER",
            UserRole::AccountHolder => "ACCOUNT_HOLDER",
            UserRole::ReadOnly => "READ_ONLY",
            UserRole::AppManager => "APP_MANAGER",
            UserRole::AccessToReports => "ACCESS_TO_REPORTS",
            UserRole::CustomerSupport => "CUSTOMER_SUPPORT",
            UserRole::CreateApps => "CREATE_APPS",
            UserRole::CloudManagedDeveloperId => "CLOUD_MANAGED_DEVELOPER_ID",
            UserRole::CloudManagedAppDistribution => "CLOUD_MANAGED_APP_DISTRIBUTION",
        }
    }
}

pub(crate) fn role_names(roles: &[UserRole]) -> Vec<&'static str> {
    roles.iter().map(|role| role.as_api_str()).collect()
}

#[derive(Debug, Clone, Default)]
pub struct ListUsersOptions {
    pub usernames: Vec<String>,
    pub roles: Vec<UserRole>,
    /// App IDs the users must be able to see.
    pub visible_app_ids: Vec<String>,
    pub include_visible_apps: bool,
    pub sort: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ListUsersError {
    #[error("No users found matching filters: {0}")]
    NoUsersFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
pub struct ListUsersOperation {
    options: ListUsersOptions,
}

impl ListUsersOperation {
    pub fn new(options: ListUsersOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for ListUsersOperation {
    type Output = Vec<User>;
    type Error = ListUsersError;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<Vec<User>, ListUsersError> {
        let options = &self.options;
        let include: &[&str] = if options.include_visible_apps {
            &["visibleApps"]
        } else {
            &[]
        };
        let endpoint = endpoint::users()
            .filter("username", &options.usernames)
            .filter("roles", &role_names(&options.roles))
            .filter("visibleApps", &options.visible_app_ids)
            .include(include)
            .sort(options.sort.as_deref())
            .limit(options.limit);
        let response = requestor.request(&endpoint)?;

        if response.data.is_empty() {
            return Err(ListUsersError::NoUsersFound(
                endpoint.request().describe_filters(),
            ));
        }
        Ok(response
            .data
            .iter()
            .map(|user| User::new(user, &response))
            .collect())
    }
}

#[derive(Debug, Error)]
pub enum GetUserInfoError {
    #[error("Couldn't find user with email: {0}")]
    UserNotFound(String),

    #[error("Found {count} users matching email {email}, expected exactly one")]
    MultipleUsersFound { email: String, count: usize },

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Default)]
pub struct GetUserInfoOptions {
    /// The address the user signs in with.
    pub email: String,
}

/// Looks up a single user by email.
#[derive(Debug, Clone)]
pub struct GetUserInfoOperation {
    options: GetUserInfoOptions,
}

impl GetUserInfoOperation {
    pub fn new(options: GetUserInfoOptions) -> Self {
        Self { options }
    }
}

impl ApiOperation for GetUserInfoOperation {
    type Output = User;
    type Error = GetUserInfoError;

    fn execute<R: EndpointRequestor>(&self, requestor: &R) -> Result<User, GetUserInfoError> {
        let email = &self.options.email;
        let endpoint = endpoint::users()
            .filter("username", &[email.as_str()])
            .include(&["visibleApps"]);
        let response = requestor.request(&endpoint)?;

        match response.data.as_slice() {
            [] => Err(GetUserInfoError::UserNotFound(email.clone())),
            [user] => Ok(User::new(user, &response)),
            users => Err(GetUserInfoError::MultipleUsersFound {
                email: email.clone(),
                count: users.len(),
            }),
        }
    }
}
