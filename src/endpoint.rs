//! Typed descriptions of the App Store Connect calls this CLI makes.
//!
//! An [`Endpoint<T>`] is a [`Request`] plus the type its response body
//! decodes into. Filters follow the API's `filter[field]=a,b` convention.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::resources::{
    AppAttributes, BetaBuildLocalizationAttributes, BuildAttributes, CertificateAttributes,
    PreReleaseVersionAttributes, UserAttributes, UserInvitationAttributes,
};
use crate::response::{Document, SingleDocument};

pub type AppsResponse = Document<AppAttributes>;
pub type UsersResponse = Document<UserAttributes>;
pub type UserInvitationsResponse = Document<UserInvitationAttributes>;
pub type UserInvitationResponse = SingleDocument<UserInvitationAttributes>;
pub type CertificatesResponse = Document<CertificateAttributes>;
pub type BuildsResponse = Document<BuildAttributes>;
pub type BetaBuildLocalizationsResponse = Document<BetaBuildLocalizationAttributes>;
pub type PreReleaseVersionsResponse = Document<PreReleaseVersionAttributes>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// The untyped part of an endpoint: everything needed to put it on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `filter[...]` parameters as `field=value` pairs, for error messages.
    pub fn describe_filters(&self) -> String {
        let filters: Vec<String> = self
            .query
            .iter()
            .filter_map(|(key, value)| {
                let field = key.strip_prefix("filter[")?.strip_suffix(']')?;
                Some(format!("{field}={value}"))
            })
            .collect();
        if filters.is_empty() {
            "none".to_string()
        } else {
            filters.join(", ")
        }
    }
}

/// Marker for endpoints whose successful response has no body.
#[derive(Debug, Clone, Copy)]
pub struct NoContent;

#[derive(Debug, Clone)]
pub struct Endpoint<T> {
    request: Request,
    response: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request: Request {
                method,
                path: path.into(),
                query: Vec::new(),
                body: None,
            },
            response: PhantomData,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Adds `filter[field]=v1,v2`. Empty value lists add nothing.
    pub fn filter<S: AsRef<str>>(self, field: &str, values: &[S]) -> Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.param(format!("filter[{field}]"), joined)
    }

    pub fn include(self, relationships: &[&str]) -> Self {
        if relationships.is_empty() {
            return self;
        }
        self.param("include".to_string(), relationships.join(","))
    }

    pub fn sort(self, key: Option<&str>) -> Self {
        match key {
            Some(key) => self.param("sort".to_string(), key.to_string()),
            None => self,
        }
    }

    pub fn limit(self, limit: Option<u32>) -> Self {
        match limit {
            Some(limit) => self.param("limit".to_string(), limit.to_string()),
            None => self,
        }
    }

    fn param(mut self, name: String, value: String) -> Self {
        self.request.query.push((name, value));
        self
    }

    fn body(mut self, body: Value) -> Self {
        self.request.body = Some(body);
        self
    }
}

pub fn apps() -> Endpoint<AppsResponse> {
    Endpoint::new(Method::Get, "v1/apps")
}

pub fn users() -> Endpoint<UsersResponse> {
    Endpoint::new(Method::Get, "v1/users")
}

pub fn user_invitations() -> Endpoint<UserInvitationsResponse> {
    Endpoint::new(Method::Get, "v1/userInvitations")
}

pub fn invite_user(body: Value) -> Endpoint<UserInvitationResponse> {
    Endpoint::new(Method::Post, "v1/userInvitations").body(body)
}

pub fn cancel_user_invitation(invitation_id: &str) -> Endpoint<NoContent> {
    Endpoint::new(Method::Delete, format!("v1/userInvitations/{invitation_id}"))
}

pub fn certificates() -> Endpoint<CertificatesResponse> {
    Endpoint::new(Method::Get, "v1/certificates")
}

pub fn builds() -> Endpoint<BuildsResponse> {
    Endpoint::new(Method::Get, "v1/builds")
}

pub fn beta_build_localizations() -> Endpoint<BetaBuildLocalizationsResponse> {
    Endpoint::new(Method::Get, "v1/betaBuildLocalizations")
}

pub fn pre_release_versions() -> Endpoint<PreReleaseVersionsResponse> {
    Endpoint::new(Method::Get, "v1/preReleaseVersions")
}
