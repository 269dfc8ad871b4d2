#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use asc_cli::endpoint::{Method, Request};
use asc_cli::{ApiError, EndpointRequestor};
use serde_json::{Value, json};

enum Canned {
    Body(String),
    Status(u16, String),
}

/// Answers requests from canned bodies keyed by method and path, and records
/// every request it sees.
#[derive(Default)]
pub struct StubRequestor {
    responses: HashMap<(Method, String), Canned>,
    requests: RefCell<Vec<Request>>,
}

impl StubRequestor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, body: Value) -> Self {
        self.respond_raw(method, path, &body.to_string())
    }

    pub fn respond_raw(mut self, method: Method, path: &str, body: &str) -> Self {
        self.responses
            .insert((method, path.to_string()), Canned::Body(body.to_string()));
        self
    }

    pub fn respond_empty(self, method: Method, path: &str) -> Self {
        self.respond_raw(method, path, "")
    }

    pub fn fail(mut self, method: Method, path: &str, status: u16, message: &str) -> Self {
        self.responses.insert(
            (method, path.to_string()),
            Canned::Status(status, message.to_string()),
        );
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl EndpointRequestor for StubRequestor {
    fn send(&self, request: &Request) -> Result<String, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        match self.responses.get(&(request.method, request.path.clone())) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status, message)) => Err(ApiError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => panic!("unexpected request: {} {}", request.method, request.path),
        }
    }
}

pub fn document(data: Value) -> Value {
    json!({
        "data": data,
        "links": { "self": "https://api.appstoreconnect.apple.com/v1/resource" }
    })
}

pub fn document_with_included(data: Value, included: Value) -> Value {
    json!({
        "data": data,
        "included": included,
        "links": { "self": "https://api.appstoreconnect.apple.com/v1/resource" }
    })
}

pub fn app(id: &str, bundle_id: &str) -> Value {
    json!({
        "type": "apps",
        "id": id,
        "attributes": { "bundleId": bundle_id, "name": format!("App {id}"), "sku": id }
    })
}

pub fn user(id: &str, username: &str, visible_app_ids: &[&str]) -> Value {
    let visible: Vec<Value> = visible_app_ids
        .iter()
        .map(|id| json!({ "type": "apps", "id": id }))
        .collect();
    json!({
        "type": "users",
        "id": id,
        "attributes": {
            "username": username,
            "firstName": "Jane",
            "lastName": "Doe",
            "roles": ["ADMIN", "DEVELOPER"],
            "allAppsVisible": false,
            "provisioningAllowed": true
        },
        "relationships": { "visibleApps": { "data": visible } }
    })
}

pub fn invitation(id: &str, email: &str) -> Value {
    json!({
        "type": "userInvitations",
        "id": id,
        "attributes": {
            "email": email,
            "firstName": "Sam",
            "lastName": "Lee",
            "roles": ["DEVELOPER"],
            "expirationDate": "2026-11-01T00:00:00Z",
            "allAppsVisible": true,
            "provisioningAllowed": false
        }
    })
}
