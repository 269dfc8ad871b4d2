mod common;

use asc_cli::endpoint::Method;
use asc_cli::operations::{
    ApiOperation, GetAppsError, GetAppsOperation, ListAppsError, ListAppsOperation,
    ListAppsOptions, ListBuildLocalizationsError, ListBuildLocalizationsOperation,
    ListBuildLocalizationsOptions, ListBuildsError, ListBuildsOperation, ListBuildsOptions,
    ListCertificatesError, ListCertificatesOperation, ListCertificatesOptions,
    ListPreReleaseVersionsError, ListPreReleaseVersionsOperation, ListPreReleaseVersionsOptions,
};
use asc_cli::{ApiError, AppStoreConnectService};
use common::{StubRequestor, app, document, document_with_included};
use serde_json::{Value, json};

fn build(id: &str, app_id: &str, version_id: &str, number: &str) -> Value {
    json!({
        "type": "builds",
        "id": id,
        "attributes": {
            "version": number,
            "uploadedDate": "2026-10-01T12:00:00Z",
            "expired": false,
            "minOsVersion": "16.0",
            "processingState": "VALID"
        },
        "relationships": {
            "app": { "data": { "type": "apps", "id": app_id } },
            "preReleaseVersion": { "data": { "type": "preReleaseVersions", "id": version_id } }
        }
    })
}

fn pre_release_version(id: &str, app_id: &str, version: &str) -> Value {
    json!({
        "type": "preReleaseVersions",
        "id": id,
        "attributes": { "platform": "IOS", "version": version },
        "relationships": { "app": { "data": { "type": "apps", "id": app_id } } }
    })
}

#[test]
fn get_apps_keeps_exact_bundle_id_matches_only() {
    // The server filter also matches on prefixes.
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/apps",
        document(json!([
            app("a1", "com.example.app"),
            app("a2", "com.example.app.widget")
        ])),
    );

    let apps = GetAppsOperation::new(vec!["com.example.app".to_string()])
        .execute(&stub)
        .unwrap();

    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].id, "a1");
    assert_eq!(
        stub.requests()[0].query_value("filter[bundleId]"),
        Some("com.example.app")
    );
}

#[test]
fn get_apps_without_bundle_ids_sends_nothing() {
    let stub = StubRequestor::new();

    let result = GetAppsOperation::new(Vec::new()).execute(&stub);

    assert!(matches!(result, Err(GetAppsError::NoBundleIds)));
    assert!(stub.requests().is_empty());
}

#[test]
fn get_apps_with_empty_response_is_no_apps_matching() {
    let stub = StubRequestor::new().respond(Method::Get, "v1/apps", document(json!([])));

    let result = GetAppsOperation::new(vec!["com.missing".to_string()]).execute(&stub);

    match result {
        Err(GetAppsError::NoAppsMatching(ids)) => assert_eq!(ids, vec!["com.missing"]),
        other => panic!("expected NoAppsMatching, got {other:?}"),
    }
}

#[test]
fn get_apps_names_every_unresolved_bundle_id() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/apps",
        document(json!([app("a1", "com.a")])),
    );

    let result = GetAppsOperation::new(vec![
        "com.a".to_string(),
        "com.b".to_string(),
        "com.c".to_string(),
    ])
    .execute(&stub);

    match result {
        Err(GetAppsError::AppsDoNotExist(missing)) => assert_eq!(missing, vec!["com.b", "com.c"]),
        other => panic!("expected AppsDoNotExist, got {other:?}"),
    }
    assert_eq!(
        stub.requests()[0].query_value("filter[bundleId]"),
        Some("com.a,com.b,com.c")
    );
}

#[test]
fn list_apps_reports_the_filters_when_empty() {
    let stub = StubRequestor::new().respond(Method::Get, "v1/apps", document(json!([])));
    let options = ListAppsOptions {
        names: vec!["Weather".to_string()],
        skus: vec!["W1".to_string()],
        ..Default::default()
    };

    let result = ListAppsOperation::new(options).execute(&stub);

    match result {
        Err(ListAppsError::NoAppsFound(filters)) => assert_eq!(filters, "name=Weather, sku=W1"),
        other => panic!("expected NoAppsFound, got {other:?}"),
    }
}

#[test]
fn list_certificates_without_results_cannot_find_certificate() {
    let stub = StubRequestor::new().respond(Method::Get, "v1/certificates", document(json!([])));
    let options = ListCertificatesOptions {
        serial_numbers: vec!["ABC123".to_string()],
        ..Default::default()
    };

    let result = ListCertificatesOperation::new(options).execute(&stub);

    let error = result.unwrap_err();
    assert!(matches!(
        error,
        ListCertificatesError::CouldNotFindCertificate(_)
    ));
    assert_eq!(
        error.to_string(),
        "Couldn't find certificate with input filters: serialNumber=ABC123"
    );
}

#[test]
fn list_certificates_maps_attributes() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/certificates",
        document(json!([{
            "type": "certificates",
            "id": "c1",
            "attributes": {
                "name": "Apple Distribution: Example",
                "certificateType": "DISTRIBUTION",
                "serialNumber": "ABC123",
                "platform": "IOS",
                "expirationDate": "2027-01-01T00:00:00.000+0000"
            }
        }])),
    );

    let certificates = ListCertificatesOperation::new(ListCertificatesOptions::default())
        .execute(&stub)
        .unwrap();

    assert_eq!(certificates[0].id, "c1");
    assert_eq!(certificates[0].serial_number.as_deref(), Some("ABC123"));
    assert_eq!(certificates[0].display_name, None);
}

#[test]
fn http_status_errors_reach_the_caller_unchanged() {
    let stub = StubRequestor::new().fail(Method::Get, "v1/certificates", 403, "Forbidden");

    let result =
        ListCertificatesOperation::new(ListCertificatesOptions::default()).execute(&stub);

    assert!(matches!(
        result,
        Err(ListCertificatesError::Api(ApiError::Status { status: 403, .. }))
    ));
}

#[test]
fn malformed_bodies_are_decode_errors() {
    let stub = StubRequestor::new().respond_raw(Method::Get, "v1/apps", "not json");

    let result = ListAppsOperation::new(ListAppsOptions::default()).execute(&stub);

    assert!(matches!(result, Err(ListAppsError::Api(ApiError::Decode(_)))));
}

#[test]
fn list_builds_resolves_apps_then_joins_included_resources() {
    let stub = StubRequestor::new()
        .respond(
            Method::Get,
            "v1/apps",
            document(json!([app("a1", "com.example.app")])),
        )
        .respond(
            Method::Get,
            "v1/builds",
            document_with_included(
                json!([build("b1", "a1", "p1", "42")]),
                json!([
                    app("a1", "com.example.app"),
                    pre_release_version("p1", "a1", "1.4.0"),
                    { "type": "buildBetaDetails", "id": "x1" }
                ]),
            ),
        );
    let options = ListBuildsOptions {
        bundle_ids: vec!["com.example.app".to_string()],
        processing_states: vec!["VALID".to_string()],
        expired: Some(false),
        ..Default::default()
    };

    let builds = ListBuildsOperation::new(options).execute(&stub).unwrap();

    assert_eq!(builds.len(), 1);
    let found = &builds[0];
    assert_eq!(found.version.as_deref(), Some("42"));
    assert_eq!(found.pre_release_version.as_deref(), Some("1.4.0"));
    assert_eq!(
        found.app.as_ref().and_then(|a| a.bundle_id.as_deref()),
        Some("com.example.app")
    );

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    let builds_request = &requests[1];
    assert_eq!(builds_request.query_value("filter[app]"), Some("a1"));
    assert_eq!(builds_request.query_value("filter[processingState]"), Some("VALID"));
    assert_eq!(builds_request.query_value("filter[expired]"), Some("false"));
    assert_eq!(builds_request.query_value("include"), Some("app,preReleaseVersion"));
}

#[test]
fn list_builds_stops_when_an_app_is_missing() {
    let stub = StubRequestor::new().respond(Method::Get, "v1/apps", document(json!([])));
    let options = ListBuildsOptions {
        bundle_ids: vec!["com.gone".to_string()],
        ..Default::default()
    };

    let result = ListBuildsOperation::new(options).execute(&stub);

    assert!(matches!(
        result,
        Err(ListBuildsError::Apps(GetAppsError::NoAppsMatching(_)))
    ));
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn list_builds_without_bundle_ids_never_lists_every_build() {
    let stub = StubRequestor::new();

    let result = ListBuildsOperation::new(ListBuildsOptions::default()).execute(&stub);

    assert!(matches!(
        result,
        Err(ListBuildsError::Apps(GetAppsError::NoBundleIds))
    ));
    assert!(stub.requests().is_empty());
}

#[test]
fn list_builds_without_results_is_no_builds_found() {
    let stub = StubRequestor::new()
        .respond(
            Method::Get,
            "v1/apps",
            document(json!([app("a1", "com.example.app")])),
        )
        .respond(Method::Get, "v1/builds", document(json!([])));
    let options = ListBuildsOptions {
        bundle_ids: vec!["com.example.app".to_string()],
        versions: vec!["7".to_string()],
        ..Default::default()
    };

    let error = ListBuildsOperation::new(options)
        .execute(&stub)
        .unwrap_err();

    match error {
        ListBuildsError::NoBuildsFound(filters) => assert_eq!(filters, "app=a1, version=7"),
        other => panic!("expected NoBuildsFound, got {other:?}"),
    }
}

#[test]
fn list_build_localizations_filters_by_build() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/betaBuildLocalizations",
        document(json!([{
            "type": "betaBuildLocalizations",
            "id": "l1",
            "attributes": { "locale": "en-US", "whatsNew": "Bug fixes\nand more" }
        }])),
    );
    let options = ListBuildLocalizationsOptions {
        build_id: "b1".to_string(),
        ..Default::default()
    };

    let localizations = ListBuildLocalizationsOperation::new(options)
        .execute(&stub)
        .unwrap();

    assert_eq!(localizations[0].locale.as_deref(), Some("en-US"));
    assert_eq!(
        localizations[0].whats_new.as_deref(),
        Some("Bug fixes\nand more")
    );
    assert_eq!(stub.requests()[0].query_value("filter[build]"), Some("b1"));
}

#[test]
fn list_build_localizations_without_results_names_the_build() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/betaBuildLocalizations",
        document(json!([])),
    );
    let options = ListBuildLocalizationsOptions {
        build_id: "b1".to_string(),
        ..Default::default()
    };

    let result = ListBuildLocalizationsOperation::new(options).execute(&stub);

    assert!(matches!(
        result,
        Err(ListBuildLocalizationsError::NoLocalizationsFound(ref id)) if id == "b1"
    ));
}

#[test]
fn pre_release_versions_without_bundle_ids_skip_app_lookup() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/preReleaseVersions",
        document_with_included(
            json!([
                pre_release_version("p1", "a1", "1.0"),
                pre_release_version("p2", "a2", "2.0")
            ]),
            json!([app("a1", "com.example.one")]),
        ),
    );

    let versions = ListPreReleaseVersionsOperation::new(ListPreReleaseVersionsOptions::default())
        .execute(&stub)
        .unwrap();

    assert_eq!(stub.requests().len(), 1);
    assert_eq!(stub.requests()[0].query_value("filter[app]"), None);
    assert_eq!(stub.requests()[0].query_value("include"), Some("app"));
    assert_eq!(
        versions[0].app.as_ref().map(|a| a.id.as_str()),
        Some("a1")
    );
    // a2 was not included, so the join leaves it empty.
    assert_eq!(versions[1].app, None);
    assert_eq!(versions[1].version.as_deref(), Some("2.0"));
}

#[test]
fn pre_release_versions_for_bundle_ids_filter_by_resolved_apps() {
    let stub = StubRequestor::new()
        .respond(
            Method::Get,
            "v1/apps",
            document(json!([
                app("a1", "com.example.one"),
                app("a2", "com.example.two")
            ])),
        )
        .respond(
            Method::Get,
            "v1/preReleaseVersions",
            document_with_included(
                json!([pre_release_version("p1", "a2", "3.1")]),
                json!([app("a2", "com.example.two")]),
            ),
        );
    let options = ListPreReleaseVersionsOptions {
        bundle_ids: vec!["com.example.one".to_string(), "com.example.two".to_string()],
        platforms: vec!["IOS".to_string()],
        ..Default::default()
    };

    let versions = ListPreReleaseVersionsOperation::new(options)
        .execute(&stub)
        .unwrap();

    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version.as_deref(), Some("3.1"));
    assert_eq!(
        versions[0].app.as_ref().and_then(|a| a.bundle_id.as_deref()),
        Some("com.example.two")
    );

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].query_value("filter[bundleId]"),
        Some("com.example.one,com.example.two")
    );
    assert_eq!(requests[1].query_value("filter[app]"), Some("a1,a2"));
    assert_eq!(requests[1].query_value("filter[platform]"), Some("IOS"));
    assert_eq!(requests[1].query_value("include"), Some("app"));
}

#[test]
fn pre_release_versions_stop_when_an_app_is_missing() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/apps",
        document(json!([app("a1", "com.example.one")])),
    );
    let options = ListPreReleaseVersionsOptions {
        bundle_ids: vec!["com.example.one".to_string(), "com.gone".to_string()],
        ..Default::default()
    };

    let result = ListPreReleaseVersionsOperation::new(options).execute(&stub);

    match result {
        Err(ListPreReleaseVersionsError::Apps(GetAppsError::AppsDoNotExist(missing))) => {
            assert_eq!(missing, vec!["com.gone"])
        }
        other => panic!("expected AppsDoNotExist, got {other:?}"),
    }
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn service_delegates_to_operations() {
    let stub = StubRequestor::new().respond(
        Method::Get,
        "v1/apps",
        document(json!([app("a1", "com.example.app")])),
    );
    let service = AppStoreConnectService::with_requestor(stub);

    let apps = service
        .get_apps(vec!["com.example.app".to_string()])
        .unwrap();

    assert_eq!(apps[0].name.as_deref(), Some("App a1"));
}
