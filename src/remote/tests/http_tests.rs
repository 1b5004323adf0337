//! `HttpProjectApi` tests against a local mock server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

use crate::config::RemoteSettings;
use crate::remote::{
    adapters::HttpProjectApi,
    domain::{
        FormattableText, HrefLink, ProjectId, RemoteTaskPayload, TaskLinks, VersionId,
        VersionStatus,
    },
    ports::{ProjectApi, RemoteApiError},
};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIC_AUTH: &str = "Basic YXBpa2V5OnNlY3JldA==";

fn client_for(server: &MockServer) -> HttpProjectApi {
    let settings = RemoteSettings::new(format!("{}/", server.uri()), "secret");
    HttpProjectApi::new(&settings).expect("client builds")
}

fn payload() -> RemoteTaskPayload {
    RemoteTaskPayload {
        subject: "Rotate certificates".to_owned(),
        description: FormattableText::markdown("Requested by: Ana"),
        links: TaskLinks {
            project: HrefLink::project(ProjectId::new(4)),
            task_type: HrefLink::new("/api/v3/types/1"),
            status: HrefLink::new("/api/v3/statuses/2"),
            version: Some(HrefLink::version(VersionId::new(9))),
        },
        start_date: None,
        due_date: None,
        estimated_time: Some("PT2H30M".to_owned()),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn list_projects_authenticates_and_reads_embedded_elements() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .and(header("authorization", BASIC_AUTH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {"elements": [
                {"id": 4, "name": "Ops", "identifier": "ops", "active": true,
                 "_links": {"self": {"href": "/api/v3/projects/4"}}},
                {"id": 5, "name": "Old", "identifier": "old", "active": false,
                 "_links": {"self": {"href": "/api/v3/projects/5"}}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client_for(&server)
        .list_projects()
        .await
        .expect("listing succeeds");

    assert_eq!(projects.len(), 2);
    let first = projects.first().expect("first project");
    assert_eq!(first.identifier(), "ops");
    assert_eq!(first.href(), "/api/v3/projects/4");
    assert!(!projects.get(1).expect("second project").is_active());
}

#[tokio::test(flavor = "multi_thread")]
async fn list_versions_maps_description_dates_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/projects/4/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": {"elements": [
                {"id": 9, "name": "Sprint 9", "status": "open",
                 "description": {"format": "plain", "raw": "Q2 hardening"},
                 "startDate": "2025-05-01", "endDate": "2025-05-31"},
                {"id": 10, "name": "Frozen", "status": "locked",
                 "description": {"format": "plain", "raw": null},
                 "startDate": null, "endDate": null}
            ]}
        })))
        .mount(&server)
        .await;

    let versions = client_for(&server)
        .list_versions(ProjectId::new(4))
        .await
        .expect("listing succeeds");

    let sprint = versions.first().expect("first version");
    assert_eq!(sprint.description(), "Q2 hardening");
    assert_eq!(sprint.status(), VersionStatus::Open);
    assert_eq!(sprint.start_date(), NaiveDate::from_ymd_opt(2025, 5, 1));
    assert_eq!(sprint.due_date(), NaiveDate::from_ymd_opt(2025, 5, 31));

    let frozen = versions.get(1).expect("second version");
    assert_eq!(frozen.status(), VersionStatus::Other);
    assert_eq!(frozen.description(), "");
    assert!(frozen.start_date().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_posts_payload_and_reads_links() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/work_packages"))
        .and(body_partial_json(json!({
            "subject": "Rotate certificates",
            "estimatedTime": "PT2H30M",
            "_links": {"version": {"href": "/api/v3/versions/9"}}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 321,
            "subject": "Rotate certificates",
            "_links": {
                "self": {"href": "/api/v3/work_packages/321"},
                "version": {"href": "/api/v3/versions/9"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_task(&payload())
        .await
        .expect("creation succeeds");

    assert_eq!(created.id().value(), 321);
    assert_eq!(created.self_href(), "/api/v3/work_packages/321");
    assert_eq!(created.version_href(), Some("/api/v3/versions/9"));
    assert_eq!(
        created.raw().get("subject"),
        Some(&json!("Rotate certificates"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn created_task_with_null_version_link_has_no_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/work_packages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5,
            "_links": {
                "self": {"href": "/api/v3/work_packages/5"},
                "version": {"href": null}
            }
        })))
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_task(&payload())
        .await
        .expect("creation succeeds");

    assert!(created.version_href().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn error_status_carries_server_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/work_packages"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Subject can't be blank"))
        .mount(&server)
        .await;

    let result = client_for(&server).create_task(&payload()).await;

    assert_eq!(
        result,
        Err(RemoteApiError::Http {
            status: 422,
            body: "Subject can't be blank".to_owned(),
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn truncated_error_body_is_reported_not_dropped() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("listener binds");
    let address = listener.local_addr().expect("local address");
    let server = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("client connects");
        let mut request = [0_u8; 4096];
        let _read = stream.read(&mut request).expect("request arrives");
        stream
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 64\r\n\r\npartial")
            .expect("response written");
    });
    let client = HttpProjectApi::new(&RemoteSettings::new(format!("http://{address}"), "secret"))
        .expect("client builds");

    let result = client.list_projects().await;
    server.join().expect("server thread joins");

    match result {
        Err(RemoteApiError::Http { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.starts_with("<unreadable response body"), "body was {body:?}");
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn json_requests_carry_a_single_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_embedded": {"elements": []}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v3/work_packages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "_links": {"self": {"href": "/api/v3/work_packages/1"}}
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    client.list_projects().await.expect("listing succeeds");
    client.create_task(&payload()).await.expect("creation succeeds");

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let values: Vec<_> = request.headers.get_all("content-type").iter().collect();
        assert_eq!(values, vec!["application/json"], "{} {}", request.method, request.url);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn non_json_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).list_projects().await;

    assert!(matches!(result, Err(RemoteApiError::Decode(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_response_is_a_timeout_not_a_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"_embedded": {"elements": []}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let mut settings = RemoteSettings::new(server.uri(), "secret");
    settings.request_timeout_secs = 1;
    let client = HttpProjectApi::new(&settings).expect("client builds");

    let result = client.list_projects().await;

    assert_eq!(result, Err(RemoteApiError::Timeout(Duration::from_secs(1))));
}

#[tokio::test(flavor = "multi_thread")]
async fn refused_connection_is_a_connection_error() {
    let settings = RemoteSettings::new("http://127.0.0.1:1", "secret");
    let client = HttpProjectApi::new(&settings).expect("client builds");

    let result = client.list_projects().await;

    assert!(matches!(result, Err(RemoteApiError::Connection(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_api_key_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client =
        HttpProjectApi::new(&RemoteSettings::new(server.uri(), "")).expect("client builds");

    let result = client.list_projects().await;

    assert_eq!(result, Err(RemoteApiError::NotConfigured("API key")));
}

#[test]
fn base_url_is_stored_without_trailing_slash() {
    let client = HttpProjectApi::new(&RemoteSettings::new("https://pm.example.test/", "k"))
        .expect("client builds");
    assert_eq!(client.base_url(), "https://pm.example.test");
}
