//! Integration tests for the GitHub client using wiremock

use core::time::Duration;
use npm_health::facts::RepoSpec;
use npm_health::facts::hosting::{ActivityRecord, CommunityHealthRecord, HostingClient, HostingError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, token: Option<&str>) -> HostingClient {
    HostingClient::new(token, server.uri(), "npm-health-tests", Duration::from_secs(5)).unwrap()
}

fn widget() -> RepoSpec {
    RepoSpec::new("acme", "widget")
}

async fn mount_search(server: &MockServer, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_issue_counts(server: &MockServer, open: u64, closed: u64) {
    mount_search(server, "repo:acme/widget is:issue is:open", json!({ "total_count": open, "items": [] })).await;
    mount_search(server, "repo:acme/widget is:issue is:closed", json!({ "total_count": closed, "items": [] })).await;
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_repository_sends_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stargazers_count": 4200,
            "forks_count": 310,
            "pushed_at": "2025-06-08T10:00:00Z",
            "archived": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = client(&server, Some("secret-token")).fetch_repository(&widget()).await.unwrap();
    assert_eq!(repo.stargazers_count, Some(4200));
    assert_eq!(repo.forks_count, Some(310));
    assert_eq!(repo.archived, Some(false));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_repository_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = client(&server, None).fetch_repository(&widget()).await.unwrap_err();
    assert!(matches!(err, HostingError::RepositoryNotFound(_)), "unexpected error: {err:?}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_repository_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 203.0.113.7. (But here's the good news: ...)"
        })))
        .mount(&server)
        .await;

    let err = client(&server, None).fetch_repository(&widget()).await.unwrap_err();
    assert_eq!(err, HostingError::RateLimited);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_repository_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server, None).fetch_repository(&widget()).await.unwrap_err();
    assert!(matches!(err, HostingError::Api(_)), "unexpected error: {err:?}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_community_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget/community/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "health_percentage": 71,
            "files": {
                "readme": { "url": "https://api.github.com/repos/acme/widget/contents/README.md" },
                "license": { "key": "mit" },
                "contributing": null,
                "code_of_conduct": null
            }
        })))
        .mount(&server)
        .await;

    let profile = client(&server, None).fetch_community_profile(&widget()).await.unwrap();
    let record = CommunityHealthRecord::from_profile(&profile);

    assert_eq!(record.health_percentage, 71);
    assert!(record.has_readme);
    assert!(record.has_license);
    assert!(!record.has_contributing);
    assert!(!record.has_code_of_conduct);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_activity() {
    let server = MockServer::start().await;
    mount_issue_counts(&server, 12, 88).await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", "repo:acme/widget is:pr is:merged"))
        .and(query_param("sort", "updated"))
        .and(query_param("order", "desc"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 250,
            "items": [{ "number": 314, "html_url": "https://github.com/acme/widget/pull/314" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget/pulls/314"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 314,
            "created_at": "2025-06-01T08:00:00Z",
            "merged_at": "2025-06-01T13:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server, None).fetch_activity(&widget()).await.unwrap();

    assert_eq!(record.open_issues_count, 12);
    assert_eq!(record.closed_issues_count, 88);
    assert_eq!(record.total_issues_count, 100);
    assert_eq!(record.last_pr_merged_at.as_deref(), Some("2025-06-01T13:30:00Z"));
    assert_eq!(record.last_pr_info.as_deref(), Some("created 5 hours ago"));
    assert_eq!(record.last_pr_url.as_deref(), Some("https://github.com/acme/widget/pull/314"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_activity_without_merged_pull_requests() {
    let server = MockServer::start().await;
    mount_issue_counts(&server, 3, 4).await;
    mount_search(&server, "repo:acme/widget is:pr is:merged", json!({ "total_count": 0, "items": [] })).await;

    let record = client(&server, None).fetch_activity(&widget()).await.unwrap();

    assert_eq!(
        record,
        ActivityRecord {
            open_issues_count: 3,
            closed_issues_count: 4,
            total_issues_count: 7,
            ..ActivityRecord::default()
        }
    );
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_activity_fails_when_pull_request_lookup_fails() {
    let server = MockServer::start().await;
    mount_issue_counts(&server, 3, 4).await;
    mount_search(
        &server,
        "repo:acme/widget is:pr is:merged",
        json!({ "total_count": 1, "items": [{ "number": 5, "html_url": "https://github.com/acme/widget/pull/5" }] }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widget/pulls/5"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server, None).fetch_activity(&widget()).await.unwrap_err();
    assert!(matches!(err, HostingError::Api(_)), "unexpected error: {err:?}");
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_fetch_activity_search_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server, None).fetch_activity(&widget()).await.unwrap_err();
    assert_eq!(err, HostingError::RateLimited);
}
