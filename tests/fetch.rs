//! End-to-end fetch scenarios against a mock GitHub API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ghprofile::session::{Outcome, SearchSession, ViewState};
use ghprofile::{Config, FetchError, GithubClient, aggregate, tally_languages};
use serde_json::{Value, json};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GithubClient {
    let config = Config {
        api_url: server.uri(),
        timeout_secs: 1,
        ..Config::default()
    };
    GithubClient::new(&config).expect("client")
}

fn user_body(server: &MockServer, login: &str) -> Value {
    json!({
        "login": login,
        "name": null,
        "bio": null,
        "avatar_url": format!("{}/avatars/{login}", server.uri()),
        "html_url": format!("https://github.com/{login}"),
        "public_repos": 2,
        "followers": 10,
        "following": 1,
        "public_gists": 0,
        "location": null,
        "blog": "",
        "twitter_username": null,
        "created_at": "2011-01-25T18:44:36Z",
        "repos_url": format!("{}/users/{login}/repos", server.uri()),
    })
}

fn repos_body() -> Value {
    json!([
        {
            "name": "A",
            "description": null,
            "html_url": "https://github.com/octocat/A",
            "stargazers_count": 5,
            "forks_count": 1,
            "language": "Go",
            "updated_at": "2024-01-01T00:00:00Z"
        },
        {
            "name": "B",
            "description": "second",
            "html_url": "https://github.com/octocat/B",
            "stargazers_count": 10,
            "forks_count": 3,
            "language": "Go",
            "updated_at": "2024-02-01T00:00:00Z"
        }
    ])
}

async fn mount_user(server: &MockServer, login: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body(server, login)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn octocat_profile_and_stats() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (profile, repos) = client.fetch_profile("  octocat ").await.expect("fetch");

    assert_eq!(profile.login, "octocat");
    assert_eq!(profile.public_repos, 2);
    assert_eq!(repos.len(), 2);

    let stats = aggregate(&repos);
    assert_eq!(stats.total_stars, 15);
    assert_eq!(stats.total_forks, 4);
    assert_eq!(stats.avg_stars, 7.5);
    assert_eq!(stats.most_starred.map(|r| r.name), Some("B".to_string()));

    let tally = tally_languages(&repos);
    assert_eq!(tally.iter().collect::<Vec<_>>(), vec![("Go", 2)]);
}

#[tokio::test]
async fn blank_username_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("   ").await.unwrap_err();
    assert!(matches!(err, FetchError::Validation));
}

#[tokio::test]
async fn unknown_user_skips_repository_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/nobody"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/nobody/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("nobody").await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound));
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn server_error_on_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("octocat").await.unwrap_err();
    assert!(matches!(err, FetchError::UserFetch { status: 503 }));
}

#[tokio::test]
async fn repository_failure_discards_profile() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("octocat").await.unwrap_err();
    assert!(matches!(err, FetchError::RepoFetch { status: 500 }));
    assert_eq!(err.to_string(), "Failed to fetch repositories");
}

#[tokio::test]
async fn negative_counts_fail_decoding() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "bad", "stargazers_count": -1, "forks_count": 0, "language": null}
        ])))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("octocat").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { what: "repository list", .. }));
}

#[tokio::test]
async fn slow_profile_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_body(&server, "octocat"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("octocat").await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let config = Config {
        api_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 1,
        ..Config::default()
    };
    let client = GithubClient::new(&config).expect("client");

    let err = client.fetch_profile("octocat").await.unwrap_err();
    match err {
        FetchError::Network(message) => {
            // the cause follows reqwest's own top-level message
            assert!(message.starts_with("error sending request: "), "{message}");
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_repos_url_is_a_bad_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"login": "octocat", "repos_url": "not a url"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_profile("octocat").await.unwrap_err();
    match &err {
        FetchError::InvalidRepositoryUrl { url, .. } => assert_eq!(url, "not a url"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.to_string(), "Unexpected response from GitHub");
}

#[tokio::test]
async fn session_writes_latest_search_only() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = SearchSession::new();

    let stale = session.begin("octocat");
    let current = session.begin("octocat");

    assert_eq!(session.run(stale, &client, "octocat").await, Outcome::Superseded);
    match session.run(current, &client, "octocat").await {
        Outcome::Applied(ViewState::Loaded(report)) => {
            assert_eq!(report.stats.total_stars, 15);
            assert_eq!(report.activity.commits.len(), 12);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn session_failure_clears_previous_result() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = SearchSession::new();

    assert!(matches!(
        session.search(&client, "octocat").await,
        Outcome::Applied(ViewState::Loaded(_))
    ));
    session.search(&client, "ghost").await;
    assert_eq!(
        session.view(),
        ViewState::Failed {
            message: "User not found".into()
        }
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_searches_render_only_the_newest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/slowpoke"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_body(&server, "slowpoke"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/slowpoke/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .mount(&server)
        .await;
    mount_user(&server, "octocat").await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repos_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = Arc::new(SearchSession::new());
    let rendered = Arc::new(Mutex::new(Vec::new()));

    let spawn_search = |username: &'static str| {
        let ticket = session.begin(username);
        let session = Arc::clone(&session);
        let client = client.clone();
        let rendered = Arc::clone(&rendered);
        tokio::spawn(async move {
            session
                .run_with(ticket, &client, username, |view| {
                    if let ViewState::Loaded(report) = view {
                        rendered.lock().unwrap().push(report.profile.login.clone());
                    }
                })
                .await
        })
    };

    let slow = spawn_search("slowpoke");
    let fast = spawn_search("octocat");

    assert!(matches!(fast.await.unwrap(), Outcome::Applied(_)));
    assert_eq!(slow.await.unwrap(), Outcome::Superseded);
    assert_eq!(*rendered.lock().unwrap(), vec!["octocat".to_string()]);
}
