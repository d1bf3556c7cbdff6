use httpmock::prelude::*;
use withings::{Client, ClientConfig, MeasureType, ParamValue, Params, RequestToken};

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::new()
        .with_consumer("consumer-key", "consumer-secret")
        .with_token("user-token", "user-secret")
        .with_user_agent("withings-test/1.0")
        .with_base_url(server.base_url())
        .with_oauth_base_url(server.url("/account"));
    Client::new(config).expect("client should build")
}

#[test]
fn test_body_measurements_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/measure")
            .query_param("action", "getmeas")
            .query_param("userid", "29")
            .query_param("oauth_token", "user-token")
            .header("user-agent", "withings-test/1.0");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"status": 0, "body": {"updatetime": 1249409679, "measuregrps": [
                    {"grpid": 2909, "attrib": 0, "date": 1222930968, "category": 1,
                     "measures": [{"value": 79300, "type": 1, "unit": -3}]}
                ]}}"#,
            );
    });

    let client = client_for(&server);
    let groups = client
        .body_measurements(29, Params::new())
        .expect("body measurements should succeed");

    mock.assert();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].grpid, Some(2909));
    assert!((groups[0].value_of(MeasureType::Weight).unwrap() - 79.3).abs() < 1e-9);
}

#[test]
fn test_create_notification_posts_form() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/notify")
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status": 0}"#);
    });

    let client = client_for(&server);
    let mut options = Params::new();
    options.insert(
        "callbackurl".to_string(),
        ParamValue::from("https://example.com/hook"),
    );
    options.insert("appli".to_string(), ParamValue::from(1));

    let response = client
        .create_notification(29, options)
        .expect("subscription should succeed");

    mock.assert();
    assert!(response.is_success());
}

#[test]
fn test_api_error_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v2/sleep");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status": 2554}"#);
    });

    let client = client_for(&server);
    let error = client.sleep_series(29, Params::new()).unwrap_err();

    mock.assert();
    assert_eq!(error.api_status(), Some(2554));
}

#[test]
fn test_http_error_over_http() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/notify");
        then.status(500).body("internal error");
    });

    let client = client_for(&server);
    let error = client.list_notifications(29, Params::new()).unwrap_err();

    mock.assert();
    assert_eq!(error.http_status(), Some(500));
}

#[test]
fn test_oauth_handshake() {
    let server = MockServer::start();
    let request_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/account/request_token")
            .query_param("oauth_callback", "https://example.com/callback")
            .query_param("oauth_consumer_key", "consumer-key");
        then.status(200)
            .body("oauth_token=request-token&oauth_token_secret=request-secret");
    });
    let access_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/account/access_token")
            .query_param("oauth_token", "request-token")
            .query_param("oauth_verifier", "verifier-123");
        then.status(200)
            .body("oauth_token=access-token&oauth_token_secret=access-secret&userid=29");
    });

    let client = Client::new(
        ClientConfig::new()
            .with_consumer("consumer-key", "consumer-secret")
            .with_oauth_base_url(server.url("/account")),
    )
    .expect("client should build");
    assert!(!client.is_authenticated());

    let request_token = client
        .request_token("https://example.com/callback")
        .expect("request token should succeed");
    assert_eq!(
        request_token,
        RequestToken {
            token: "request-token".to_string(),
            secret: "request-secret".to_string(),
        }
    );

    let authorize = client.authorize_url(&request_token).unwrap();
    assert_eq!(authorize.path(), "/account/authorize");
    assert!(authorize
        .query_pairs()
        .any(|(k, v)| k == "oauth_token" && v == "request-token"));

    let access = client
        .access_token(&request_token, Some("verifier-123"))
        .expect("access token should succeed");

    request_mock.assert();
    access_mock.assert();
    assert_eq!(access.token, "access-token");
    assert_eq!(access.secret, "access-secret");
    assert_eq!(access.user_id.as_deref(), Some("29"));
    assert_eq!(access.session().token(), "access-token");
}

#[test]
#[ignore] // Run with: cargo test --test http_tests -- --ignored
fn test_live_sleep_summary() {
    let config = ClientConfig::from_map([
        ("consumer_key", std::env::var("WITHINGS_CONSUMER_KEY").unwrap()),
        ("consumer_secret", std::env::var("WITHINGS_CONSUMER_SECRET").unwrap()),
        ("token", std::env::var("WITHINGS_TOKEN").unwrap()),
        ("secret", std::env::var("WITHINGS_SECRET").unwrap()),
    ]);
    let user_id: i64 = std::env::var("WITHINGS_USER_ID").unwrap().parse().unwrap();
    let client = Client::new(config).expect("client should build");

    let mut options = Params::new();
    options.insert("startdateymd".to_string(), ParamValue::from("2024-01-01"));
    options.insert("enddateymd".to_string(), ParamValue::from("2024-01-07"));

    let summaries = client
        .sleep_summary(user_id, options)
        .expect("failed to fetch sleep summary");
    println!("Fetched {} sleep summaries", summaries.len());
}
