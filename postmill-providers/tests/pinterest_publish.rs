//! End-to-end Pinterest flows against a scripted transport.

use std::sync::Arc;
use std::time::Duration;

use postmill_core::{
    Credentials, JobControl, MediaRef, PostDescription, ProcessingFailure, ProviderConfig,
    ProviderError, ProviderPublishing,
};
use postmill_providers::PinterestProvider;
use postmill_providers::pinterest::MISSING_COVER_HINT;
use postmill_transport::mock::{ManualClock, ScriptedTransport, SequentialIds};
use postmill_transport::{
    HttpResponse, Method, MultipartPart, ProviderContext, RequestBody, RequestTimeout,
};
use serde_json::{Value, json};

const API: &str = "https://api.test";
const ALL_SCOPES: &str = "boards:read,boards:write,pins:read,pins:write,user_accounts:read";

struct Harness {
    transport: Arc<ScriptedTransport>,
    clock: Arc<ManualClock>,
    provider: PinterestProvider,
}

fn harness() -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let clock = Arc::new(ManualClock::default());
    let ctx = ProviderContext {
        transport: transport.clone(),
        clock: clock.clone(),
        ids: Arc::new(SequentialIds::default()),
    };
    let config = ProviderConfig::new("client", "secret", "https://app.example.com")
        .with_api_base_url(API);
    Harness {
        transport,
        clock,
        provider: PinterestProvider::new(config, ctx),
    }
}

fn credentials() -> Credentials {
    Credentials {
        platform_user_id: "u-1".into(),
        display_name: "ada".into(),
        access_token: "tok".into(),
        refresh_token: Some("refresh-1".into()),
        expires_in_seconds: 3600,
        avatar_url: None,
        username: "ada".into(),
        granted_scopes: vec![],
    }
}

fn post() -> PostDescription {
    PostDescription::new("post-1", "Autumn colors").with_settings(json!({"board": "board-1"}))
}

fn json_body(h: &Harness, index: usize) -> Value {
    h.transport.requests()[index].json_body().cloned().unwrap()
}

fn push_upload_slot(h: &Harness) {
    h.transport
        .push_json(
            201,
            json!({
                "media_id": "m-1",
                "upload_url": "https://uploads.test/bucket",
                "upload_parameters": {"key": "uploads/m-1", "policy": "p0l1cy"}
            }),
        )
        .push(HttpResponse::new(200, vec![0_u8; 16]))
        .push(HttpResponse::new(204, ""));
}

fn push_media_status(h: &Harness, status: &str) {
    h.transport
        .push_json(200, json!({"media_id": "m-1", "status": status}));
}

// ============================================================================
// Publish
// ============================================================================

#[tokio::test]
async fn test_single_image_uses_image_url_without_upload() {
    let h = harness();
    h.transport.push_json(201, json!({"id": "pin-1"}));

    let post = post().with_media(MediaRef::new("https://cdn.example.com/leaves.jpg"));
    let result = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.post_description_id, "post-1");
    assert_eq!(result.platform_post_id, "pin-1");
    assert_eq!(result.release_url, "https://www.pinterest.com/pin/pin-1");

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://api.test/v5/pins");
    assert_eq!(requests[0].header_value("authorization"), Some("Bearer tok"));
    assert_eq!(h.transport.count_matching("/v5/media"), 0);

    assert_eq!(
        json_body(&h, 0),
        json!({
            "board_id": "board-1",
            "description": "Autumn colors",
            "media_source": {"source_type": "image_url", "url": "https://cdn.example.com/leaves.jpg"}
        })
    );
}

#[tokio::test]
async fn test_two_images_keep_declared_order() {
    let h = harness();
    h.transport.push_json(201, json!({"id": "pin-2"}));

    let post = post()
        .with_media(MediaRef::new("https://cdn.example.com/b.png"))
        .with_media(MediaRef::new("https://cdn.example.com/a.png"))
        .with_settings(json!({"board": "board-1", "title": "Two", "link": "https://example.com"}));
    h.provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap();

    let body = json_body(&h, 0);
    assert_eq!(body["media_source"]["source_type"], "multiple_image_urls");
    assert_eq!(
        body["media_source"]["items"],
        json!([{"url": "https://cdn.example.com/b.png"}, {"url": "https://cdn.example.com/a.png"}])
    );
    assert_eq!(body["title"], "Two");
    assert_eq!(body["link"], "https://example.com");
    assert!(body.get("dominant_color").is_none());
    assert!(body.get("alt_text").is_none());
}

#[tokio::test]
async fn test_video_is_uploaded_polled_and_referenced() {
    let h = harness();
    push_upload_slot(&h);
    push_media_status(&h, "registered");
    push_media_status(&h, "processing");
    push_media_status(&h, "succeeded");
    h.transport.push_json(201, json!({"id": "pin-3"}));

    let post = post()
        .with_media(MediaRef::new("https://cdn.example.com/clip.mp4").with_mime("video/mp4"))
        .with_media(MediaRef::new("https://cdn.example.com/cover.jpg"));
    let result = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap();
    assert_eq!(result.platform_post_id, "pin-3");

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 7);

    assert_eq!(requests[0].url, "https://api.test/v5/media");
    assert_eq!(requests[0].json_body(), Some(&json!({"media_type": "video"})));

    assert_eq!(requests[1].method, Method::Get);
    assert_eq!(requests[1].url, "https://cdn.example.com/clip.mp4");
    assert!(requests[1].header_value("authorization").is_none());

    assert_eq!(requests[2].url, "https://uploads.test/bucket");
    match &requests[2].body {
        RequestBody::Multipart(parts) => {
            let names: Vec<&str> = parts.iter().map(MultipartPart::name).collect();
            assert_eq!(names, vec!["key", "policy", "file"]);
        }
        other => panic!("expected multipart, got {other:?}"),
    }

    assert_eq!(h.transport.count_matching("/v5/media/m-1"), 3);
    assert_eq!(h.clock.sleeps(), vec![Duration::from_secs(30); 2]);

    // Media transfers lift the total timeout; API calls keep the default.
    let timeouts: Vec<RequestTimeout> = requests.iter().map(|r| r.timeout).collect();
    assert_eq!(timeouts[0], RequestTimeout::Default);
    assert_eq!(timeouts[1], RequestTimeout::Unbounded);
    assert_eq!(timeouts[2], RequestTimeout::Unbounded);
    assert!(timeouts[3..].iter().all(|t| *t == RequestTimeout::Default));

    assert_eq!(
        json_body(&h, 6)["media_source"],
        json!({
            "source_type": "video_id",
            "media_id": "m-1",
            "cover_image_url": "https://cdn.example.com/cover.jpg"
        })
    );
}

#[tokio::test]
async fn test_ten_pending_polls_fail_without_an_eleventh() {
    let h = harness();
    push_upload_slot(&h);
    for _ in 0..10 {
        push_media_status(&h, "registered");
    }

    let post = post().with_media(MediaRef::new("https://cdn.example.com/clip.mp4"));
    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    match err {
        ProviderError::MediaProcessing {
            reference,
            reason,
            last_status,
            body,
            attempts,
        } => {
            assert_eq!(reference, "m-1");
            assert_eq!(reason, ProcessingFailure::AttemptsExhausted);
            assert_eq!(last_status, "registered");
            assert!(body.contains("\"registered\""));
            assert_eq!(attempts, 10);
        }
        other => panic!("unexpected: {other:?}"),
    }

    assert_eq!(h.transport.count_matching("/v5/media/m-1"), 10);
    assert_eq!(h.transport.count_matching("/v5/pins"), 0);
    assert_eq!(h.clock.sleeps().len(), 9);
}

#[tokio::test]
async fn test_reported_media_failure_stops_polling() {
    let h = harness();
    push_upload_slot(&h);
    push_media_status(&h, "processing");
    push_media_status(&h, "failed");

    let post = post().with_media(MediaRef::new("https://cdn.example.com/clip.mp4"));
    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::MediaProcessing { reason: ProcessingFailure::ReportedFailure, attempts: 2, .. }
    ));
    assert_eq!(h.transport.remaining(), 0);
    assert_eq!(h.transport.count_matching("/v5/pins"), 0);
}

#[tokio::test]
async fn test_cancelled_job_stops_before_sleeping() {
    let h = harness();
    push_upload_slot(&h);
    push_media_status(&h, "registered");

    let control = JobControl::new();
    control.cancel();
    let post = post().with_media(MediaRef::new("https://cdn.example.com/clip.mp4"));
    let err = h
        .provider
        .publish(&post, &credentials(), &control)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::MediaProcessing { reason: ProcessingFailure::Cancelled, attempts: 1, .. }
    ));
    assert!(h.clock.sleeps().is_empty());
}

#[tokio::test]
async fn test_failed_download_is_malformed() {
    let h = harness();
    h.transport
        .push_json(201, json!({"media_id": "m-1", "upload_url": "https://uploads.test/bucket"}))
        .push(HttpResponse::new(404, "not found"));

    let post = post().with_media(MediaRef::new("https://cdn.example.com/gone.mp4"));
    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedRequest { status: Some(404), .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_missing_cover_error_body_is_malformed() {
    let h = harness();
    h.transport.push(HttpResponse::new(
        400,
        r#"{"code":1,"message":"Invalid parameters: cover_image_url or cover_image_content_type is required"}"#,
    ));

    let post = post().with_media(MediaRef::new("https://cdn.example.com/a.jpg"));
    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    match err {
        ProviderError::MalformedRequest { hint, status, body } => {
            assert_eq!(hint, MISSING_COVER_HINT);
            assert_eq!(status, Some(400));
            assert!(body.unwrap().contains("cover_image_url"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_token_requires_refresh() {
    let h = harness();
    h.transport
        .push_json(401, json!({"code": 2, "message": "Authentication failed."}));

    let post = post().with_media(MediaRef::new("https://cdn.example.com/a.jpg"));
    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    assert!(err.requires_refresh());
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_missing_board_fails_before_any_call() {
    let h = harness();
    let post = PostDescription::new("post-1", "m")
        .with_media(MediaRef::new("https://cdn.example.com/clip.mp4"));

    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedRequest { status: None, .. }));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_pin_without_id_is_unclassified() {
    let h = harness();
    h.transport.push_json(201, json!({"board_id": "board-1"}));

    let post = post().with_media(MediaRef::new("https://cdn.example.com/a.jpg"));
    let err = h
        .provider
        .publish(&post, &credentials(), &JobControl::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::UnclassifiedProvider { status: 201, .. }));
}

// ============================================================================
// OAuth
// ============================================================================

#[tokio::test]
async fn test_authorization_request() {
    let h = harness();
    let request = h.provider.build_authorization_request().await.unwrap();

    assert!(request.authorize_url.starts_with("https://www.pinterest.com/oauth/?"));
    assert!(request.authorize_url.contains("client_id=client"));
    assert!(request.authorize_url.contains("response_type=code"));
    assert!(request.authorize_url.contains(
        "redirect_uri=https%3A%2F%2Fapp.example.com%2Fintegrations%2Fsocial%2Fpinterest"
    ));
    assert!(request.authorize_url.contains("scope=boards%3Aread%2Cboards%3Awrite%2C"));
    assert!(request.authorize_url.contains("state=id-1"));
    assert_eq!(request.state, "id-1");
    assert_eq!(request.code_verifier, "id-2");
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_exchange_without_access_token_skips_profile() {
    let h = harness();
    h.transport
        .push_json(200, json!({"response_type": "authorization_code"}));

    let err = h.provider.exchange_code("code-1", "v").await.unwrap_err();

    assert!(matches!(err, ProviderError::AuthExchange { status: 200, .. }));
    assert_eq!(h.transport.requests().len(), 1);
    assert_eq!(h.transport.count_matching("/v5/user_account"), 0);
}

#[tokio::test]
async fn test_exchange_with_missing_scope_is_rejected() {
    let h = harness();
    h.transport.push_json(
        200,
        json!({"access_token": "at", "refresh_token": "rt", "scope": "boards:read,pins:read"}),
    );

    let err = h.provider.exchange_code("code-1", "v").await.unwrap_err();

    match err {
        ProviderError::ScopeMismatch { missing, .. } => {
            assert_eq!(missing, vec!["boards:write", "pins:write", "user_accounts:read"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(h.transport.count_matching("/v5/user_account"), 0);
}

#[tokio::test]
async fn test_exchange_builds_credentials() {
    let h = harness();
    h.transport
        .push_json(
            200,
            json!({"access_token": "at", "refresh_token": "rt", "expires_in": 2_592_000, "scope": ALL_SCOPES}),
        )
        .push_json(
            200,
            json!({"id": "u-42", "username": "ada", "profile_image": "https://i.pinimg.com/ada.jpg"}),
        );

    let creds = h.provider.exchange_code("code-1", "v").await.unwrap();

    assert_eq!(creds.platform_user_id, "u-42");
    assert_eq!(creds.username, "ada");
    assert_eq!(creds.display_name, "ada");
    assert_eq!(creds.access_token, "at");
    assert_eq!(creds.refresh_token.as_deref(), Some("rt"));
    assert_eq!(creds.avatar_url.as_deref(), Some("https://i.pinimg.com/ada.jpg"));

    let requests = h.transport.requests();
    let token = &requests[0];
    assert_eq!(token.url, "https://api.test/v5/oauth/token");
    assert_eq!(token.header_value("authorization"), Some("Basic Y2xpZW50OnNlY3JldA=="));
    assert_eq!(token.form_value("grant_type"), Some("authorization_code"));
    assert_eq!(token.form_value("code"), Some("code-1"));
    assert_eq!(requests[1].header_value("authorization"), Some("Bearer at"));
}

#[tokio::test]
async fn test_refresh_keeps_unrotated_token() {
    let h = harness();
    h.transport
        .push_json(200, json!({"access_token": "at-2", "expires_in": 2_592_000}))
        .push_json(200, json!({"id": "u-42", "username": "ada"}));

    let creds = h.provider.refresh("refresh-1").await.unwrap();

    assert_eq!(creds.access_token, "at-2");
    assert_eq!(creds.refresh_token.as_deref(), Some("refresh-1"));
    let token = &h.transport.requests()[0];
    assert_eq!(token.form_value("grant_type"), Some("refresh_token"));
    assert_eq!(token.form_value("refresh_token"), Some("refresh-1"));
    assert_eq!(token.form_value("scope"), Some(ALL_SCOPES));
}

#[tokio::test]
async fn test_refresh_does_not_validate_scopes() {
    let h = harness();
    h.transport
        .push_json(200, json!({"access_token": "at-2", "refresh_token": "rt-2", "scope": "pins:read"}))
        .push_json(200, json!({"id": "u-42", "username": "ada"}));

    let creds = h.provider.refresh("refresh-1").await.unwrap();
    assert_eq!(creds.refresh_token.as_deref(), Some("rt-2"));
}

// ============================================================================
// Boards and Analytics
// ============================================================================

#[tokio::test]
async fn test_boards_follow_bookmarks() {
    let h = harness();
    h.transport
        .push_json(
            200,
            json!({"items": [{"id": "b-1", "name": "Recipes"}], "bookmark": "c29tZT0x"}),
        )
        .push_json(200, json!({"items": [{"id": "b-2", "name": "Travel"}], "bookmark": null}));

    let boards = h.provider.list_boards("tok").await.unwrap();

    let names: Vec<&str> = boards.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Recipes", "Travel"]);
    let requests = h.transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, "https://api.test/v5/boards?page_size=100");
    assert_eq!(
        requests[1].url,
        "https://api.test/v5/boards?page_size=100&bookmark=c29tZT0x"
    );
}

#[tokio::test]
async fn test_analytics_date_range_and_alignment() {
    let h = harness();
    h.transport.push_json(
        200,
        json!({
            "all": {
                "daily_metrics": [
                    {"date": "2024-05-30", "data_status": "READY",
                     "metrics": {"PIN_CLICK_RATE": 0.5, "IMPRESSION": 100.0, "SAVE": 3.0}},
                    {"date": "2024-05-31", "data_status": "PROCESSING", "metrics": {}},
                    {"date": "2024-06-01", "data_status": "READY",
                     "metrics": {"PIN_CLICK_RATE": 0.25, "IMPRESSION": 40.0, "PIN_CLICK": 1.0, "ENGAGEMENT": 2.0, "SAVE": 0.0}}
                ]
            }
        }),
    );

    let series = h.provider.fetch_analytics("tok", 7).await.unwrap();

    let url = &h.transport.requests()[0].url;
    assert!(url.starts_with("https://api.test/v5/user_account/analytics?"));
    assert!(url.contains("start_date=2024-05-25"));
    assert!(url.contains("end_date=2024-06-01"));

    let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Pin click rate", "Impressions", "Pin Clicks", "Engagement", "Saves"]);
    for s in &series {
        let dates: Vec<String> = s.data.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-05-30", "2024-06-01"], "{}", s.label);
    }
    assert_eq!(series[1].data[0].total, 100.0);
    assert_eq!(series[2].data[0].total, 0.0);
}

#[tokio::test]
async fn test_analytics_lookback_before_earliest_date_is_rejected() {
    let h = harness();
    h.transport.push_json(200, json!({"all": {"daily_metrics": []}}));

    let err = h.provider.fetch_analytics("tok", u32::MAX).await.unwrap_err();

    assert!(matches!(err, ProviderError::MalformedRequest { status: None, .. }), "{err:?}");
    assert!(h.transport.requests().is_empty());
    assert_eq!(h.transport.remaining(), 1);
}
