//! Serde tests for core types.
//!
//! These pin the JSON shapes callers persist (credentials) and hand in
//! (post descriptions).

use crate::{
    Credentials, MediaRef, MediaStatus, PostDescription, ProviderKind, PublishResult,
    PublishStatus,
};

// ============================================================================
// ProviderKind Serde Tests
// ============================================================================

#[test]
fn test_provider_kind_serde_roundtrip_all_variants() {
    for kind in ProviderKind::all() {
        let json = serde_json::to_string(kind).unwrap();
        let deserialized: ProviderKind = serde_json::from_str(&json).unwrap();
        assert_eq!(*kind, deserialized, "Round-trip failed for {:?}", kind);
    }
}

#[test]
fn test_provider_kind_deserialize_lowercase() {
    let test_cases = vec![
        (r#""pinterest""#, ProviderKind::Pinterest),
        (r#""tiktok""#, ProviderKind::TikTok),
    ];

    for (json, expected) in test_cases {
        let result: ProviderKind = serde_json::from_str(json).unwrap();
        assert_eq!(result, expected, "Failed for {}", json);
    }
}

#[test]
fn test_provider_kind_invalid_deserialize() {
    let result: Result<ProviderKind, _> = serde_json::from_str(r#""friendster""#);
    assert!(result.is_err());
}

// ============================================================================
// Credentials Serde Tests
// ============================================================================

#[test]
fn test_credentials_camel_case_and_optional_scopes() {
    let json = r#"{
        "platformUserId": "123",
        "displayName": "Ada",
        "accessToken": "at",
        "refreshToken": null,
        "expiresInSeconds": 3600,
        "avatarUrl": "https://img/a.png",
        "username": "ada"
    }"#;

    let creds: Credentials = serde_json::from_str(json).unwrap();
    assert_eq!(creds.platform_user_id, "123");
    assert_eq!(creds.refresh_token, None);
    assert_eq!(creds.expires_in_seconds, 3600);
    assert!(creds.granted_scopes.is_empty());

    let back = serde_json::to_value(&creds).unwrap();
    assert_eq!(back["accessToken"], "at");
}

// ============================================================================
// PostDescription Serde Tests
// ============================================================================

#[test]
fn test_post_description_minimal() {
    let post: PostDescription =
        serde_json::from_str(r#"{"id": "p1", "message": "hello"}"#).unwrap();
    assert!(post.media.is_empty());
    assert!(post.settings.is_null());
}

#[test]
fn test_media_ref_omits_absent_fields() {
    let json = serde_json::to_value(MediaRef::new("https://x/a.png")).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj.contains_key("path"));

    let with_thumb: MediaRef =
        serde_json::from_str(r#"{"path": "https://x/v.mp4", "thumbnailTimestampMs": 1500}"#)
            .unwrap();
    assert_eq!(with_thumb.thumbnail_timestamp_ms, Some(1500));
}

// ============================================================================
// Status Serde Tests
// ============================================================================

#[test]
fn test_status_lowercase() {
    assert_eq!(serde_json::to_string(&MediaStatus::Succeeded).unwrap(), r#""succeeded""#);
    assert_eq!(serde_json::to_string(&PublishStatus::Failure).unwrap(), r#""failure""#);
}

#[test]
fn test_publish_result_shape() {
    let result = PublishResult::success("p1", "987", "https://www.pinterest.com/pin/987");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["postDescriptionId"], "p1");
    assert_eq!(json["platformPostId"], "987");
    assert_eq!(json["status"], "success");
}
