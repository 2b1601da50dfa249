//! Blocking client tests over a scripted transport.
//!
//! These pin down the re-authentication protocol by counting physical
//! requests per endpoint.

mod common;

use std::sync::Arc;

use common::{BASE, Reply, ScriptedTransport, config, write_blob, write_valid_wav};
use serde_json::json;
use voiceprint_core::error::{AuthError, Error, TransportError, UploadError};
use voiceprint_core::transport::RequestBody;
use voiceprint_core::{
    BlockingVoiceprintClient, ClientConfig, FilesMode, LogoutPolicy, OnHttpError,
};
use voiceprint_http::BlockingClient;

fn client(
    transport: &Arc<ScriptedTransport>,
    auto_refresh: bool,
) -> BlockingClient<Arc<ScriptedTransport>> {
    BlockingClient::with_transport(config(auto_refresh), transport.clone())
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn endless_forbidden_stops_after_two_attempts() {
    let transport = ScriptedTransport::new()
        .on("/files", [Reply::status(403, "Forbidden")])
        .on("/refresh", [Reply::tokens("t2", "r2")]);
    let client = client(&transport, true);

    let err = client
        .get("/files", vec![], OnHttpError::ReturnNone)
        .unwrap_err();

    assert!(err.is_token_expired());
    assert_eq!(transport.calls("/files"), 2);
    assert_eq!(transport.calls("/refresh"), 1);
    assert_eq!(transport.calls("/login"), 0);
}

#[test]
fn forbidden_without_auto_refresh_is_terminal() {
    let transport = ScriptedTransport::new().on("/files", [Reply::status(403, "Forbidden")]);
    let client = client(&transport, false);

    let err = client.get("/files", vec![], OnHttpError::Raise).unwrap_err();
    assert_eq!(err.status(), Some(403));

    let none = client.get("/files", vec![], OnHttpError::ReturnNone).unwrap();
    assert!(none.is_none());
    assert_eq!(transport.total_calls(), 2);
}

#[test]
fn recovery_then_success_returns_body_and_cookies() {
    let transport = ScriptedTransport::new()
        .on(
            "/files",
            [
                Reply::status(403, "Forbidden"),
                Reply::with_cookie(200, r#"{"files": []}"#, "sid", "s2"),
            ],
        )
        .on("/refresh", [Reply::tokens("t2", "r2")]);
    let client = client(&transport, true);

    let body = client.get("/files", vec![], OnHttpError::Raise).unwrap();

    assert_eq!(body, Some(json!({"files": []})));
    let creds = client.credentials();
    assert_eq!(creds.access_token().unwrap().as_str(), "t2");
    assert_eq!(creds.refresh_token().unwrap().as_str(), "r2");
    assert_eq!(creds.cookies().get("sid"), Some("s2"));
    assert_eq!(transport.calls("/files"), 2);
}

#[test]
fn failed_recovery_does_not_retry() {
    let transport = ScriptedTransport::new()
        .on("/files", [Reply::status(403, "Forbidden")])
        .on("/refresh", [Reply::status(401, "")])
        .on("/login", [Reply::status(401, "")]);
    let client = client(&transport, true);

    let err = client.get("/files", vec![], OnHttpError::Raise).unwrap_err();

    assert!(err.is_token_expired());
    assert_eq!(transport.calls("/files"), 1);
    assert_eq!(transport.calls("/refresh"), 1);
    assert_eq!(transport.calls("/login"), 1);
}

#[test]
fn relogin_rescues_failed_refresh() {
    let transport = ScriptedTransport::new()
        .on(
            "/files",
            [Reply::status(403, ""), Reply::status(200, r#"{"ok":1}"#)],
        )
        .on("/refresh", [Reply::status(500, "")])
        .on("/login", [Reply::tokens("t3", "r3")]);
    let client = client(&transport, true);

    let body = client.get("/files", vec![], OnHttpError::Raise).unwrap();
    assert_eq!(body, Some(json!({"ok": 1})));
    assert_eq!(client.credentials().access_token().unwrap().as_str(), "t3");
}

#[test]
fn incomplete_recovery_response_counts_as_failure() {
    let transport = ScriptedTransport::new()
        .on("/files", [Reply::status(403, "")])
        .on("/refresh", [Reply::status(200, r#"{"token":"only"}"#)])
        .on("/login", [Reply::status(200, r#"{"refresh_token":"only"}"#)]);
    let client = client(&transport, true);

    let err = client.get("/files", vec![], OnHttpError::Raise).unwrap_err();
    assert!(err.is_token_expired());
    assert!(client.credentials().access_token().is_none());
}

#[test]
fn refresh_rejected_then_recovered_returns_none() {
    let transport = ScriptedTransport::new().on(
        "/refresh",
        [Reply::status(403, ""), Reply::tokens("t2", "r2")],
    );
    let client = client(&transport, true);

    let result = client.refresh(OnHttpError::Raise).unwrap();

    assert!(result.is_none());
    assert_eq!(transport.calls("/refresh"), 2);
    assert_eq!(client.credentials().access_token().unwrap().as_str(), "t2");
}

#[test]
fn transport_errors_are_not_retried() {
    let transport = ScriptedTransport::new().on("/files", [Reply::Timeout]);
    let client = client(&transport, true);

    match client.get("/files", vec![], OnHttpError::ReturnNone) {
        Err(Error::Transport(TransportError::Timeout { .. })) => {}
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(transport.total_calls(), 1);
}

#[test]
fn banned_account_is_not_recovered() {
    let transport = ScriptedTransport::new()
        .on(
            "/files",
            [Reply::status(403, r#"{"error":"account_banned","message":"abuse"}"#)],
        )
        .on("/refresh", [Reply::tokens("t", "r")]);
    let client = client(&transport, true);

    match client.get("/files", vec![], OnHttpError::ReturnNone) {
        Err(Error::Auth(AuthError::AccountBanned { reason })) => assert_eq!(reason, "abuse"),
        other => panic!("expected banned, got {:?}", other),
    }
    assert_eq!(transport.calls("/refresh"), 0);
}

#[test]
fn every_request_carries_the_api_key() {
    let transport = ScriptedTransport::new()
        .on("/files", [Reply::status(403, "")])
        .on("/refresh", [Reply::status(401, "")])
        .on("/login", [Reply::status(401, "")]);
    let client = client(&transport, true);
    let _ = client.get("/files", vec![], OnHttpError::Raise);

    for request in transport.requests() {
        assert_eq!(request.header("authorization"), Some("Bearer test-key"));
    }
}

// ============================================================================
// Auth Tests
// ============================================================================

#[test]
fn login_then_logout_clears_tokens() {
    let transport = ScriptedTransport::new()
        .on("/login", [Reply::tokens("t1", "r1")])
        .on("/logout", [Reply::status(200, "")]);
    let client = client(&transport, false);

    let response = client.login(OnHttpError::Raise).unwrap().unwrap();
    assert_eq!(response.token.as_deref(), Some("t1"));
    assert_eq!(client.credentials().refresh_token().unwrap().as_str(), "r1");

    client.logout().unwrap();
    let creds = client.credentials();
    assert!(creds.access_token().is_none());
    assert!(creds.refresh_token().is_none());
}

#[test]
fn login_failure_respects_on_error() {
    let transport = ScriptedTransport::new().on("/login", [Reply::status(401, "bad key")]);
    let client = client(&transport, false);

    assert!(client.login(OnHttpError::ReturnNone).unwrap().is_none());
    match client.login(OnHttpError::Raise) {
        Err(Error::Http(err)) => {
            assert_eq!(err.status, 401);
            assert_eq!(err.body, "bad key");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[test]
fn partial_refresh_keeps_old_refresh_token() {
    let transport = ScriptedTransport::new()
        .on("/login", [Reply::tokens("t1", "r1")])
        .on("/refresh", [Reply::status(200, r#"{"token":"t2"}"#)]);
    let client = client(&transport, false);
    client.login(OnHttpError::Raise).unwrap();

    client.refresh(OnHttpError::Raise).unwrap();

    let creds = client.credentials();
    assert_eq!(creds.access_token().unwrap().as_str(), "t2");
    assert_eq!(creds.refresh_token().unwrap().as_str(), "r1");
    match &transport.requests()[1].body {
        RequestBody::Json(body) => assert_eq!(body, &json!({"refresh_token": "r1"})),
        other => panic!("expected JSON body, got {:?}", other),
    }
}

#[test]
fn strict_logout_failure_is_an_error() {
    let transport = ScriptedTransport::new()
        .on("/login", [Reply::tokens("t1", "r1")])
        .on("/logout", [Reply::status(500, "")]);
    let client = client(&transport, false);
    client.login(OnHttpError::Raise).unwrap();

    assert!(matches!(
        client.logout(),
        Err(Error::Auth(AuthError::LogoutFailed))
    ));
    assert!(client.credentials().access_token().is_some());
}

#[test]
fn lenient_logout_failure_keeps_tokens() {
    let transport = ScriptedTransport::new()
        .on("/login", [Reply::tokens("t1", "r1")])
        .on("/logout", [Reply::status(500, "")]);
    let config = ClientConfig::new("test-key")
        .base_url(BASE)
        .logout_policy(LogoutPolicy::Lenient)
        .resolve()
        .unwrap();
    let client = BlockingClient::with_transport(config, transport.clone());
    client.login(OnHttpError::Raise).unwrap();

    assert!(client.logout().unwrap().is_none());
    assert_eq!(client.credentials().access_token().unwrap().as_str(), "t1");
}

#[test]
fn ensure_authenticated_prefers_refresh() {
    let transport = ScriptedTransport::new()
        .on("/login", [Reply::tokens("t1", "r1")])
        .on("/refresh", [Reply::tokens("t2", "r2")]);
    let client = client(&transport, false);

    let first = client.ensure_authenticated().unwrap();
    assert_eq!(first.token.as_deref(), Some("t1"));

    let second = client.ensure_authenticated().unwrap();
    assert_eq!(second.token.as_deref(), Some("t2"));
    assert_eq!(transport.calls("/login"), 1);
    assert_eq!(transport.calls("/refresh"), 1);
}

#[test]
fn ensure_authenticated_falls_back_to_login() {
    let transport = ScriptedTransport::new()
        .on("/login", [Reply::tokens("t1", "r1"), Reply::tokens("t3", "r3")])
        .on("/refresh", [Reply::status(401, "")]);
    let client = client(&transport, false);
    client.login(OnHttpError::Raise).unwrap();

    let response = client.ensure_authenticated().unwrap();
    assert_eq!(response.token.as_deref(), Some("t3"));
}

#[test]
fn recovery_helpers_send_cookies_without_replacing_them() {
    let transport = ScriptedTransport::new()
        .on(
            "/login",
            [Reply::with_cookie(200, r#"{"token":"t1","refresh_token":"r1"}"#, "sid", "s1")],
        )
        .on(
            "/refresh",
            [Reply::with_cookie(
                200,
                r#"{"token":"t2","refresh_token":"r2"}"#,
                "sid",
                "other",
            )],
        );
    let client = client(&transport, false);
    client.login(OnHttpError::Raise).unwrap();

    assert!(client.try_refresh_session());

    let refresh = &transport.requests()[1];
    assert_eq!(refresh.cookies.get("sid"), Some("s1"));
    assert_eq!(client.credentials().cookies().get("sid"), Some("s1"));
    assert_eq!(client.credentials().access_token().unwrap().as_str(), "t2");
}

#[test]
fn recovery_helpers_never_raise() {
    let transport = ScriptedTransport::new()
        .on("/refresh", [Reply::Timeout])
        .on("/login", [Reply::status(200, "not json")]);
    let client = client(&transport, true);

    assert!(!client.try_refresh_session());
    assert!(!client.try_relogin());
}

// ============================================================================
// Service Tests
// ============================================================================

#[test]
fn files_sends_target_and_mode() {
    let transport = ScriptedTransport::new().on("/files", [Reply::status(200, r#"{"files":[]}"#)]);
    let client = client(&transport, false);

    let body = client
        .voiceprint()
        .files(Some("alice"), FilesMode::List)
        .unwrap();

    assert_eq!(body, json!({"files": []}));
    let request = &transport.requests()[0];
    assert_eq!(
        request.params,
        vec![
            ("target_name".to_string(), "alice".to_string()),
            ("mode".to_string(), "list".to_string()),
        ]
    );
}

#[test]
fn oversized_wav_is_rejected_without_traffic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.wav");
    write_blob(&path, 12 * 1024 * 1024);
    let transport = ScriptedTransport::new();
    let client = client(&transport, true);

    let err = client.voiceprint().upload("alice", &path, None).unwrap_err();

    assert!(matches!(err, Error::Upload(UploadError::TooLarge { .. })));
    assert_eq!(transport.total_calls(), 0);
}

#[test]
fn flac_is_rejected_without_traffic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voice.flac");
    write_blob(&path, 1024);
    let transport = ScriptedTransport::new();
    let client = client(&transport, true);

    let err = client.voiceprint().upload("alice", &path, None).unwrap_err();

    assert!(matches!(
        err,
        Error::Upload(UploadError::UnsupportedFormat { .. })
    ));
    assert_eq!(transport.total_calls(), 0);
}

#[test]
fn valid_wav_is_posted_as_multipart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voice.wav");
    write_valid_wav(&path);
    let transport = ScriptedTransport::new().on("/upload", [Reply::status(200, r#"{"id":7}"#)]);
    let client = client(&transport, false);

    let body = client
        .voiceprint()
        .upload("alice", &path, Some("renamed.wav"))
        .unwrap();

    assert_eq!(body, json!({"id": 7}));
    match &transport.requests()[0].body {
        RequestBody::Multipart(form) => {
            let debug = format!("{:?}", form);
            assert!(debug.contains("renamed.wav"));
            assert!(debug.contains("alice"));
        }
        other => panic!("expected multipart body, got {:?}", other),
    }
}
