//! Tests for `Intercom::request`, configuration and the smoke test.

use serde_json::json;

use super::test_fixtures::{CapturedLogs, MockClient, body_json, configured, header, unconfigured};
use super::{ApiResult, Intercom, RequestOptions, SelfTest, SelfTestError};
use crate::config::{ConfigureOptions, MapEnvironment};
use crate::transport::HttpError;

mod token_precedence {
    use super::*;

    #[tokio::test]
    async fn missing_token_fails_without_network() {
        let intercom = unconfigured(MockClient::default());

        let result = intercom.request(RequestOptions::new("/me")).await.unwrap();

        assert_eq!(result.error(), Some("missing access token"));
        assert_eq!(result.status(), None);
        assert_eq!(intercom.client().calls(), 0);
    }

    #[tokio::test]
    async fn environment_token_is_used_when_nothing_stored() {
        let intercom = Intercom::new(MockClient::default())
            .with_environment(MapEnvironment::new().with("intercom.token", "env-token"));

        intercom.request(RequestOptions::new("/me")).await.unwrap();

        let req = intercom.client().last_request();
        assert_eq!(header(&req, "authorization"), Some("Bearer env-token"));
    }

    #[tokio::test]
    async fn stored_token_beats_environment() {
        let mut intercom = Intercom::new(MockClient::default())
            .with_environment(MapEnvironment::new().with("intercom.accessToken", "env-token"));
        intercom.configure(&ConfigureOptions::new().with_access_token("stored-token"));

        intercom.request(RequestOptions::new("/me")).await.unwrap();

        let req = intercom.client().last_request();
        assert_eq!(header(&req, "authorization"), Some("Bearer stored-token"));
    }

    #[tokio::test]
    async fn call_token_beats_stored_token() {
        let intercom = configured(MockClient::default());

        intercom
            .request(RequestOptions::new("/me").with_token(Some("  call-token ")))
            .await
            .unwrap();

        let req = intercom.client().last_request();
        assert_eq!(header(&req, "authorization"), Some("Bearer call-token"));
    }
}

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn get_request_uses_defaults() {
        let intercom = configured(MockClient::default());

        intercom.request(RequestOptions::new("me")).await.unwrap();

        let req = intercom.client().last_request();
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.url.as_str(), "https://api.intercom.io/me");
        assert_eq!(header(&req, "accept"), Some("application/json"));
        assert_eq!(header(&req, "intercom-version"), Some("2.9"));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn configured_base_url_and_version_are_used() {
        let mut intercom = configured(MockClient::default());
        intercom.configure(
            &ConfigureOptions::new()
                .with_base_url("https://api.au.intercom.io/")
                .with_version(" 2.11 "),
        );

        intercom
            .request(RequestOptions::new("/admins").with_query_param("page", "2"))
            .await
            .unwrap();

        let req = intercom.client().last_request();
        assert_eq!(req.url.as_str(), "https://api.au.intercom.io/admins?page=2");
        assert_eq!(header(&req, "intercom-version"), Some("2.11"));
    }

    #[tokio::test]
    async fn body_request_defaults_to_post_json() {
        let intercom = configured(MockClient::default());

        intercom
            .request(RequestOptions::new("/tags").with_body(json!({"name": "vip"})))
            .await
            .unwrap();

        let req = intercom.client().last_request();
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(header(&req, "content-type"), Some("application/json"));
        assert_eq!(body_json(&req), json!({"name": "vip"}));
    }

    #[tokio::test]
    async fn caller_authorization_overrides_computed_one() {
        let intercom = configured(MockClient::default());

        intercom
            .request(RequestOptions::new("/me").with_header("Authorization", "Bearer other"))
            .await
            .unwrap();

        let req = intercom.client().last_request();
        assert_eq!(header(&req, "authorization"), Some("Bearer other"));
    }

    #[tokio::test]
    async fn invalid_method_fails_without_network() {
        let intercom = configured(MockClient::default());

        let result = intercom
            .request(RequestOptions::new("/me").with_method("G E T"))
            .await
            .unwrap();

        assert_eq!(result.error(), Some("invalid method 'G E T'"));
        assert_eq!(intercom.client().calls(), 0);
    }
}

mod responses {
    use super::*;

    #[tokio::test]
    async fn success_response_is_normalized() {
        let intercom = configured(MockClient::replying(201, r#"{"id":"c_1"}"#));

        let result = intercom
            .request(RequestOptions::new("/contacts").with_body(json!({"email": "a@b.com"})))
            .await
            .unwrap();

        assert_eq!(
            result,
            ApiResult::Success {
                data: json!({"id": "c_1"}),
                status: 201
            }
        );
    }

    #[tokio::test]
    async fn failure_response_is_normalized() {
        let intercom = configured(MockClient::replying(401, "unauthorized"));

        let result = intercom.request(RequestOptions::new("/me")).await.unwrap();

        assert_eq!(
            result,
            ApiResult::Failure {
                error: "unauthorized".to_string(),
                status: Some(401),
                data: Some(json!("unauthorized")),
            }
        );
    }

    #[tokio::test]
    async fn transport_error_propagates() {
        let intercom = configured(MockClient::failing(HttpError::Timeout));

        let result = intercom.request(RequestOptions::new("/me")).await;

        assert!(matches!(result, Err(HttpError::Timeout)));
        assert_eq!(intercom.client().calls(), 1);
    }
}

mod configure {
    use super::*;

    #[test]
    fn empty_update_keeps_settings() {
        let mut intercom = configured(MockClient::default());
        let before = intercom.settings().clone();

        intercom.configure(&ConfigureOptions::default());

        assert_eq!(intercom.settings(), &before);
    }

    #[test]
    fn base_url_update_keeps_token() {
        let mut intercom = unconfigured(MockClient::default());
        intercom.configure(&ConfigureOptions::new().with_access_token(" t "));
        intercom.configure(&ConfigureOptions::new().with_base_url("https://x/"));

        assert_eq!(intercom.settings().access_token(), Some("t"));
        assert_eq!(intercom.settings().base_url(), Some("https://x"));
    }
}

mod self_test {
    use super::*;

    #[tokio::test]
    async fn skips_without_token() {
        let intercom = unconfigured(MockClient::default());

        let outcome = intercom.self_test().await.unwrap();

        assert_eq!(outcome, SelfTest::Skipped("missing accessToken"));
        assert_eq!(outcome.to_string(), "skipped: missing accessToken");
        assert_eq!(intercom.client().calls(), 0);
    }

    #[tokio::test]
    async fn succeeds_on_2xx_from_me() {
        let intercom = configured(MockClient::replying(200, r#"{"type":"admin"}"#));

        let outcome = intercom.self_test().await.unwrap();

        assert_eq!(outcome.to_string(), "ok");
        let req = intercom.client().last_request();
        assert_eq!(req.method, http::Method::GET);
        assert_eq!(req.url.path(), "/me");
    }

    #[tokio::test]
    async fn failure_result_is_raised() {
        let intercom = configured(MockClient::replying(401, "unauthorized"));

        let error = intercom.self_test().await.unwrap_err();

        assert!(matches!(
            &error,
            SelfTestError::Failed { status: Some(401), error } if error == "unauthorized"
        ));
        assert_eq!(error.to_string(), "self test failed: unauthorized");
    }

    #[tokio::test]
    async fn transport_error_is_raised() {
        let intercom = configured(MockClient::failing(HttpError::Timeout));

        let error = intercom.self_test().await.unwrap_err();

        assert!(matches!(error, SelfTestError::Transport(HttpError::Timeout)));
    }
}

mod debug_event {
    use super::*;

    #[tokio::test]
    async fn debug_logs_method_and_path_only() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let intercom = configured(MockClient::default());

        intercom
            .request(
                RequestOptions::new("contacts")
                    .with_body(json!({"email": "a@b.c"}))
                    .with_debug(true),
            )
            .await
            .unwrap();

        let output = logs.contents();
        assert!(output.contains("method=POST"), "{output}");
        assert!(output.contains("path=/contacts"), "{output}");
        assert!(!output.contains("stored-token"), "{output}");
        assert!(!output.contains("a@b.c"), "{output}");
    }

    #[tokio::test]
    async fn no_event_without_debug() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let intercom = configured(MockClient::default());

        intercom.request(RequestOptions::new("/me")).await.unwrap();

        assert!(!logs.contents().contains("path=/me"));
    }

    #[tokio::test]
    async fn rejected_request_emits_no_event() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let intercom = unconfigured(MockClient::default());

        intercom
            .request(RequestOptions::new("/me").with_debug(true))
            .await
            .unwrap();

        assert!(!logs.contents().contains("path=/me"));
    }
}
