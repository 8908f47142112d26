//! Tests for validated configuration.

use serde_json::json;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{Operation, ValidatedConfig};
use crate::contact::{ContactFields, DateInput};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["intercom-lite"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod precedence {
    use super::*;

    #[test]
    fn cli_values_override_toml() {
        let cli = cli(&[
            "self-test",
            "--token",
            "cli-token",
            "--base-url",
            "https://cli.example.com",
            "--api-version",
            "2.11",
        ]);
        let toml = toml(
            r#"
            [intercom]
            access_token = "toml-token"
            base_url = "https://toml.example.com"
            version = "2.10"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.settings.access_token.as_deref(), Some("cli-token"));
        assert_eq!(
            config.settings.base_url.as_deref(),
            Some("https://cli.example.com")
        );
        assert_eq!(config.settings.version.as_deref(), Some("2.11"));
    }

    #[test]
    fn toml_fills_missing_cli_values() {
        let cli = cli(&["self-test", "--token", "cli-token"]);
        let toml = toml(
            r#"
            [intercom]
            access_token = "toml-token"
            version = "2.10"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.settings.access_token.as_deref(), Some("cli-token"));
        assert_eq!(config.settings.version.as_deref(), Some("2.10"));
        assert!(config.settings.base_url.is_none());
    }

    #[test]
    fn nothing_configured_leaves_settings_empty() {
        let config = ValidatedConfig::from_raw(&cli(&["self-test"]), None).unwrap();

        assert!(config.settings.is_empty());
        assert!(!config.verbose);
    }

    #[test]
    fn verbose_from_either_source() {
        let from_toml =
            ValidatedConfig::from_raw(&cli(&["self-test"]), Some(&toml("[log]\nverbose = true")))
                .unwrap();
        let from_cli = ValidatedConfig::from_raw(&cli(&["self-test", "-v"]), None).unwrap();

        assert!(from_toml.verbose);
        assert!(from_cli.verbose);
    }
}

mod validation {
    use super::*;

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["self-test", "--base-url", "nope"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { url, .. }) if url == "nope"));
    }

    #[test]
    fn version_with_control_characters_is_rejected() {
        let toml = toml("[intercom]\nversion = \"2.9\\u0007\"\n");

        let result = ValidatedConfig::from_raw(&cli(&["self-test"]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidVersion(_))));
    }

    #[test]
    fn init_is_not_an_operation() {
        let result = ValidatedConfig::from_raw(&cli(&["init"]), None);

        assert!(matches!(result, Err(ConfigError::NotAnOperation("init"))));
    }
}

mod operations {
    use super::*;

    fn operation(args: &[&str]) -> Operation {
        ValidatedConfig::from_raw(&cli(args), None)
            .unwrap()
            .operation
    }

    #[test]
    fn self_test() {
        assert_eq!(operation(&["self-test"]), Operation::SelfTest);
    }

    #[test]
    fn create_contact_builds_fields() {
        let op = operation(&[
            "create-contact",
            "--email",
            "a@b.com",
            "--owner-id",
            "0",
            "--signed-up-at",
            "1700000000.5",
            "--last-seen-at",
            "2024-01-15",
            "--attr",
            "plan=pro",
            "--attr",
            "seats=12",
            "--attr",
            "tags=[\"a\",\"b\"]",
        ]);

        let expected = ContactFields::new()
            .with_email("a@b.com")
            .with_owner_id(0)
            .with_signed_up_at(DateInput::Seconds(1_700_000_000.5))
            .with_last_seen_at(DateInput::Text("2024-01-15".to_string()))
            .with_attribute("plan", "pro")
            .with_attribute("seats", 12)
            .with_attribute("tags", json!(["a", "b"]));
        assert_eq!(op, Operation::CreateContact(expected));
    }

    #[test]
    fn attribute_without_separator_is_rejected() {
        let result = ValidatedConfig::from_raw(
            &cli(&["create-contact", "--email", "a@b.com", "--attr", "plan"]),
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPair { field: "attribute", .. })
        ));
    }

    #[test]
    fn update_contact_keeps_id() {
        let op = operation(&["update-contact", "--id", "42", "--name", "Jo"]);

        assert_eq!(
            op,
            Operation::UpdateContact {
                id: "42".to_string(),
                fields: ContactFields::new().with_name("Jo"),
            }
        );
    }

    #[test]
    fn search_parses_json_query() {
        let op = operation(&[
            "search",
            "--query",
            r#"{"field":"email","operator":"=","value":"a@b.com"}"#,
        ]);

        assert_eq!(
            op,
            Operation::Search(json!({"field": "email", "operator": "=", "value": "a@b.com"}))
        );
    }

    #[test]
    fn search_with_invalid_json_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["search", "--query", "{oops"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidJson { .. })));
    }

    #[test]
    fn request_builds_options() {
        let op = operation(&[
            "request",
            "--path",
            "/tags",
            "--method",
            "post",
            "--query",
            "a=1",
            "--body",
            r#"{"name":"vip"}"#,
            "--header",
            "Authorization: Bearer a=b",
            "--header",
            "X-Trace=1",
            "--debug",
        ]);

        let Operation::Request(options) = op else {
            panic!("expected request");
        };
        assert_eq!(options.path, "/tags");
        assert_eq!(options.method.as_deref(), Some("post"));
        assert_eq!(
            options.query,
            Some(vec![("a".to_string(), "1".to_string())])
        );
        assert_eq!(options.body, Some(json!({"name": "vip"})));
        assert_eq!(
            options.headers,
            vec![
                (
                    "Authorization".to_string(),
                    Some("Bearer a=b".to_string())
                ),
                ("X-Trace".to_string(), Some("1".to_string())),
            ]
        );
        assert!(options.debug);
    }

    #[test]
    fn request_header_without_separator_is_rejected() {
        let result = ValidatedConfig::from_raw(
            &cli(&["request", "--path", "/me", "--header", "NoSeparator"]),
            None,
        );

        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }
}

mod loading {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_explicit_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[intercom]\naccess_token = \"from-file\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = ValidatedConfig::load(&cli(&["self-test", "--config", &path])).unwrap();

        assert_eq!(config.settings.access_token.as_deref(), Some("from-file"));
        assert_eq!(config.config_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ValidatedConfig::load(&cli(&["self-test", "--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn write_default_config_creates_parseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intercom-lite.toml");

        super::super::write_default_config(&path).unwrap();

        let config = TomlConfig::load(&path).unwrap();
        assert!(config.intercom.access_token.is_none());
    }

    #[test]
    fn display_hides_token_value() {
        let config = ValidatedConfig::from_raw(&cli(&["self-test", "--token", "s3cret"]), None)
            .unwrap();
        let shown = config.to_string();

        assert!(shown.contains("token: set"));
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("operation: self-test"));
    }
}
