// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use activity_journal_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_reject() {
        let err = CoreError::ValidationReject {
            field: "Participants".into(),
            value: "2x".into(),
        };
        assert_eq!(
            err.to_string(),
            "Rejected input for Participants: '2x' is not a valid number"
        );
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound("nothing for these filters".into());
        assert_eq!(err.to_string(), "No activity found: nothing for these filters");
    }

    #[test]
    fn unavailable() {
        let err = CoreError::Unavailable("connection refused".into());
        assert_eq!(
            err.to_string(),
            "Suggestion service unavailable: connection refused"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("bad key".into());
        assert_eq!(err.to_string(), "Invalid configuration: bad key");
    }
}

// ── Classification ──────────────────────────────────────────────────

mod classification {
    use super::*;

    #[test]
    fn fetch_failures() {
        assert!(CoreError::NotFound(String::new()).is_fetch_failure());
        assert!(CoreError::Unavailable(String::new()).is_fetch_failure());
    }

    #[test]
    fn everything_else_is_not_a_fetch_failure() {
        assert!(!CoreError::FileIO(String::new()).is_fetch_failure());
        assert!(!CoreError::Config(String::new()).is_fetch_failure());
        assert!(!CoreError::ValidationReject {
            field: String::new(),
            value: String::new()
        }
        .is_fetch_failure());
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("nope")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: CoreError = toml_err.into();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[tokio::test]
    async fn reqwest_error_redacts_query() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let reqwest_err = reqwest::Client::new()
            .get(format!("http://{addr}/api/activity?participants=3&type=social"))
            .send()
            .await
            .unwrap_err();
        let err: CoreError = reqwest_err.into();
        match err {
            CoreError::Unavailable(msg) => {
                assert!(!msg.contains("participants=3"));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
