mod report;
mod sanitize;

pub use report::{write_crash_report, CrashReport, PanicLocation};
pub use sanitize::sanitize_secrets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_redacts_entry_url_token() {
        let input = "navigate failed: http://127.0.0.1:9091/index.html?token=Zx81_aa-q&x=1";
        let result = sanitize_secrets(input);
        assert!(
            !result.contains("Zx81_aa-q"),
            "query token should be redacted, got: {result}"
        );
        assert!(result.contains("token=[REDACTED]&x=1"));
    }

    #[test]
    fn sanitize_redacts_auth_header() {
        let input = "request headers: X-TT-Auth: 0123456789abcdef";
        let result = sanitize_secrets(input);
        assert!(!result.contains("0123456789abcdef"));
        assert!(result.contains("X-TT-Auth: [REDACTED]"));
    }

    #[test]
    fn sanitize_redacts_json_token_field() {
        let input = r#"{"type":"event","name":"auth-token","payload":{"token":"hunter2","port":"9091"}}"#;
        let result = sanitize_secrets(input);
        assert!(!result.contains("hunter2"));
        assert!(result.contains(r#""token":"[REDACTED]""#));
        assert!(result.contains(r#""port":"9091""#));
    }

    #[test]
    fn sanitize_redacts_bearer() {
        let input = "header: Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload.signature";
        let result = sanitize_secrets(input);
        assert!(!result.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(result.contains("[REDACTED]"));
    }

    #[test]
    fn sanitize_leaves_normal_text() {
        let input =
            "thread 'main' panicked at 'index out of bounds: the len is 3 but the index is 5'";
        assert_eq!(sanitize_secrets(input), input);

        let input2 = "connection refused to 127.0.0.1:9091";
        assert_eq!(sanitize_secrets(input2), input2);

        assert_eq!(sanitize_secrets(""), "");
    }
}
