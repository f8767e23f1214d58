use regex::Regex;

/// Redacts the daemon auth token wherever it tends to leak.
///
/// Covers the entry URL query (`token=`), the `X-TT-Auth` header, JSON
/// `"token"` fields in bridge events, and bearer tokens.
pub fn sanitize_secrets(input: &str) -> String {
    let patterns: &[(&str, &str)] = &[
        (r"(?i)(x-tt-auth:\s*)\S+", "${1}[REDACTED]"),
        (r#"("token"\s*:\s*")[^"]*"#, "${1}[REDACTED]"),
        (r"(?i)([?&]token=)[^\s&#]+", "${1}[REDACTED]"),
        (r"Bearer [a-zA-Z0-9._\-]+", "[REDACTED]"),
    ];

    let mut result = input.to_string();

    for (pattern, replacement) in patterns {
        // Patterns are literals; a failed compile only skips that pattern.
        if let Ok(re) = Regex::new(pattern) {
            result = re.replace_all(&result, *replacement).into_owned();
        }
    }

    result
}
