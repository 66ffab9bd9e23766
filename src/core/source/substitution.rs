use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap_or_else(|e| panic!("placeholder regex: {e}"))
});

/// Anything brace-delimited, well-formed or not.
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^{}]*\}").unwrap_or_else(|e| panic!("marker regex: {e}")));

/// Markers in `pattern` that no context value will fill, typos such as
/// `{loader-version}` or `{ version }` included.
fn unresolved_markers(pattern: &str, context: &HashMap<&str, String>) -> Vec<String> {
    MARKER
        .find_iter(pattern)
        .map(|m| m.as_str())
        .filter(|marker| match PLACEHOLDER.captures(marker) {
            Some(caps) if caps[0].len() == marker.len() => !context.contains_key(&caps[1]),
            _ => true,
        })
        .map(str::to_string)
        .collect()
}

/// Fill `{name}` placeholders from `context`, `{baseUrl}` included.
///
/// Single pass: inserted values are never scanned again. Placeholders with no
/// value, and brace markers that are not valid placeholders, are left in
/// place and reported. Only the pattern is checked, never inserted values.
pub(crate) fn substitute(pattern: &str, context: &HashMap<&str, String>, op_key: &str) -> String {
    let unresolved = unresolved_markers(pattern, context);

    let url = PLACEHOLDER
        .replace_all(pattern, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned();

    if !unresolved.is_empty() {
        warn!(
            operation = op_key,
            placeholders = ?unresolved,
            "URL pattern has unresolved placeholders: {}",
            url
        );
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{capture_events, warnings};

    fn ctx(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn replaces_known_placeholders() {
        let context = ctx(&[("baseUrl", "https://m.example"), ("version", "1.20.4")]);
        assert_eq!(
            substitute("{baseUrl}/version/{version}/client", &context, "client_jar"),
            "https://m.example/version/1.20.4/client"
        );
    }

    #[test]
    fn unknown_placeholders_stay() {
        let context = ctx(&[("baseUrl", "https://m.example")]);
        assert_eq!(
            substitute("{baseUrl}/jars/{verison}.jar", &context, "client_jar"),
            "https://m.example/jars/{verison}.jar"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let context = ctx(&[("baseUrl", "https://m.example/{version}"), ("version", "1.0")]);
        assert_eq!(
            substitute("{baseUrl}/{version}", &context, "x"),
            "https://m.example/{version}/1.0"
        );
    }

    #[test]
    fn unknown_placeholder_is_reported() {
        let context = ctx(&[("baseUrl", "https://m.example")]);
        let (_, events) = capture_events(|| substitute("{baseUrl}/{verison}", &context, "client_jar"));
        let warned = warnings(&events);
        assert_eq!(warned.len(), 1);
        assert!(warned[0].fields.contains("{verison}"));
        assert!(warned[0].fields.contains("client_jar"));
    }

    #[test]
    fn malformed_markers_are_kept_and_reported() {
        let context = ctx(&[]);
        let (url, events) = capture_events(|| substitute("https://a/{1}/{ x }", &context, "x"));
        assert_eq!(url, "https://a/{1}/{ x }");
        let warned = warnings(&events);
        assert_eq!(warned.len(), 1);
        assert!(warned[0].fields.contains("{1}"));
        assert!(warned[0].fields.contains("{ x }"));
    }

    #[test]
    fn hyphenated_typo_is_reported_once() {
        let context = ctx(&[("baseUrl", "https://m"), ("version", "1.0")]);
        let (url, events) = capture_events(|| {
            substitute("{baseUrl}/{loader-version}/{version}", &context, "fabric_meta")
        });
        assert_eq!(url, "https://m/{loader-version}/1.0");
        let warned = warnings(&events);
        assert_eq!(warned.len(), 1);
        assert!(warned[0].fields.contains("{loader-version}"));
    }

    #[test]
    fn resolved_pattern_is_silent() {
        // Braces inside an inserted value do not count.
        let context = ctx(&[("baseUrl", "https://m.example/{version}"), ("version", "1.0")]);
        let (_, events) = capture_events(|| substitute("{baseUrl}/{version}", &context, "x"));
        assert!(warnings(&events).is_empty());
    }
}
