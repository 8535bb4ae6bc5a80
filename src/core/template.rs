//! Validated log format templates
//!
//! A [`FormatTemplate`] owns a format string together with the token sets
//! the classifier derived from it. Construction and every structural
//! mutation go through [`classify`](super::token::classify), so a template
//! value that exists is always fully valid.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::clock::Clock;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::token::{self, classify, Segment, TokenSets};

/// Format string of [`FormatTemplate::standard`].
pub const DEFAULT_FORMAT_STRING: &str = "[%{LEVEL}%][%{TIME}%]: %{MESSAGE}%";

/// A format string with its classified token sets and static bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TemplateSpec", try_from = "TemplateSpec")]
pub struct FormatTemplate {
    format_string: String,
    static_tokens: HashMap<String, String>,
    dynamic_tokens: BTreeSet<String>,
    special_tokens: BTreeSet<String>,
}

/// Serialization surrogate: only the configured halves are persisted, and
/// deserialization re-runs the validating constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateSpec {
    format_string: String,
    #[serde(default)]
    parameters: HashMap<String, String>,
}

impl From<FormatTemplate> for TemplateSpec {
    fn from(template: FormatTemplate) -> Self {
        TemplateSpec {
            format_string: template.format_string,
            parameters: template.static_tokens,
        }
    }
}

impl TryFrom<TemplateSpec> for FormatTemplate {
    type Error = LoggerError;

    fn try_from(spec: TemplateSpec) -> Result<Self> {
        FormatTemplate::new(spec.format_string, spec.parameters)
    }
}

impl FormatTemplate {
    /// Classify `format_string` against `parameters` and build the template.
    ///
    /// Fails with the first violated classification rule; no partially
    /// constructed template is ever observable.
    pub fn new(
        format_string: impl Into<String>,
        parameters: HashMap<String, String>,
    ) -> Result<Self> {
        let format_string = format_string.into();
        let sets = classify(&format_string, &parameters)?;
        Ok(Self::from_parts(format_string, sets))
    }

    /// The built-in default template: severity, timestamp, message.
    pub fn standard() -> Self {
        Self::new(DEFAULT_FORMAT_STRING, HashMap::new())
            .expect("built-in default format is valid")
    }

    fn from_parts(format_string: String, sets: TokenSets) -> Self {
        Self {
            format_string,
            static_tokens: sets.statics,
            dynamic_tokens: sets.dynamic,
            special_tokens: sets.special,
        }
    }

    pub fn format_string(&self) -> &str {
        &self.format_string
    }

    /// Static token names with their bound values.
    pub fn static_tokens(&self) -> &HashMap<String, String> {
        &self.static_tokens
    }

    /// Token names whose values arrive per log call.
    pub fn dynamic_tokens(&self) -> &BTreeSet<String> {
        &self.dynamic_tokens
    }

    /// Un-overridden reserved names resolved by the runtime (`LEVEL`,
    /// `TIME`). The mandatory `MESSAGE` token is implied by validity and
    /// not listed.
    pub fn special_tokens(&self) -> &BTreeSet<String> {
        &self.special_tokens
    }

    /// Replace the format string, reclassifying against the current static
    /// bindings. On failure the template is left untouched.
    pub fn set_format_string(&mut self, format_string: impl Into<String>) -> Result<()> {
        let format_string = format_string.into();
        let sets = classify(&format_string, &self.static_tokens)?;
        *self = Self::from_parts(format_string, sets);
        Ok(())
    }

    /// Replace the static parameter bindings, reclassifying against the
    /// current format string. On failure the template is left untouched.
    pub fn set_parameters(&mut self, parameters: HashMap<String, String>) -> Result<()> {
        let sets = classify(&self.format_string, &parameters)?;
        self.static_tokens = sets.statics;
        self.dynamic_tokens = sets.dynamic;
        self.special_tokens = sets.special;
        Ok(())
    }

    /// Update the bound value of an already-classified static token.
    ///
    /// Values are grammar-irrelevant, so no reclassification runs. Returns
    /// `false` without side effects when `name` is not a static token.
    pub fn set_static_token(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.static_tokens.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Substitute every placeholder and return the rendered line.
    ///
    /// Dynamic tokens are resolved by name from `dynamic_values`; a missing
    /// name fails with [`LoggerError::MissingParameterBinding`], unused
    /// names are ignored. Escaped placeholders reproduce their text without
    /// the escape marker. The message is sanitized against log injection
    /// before substitution.
    pub fn render(
        &self,
        message: &str,
        level: LogLevel,
        dynamic_values: &HashMap<String, String>,
        clock: &dyn Clock,
    ) -> Result<String> {
        let message = sanitize_message(message);
        let mut out = String::with_capacity(self.format_string.len() + message.len());

        for segment in token::scan(&self.format_string) {
            let ph = match segment {
                Segment::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Segment::Placeholder(ph) => ph,
            };

            if ph.escaped {
                out.push_str(ph.raw);
            } else if ph.dynamic {
                let value = dynamic_values
                    .get(ph.name)
                    .ok_or_else(|| LoggerError::missing_binding(ph.name))?;
                out.push_str(value);
            } else if !ph.overridden && ph.name == token::MESSAGE_TOKEN {
                out.push_str(&message);
            } else if !ph.overridden && ph.name == token::LEVEL_TOKEN {
                out.push_str(level.to_str());
            } else if !ph.overridden && ph.name == token::TIME_TOKEN {
                out.push_str(&clock.timestamp());
            } else {
                let value = self
                    .static_tokens
                    .get(ph.name)
                    .ok_or_else(|| LoggerError::missing_binding(ph.name))?;
                out.push_str(value);
            }
        }

        Ok(out)
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

/// Replace newlines, carriage returns, and tabs with escape sequences so a
/// crafted message cannot forge additional log lines.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock;

    impl Clock for FixedClock {
        fn timestamp(&self) -> String {
            "2025-01-08T10:30:45.123Z".to_string()
        }
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_standard_template() {
        let template = FormatTemplate::standard();
        assert_eq!(template.format_string(), DEFAULT_FORMAT_STRING);
        assert!(template.static_tokens().is_empty());
        assert!(template.dynamic_tokens().is_empty());
        assert_eq!(template.special_tokens().len(), 2);
    }

    #[test]
    fn test_construction_rejects_invalid_format() {
        let result = FormatTemplate::new("[%{LEVEL}%] no message token", HashMap::new());
        assert!(matches!(result, Err(LoggerError::MissingMessageToken)));
    }

    #[test]
    fn test_render_specials() {
        let template = FormatTemplate::standard();
        let line = template
            .render("hello", LogLevel::Warn, &HashMap::new(), &FixedClock)
            .expect("render");
        assert_eq!(line, "[WARN][2025-01-08T10:30:45.123Z]: hello");
    }

    #[test]
    fn test_render_static_and_dynamic() {
        let template = FormatTemplate::new(
            "%{APP}%/%{*REQ}%: %{MESSAGE}%",
            params(&[("APP", "gateway")]),
        )
        .expect("valid");

        let line = template
            .render(
                "accepted",
                LogLevel::Info,
                &params(&[("REQ", "r-17")]),
                &FixedClock,
            )
            .expect("render");
        assert_eq!(line, "gateway/r-17: accepted");
    }

    #[test]
    fn test_render_missing_dynamic_value_fails() {
        let template =
            FormatTemplate::new("%{*REQ}% %{MESSAGE}%", HashMap::new()).expect("valid");
        let err = template
            .render("m", LogLevel::Info, &HashMap::new(), &FixedClock)
            .unwrap_err();
        assert!(matches!(err, LoggerError::MissingParameterBinding { token } if token == "REQ"));
    }

    #[test]
    fn test_render_ignores_unused_dynamic_values() {
        let template = FormatTemplate::standard();
        let line = template
            .render(
                "msg",
                LogLevel::Info,
                &params(&[("EXTRA", "ignored")]),
                &FixedClock,
            )
            .expect("render");
        assert!(line.ends_with("msg"));
    }

    #[test]
    fn test_render_escaped_placeholder_literally() {
        let template = FormatTemplate::new(r"%{MESSAGE}% raw: \%{LEVEL}%", HashMap::new())
            .expect("valid");
        let line = template
            .render("m", LogLevel::Info, &HashMap::new(), &FixedClock)
            .expect("render");
        assert_eq!(line, "m raw: %{LEVEL}%");
    }

    #[test]
    fn test_render_overridden_dynamic_reserved() {
        let template = FormatTemplate::new("%{!*LEVEL}% %{MESSAGE}%", HashMap::new())
            .expect("valid");
        let line = template
            .render(
                "m",
                LogLevel::Error,
                &params(&[("LEVEL", "custom")]),
                &FixedClock,
            )
            .expect("render");
        // The demoted LEVEL takes the per-call value, not the severity name.
        assert_eq!(line, "custom m");
    }

    #[test]
    fn test_render_sanitizes_message() {
        let template = FormatTemplate::standard();
        let line = template
            .render(
                "line1\nFAKE [ERROR] line2\ttab",
                LogLevel::Info,
                &HashMap::new(),
                &FixedClock,
            )
            .expect("render");
        assert!(!line.contains('\n'));
        assert!(!line.contains('\t'));
        assert!(line.contains("\\n"));
        assert!(line.contains("\\t"));
    }

    #[test]
    fn test_set_format_string_revalidates() {
        let mut template = FormatTemplate::new(
            "%{APP}% %{MESSAGE}%",
            params(&[("APP", "demo")]),
        )
        .expect("valid");

        template
            .set_format_string("%{APP}% [%{LEVEL}%] %{MESSAGE}%")
            .expect("still valid against APP binding");
        assert!(template.special_tokens().contains("LEVEL"));
    }

    #[test]
    fn test_set_format_string_failure_leaves_template_untouched() {
        let mut template = FormatTemplate::new(
            "%{APP}% %{MESSAGE}%",
            params(&[("APP", "demo")]),
        )
        .expect("valid");
        let before = template.clone();

        let err = template.set_format_string("%{OTHER}% %{MESSAGE}%").unwrap_err();
        assert!(matches!(err, LoggerError::MissingParameterBinding { .. }));
        assert_eq!(template, before);
    }

    #[test]
    fn test_set_parameters_failure_leaves_template_untouched() {
        let mut template = FormatTemplate::new(
            "%{APP}% %{MESSAGE}%",
            params(&[("APP", "demo")]),
        )
        .expect("valid");
        let before = template.clone();

        let err = template.set_parameters(params(&[("WRONG", "x")])).unwrap_err();
        assert!(matches!(err, LoggerError::MissingParameterBinding { .. }));
        assert_eq!(template, before);
    }

    #[test]
    fn test_set_static_token() {
        let mut template = FormatTemplate::new(
            "%{APP}% %{MESSAGE}%",
            params(&[("APP", "demo")]),
        )
        .expect("valid");

        assert!(template.set_static_token("APP", "prod"));
        assert_eq!(
            template.static_tokens().get("APP").map(String::as_str),
            Some("prod")
        );

        // Unknown names are a detectable no-op.
        assert!(!template.set_static_token("NOPE", "x"));
        let line = template
            .render("m", LogLevel::Info, &HashMap::new(), &FixedClock)
            .expect("render");
        assert_eq!(line, "prod m");
    }

    #[test]
    fn test_serde_roundtrip_revalidates() {
        let template = FormatTemplate::new(
            "%{APP}% [%{LEVEL}%] %{*REQ}% %{MESSAGE}%",
            params(&[("APP", "demo")]),
        )
        .expect("valid");

        let json = serde_json::to_string(&template).expect("serialize");
        let back: FormatTemplate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(template, back);
    }

    #[test]
    fn test_serde_rejects_invalid_spec() {
        let json = r#"{"format_string": "no placeholders", "parameters": {}}"#;
        let result: std::result::Result<FormatTemplate, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
