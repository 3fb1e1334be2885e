//! Marker scanning over Clickatell's plain-text bodies.
//!
//! Every field is introduced by a literal marker (`ID:`, `Credit:`, ...) and runs to
//! the next whitespace. Markers are case-sensitive: `Charge:` (route coverage) and
//! `charge:` (message charge) are different markers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::TransportError;
use crate::domain::{ApiMsgId, DiagnosticCode};

pub const ID: &str = "ID:";
pub const TO: &str = "To:";
pub const STATUS: &str = "Status:";
pub const CREDIT: &str = "Credit:";
pub const OK: &str = "OK:";
pub const CHARGE: &str = "Charge:";
pub const API_MSG_ID_LOWER: &str = "apiMsgId:";
pub const CHARGE_LOWER: &str = "charge:";
pub const STATUS_LOWER: &str = "status:";
pub const ERR: &str = "ERR:";

pub static ID_RE: Lazy<Regex> = Lazy::new(|| token_regex(ID));
pub static TO_RE: Lazy<Regex> = Lazy::new(|| token_regex(TO));
pub static STATUS_RE: Lazy<Regex> = Lazy::new(|| token_regex(STATUS));
pub static CREDIT_RE: Lazy<Regex> = Lazy::new(|| token_regex(CREDIT));
pub static API_MSG_ID_LOWER_RE: Lazy<Regex> = Lazy::new(|| token_regex(API_MSG_ID_LOWER));
pub static CHARGE_LOWER_RE: Lazy<Regex> = Lazy::new(|| token_regex(CHARGE_LOWER));
pub static STATUS_LOWER_RE: Lazy<Regex> = Lazy::new(|| token_regex(STATUS_LOWER));

/// `OK: <free text> Charge: <number>`; the free text may span lines.
pub static COVERAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\bOK:\s*(.*?)\s*\bCharge:\s*(\S+)").unwrap());

/// `ERR: <code>[, <message>]` up to the end of the line.
static ERR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bERR:\s*([^\s,]+)[ \t]*,?[ \t]*([^\r\n]*)").unwrap());

fn token_regex(marker: &str) -> Regex {
    Regex::new(&format!(r"\b{}\s*(\S+)", regex::escape(marker))).unwrap()
}

/// Token following the first occurrence of the marker matched by `re`.
///
/// A marker with no value of its own (`ID: To: 111`) yields `None` rather than the
/// next marker's name.
pub fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| !token.ends_with(':'))
}

/// Like [`capture`], but a missing marker is a malformed response.
pub fn require<'t>(
    re: &Regex,
    marker: &'static str,
    text: &'t str,
) -> Result<&'t str, TransportError> {
    capture(re, text).ok_or(TransportError::MissingMarker { marker })
}

/// Coerce a numeric token to `f64`; integral tokens become `n.0`.
pub fn number(marker: &'static str, token: &str) -> Result<f64, TransportError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TransportError::InvalidNumber {
            marker,
            value: token.to_owned(),
        }),
    }
}

pub fn diagnostic_code(
    marker: &'static str,
    token: &str,
) -> Result<DiagnosticCode, TransportError> {
    DiagnosticCode::new(token).map_err(|_| TransportError::InvalidDiagnosticCode {
        marker,
        value: token.to_owned(),
    })
}

/// Human-readable status description; unknown codes are logged and get the sentinel.
pub fn status_description(code: &DiagnosticCode) -> String {
    if !code.is_known() {
        tracing::warn!(code = code.as_str(), "unknown diagnostic code");
    }
    code.description().to_owned()
}

pub fn api_msg_id(marker: &'static str, token: &str) -> Result<ApiMsgId, TransportError> {
    ApiMsgId::new(token).map_err(|_| TransportError::MissingMarker { marker })
}

pub fn ensure_not_empty(text: &str) -> Result<(), TransportError> {
    if text.trim().is_empty() {
        return Err(TransportError::EmptyBody);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrLine {
    pub code: DiagnosticCode,
    pub message: String,
}

/// First `ERR:` line in `text`, if any.
///
/// The message stops before a trailing `To:` marker so per-recipient lines
/// (`ERR: 114, Cannot route message To: 2782...`) keep only the gateway text.
pub fn err_line(text: &str) -> Result<Option<ErrLine>, TransportError> {
    let Some(caps) = ERR_RE.captures(text) else {
        return Ok(None);
    };
    let code = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let code = diagnostic_code(ERR, code)?;

    let mut message = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    if let Some(idx) = message.find(TO) {
        message = &message[..idx];
    }

    Ok(Some(ErrLine {
        code,
        message: message.trim().to_owned(),
    }))
}

/// Fail with [`TransportError::Gateway`] when the body reports an `ERR:` line.
pub fn reject_err_line(text: &str) -> Result<(), TransportError> {
    match err_line(text)? {
        Some(ErrLine { code, message }) => Err(TransportError::Gateway { code, message }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_stops_at_whitespace_and_tolerates_missing_space() {
        assert_eq!(capture(&ID_RE, "ID: abc123 To:12345"), Some("abc123"));
        assert_eq!(capture(&ID_RE, "ID:abc123"), Some("abc123"));
        assert_eq!(capture(&TO_RE, "ID: abc123 To:12345"), Some("12345"));
        assert_eq!(capture(&ID_RE, "Credit: 5"), None);
    }

    #[test]
    fn marker_without_value_does_not_capture_next_marker() {
        assert_eq!(capture(&ID_RE, "ID: To: 111"), None);
        assert_eq!(capture(&TO_RE, "ID: To: 111"), Some("111"));
        assert_eq!(
            require(&CREDIT_RE, CREDIT, "Credit:\nStatus: 001"),
            Err(TransportError::MissingMarker { marker: CREDIT })
        );
    }

    #[test]
    fn markers_are_case_sensitive() {
        let text = "apiMsgId: abc charge: 1 status: 001";
        assert_eq!(capture(&ID_RE, text), None);
        assert_eq!(capture(&STATUS_RE, text), None);
        assert_eq!(capture(&STATUS_LOWER_RE, text), Some("001"));
        assert_eq!(capture(&CHARGE_LOWER_RE, text), Some("1"));
    }

    #[test]
    fn number_coerces_integers_and_rejects_garbage() {
        assert_eq!(number(CREDIT, "5").unwrap(), 5.0);
        assert_eq!(number(CREDIT, "12.75").unwrap(), 12.75);
        assert!(matches!(
            number(CREDIT, "five"),
            Err(TransportError::InvalidNumber { marker: CREDIT, .. })
        ));
        assert!(number(CREDIT, "inf").is_err());
    }

    #[test]
    fn err_line_extracts_code_and_message() {
        let err = err_line("ERR: 001, Authentication failed").unwrap().unwrap();
        assert_eq!(err.code.as_str(), "001");
        assert_eq!(err.message, "Authentication failed");

        let err = err_line("ERR: 114, Cannot route message To: 27721234567")
            .unwrap()
            .unwrap();
        assert_eq!(err.code.as_str(), "114");
        assert_eq!(err.message, "Cannot route message");

        let err = err_line("ERR: 301").unwrap().unwrap();
        assert_eq!(err.code.as_str(), "301");
        assert_eq!(err.message, "");

        assert_eq!(err_line("ID: abc").unwrap(), None);
    }

    #[test]
    fn err_line_with_non_numeric_code_is_malformed() {
        assert!(matches!(
            err_line("ERR: oops, something"),
            Err(TransportError::InvalidDiagnosticCode { marker: ERR, .. })
        ));
    }

    #[test]
    fn coverage_regex_captures_free_text() {
        let caps = COVERAGE_RE.captures("OK: My Message Charge: 1").unwrap();
        assert_eq!(&caps[1], "My Message");
        assert_eq!(&caps[2], "1");
    }

    #[test]
    fn coverage_regex_spans_lines() {
        let caps = COVERAGE_RE.captures("OK: routed\nCharge: 1").unwrap();
        assert_eq!(&caps[1], "routed");
        assert_eq!(&caps[2], "1");
    }
}
