use serde::Serialize;

use crate::domain::value::{ApiMsgId, DiagnosticCode, RawPhoneNumber};

/// Outcome of a send for one requested recipient.
///
/// `error` is `true` when the gateway returned no `ID:` for this recipient; `api_msg_id`
/// is then `None`. When the gateway explained the failure with an `ERR:` line, `code`
/// and `description` carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientResult {
    pub to: RawPhoneNumber,
    pub api_msg_id: Option<ApiMsgId>,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<DiagnosticCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-recipient results, in the order the recipients were requested.
pub type SendResult = Vec<RecipientResult>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceResult {
    pub balance: f64,
}

/// Status of a previously sent message (`http/querymsg`, `http/delmsg`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub api_msg_id: ApiMsgId,
    pub status: DiagnosticCode,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCoverageResult {
    pub charge: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChargeResult {
    pub api_msg_id: ApiMsgId,
    pub status: DiagnosticCode,
    pub description: String,
    pub charge: f64,
}

/// Uniform success envelope: `{ "result": { "response": ... } }`.
///
/// Failures are never wrapped; they surface as `ClickatellError`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope<T> {
    pub result: ResultBody<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBody<T> {
    pub response: T,
}

impl<T> ResultEnvelope<T> {
    pub fn new(response: T) -> Self {
        Self {
            result: ResultBody { response },
        }
    }

    /// Borrow the wrapped record.
    pub fn response(&self) -> &T {
        &self.result.response
    }

    /// Unwrap the record.
    pub fn into_response(self) -> T {
        self.result.response
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope::new(f(self.result.response))
    }
}

impl<T: Serialize> ResultEnvelope<T> {
    /// Render the envelope as a JSON value, e.g. for handing to non-Rust consumers.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_serializes_to_result_response_shape() {
        let envelope = ResultEnvelope::new(BalanceResult { balance: 5.0 });
        assert_eq!(
            envelope.to_json().unwrap(),
            json!({ "result": { "response": { "balance": 5.0 } } })
        );
    }

    #[test]
    fn recipient_result_uses_camel_case_and_omits_empty_diagnostics() {
        let ok = RecipientResult {
            to: RawPhoneNumber::new("12345").unwrap(),
            api_msg_id: Some(ApiMsgId::new("abc").unwrap()),
            error: false,
            code: None,
            description: None,
        };
        let envelope = ResultEnvelope::new(vec![ok]);
        assert_eq!(
            envelope.to_json().unwrap(),
            json!({ "result": { "response": [
                { "to": "12345", "apiMsgId": "abc", "error": false }
            ] } })
        );
    }

    #[test]
    fn map_keeps_envelope_shape() {
        let envelope = ResultEnvelope::new(2).map(|n| n * 2);
        assert_eq!(*envelope.response(), 4);
        assert_eq!(envelope.into_response(), 4);
    }
}
