use super::TransportError;
use super::markers::{self, ID, ID_RE, STATUS, STATUS_RE};
use crate::domain::{ApiMsgId, QueryResult};

/// Form parameters for endpoints addressing one sent message
/// (`http/querymsg`, `http/delmsg`, `http/getmsgcharge`).
pub fn encode_api_msg_id_form(api_msg_id: &ApiMsgId) -> Vec<(String, String)> {
    vec![(ApiMsgId::FIELD.to_owned(), api_msg_id.as_str().to_owned())]
}

/// Decode `ID: <apimsgid> Status: <code>`.
pub fn decode_query_message_response(text: &str) -> Result<QueryResult, TransportError> {
    markers::ensure_not_empty(text)?;
    markers::reject_err_line(text)?;

    let api_msg_id = markers::api_msg_id(ID, markers::require(&ID_RE, ID, text)?)?;
    let status = markers::diagnostic_code(STATUS, markers::require(&STATUS_RE, STATUS, text)?)?;
    let description = markers::status_description(&status);

    Ok(QueryResult {
        api_msg_id,
        status,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::get_error;

    #[test]
    fn encode_uses_apimsgid_field() {
        let id = ApiMsgId::new("1234567890").unwrap();
        assert_eq!(
            encode_api_msg_id_form(&id),
            vec![("apimsgid".to_owned(), "1234567890".to_owned())]
        );
    }

    #[test]
    fn decodes_id_status_and_looks_up_description() {
        let result = decode_query_message_response("ID: 1234567890 Status: 001").unwrap();
        assert_eq!(result.api_msg_id.as_str(), "1234567890");
        assert_eq!(result.status.as_str(), "001");
        assert_eq!(result.description, get_error("001"));
    }

    #[test]
    fn stop_response_shares_the_format() {
        let result = decode_query_message_response("ID: abc Status: 006").unwrap();
        assert_eq!(result.description, "User cancelled message delivery");
    }

    #[test]
    fn id_marker_without_value_is_malformed() {
        assert_eq!(
            decode_query_message_response("ID: Status: 001").unwrap_err(),
            TransportError::MissingMarker { marker: ID }
        );
    }

    #[test]
    fn unknown_status_gets_sentinel_description() {
        let result = decode_query_message_response("ID: abc Status: 999").unwrap();
        assert_eq!(result.status.as_str(), "999");
        assert_eq!(result.description, crate::domain::UNKNOWN_ERROR);
    }

    #[test]
    fn missing_status_is_malformed() {
        assert_eq!(
            decode_query_message_response("ID: 1234567890").unwrap_err(),
            TransportError::MissingMarker { marker: STATUS }
        );
    }

    #[test]
    fn non_numeric_status_is_malformed() {
        assert!(matches!(
            decode_query_message_response("ID: 1 Status: OK").unwrap_err(),
            TransportError::InvalidDiagnosticCode { marker: STATUS, .. }
        ));
    }

    #[test]
    fn decoding_is_repeatable() {
        let text = "ID: 1234567890 Status: 004";
        assert_eq!(
            decode_query_message_response(text).unwrap(),
            decode_query_message_response(text).unwrap()
        );
    }
}
