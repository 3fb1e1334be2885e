use super::TransportError;
use super::markers::{
    self, API_MSG_ID_LOWER, API_MSG_ID_LOWER_RE, CHARGE_LOWER, CHARGE_LOWER_RE, STATUS_LOWER,
    STATUS_LOWER_RE,
};
use crate::domain::MessageChargeResult;

/// Decode `apiMsgId: <id> charge: <number> status: <code>`.
pub fn decode_message_charge_response(text: &str) -> Result<MessageChargeResult, TransportError> {
    markers::ensure_not_empty(text)?;
    markers::reject_err_line(text)?;

    let api_msg_id = markers::require(&API_MSG_ID_LOWER_RE, API_MSG_ID_LOWER, text)?;
    let charge = markers::require(&CHARGE_LOWER_RE, CHARGE_LOWER, text)?;
    let status = markers::require(&STATUS_LOWER_RE, STATUS_LOWER, text)?;

    let status = markers::diagnostic_code(STATUS_LOWER, status)?;
    Ok(MessageChargeResult {
        api_msg_id: markers::api_msg_id(API_MSG_ID_LOWER, api_msg_id)?,
        description: markers::status_description(&status),
        status,
        charge: markers::number(CHARGE_LOWER, charge)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::get_error;

    #[test]
    fn decodes_all_four_fields() {
        let result =
            decode_message_charge_response("apiMsgId: 1234567890 charge: 1 status: 001").unwrap();
        assert_eq!(result.api_msg_id.as_str(), "1234567890");
        assert_eq!(result.charge, 1.0);
        assert_eq!(result.status.as_str(), "001");
        assert_eq!(result.description, get_error("001"));
    }

    #[test]
    fn token_order_does_not_matter() {
        let result =
            decode_message_charge_response("status: 004 apiMsgId: abc charge: 1.5").unwrap();
        assert_eq!(result.api_msg_id.as_str(), "abc");
        assert_eq!(result.charge, 1.5);
        assert_eq!(result.description, "Received by recipient");
    }

    #[test]
    fn capitalised_markers_are_not_accepted() {
        assert_eq!(
            decode_message_charge_response("apiMsgId: abc Charge: 1 status: 001").unwrap_err(),
            TransportError::MissingMarker {
                marker: CHARGE_LOWER
            }
        );
    }
}
