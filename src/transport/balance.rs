use super::TransportError;
use super::markers::{self, CREDIT, CREDIT_RE};
use crate::domain::BalanceResult;

pub fn decode_balance_response(text: &str) -> Result<BalanceResult, TransportError> {
    markers::ensure_not_empty(text)?;
    markers::reject_err_line(text)?;

    let credit = markers::require(&CREDIT_RE, CREDIT, text)?;
    Ok(BalanceResult {
        balance: markers::number(CREDIT, credit)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_credit_is_coerced_to_float() {
        let result = decode_balance_response("Credit: 5").unwrap();
        assert_eq!(result.balance, 5.0);
    }

    #[test]
    fn fractional_credit_with_trailing_newline() {
        let result = decode_balance_response("Credit: 42.5\n").unwrap();
        assert_eq!(result.balance, 42.5);
    }

    #[test]
    fn missing_credit_is_malformed() {
        assert_eq!(
            decode_balance_response("OK").unwrap_err(),
            TransportError::MissingMarker { marker: CREDIT }
        );
        assert_eq!(
            decode_balance_response("  ").unwrap_err(),
            TransportError::EmptyBody
        );
    }

    #[test]
    fn err_line_is_gateway_error() {
        let err = decode_balance_response("ERR: 001, Authentication failed").unwrap_err();
        match err {
            TransportError::Gateway { code, message } => {
                assert_eq!(code.as_str(), "001");
                assert_eq!(message, "Authentication failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
