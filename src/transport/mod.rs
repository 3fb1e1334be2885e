//! Transport layer: wire-format details (form encoding and plain-text response parsing).

mod balance;
mod markers;
mod message_charge;
mod query_message;
mod route_coverage;
mod send_message;

use crate::domain::DiagnosticCode;

pub use balance::decode_balance_response;
pub use message_charge::decode_message_charge_response;
pub use query_message::{decode_query_message_response, encode_api_msg_id_form};
pub use route_coverage::{decode_route_coverage_response, encode_route_coverage_form};
pub use send_message::{decode_send_message_response, encode_send_message_form};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("response body is empty")]
    EmptyBody,

    #[error("response is missing the `{marker}` marker")]
    MissingMarker { marker: &'static str },

    #[error("`{marker}` value {value:?} is not a number")]
    InvalidNumber { marker: &'static str, value: String },

    #[error("`{marker}` value {value:?} is not a 3-digit code")]
    InvalidDiagnosticCode { marker: &'static str, value: String },

    #[error("gateway reported ERR: {code}, {message}")]
    Gateway { code: DiagnosticCode, message: String },
}
