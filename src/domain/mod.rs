//! Domain layer: strong types with validation and invariants (no I/O).

pub mod diagnostic;
mod request;
mod response;
mod validation;
mod value;

pub use diagnostic::{UNKNOWN_ERROR, get_error, get_error_for_err_line};
pub use request::{SEND_MESSAGE_MAX_RECIPIENTS, SendMessage, SendOptions};
pub use response::{
    BalanceResult, MessageChargeResult, QueryResult, RecipientResult, ResultBody, ResultEnvelope,
    RouteCoverageResult, SendResult,
};
pub use validation::ValidationError;
pub use value::{
    ApiId, ApiMsgId, ClientMsgId, ConcatParts, DeliveryDelayMinutes, DiagnosticCode,
    MessageText, Password, PhoneNumber, RawPhoneNumber, SenderId, User,
};
