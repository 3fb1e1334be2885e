//! Typed Rust client for the Clickatell HTTP SMS API.
//!
//! The crate is split into a domain layer of strong types, a transport layer that
//! parses Clickatell's plain-text replies (`ID: ...`, `Credit: ...`, `ERR: ...`), and
//! a small client layer orchestrating requests. Every successful call returns a
//! [`ResultEnvelope`] (`{ result: { response: ... } }`).
//!
//! ```rust,no_run
//! use clickatell::{ClickatellClient, Credentials, MessageText, RawPhoneNumber, SendMessage, SendOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), clickatell::ClickatellError> {
//!     let client = ClickatellClient::new(Credentials::from_env()?);
//!     let phone = RawPhoneNumber::new("27721234567")?;
//!     let text = MessageText::new("hello")?;
//!     let request = SendMessage::new(vec![phone], text, SendOptions::default())?;
//!     let sent = client.send_message(request).await?;
//!     for recipient in sent.response() {
//!         println!("{:?} -> {:?}", recipient.to, recipient.api_msg_id);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ApiTransport, BoxFuture, ClickatellClient, ClickatellClientBuilder, ClickatellError,
    Credentials, DEFAULT_BASE_URL, ParsedResponse, ResponseKind, get_url, parse_response,
};
pub use domain::{
    ApiId, ApiMsgId, BalanceResult, ClientMsgId, ConcatParts, DeliveryDelayMinutes,
    DiagnosticCode, MessageChargeResult, MessageText, Password, PhoneNumber, QueryResult,
    RawPhoneNumber, RecipientResult, ResultEnvelope, RouteCoverageResult, SendMessage,
    SendOptions, SendResult, SenderId, User, ValidationError, get_error,
};
