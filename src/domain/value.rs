use serde::Serialize;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell HTTP API product id (`api_id`).
///
/// Invariant: non-empty after trimming.
pub struct ApiId(String);

impl ApiId {
    /// Form field name used by Clickatell (`api_id`).
    pub const FIELD: &'static str = "api_id";

    /// Create a validated [`ApiId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell account user name.
///
/// Invariant: non-empty after trimming.
pub struct User(String);

impl User {
    /// Form field name used by Clickatell (`user`).
    pub const FIELD: &'static str = "user";

    /// Create a validated [`User`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clickatell account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Form field name used by Clickatell (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`from`).
///
/// Invariant: non-empty after trimming. Alphanumeric senders must be registered with Clickatell.
pub struct SenderId(String);

impl SenderId {
    /// Form field name used by Clickatell (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by Clickatell (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Gateway-assigned message id (`apimsgid`), returned after a send as `ID: <id>`.
///
/// Invariant: non-empty after trimming.
pub struct ApiMsgId(String);

impl ApiMsgId {
    /// Form field name used by Clickatell (`apimsgid`).
    pub const FIELD: &'static str = "apimsgid";

    /// Create a validated [`ApiMsgId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-chosen message reference (`climsgid`), echoed back in callbacks.
///
/// Invariant: non-empty after trimming.
pub struct ClientMsgId(String);

impl ClientMsgId {
    /// Form field name used by Clickatell (`climsgid`).
    pub const FIELD: &'static str = "climsgid";

    /// Create a validated [`ClientMsgId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Unvalidated destination number (`to` / `msisdn`).
///
/// Invariant: non-empty after trimming. Only the digits are sent to the gateway; national
/// formats are not resolved. For that, parse into [`PhoneNumber`] and convert it.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by Clickatell for sends (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as provided.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Value as sent to Clickatell: digits only, without a leading `+` or `00`.
    ///
    /// Values without any digit are passed through (minus a leading `+`) so the gateway
    /// can reject them itself.
    pub fn for_gateway(&self) -> String {
        let digits = gateway_digits(&self.0);
        if digits.is_empty() {
            return self.0.strip_prefix('+').unwrap_or(&self.0).to_owned();
        }
        digits
    }

    /// Returns `true` if `token` (as echoed in a `To:` marker) has the same digits as this
    /// number. Spaces, dashes and a leading `+` or `00` are ignored on both sides.
    pub fn matches_token(&self, token: &str) -> bool {
        let token = gateway_digits(token);
        !token.is_empty() && token == gateway_digits(&self.0)
    }
}

fn gateway_digits(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix("00") {
        Some(rest) => rest.to_owned(),
        None => digits,
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Destination number normalized through `phonenumber`.
///
/// Use this when callers hold local-format numbers (`072 123 4567`): parsing with a
/// default region yields the international form Clickatell expects, so `To:` echoes
/// in send replies match the requested recipient. Equality and hashing use E.164.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    pub const FIELD: &'static str = "to";

    /// Parse a number, resolving national formats against `default_region`.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Input as given, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `+<country><national>` form.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// International digits as sent in `to` / `msisdn` (E.164 without the `+`).
    pub fn for_gateway(&self) -> &str {
        self.e164.strip_prefix('+').unwrap_or(&self.e164)
    }

    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delay before the gateway delivers a message, in minutes (`deliv_time`).
///
/// Invariant: `10..=10080` (one week).
pub struct DeliveryDelayMinutes(u32);

impl DeliveryDelayMinutes {
    /// Form field name used by Clickatell (`deliv_time`).
    pub const FIELD: &'static str = "deliv_time";

    pub const MIN: u32 = 10;
    pub const MAX: u32 = 10_080;

    /// Create a validated delay.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Maximum number of SMS parts a long message may be split into (`concat`).
///
/// Invariant: `1..=3`.
pub struct ConcatParts(u32);

impl ConcatParts {
    /// Form field name used by Clickatell (`concat`).
    pub const FIELD: &'static str = "concat";

    pub const MIN: u32 = 1;
    pub const MAX: u32 = 3;

    /// Create a validated part count.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Three-digit Clickatell status or error code.
///
/// Stored as text so leading zeros survive (`"001"` is not `"1"`). Use
/// [`DiagnosticCode::description`] for the human-readable meaning.
pub struct DiagnosticCode(String);

impl DiagnosticCode {
    /// Create a validated code.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidDiagnosticCode { input: value });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the code exactly as returned by the gateway.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Description of this code in message-status context.
    pub fn description(&self) -> &'static str {
        crate::domain::diagnostic::get_error(&self.0)
    }

    /// Description of this code as reported on an `ERR:` line.
    pub fn error_description(&self) -> &'static str {
        crate::domain::diagnostic::get_error_for_err_line(&self.0)
    }

    /// Returns `true` if the lookup table knows this code.
    pub fn is_known(&self) -> bool {
        crate::domain::diagnostic::is_known(&self.0)
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
