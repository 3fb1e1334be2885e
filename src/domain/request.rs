use crate::domain::validation::ValidationError;
use crate::domain::value::{
    ClientMsgId, ConcatParts, DeliveryDelayMinutes, MessageText, RawPhoneNumber, SenderId,
};

/// Maximum number of recipients accepted by `http/sendmsg` in one POST.
pub const SEND_MESSAGE_MAX_RECIPIENTS: usize = 300;

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub from: Option<SenderId>,
    /// Request intermediate and final delivery callbacks (`callback=3`).
    pub callback: bool,
    pub delivery_delay: Option<DeliveryDelayMinutes>,
    pub concat: Option<ConcatParts>,
    pub client_msg_id: Option<ClientMsgId>,
    /// Route through a two-way number so replies can be received (`mo=1`).
    pub mo: bool,
    /// The text is hex-encoded UCS-2 (`unicode=1`).
    pub unicode: bool,
    /// Required features bitmask (`req_feat`).
    pub required_features: Option<u32>,
    /// Additional gateway parameters passed through verbatim, after the typed ones.
    pub extra: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct SendMessage {
    recipients: Vec<RawPhoneNumber>,
    text: MessageText,
    options: SendOptions,
}

impl SendMessage {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        text: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if recipients.len() > SEND_MESSAGE_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_MESSAGE_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }
        Ok(Self {
            recipients,
            text,
            options,
        })
    }

    /// Send to a single recipient.
    pub fn single(
        recipient: RawPhoneNumber,
        text: MessageText,
        options: SendOptions,
    ) -> Self {
        Self {
            recipients: vec![recipient],
            text,
            options,
        }
    }

    /// Recipients in request order.
    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}
