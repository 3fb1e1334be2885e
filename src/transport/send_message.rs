use super::TransportError;
use super::markers::{self, ErrLine, ID, ID_RE, TO_RE};
use crate::domain::{
    ApiMsgId, ClientMsgId, ConcatParts, DeliveryDelayMinutes, MessageText, RawPhoneNumber,
    RecipientResult, SendMessage, SendOptions, SendResult, SenderId,
};

pub fn encode_send_message_form(request: &SendMessage) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    let to = request
        .recipients()
        .iter()
        .map(RawPhoneNumber::for_gateway)
        .collect::<Vec<_>>()
        .join(",");
    params.push((RawPhoneNumber::FIELD.to_owned(), to));
    params.push((
        MessageText::FIELD.to_owned(),
        request.text().as_str().to_owned(),
    ));
    push_options(&mut params, request.options());

    params
}

fn push_options(params: &mut Vec<(String, String)>, options: &SendOptions) {
    if let Some(from) = options.from.as_ref() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    if options.callback {
        params.push(("callback".to_owned(), "3".to_owned()));
    }
    if let Some(delay) = options.delivery_delay {
        params.push((
            DeliveryDelayMinutes::FIELD.to_owned(),
            delay.value().to_string(),
        ));
    }
    if let Some(concat) = options.concat {
        params.push((ConcatParts::FIELD.to_owned(), concat.value().to_string()));
    }
    if let Some(client_msg_id) = options.client_msg_id.as_ref() {
        params.push((
            ClientMsgId::FIELD.to_owned(),
            client_msg_id.as_str().to_owned(),
        ));
    }
    if options.mo {
        params.push(("mo".to_owned(), "1".to_owned()));
    }
    if options.unicode {
        params.push(("unicode".to_owned(), "1".to_owned()));
    }
    if let Some(features) = options.required_features {
        params.push(("req_feat".to_owned(), features.to_string()));
    }
    params.extend(options.extra.iter().cloned());
}

/// One confirmation line: `ID: <id> [To: <number>]` or `ERR: <code>, <text> [To: <number>]`.
#[derive(Debug)]
struct SendLine<'t> {
    api_msg_id: Option<&'t str>,
    to: Option<&'t str>,
    failure: Option<ErrLine>,
}

fn parse_line(line: &str) -> Result<Option<SendLine<'_>>, TransportError> {
    let api_msg_id = markers::capture(&ID_RE, line);
    let failure = markers::err_line(line)?;
    // A bare `ID:` still confirms the line belongs to a recipient, just without an id.
    if api_msg_id.is_none() && failure.is_none() && !line.contains(ID) {
        return Ok(None);
    }
    Ok(Some(SendLine {
        api_msg_id,
        to: markers::capture(&TO_RE, line),
        failure,
    }))
}

/// Decode a send confirmation into one result per requested recipient, in request order.
///
/// Lines carrying `To:` are matched to recipients by their digits. Every other line,
/// including one whose `To:` matches no recipient, fills the unmatched positions in
/// order. Recipients left without an `ID:` are errored.
pub fn decode_send_message_response(
    recipients: &[RawPhoneNumber],
    text: &str,
) -> Result<SendResult, TransportError> {
    markers::ensure_not_empty(text)?;

    let mut lines = Vec::new();
    for line in text.lines() {
        if let Some(parsed) = parse_line(line)? {
            lines.push(parsed);
        }
    }
    if lines.is_empty() {
        return Err(TransportError::MissingMarker { marker: ID });
    }

    if lines.iter().all(|line| line.api_msg_id.is_none()) {
        let request_failure = lines
            .iter()
            .find(|line| line.to.is_none())
            .and_then(|line| line.failure.clone());
        if let Some(ErrLine { code, message }) = request_failure {
            return Err(TransportError::Gateway { code, message });
        }
    }

    let mut slots: Vec<Option<SendLine<'_>>> = recipients.iter().map(|_| None).collect();
    let mut unaddressed = Vec::new();
    for line in lines {
        let position = line.to.and_then(|to| {
            recipients
                .iter()
                .enumerate()
                .position(|(idx, recipient)| slots[idx].is_none() && recipient.matches_token(to))
        });
        match position {
            Some(idx) => slots[idx] = Some(line),
            None => {
                if let Some(to) = line.to {
                    tracing::debug!(to, "`To:` matches no recipient, assigning by position");
                }
                unaddressed.push(line);
            }
        }
    }

    let mut unaddressed = unaddressed.into_iter();
    for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
        match unaddressed.next() {
            Some(line) => *slot = Some(line),
            None => break,
        }
    }

    recipients
        .iter()
        .zip(slots)
        .map(|(recipient, slot)| recipient_result(recipient, slot))
        .collect()
}

fn recipient_result(
    recipient: &RawPhoneNumber,
    line: Option<SendLine<'_>>,
) -> Result<RecipientResult, TransportError> {
    let Some(line) = line else {
        tracing::warn!(to = recipient.raw(), "no send confirmation for recipient");
        return Ok(RecipientResult {
            to: recipient.clone(),
            api_msg_id: None,
            error: true,
            code: None,
            description: None,
        });
    };

    if let Some(id) = line.api_msg_id {
        return Ok(RecipientResult {
            to: recipient.clone(),
            api_msg_id: Some(ApiMsgId::new(id).map_err(|_| TransportError::MissingMarker {
                marker: ID,
            })?),
            error: false,
            code: None,
            description: None,
        });
    }

    let failure = line.failure;
    if let Some(failure) = failure.as_ref() {
        tracing::warn!(
            to = recipient.raw(),
            code = failure.code.as_str(),
            message = failure.message.as_str(),
            "gateway rejected recipient"
        );
    }
    Ok(RecipientResult {
        to: recipient.clone(),
        api_msg_id: None,
        error: true,
        description: failure
            .as_ref()
            .map(|failure| failure.code.error_description().to_owned()),
        code: failure.map(|failure| failure.code),
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{DeliveryDelayMinutes, MessageText, SendOptions};

    use super::*;

    fn phones(numbers: &[&str]) -> Vec<RawPhoneNumber> {
        numbers
            .iter()
            .map(|n| RawPhoneNumber::new(*n).unwrap())
            .collect()
    }

    #[test]
    fn encode_joins_recipients_and_appends_options() {
        let options = SendOptions {
            from: Some(SenderId::new("Acme").unwrap()),
            callback: true,
            delivery_delay: Some(DeliveryDelayMinutes::new(10).unwrap()),
            extra: vec![("escalate".to_owned(), "1".to_owned())],
            ..Default::default()
        };
        let request = SendMessage::new(
            phones(&["+27721234567", "27827654321"]),
            MessageText::new("hello").unwrap(),
            options,
        )
        .unwrap();

        assert_eq!(
            encode_send_message_form(&request),
            vec![
                ("to".to_owned(), "27721234567,27827654321".to_owned()),
                ("text".to_owned(), "hello".to_owned()),
                ("from".to_owned(), "Acme".to_owned()),
                ("callback".to_owned(), "3".to_owned()),
                ("deliv_time".to_owned(), "10".to_owned()),
                ("escalate".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn single_recipient_without_to_marker() {
        let recipients = phones(&["12345"]);
        let result = decode_send_message_response(&recipients, "ID: 1234567890").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].to.raw(), "12345");
        assert_eq!(result[0].api_msg_id.as_ref().unwrap().as_str(), "1234567890");
        assert!(!result[0].error);
    }

    #[test]
    fn multi_recipient_lines_follow_request_order() {
        let recipients = phones(&["12345", "123456"]);
        let text = "ID: 1234567890 To:12345\nID:1234567890 To:123456";
        let result = decode_send_message_response(&recipients, text).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].to.raw(), "12345");
        assert_eq!(result[1].to.raw(), "123456");
        assert!(result.iter().all(|r| !r.error));
        assert!(
            result
                .iter()
                .all(|r| r.api_msg_id.as_ref().unwrap().as_str() == "1234567890")
        );
    }

    #[test]
    fn out_of_order_lines_are_matched_by_number() {
        let recipients = phones(&["+111", "222"]);
        let text = "ID: b To: 222\nID: a To: 111\n";
        let result = decode_send_message_response(&recipients, text).unwrap();

        assert_eq!(result[0].to.raw(), "+111");
        assert_eq!(result[0].api_msg_id.as_ref().unwrap().as_str(), "a");
        assert_eq!(result[1].to.raw(), "222");
        assert_eq!(result[1].api_msg_id.as_ref().unwrap().as_str(), "b");
    }

    #[test]
    fn formatted_recipient_matches_echoed_digits() {
        let recipients = phones(&["27 72 123-4567"]);
        let result =
            decode_send_message_response(&recipients, "ID: abc To: 27721234567").unwrap();
        assert!(!result[0].error);
        assert_eq!(result[0].to.raw(), "27 72 123-4567");
        assert_eq!(result[0].api_msg_id.as_ref().unwrap().as_str(), "abc");
    }

    #[test]
    fn unmatched_to_line_falls_back_to_request_position() {
        let recipients = phones(&["0721234567", "27827654321"]);
        let text = "ID: a To: 27721234567\nID: b To: 27827654321";
        let result = decode_send_message_response(&recipients, text).unwrap();

        assert!(!result[0].error);
        assert_eq!(result[0].to.raw(), "0721234567");
        assert_eq!(result[0].api_msg_id.as_ref().unwrap().as_str(), "a");
        assert!(!result[1].error);
        assert_eq!(result[1].api_msg_id.as_ref().unwrap().as_str(), "b");
    }

    #[test]
    fn id_marker_without_value_is_errored_recipient() {
        let recipients = phones(&["111"]);
        let result = decode_send_message_response(&recipients, "ID: To: 111").unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].error);
        assert!(result[0].api_msg_id.is_none());
    }

    #[test]
    fn omitted_recipient_is_errored_in_place() {
        let recipients = phones(&["111", "222", "333"]);
        let text = "ID: a To: 111\nID: c To: 333";
        let result = decode_send_message_response(&recipients, text).unwrap();

        assert_eq!(result.len(), 3);
        assert!(!result[0].error);
        assert!(result[1].error);
        assert_eq!(result[1].to.raw(), "222");
        assert!(result[1].api_msg_id.is_none());
        assert!(result[1].code.is_none());
        assert!(!result[2].error);
    }

    #[test]
    fn recipient_err_line_is_recorded_inline() {
        let recipients = phones(&["111", "222"]);
        let text = "ID: a To: 111\nERR: 114, Cannot route message To: 222";
        let result = decode_send_message_response(&recipients, text).unwrap();

        assert!(!result[0].error);
        assert!(result[1].error);
        assert_eq!(result[1].code.as_ref().unwrap().as_str(), "114");
        assert_eq!(result[1].description.as_deref(), Some("Cannot route message"));
    }

    #[test]
    fn request_level_err_line_is_gateway_error() {
        let recipients = phones(&["111", "222"]);
        let err = decode_send_message_response(&recipients, "ERR: 001, Authentication failed")
            .unwrap_err();
        match err {
            TransportError::Gateway { code, message } => {
                assert_eq!(code.as_str(), "001");
                assert_eq!(message, "Authentication failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn body_without_markers_is_malformed() {
        let recipients = phones(&["111"]);
        assert_eq!(
            decode_send_message_response(&recipients, "Service unavailable").unwrap_err(),
            TransportError::MissingMarker { marker: ID }
        );
        assert_eq!(
            decode_send_message_response(&recipients, "\n").unwrap_err(),
            TransportError::EmptyBody
        );
    }

    #[test]
    fn decoding_is_repeatable() {
        let recipients = phones(&["111", "222"]);
        let text = "ID: a To: 111\nERR: 114, Cannot route message To: 222";
        assert_eq!(
            decode_send_message_response(&recipients, text).unwrap(),
            decode_send_message_response(&recipients, text).unwrap()
        );
    }
}
