//! Clickatell status and error code descriptions.
//!
//! The gateway reuses `001`..`007` in two lists: message status codes (returned by
//! `Status:` / `status:` markers) and error codes (returned on `ERR:` lines). The
//! lookup functions differ only in which list they consult first.

/// Description returned for codes missing from both lists.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Describe a code in message-status context, falling back to the error list.
///
/// Never fails: unknown codes resolve to [`UNKNOWN_ERROR`].
pub fn get_error(code: &str) -> &'static str {
    status_description(code)
        .or_else(|| error_description(code))
        .unwrap_or(UNKNOWN_ERROR)
}

/// Describe a code reported on an `ERR:` line, falling back to the status list.
pub fn get_error_for_err_line(code: &str) -> &'static str {
    error_description(code)
        .or_else(|| status_description(code))
        .unwrap_or(UNKNOWN_ERROR)
}

/// Returns `true` if either list contains `code`.
pub fn is_known(code: &str) -> bool {
    status_description(code).is_some() || error_description(code).is_some()
}

fn status_description(code: &str) -> Option<&'static str> {
    Some(match code {
        "001" => "Message unknown",
        "002" => "Message queued",
        "003" => "Delivered to gateway",
        "004" => "Received by recipient",
        "005" => "Error with message",
        "006" => "User cancelled message delivery",
        "007" => "Error delivering message",
        "008" => "OK",
        "009" => "Routing error",
        "010" => "Message expired",
        "011" => "Message queued for later delivery",
        "012" => "Out of credit",
        "014" => "Maximum MT limit exceeded",
        _ => return None,
    })
}

fn error_description(code: &str) -> Option<&'static str> {
    Some(match code {
        "001" => "Authentication failed",
        "002" => "Unknown username or password",
        "003" => "Session ID expired",
        "004" => "Account frozen",
        "005" => "Missing session ID",
        "007" => "IP lockdown violation",
        "101" => "Invalid or missing parameters",
        "102" => "Invalid user data header parameter",
        "103" => "Unknown API message ID",
        "104" => "Unknown client message ID",
        "105" => "Invalid destination address",
        "106" => "Invalid source address",
        "107" => "Empty message",
        "108" => "Invalid or missing API ID",
        "109" => "Missing message ID",
        "110" => "Error with email message",
        "111" => "Invalid protocol",
        "112" => "Invalid message type",
        "113" => "Maximum message parts exceeded",
        "114" => "Cannot route message",
        "115" => "Message expired",
        "116" => "Invalid Unicode data",
        "120" => "Invalid delivery time",
        "121" => "Destination mobile number blocked",
        "122" => "Destination mobile opted out",
        "123" => "Invalid Sender ID",
        "128" => "Number delisted",
        "130" => "Maximum MT limit exceeded",
        "201" => "Invalid batch ID",
        "202" => "No batch template",
        "301" => "No credit left",
        "302" => "Max allowed credit",
        "901" => "Internal error",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_context_prefers_status_list() {
        assert_eq!(get_error("001"), "Message unknown");
        assert_eq!(get_error("004"), "Received by recipient");
        assert_eq!(get_error("114"), "Cannot route message");
    }

    #[test]
    fn err_line_context_prefers_error_list() {
        assert_eq!(get_error_for_err_line("001"), "Authentication failed");
        assert_eq!(get_error_for_err_line("301"), "No credit left");
        assert_eq!(get_error_for_err_line("008"), "OK");
    }

    #[test]
    fn unknown_codes_resolve_to_sentinel() {
        assert_eq!(get_error("999"), UNKNOWN_ERROR);
        assert_eq!(get_error_for_err_line("013"), UNKNOWN_ERROR);
        assert_eq!(get_error(""), UNKNOWN_ERROR);
        assert!(!is_known("999"));
        assert!(is_known("901"));
    }
}
