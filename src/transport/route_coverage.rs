use super::TransportError;
use super::markers::{self, CHARGE, COVERAGE_RE, OK};
use crate::domain::{RawPhoneNumber, RouteCoverageResult};

/// Form field name used by `utils/routeCoverage.php`.
const MSISDN_FIELD: &str = "msisdn";

pub fn encode_route_coverage_form(msisdn: &RawPhoneNumber) -> Vec<(String, String)> {
    vec![(MSISDN_FIELD.to_owned(), msisdn.for_gateway())]
}

/// Decode `OK: <description> Charge: <number>`.
pub fn decode_route_coverage_response(text: &str) -> Result<RouteCoverageResult, TransportError> {
    markers::ensure_not_empty(text)?;
    markers::reject_err_line(text)?;

    let Some(caps) = COVERAGE_RE.captures(text) else {
        let marker = if text.contains(OK) { CHARGE } else { OK };
        return Err(TransportError::MissingMarker { marker });
    };
    let description = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let charge = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    Ok(RouteCoverageResult {
        charge: markers::number(CHARGE, charge)?,
        description: description.trim().to_owned(),
    })
}
