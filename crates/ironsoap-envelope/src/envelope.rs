use serde::Serialize;
use tracing::trace;

use crate::{EnvelopeError, Fault, SOAP_ENV_NS};

/// Writes `payload` as a standalone element and places it in the Body.
///
/// quick-xml names the root after the serde name of `T`, so unit structs
/// still produce an element and shapes without a tag of their own (numbers,
/// strings, sequences) are refused instead of being flattened into text.
fn wrap<T: Serialize>(payload: &T) -> Result<String, EnvelopeError> {
    let content = quick_xml::se::to_string(payload)?;
    let xml = format!(
        r#"<soap:Envelope xmlns:soap="{SOAP_ENV_NS}"><soap:Body>{content}</soap:Body></soap:Envelope>"#
    );
    trace!(envelope = %xml, "encoded SOAP envelope");
    Ok(xml)
}

/// Serializes `payload` as the single child of the envelope's Body.
///
/// The payload element takes the serde name of `T`, so request types are
/// expected to carry `#[serde(rename = "...")]` and, when the service needs
/// it, an `@xmlns` attribute field.
pub fn encode<T: Serialize>(payload: &T) -> Result<String, EnvelopeError> {
    wrap(payload)
}

/// An envelope whose Body has no children, for bindings that carry no
/// request payload.
pub fn encode_empty() -> String {
    format!(r#"<soap:Envelope xmlns:soap="{SOAP_ENV_NS}"><soap:Body/></soap:Envelope>"#)
}

/// An envelope carrying `fault` in its Body, the way a peer reports an error.
pub fn encode_fault(fault: &Fault) -> Result<String, EnvelopeError> {
    wrap(fault)
}
