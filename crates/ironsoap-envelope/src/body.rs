use ironsoap_xml::parser::{self, Node};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{EnvelopeError, Fault, SOAP_ENV_NS};

/// The decoded content of a SOAP Body.
///
/// Which variant applies is settled by looking at the Body's child element
/// before anything is deserialized, so the caller's type is never asked to
/// make sense of a `Fault`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<T> {
    /// The single child element, deserialized into the caller's type.
    Content(T),
    /// The peer answered with a SOAP fault.
    Fault(Fault),
    /// No child element, or no bytes at all.
    Empty,
}

impl<T> Body<T> {
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// Splits the body into its content, if any, and the fault as an error.
    pub fn into_result(self) -> Result<Option<T>, Fault> {
        match self {
            Self::Content(content) => Ok(Some(content)),
            Self::Fault(fault) => Err(fault),
            Self::Empty => Ok(None),
        }
    }
}

/// Decodes a SOAP 1.1 envelope.
///
/// Zero bytes decode to [`Body::Empty`]: some services answer void
/// operations with an empty HTTP body rather than an empty envelope.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Body<T>, EnvelopeError> {
    if bytes.is_empty() {
        debug!("empty SOAP message, nothing to decode");
        return Ok(Body::Empty);
    }

    let xml = std::str::from_utf8(bytes)?;
    trace!(envelope = %xml, "decoding SOAP envelope");

    let document = parser::parse(xml).map_err(ironsoap_xml::XmlError::from)?;
    let envelope = document.root_element();
    parser::expect_element(envelope, SOAP_ENV_NS, "Envelope")
        .map_err(EnvelopeError::NotAnEnvelope)?;

    let body = parser::element_children(envelope)
        .find(|child| parser::is_element(*child, SOAP_ENV_NS, "Body"))
        .ok_or(EnvelopeError::MissingBody)?;

    match single_child(body)? {
        None => Ok(Body::Empty),
        Some(child) if parser::is_element(child, SOAP_ENV_NS, "Fault") => {
            let fault = Fault::from_node(child);
            debug!(code = ?fault.code, message = ?fault.message, "SOAP fault in body");
            Ok(Body::Fault(fault))
        }
        Some(child) => {
            let content = quick_xml::de::from_str(parser::outer_xml(child)).map_err(|source| {
                EnvelopeError::Deserialize {
                    element: child.tag_name().name().to_owned(),
                    source,
                }
            })?;
            Ok(Body::Content(content))
        }
    }
}

/// Decodes into a caller-provided destination.
///
/// Content overwrites `destination`; a fault is handed back and leaves
/// `destination` as it was, as does an empty body. A missing destination is
/// an error before the bytes are even looked at.
pub fn decode_into<T: DeserializeOwned>(
    bytes: &[u8],
    destination: Option<&mut T>,
) -> Result<Option<Fault>, EnvelopeError> {
    let destination = destination.ok_or(EnvelopeError::MissingDestination)?;

    match decode(bytes)? {
        Body::Content(content) => {
            *destination = content;
            Ok(None)
        }
        Body::Fault(fault) => Ok(Some(fault)),
        Body::Empty => Ok(None),
    }
}

// WS-I wrapped document/literal: at most one element in Body. Counting
// happens up front, so the error does not depend on whether the fault or the
// content comes first.
fn single_child<'a, 'input: 'a>(
    body: Node<'a, 'input>,
) -> Result<Option<Node<'a, 'input>>, EnvelopeError> {
    let mut children = parser::element_children(body);
    let first = children.next();

    if let (Some(first), Some(second)) = (first, children.next()) {
        return Err(EnvelopeError::MultipleBodyElements {
            first: first.tag_name().name().to_owned(),
            second: second.tag_name().name().to_owned(),
        });
    }

    Ok(first)
}
