//! SOAP 1.1 envelope codec.
//!
//! [`encode`] places a serde payload as the only child of `soap:Body`;
//! [`decode`] goes the other way and yields a [`Body`], which is either the
//! caller's content, a [`Fault`] reported by the peer, or nothing at all.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! #[serde(rename = "Echo")]
//! struct Echo {
//!     #[serde(rename = "Text")]
//!     text: String,
//! }
//!
//! let xml = ironsoap_envelope::encode(&Echo { text: "hello".into() }).unwrap();
//! let body = ironsoap_envelope::decode::<Echo>(xml.as_bytes()).unwrap();
//! assert_eq!(body, ironsoap_envelope::Body::Content(Echo { text: "hello".into() }));
//! ```

mod body;
mod envelope;
mod fault;

pub use body::{Body, decode, decode_into};
pub use envelope::{encode, encode_empty, encode_fault};
pub use fault::Fault;

/// Namespace of the SOAP 1.1 `Envelope`, `Header`, `Body` and `Fault` elements.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("failed to serialize SOAP payload: {0}")]
    Serialize(#[from] quick_xml::SeError),

    #[error("SOAP message is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] ironsoap_xml::XmlError),

    #[error("not a SOAP 1.1 envelope: {0}")]
    NotAnEnvelope(#[source] ironsoap_xml::XmlError),

    #[error("SOAP envelope has no Body element")]
    MissingBody,

    #[error(
        "found multiple elements inside SOAP body (<{first}> followed by <{second}>); not wrapped-document/literal WS-I compliant"
    )]
    MultipleBodyElements { first: String, second: String },

    #[error("no destination was provided to decode the SOAP body into")]
    MissingDestination,

    #[error("failed to deserialize <{element}> from SOAP body: {source}")]
    Deserialize {
        element: String,
        #[source]
        source: quick_xml::DeError,
    },
}
