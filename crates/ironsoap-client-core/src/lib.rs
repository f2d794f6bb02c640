//! The SOAP transport core shared by every service facade.
//!
//! This crate decides *what* goes on the wire and what a response means; it
//! does no I/O itself. An [`HttpClient`] implementation performs the
//! exchange (`ironsoap-client-sync` provides a blocking one).

pub mod client;
pub mod config;
pub mod credentials;
pub mod http;

use ironsoap_envelope::{EnvelopeError, Fault};

pub use client::{CallOptions, SoapClient};
pub use config::{ClientConfig, ConfigError, EmptyBodyPolicy, TlsVerification};
pub use credentials::BasicAuth;
pub use http::{HttpClient, HttpRequest, HttpResponse, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to encode SOAP request: {0}")]
    Encode(#[source] EnvelopeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode SOAP response: {0}")]
    Decode(#[source] EnvelopeError),

    /// The peer answered with a SOAP fault; displays as its `faultstring`.
    #[error("{0}")]
    Fault(Fault),

    /// A non-2xx status. When the body was present but could not be
    /// decoded, the decode failure is kept as `source`; see
    /// [`SoapError::decode_error`].
    #[error("HTTP status {status} from {endpoint}")]
    HttpStatus {
        status: u16,
        endpoint: String,
        #[source]
        source: Option<EnvelopeError>,
    },

    #[error("Empty response body from {endpoint} (HTTP status {status})")]
    EmptyBody { status: u16, endpoint: String },
}

impl SoapError {
    /// The structured fault, when the peer reported one.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// The envelope decoding failure, whatever the HTTP status was.
    ///
    /// A body that fails to decode is reported as [`SoapError::Decode`]
    /// under a 2xx status and as [`SoapError::HttpStatus`] otherwise; both
    /// carry the same [`EnvelopeError`].
    pub fn decode_error(&self) -> Option<&EnvelopeError> {
        match self {
            Self::Decode(error) => Some(error),
            Self::HttpStatus {
                source: Some(error),
                ..
            } => Some(error),
            _ => None,
        }
    }
}
