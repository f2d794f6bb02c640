//! Facades over two public ASMX services, each a thin typed layer on a
//! shared [`SoapClient`].
//!
//! Request types serialize to the exact element the service expects and
//! response types mirror the service schema closely enough to decode it;
//! facades do no XML work of their own.

pub mod ferry;
pub mod weather;
pub mod xsd;

use std::sync::Arc;

use ironsoap_client_core::{ClientConfig, HttpClient, SoapClient, SoapError};

/// Builds the shared client for a service, substituting `default_endpoint`
/// when the configuration names none.
pub(crate) fn shared_client<H: HttpClient>(
    config: ClientConfig,
    default_endpoint: &str,
    http: H,
) -> Result<Arc<SoapClient<H>>, SoapError> {
    let client = SoapClient::new(config.with_default_endpoint(default_endpoint), http)?;
    Ok(Arc::new(client))
}
