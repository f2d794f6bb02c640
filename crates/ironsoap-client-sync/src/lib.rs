//! Blocking execution of SOAP calls with [`ureq`].

mod http_client;

pub use http_client::UreqHttpClient;

use ironsoap_client_core::{ClientConfig, SoapClient, SoapError};

/// Builds a ready-to-use client for `config.endpoint`.
pub fn connect(config: ClientConfig) -> Result<SoapClient<UreqHttpClient>, SoapError> {
    let http = UreqHttpClient::new(&config)?;
    SoapClient::new(config, http)
}
