use std::time::Duration;

use ironsoap_envelope::{Body, EnvelopeError};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use crate::{
    SoapError,
    config::{ClientConfig, EmptyBodyPolicy, TlsVerification},
    http::{HttpBuilder, HttpClient, HttpResponse},
};

/// Per-call overrides of the client configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    pub deadline: Option<Duration>,
}

impl CallOptions {
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }
}

/// Runs SOAP calls against one endpoint. Holds no per-call state, so a
/// single instance can be shared between threads behind an `Arc`.
#[derive(Debug)]
pub struct SoapClient<H> {
    config: ClientConfig,
    http_builder: HttpBuilder,
    http: H,
}

impl<H: HttpClient> SoapClient<H> {
    pub fn new(config: ClientConfig, http: H) -> Result<Self, SoapError> {
        let endpoint = config.endpoint_url()?;

        if config.tls == TlsVerification::DangerAcceptInvalidCerts {
            warn!(
                endpoint = %endpoint,
                "TLS certificate and hostname verification disabled; the exchange is open to tampering"
            );
        }

        let http_builder = HttpBuilder::new(endpoint, &config);
        Ok(Self {
            config,
            http_builder,
            http,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &Url {
        self.http_builder.url()
    }

    pub fn http_client(&self) -> &H {
        &self.http
    }

    /// Sends `request` as the body of a SOAP envelope and decodes the answer.
    ///
    /// An empty `action` omits the `SOAPAction` header.
    pub fn call<Req, Resp>(&self, action: &str, request: &Req) -> Result<Resp, SoapError>
    where
        Req: Serialize,
        Resp: DeserializeOwned + Default,
    {
        self.call_with(action, request, CallOptions::default())
    }

    #[instrument(
        name = "soap.call",
        level = "info",
        skip(self, request, options),
        fields(endpoint = %self.endpoint()),
        err
    )]
    pub fn call_with<Req, Resp>(
        &self,
        action: &str,
        request: &Req,
        options: CallOptions,
    ) -> Result<Resp, SoapError>
    where
        Req: Serialize,
        Resp: DeserializeOwned + Default,
    {
        let envelope = ironsoap_envelope::encode(request).map_err(SoapError::Encode)?;
        self.exchange(action, envelope, options)
    }

    /// A call whose request is an envelope with an empty `Body`.
    #[instrument(
        name = "soap.call_empty",
        level = "info",
        skip(self),
        fields(endpoint = %self.endpoint()),
        err
    )]
    pub fn call_empty<Resp>(&self, action: &str) -> Result<Resp, SoapError>
    where
        Resp: DeserializeOwned + Default,
    {
        self.exchange(action, ironsoap_envelope::encode_empty(), CallOptions::default())
    }

    fn exchange<Resp>(
        &self,
        action: &str,
        envelope: String,
        options: CallOptions,
    ) -> Result<Resp, SoapError>
    where
        Resp: DeserializeOwned + Default,
    {
        let deadline = options.deadline.or(self.config.deadline);
        let request = self.http_builder.post(action, envelope, deadline);
        debug!(request = ?request, "sending SOAP request");

        let response = self.http.send(request)?;
        info!(
            status = response.status_code,
            body_len = response.body.len(),
            "received SOAP response"
        );

        self.interpret(response)
    }

    fn interpret<Resp>(&self, response: HttpResponse) -> Result<Resp, SoapError>
    where
        Resp: DeserializeOwned + Default,
    {
        let status = response.status_code;
        let success = response.is_success();

        if response.body.is_empty() {
            return match (success, self.config.empty_body) {
                (true, EmptyBodyPolicy::Accept) => Ok(Resp::default()),
                (true, EmptyBodyPolicy::Reject) => Err(SoapError::EmptyBody {
                    status,
                    endpoint: self.endpoint().to_string(),
                }),
                (false, _) => Err(self.http_status(status, None)),
            };
        }

        trace!(body = %String::from_utf8_lossy(&response.body), "SOAP response body");

        match ironsoap_envelope::decode::<Resp>(&response.body) {
            Ok(Body::Content(value)) => Ok(value),
            Ok(Body::Empty) => Ok(Resp::default()),
            Ok(Body::Fault(fault)) => {
                debug!(fault = ?fault, "peer returned a SOAP fault");
                Err(SoapError::Fault(fault))
            }
            Err(error) if success => Err(SoapError::Decode(error)),
            Err(error) => Err(self.http_status(status, Some(error))),
        }
    }

    fn http_status(&self, status: u16, source: Option<EnvelopeError>) -> SoapError {
        SoapError::HttpStatus {
            status,
            endpoint: self.endpoint().to_string(),
            source,
        }
    }
}
