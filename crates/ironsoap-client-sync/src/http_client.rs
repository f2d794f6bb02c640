use std::{
    io::Read,
    sync::Arc,
    time::{Duration, Instant},
};

use ironsoap_client_core::{
    ClientConfig, HttpClient, HttpRequest, HttpResponse, TlsVerification, TransportError,
};
use tracing::{debug, error, info, info_span, instrument, warn};

/// [`HttpClient`] over a `ureq` agent that keeps no idle connections, so
/// every exchange dials afresh and closes when done.
#[derive(Debug, Clone)]
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let tls = tls_connector(config.tls).map_err(|e| TransportError::Connect {
            endpoint: config.endpoint.clone(),
            source: e.into(),
        })?;

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .max_idle_connections(0)
            .max_idle_connections_per_host(0)
            .tls_connector(Arc::new(tls))
            .build();

        Ok(Self { agent })
    }

    fn make_request(&self, request: &HttpRequest) -> Result<HttpResponse, ureq::Error> {
        let span = info_span!("http.request", url = %request.url);
        let _enter = span.enter();

        let mut ureq_request = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            ureq_request = ureq_request.set(name, value);
        }
        if let Some(deadline) = request.deadline {
            ureq_request = ureq_request.timeout(deadline);
        }

        debug!(
            headers_count = request.headers.len(),
            body_length = request.body.len(),
            deadline = ?request.deadline,
            "request configured"
        );

        let response = match ureq_request.send_string(&request.body) {
            Ok(response) => response,
            // Faults come back as 500 and still carry an envelope.
            Err(ureq::Error::Status(status, response)) => {
                debug!(status, "received error status");
                response
            }
            Err(e) => return Err(e),
        };

        let status_code = response.status();
        let headers: Vec<(String, String)> = response
            .headers_names()
            .iter()
            .filter_map(|name| {
                response
                    .header(name)
                    .map(|value| (name.clone(), value.to_owned()))
            })
            .collect();

        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body).map_err(|e| {
            error!(error = %e, "failed to read response body");
            ureq::Error::from(e)
        })?;

        info!(status_code, response_body_length = body.len(), "response received");

        Ok(HttpResponse {
            status_code,
            headers,
            body,
        })
    }
}

impl HttpClient for UreqHttpClient {
    #[instrument(
        name = "http_client.send",
        level = "info",
        skip(self, request),
        fields(url = %request.url, deadline = ?request.deadline),
        err
    )]
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let started = Instant::now();
        self.make_request(&request)
            .map_err(|e| classify(e, &request, started.elapsed()))
    }
}

fn tls_connector(verification: TlsVerification) -> Result<native_tls::TlsConnector, native_tls::Error> {
    let mut builder = native_tls::TlsConnector::builder();
    if verification == TlsVerification::DangerAcceptInvalidCerts {
        warn!("building TLS connector without certificate or hostname verification");
        builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }
    builder.build()
}

/// Sorts a failed exchange into the transport error kinds. Running out of
/// the overall deadline wins over whatever stage the exchange was in.
fn classify(e: ureq::Error, request: &HttpRequest, elapsed: Duration) -> TransportError {
    let endpoint = request.url.clone();

    if let Some(deadline) = request.deadline {
        if elapsed >= deadline {
            error!(error = %e, ?elapsed, "exchange ran past its deadline");
            return TransportError::DeadlineExceeded { endpoint, deadline };
        }
    }

    error!(error = %e, "request failed");
    match e.kind() {
        ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed => TransportError::Connect {
            endpoint,
            source: Box::new(e),
        },
        _ => TransportError::Exchange {
            endpoint,
            source: Box::new(e),
        },
    }
}
