use std::{fmt, time::Duration};

use url::Url;

use crate::config::ClientConfig;

pub const CONTENT_TYPE_XML: &str = r#"text/xml; charset="utf-8""#;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures below the SOAP layer, as reported by the HTTP stack.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// DNS, refused or timed-out connect, TLS handshake.
    #[error("could not connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("exchange with {endpoint} did not complete within {deadline:?}")]
    DeadlineExceeded { endpoint: String, deadline: Duration },

    #[error("HTTP exchange with {endpoint} failed: {source}")]
    Exchange {
        endpoint: String,
        #[source]
        source: BoxError,
    },
}

/// Performs one HTTP exchange. Implementations must not retry.
pub trait HttpClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> HttpClient for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// A fully prepared SOAP POST.
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Bound on the whole exchange, if any.
    pub deadline: Option<Duration>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(key, value)| {
                if key.eq_ignore_ascii_case("Authorization") {
                    (key.as_str(), "<redacted>")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .field("deadline", &self.deadline)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Builds the POST for each call from the fixed part of the configuration.
#[derive(Debug, Clone)]
pub(crate) struct HttpBuilder {
    url: Url,
    headers: Vec<(String, String)>,
}

impl HttpBuilder {
    pub(crate) fn new(url: Url, config: &ClientConfig) -> Self {
        let mut builder = Self {
            url,
            headers: vec![
                ("Content-Type".to_owned(), CONTENT_TYPE_XML.to_owned()),
                ("User-Agent".to_owned(), config.user_agent.clone()),
                // One connection per call, never returned to a pool.
                ("Connection".to_owned(), "close".to_owned()),
            ],
        };

        if let Some(credentials) = &config.credentials {
            builder.with_auth_header(credentials.authorization_header());
        }

        builder
    }

    fn with_auth_header(&mut self, header: String) {
        self.headers.push(("Authorization".to_owned(), header));
    }

    pub(crate) fn url(&self) -> &Url {
        &self.url
    }

    /// An empty `action` leaves the `SOAPAction` header out entirely.
    pub(crate) fn post(&self, action: &str, body: String, deadline: Option<Duration>) -> HttpRequest {
        let mut headers = self.headers.clone();
        if !action.is_empty() {
            headers.push(("SOAPAction".to_owned(), action.to_owned()));
        }

        HttpRequest {
            url: self.url.to_string(),
            headers,
            body,
            deadline,
        }
    }
}
