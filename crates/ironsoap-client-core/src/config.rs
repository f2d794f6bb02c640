use std::time::Duration;

use url::Url;

use crate::credentials::BasicAuth;

/// Bound on connection establishment (DNS, TCP connect, TLS handshake).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sent as `User-Agent` unless the configuration overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!("ironsoap/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no endpoint configured and the service has no default endpoint")]
    MissingEndpoint,

    #[error("invalid endpoint URL '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

/// Certificate checking for `https` endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    #[default]
    Verify,

    /// DANGEROUS: accept any certificate for any host name, including
    /// self-signed and expired ones. Anyone on the network path can read and
    /// rewrite the exchange. Only for test rigs and endpoints you reach over
    /// an otherwise trusted link.
    DangerAcceptInvalidCerts,
}

/// What a successful HTTP status with a zero-length body means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyBodyPolicy {
    /// Treat it as a void result: the caller gets `Resp::default()`.
    #[default]
    Accept,

    /// Report [`crate::SoapError::EmptyBody`], for services where an empty
    /// answer can only mean a cut connection.
    Reject,
}

/// Everything a [`crate::SoapClient`] needs to reach one service. Fixed once
/// the client is built.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct ClientConfig {
    /// Service URL. Left empty, facades substitute their service's default.
    #[builder(default, setter(into))]
    pub endpoint: String,

    #[builder(default)]
    pub tls: TlsVerification,

    #[builder(default, setter(strip_option))]
    pub credentials: Option<BasicAuth>,

    #[builder(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,

    /// Bound on a whole exchange: connect, send, wait, read. `None` leaves
    /// only the connect timeout in force.
    #[builder(default, setter(strip_option))]
    pub deadline: Option<Duration>,

    #[builder(default = DEFAULT_USER_AGENT.to_owned(), setter(into))]
    pub user_agent: String,

    #[builder(default)]
    pub empty_body: EmptyBodyPolicy,
}

impl ClientConfig {
    /// Fills in `default` when no endpoint was configured.
    pub fn with_default_endpoint(mut self, default: &str) -> Self {
        if self.endpoint.trim().is_empty() {
            default.clone_into(&mut self.endpoint);
        }
        self
    }

    pub(crate) fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let url = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe() {
        let config = ClientConfig::builder().build();
        assert_eq!(config.tls, TlsVerification::Verify);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.deadline, None);
        assert!(config.credentials.is_none());
        assert_eq!(config.empty_body, EmptyBodyPolicy::Accept);
        assert!(config.user_agent.starts_with("ironsoap/"));
    }

    #[test]
    fn default_endpoint_only_fills_blanks() {
        let config = ClientConfig::builder()
            .build()
            .with_default_endpoint("http://default.example/svc.asmx");
        assert_eq!(config.endpoint, "http://default.example/svc.asmx");

        let config = ClientConfig::builder()
            .endpoint("http://mine.example/svc.asmx")
            .build()
            .with_default_endpoint("http://default.example/svc.asmx");
        assert_eq!(config.endpoint, "http://mine.example/svc.asmx");
    }

    #[test]
    fn endpoint_is_validated() {
        let missing = ClientConfig::builder().endpoint("  ").build();
        assert!(matches!(missing.endpoint_url(), Err(ConfigError::MissingEndpoint)));

        let invalid = ClientConfig::builder().endpoint("not a url").build();
        assert!(matches!(
            invalid.endpoint_url(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));

        let ftp = ClientConfig::builder().endpoint("ftp://example.com/").build();
        assert!(matches!(ftp.endpoint_url(), Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"));

        let ok = ClientConfig::builder()
            .endpoint("https://example.com/WeatherWebService.asmx")
            .build();
        assert_eq!(ok.endpoint_url().unwrap().host_str(), Some("example.com"));
    }
}
