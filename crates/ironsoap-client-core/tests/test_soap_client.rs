#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ironsoap_client_core::{
        BasicAuth, ClientConfig, EmptyBodyPolicy, HttpClient, HttpRequest, HttpResponse,
        SoapClient, SoapError, TlsVerification, TransportError,
    };
    use serde::{Deserialize, Serialize};

    const ENDPOINT: &str = "http://www.webxml.com.cn/WebServices/WeatherWebService.asmx";

    /// Answers every request with the same canned response and keeps what it was sent.
    struct RecordingHttp {
        response: HttpResponse,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttp {
        fn new(status_code: u16, body: &str) -> Self {
            Self {
                response: HttpResponse {
                    status_code,
                    headers: vec![("Content-Type".to_owned(), "text/xml; charset=utf-8".to_owned())],
                    body: body.as_bytes().to_vec(),
                },
                sent: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl HttpClient for &RecordingHttp {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }

    #[derive(Serialize)]
    #[serde(rename = "getSupportCity")]
    struct GetSupportCity {
        #[serde(rename = "@xmlns")]
        xmlns: &'static str,
        #[serde(rename = "byProvinceName")]
        province: String,
    }

    fn support_city(province: &str) -> GetSupportCity {
        GetSupportCity {
            xmlns: "http://WebXml.com.cn/",
            province: province.to_owned(),
        }
    }

    #[derive(Debug, Default, Deserialize)]
    struct GetSupportCityResponse {
        #[serde(rename = "getSupportCityResult")]
        result: ArrayOfString,
    }

    #[derive(Debug, Default, Deserialize)]
    struct ArrayOfString {
        #[serde(rename = "string", default)]
        items: Vec<String>,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    const CITY_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Body>
    <getSupportCityResponse xmlns="http://WebXml.com.cn/">
      <getSupportCityResult>
        <string>广州 (59287)</string>
        <string>深圳 (59493)</string>
      </getSupportCityResult>
    </getSupportCityResponse>
  </soap:Body>
</soap:Envelope>"#;

    const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Client</faultcode>
      <faultstring>Invalid province name</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

    fn no_answer(_: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::default())
    }

    fn config() -> ClientConfig {
        ClientConfig::builder().endpoint(ENDPOINT).build()
    }

    /// Test: a successful call POSTs one envelope with the SOAP headers and decodes the answer
    /// Expected: one request, SOAPAction and Content-Type set, no Authorization, cities decoded
    #[test]
    fn test_call_sends_envelope_and_decodes_content() {
        let http = RecordingHttp::new(200, CITY_RESPONSE);
        let client = SoapClient::new(config(), &http).unwrap();

        let response: GetSupportCityResponse = client
            .call("http://WebXml.com.cn/getSupportCity", &support_city("广东"))
            .unwrap();

        assert_eq!(response.result.items, vec!["广州 (59287)", "深圳 (59493)"]);

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, ENDPOINT);
        assert_eq!(request.header("SOAPAction"), Some("http://WebXml.com.cn/getSupportCity"));
        assert_eq!(request.header("Content-Type"), Some(r#"text/xml; charset="utf-8""#));
        assert_eq!(request.header("Connection"), Some("close"));
        assert!(request.header("Authorization").is_none());
        assert!(request.body.contains(r#"<getSupportCity xmlns="http://WebXml.com.cn/">"#));
        assert!(request.body.contains("<byProvinceName>广东</byProvinceName>"));
        assert!(request.deadline.is_none());
    }

    /// Test: credentials in the configuration
    /// Expected: Basic Authorization header with base64(login:password)
    #[test]
    fn test_basic_auth_header() {
        let http = RecordingHttp::new(200, CITY_RESPONSE);
        let config = ClientConfig::builder()
            .endpoint(ENDPOINT)
            .credentials(BasicAuth::new("admin", "1234"))
            .build();
        let client = SoapClient::new(config, &http).unwrap();

        let _: GetSupportCityResponse = client.call("", &support_city("广东")).unwrap();

        let requests = http.requests();
        assert_eq!(requests[0].header("Authorization"), Some("Basic YWRtaW46MTIzNA=="));
        assert!(requests[0].header("SOAPAction").is_none());
    }

    /// Test: the request payload cannot be serialized
    /// Expected: encode error, and the HTTP client is never invoked
    #[test]
    fn test_encode_failure_does_no_io() {
        let http = RecordingHttp::new(200, CITY_RESPONSE);
        let client = SoapClient::new(config(), &http).unwrap();

        let err = client
            .call::<_, GetSupportCityResponse>("urn:x", &Unserializable)
            .unwrap_err();

        assert!(matches!(err, SoapError::Encode(_)));
        assert!(http.requests().is_empty());
    }

    /// Test: SOAP fault delivered with HTTP 500
    /// Expected: SoapError::Fault whose text is the faultstring
    #[test]
    fn test_fault_with_http_500() {
        let http = RecordingHttp::new(500, FAULT_RESPONSE);
        let client = SoapClient::new(config(), &http).unwrap();

        let err = client
            .call::<_, GetSupportCityResponse>("", &support_city("nowhere"))
            .unwrap_err();

        assert!(err.is_fault());
        assert_eq!(err.to_string(), "Invalid province name");
        let fault = err.fault().unwrap();
        assert_eq!(fault.code.as_deref(), Some("soap:Client"));
    }

    /// Test: SOAP fault delivered with HTTP 200
    /// Expected: still SoapError::Fault
    #[test]
    fn test_fault_with_http_200() {
        let http = RecordingHttp::new(200, FAULT_RESPONSE);
        let client = SoapClient::new(config(), &http).unwrap();

        let err = client
            .call::<_, GetSupportCityResponse>("", &support_city("nowhere"))
            .unwrap_err();

        assert!(matches!(err, SoapError::Fault(_)));
    }

    /// Test: zero-length body with HTTP 200 under each empty-body policy
    /// Expected: Accept gives the default value, Reject gives EmptyBody
    #[test]
    fn test_empty_body_policies() {
        let http = RecordingHttp::new(200, "");

        let accepting = SoapClient::new(config(), &http).unwrap();
        let response: GetSupportCityResponse = accepting.call("", &support_city("广东")).unwrap();
        assert!(response.result.items.is_empty());

        let rejecting_config = ClientConfig::builder()
            .endpoint(ENDPOINT)
            .empty_body(EmptyBodyPolicy::Reject)
            .build();
        let rejecting = SoapClient::new(rejecting_config, &http).unwrap();
        let err = rejecting
            .call::<_, GetSupportCityResponse>("", &support_city("广东"))
            .unwrap_err();
        assert!(matches!(err, SoapError::EmptyBody { status: 200, .. }));
    }

    /// Test: an HTML error page with HTTP 404
    /// Expected: HttpStatus carrying the decode failure as its source
    #[test]
    fn test_html_error_page_is_http_status() {
        let http = RecordingHttp::new(404, "<html><head><title>Not Found</title></head></html>");
        let client = SoapClient::new(config(), &http).unwrap();

        let err = client
            .call::<_, GetSupportCityResponse>("", &support_city("广东"))
            .unwrap_err();

        match err {
            SoapError::HttpStatus { status, endpoint, source } => {
                assert_eq!(status, 404);
                assert_eq!(endpoint, ENDPOINT);
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Test: the HTTP client fails before any response
    /// Expected: the transport error is passed through unchanged
    #[test]
    #[tracing_test::traced_test]
    fn test_transport_error_passes_through() {
        let client = SoapClient::new(config(), |request: HttpRequest| -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connect {
                endpoint: request.url,
                source: "connection refused".into(),
            })
        })
        .unwrap();

        let err = client
            .call::<_, GetSupportCityResponse>("", &support_city("广东"))
            .unwrap_err();

        assert!(matches!(err, SoapError::Transport(TransportError::Connect { .. })));
        assert!(logs_contain("sending SOAP request"));
        assert!(!logs_contain("received SOAP response"));
    }

    /// Test: a client built to skip certificate checks
    /// Expected: the construction is logged as a warning naming the endpoint
    #[test]
    #[tracing_test::traced_test]
    fn test_insecure_tls_is_warned() {
        let config = ClientConfig::builder()
            .endpoint("https://self-signed.example/svc.asmx")
            .tls(TlsVerification::DangerAcceptInvalidCerts)
            .build();

        SoapClient::new(config, no_answer).unwrap();

        assert!(logs_contain("WARN"));
        assert!(logs_contain("verification disabled"));
        assert!(logs_contain("https://self-signed.example/svc.asmx"));
    }

    /// Test: a client with the default TLS policy
    /// Expected: no verification warning
    #[test]
    #[tracing_test::traced_test]
    fn test_verified_tls_is_not_warned() {
        let config = ClientConfig::builder()
            .endpoint("https://www.example.com/svc.asmx")
            .build();

        SoapClient::new(config, no_answer).unwrap();

        assert!(!logs_contain("verification disabled"));
    }

    /// Test: a request-less call
    /// Expected: an envelope with an empty Body is sent
    #[test]
    fn test_call_empty_sends_empty_body() {
        let http = RecordingHttp::new(200, CITY_RESPONSE);
        let client = SoapClient::new(config(), &http).unwrap();

        let _: GetSupportCityResponse = client.call_empty("").unwrap();

        let requests = http.requests();
        assert!(requests[0].body.contains("<soap:Body/>"));
    }
}
