use url::Url;

use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::oauth::{self, Consumer};
use crate::params::{to_pairs, Params};
use crate::response::{parse_envelope, RawResponse};
use crate::session::Session;

/// A request signer bound to one consumer, an optional session and a host.
///
/// Without a session requests are signed with the consumer credentials only,
/// which is what the OAuth handshake endpoints expect.
pub struct SignedRequest<'a> {
    transport: &'a dyn Transport,
    consumer: Consumer,
    session: Option<&'a Session>,
    base_url: &'a str,
    callback: Option<&'a str>,
    verifier: Option<&'a str>,
    headers: Vec<(String, String)>,
}

impl<'a> SignedRequest<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        consumer: Consumer,
        session: Option<&'a Session>,
        base_url: &'a str,
    ) -> Self {
        SignedRequest {
            transport,
            consumer,
            session,
            base_url,
            callback: None,
            verifier: None,
            headers: vec![("Accept".to_string(), "application/json".to_string())],
        }
    }

    /// Add a header sent with the request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sign with `oauth_callback` set, as the request token call needs
    pub fn callback(mut self, callback: &'a str) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Sign with `oauth_verifier` set, as the access token call needs
    pub fn verifier(mut self, verifier: Option<&'a str>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Build the signed HTTP request without sending it
    ///
    /// GET parameters go in the query string, POST parameters in a form body.
    /// The OAuth parameters travel with them in both cases.
    pub fn build(
        &self,
        method: HttpMethod,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<HttpRequest> {
        let url = Url::parse(&format!("{}{}", self.base_url.trim_end_matches('/'), path))?;

        let mut signer = self.consumer.signer(self.session);
        signer.callback(self.callback).verifier(self.verifier);
        let (url, body) = oauth::sign(&signer, method, &url, params)?;

        Ok(HttpRequest {
            method,
            url,
            headers: self.headers.clone(),
            body,
        })
    }

    /// Sign and send, returning the raw HTTP response
    pub fn send_raw(
        &self,
        method: HttpMethod,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<HttpResponse> {
        let request = self.build(method, path, params)?;
        self.transport.send(request)
    }

    /// Sign and send an API call, returning the body of the response envelope
    pub fn send(&self, method: HttpMethod, path: &str, params: &Params) -> Result<RawResponse> {
        let response = self.send_raw(method, path, to_pairs(params))?;
        parse_envelope(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use std::sync::Mutex;

    struct FixedTransport {
        body: &'static str,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for FixedTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: 200,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    fn transport(body: &'static str) -> FixedTransport {
        FixedTransport {
            body,
            seen: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_build_get_puts_params_in_query() {
        let transport = transport("{}");
        let session = Session::derive("user-token", "user-secret");
        let request = SignedRequest::new(
            &transport,
            Consumer::new("ck", "cs"),
            Some(&session),
            "https://wbsapi.withings.net/",
        )
        .header("User-Agent", "test-agent");

        let built = request
            .build(
                HttpMethod::Get,
                "/measure",
                vec![("action".to_string(), "getmeas".to_string())],
            )
            .unwrap();

        assert_eq!(built.url.path(), "/measure");
        assert!(built.body.is_none());
        assert_eq!(built.param("action").as_deref(), Some("getmeas"));
        assert_eq!(built.param("oauth_token").as_deref(), Some("user-token"));
        assert_eq!(built.param("oauth_consumer_key").as_deref(), Some("ck"));
        assert!(built.param("oauth_signature").is_some());
        assert_eq!(built.header("User-Agent"), Some("test-agent"));
    }

    #[test]
    fn test_build_post_puts_params_in_body() {
        let transport = transport("{}");
        let request = SignedRequest::new(
            &transport,
            Consumer::new("ck", "cs"),
            None,
            "https://wbsapi.withings.net",
        );

        let built = request
            .build(
                HttpMethod::Post,
                "/notify",
                vec![("action".to_string(), "subscribe".to_string())],
            )
            .unwrap();

        assert!(built.url.query().is_none());
        assert_eq!(built.param("action").as_deref(), Some("subscribe"));
        assert!(built.param("oauth_token").is_none());
    }

    #[test]
    fn test_send_strips_envelope() {
        let transport = transport(r#"{"status": 0, "body": {"series": []}}"#);
        let request = SignedRequest::new(
            &transport,
            Consumer::new("ck", "cs"),
            None,
            "https://wbsapi.withings.net",
        );

        let mut params = Params::new();
        params.insert("action".to_string(), ParamValue::from("get"));
        let raw = request.send(HttpMethod::Get, "/v2/sleep", &params).unwrap();

        assert!(raw.contains_key("series"));
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }
}
