use oauth1_request::signature_method::HmacSha1;
use oauth1_request::{Builder, Credentials, ParameterList};
use url::Url;

use crate::error::Result;
use crate::http::HttpMethod;
use crate::session::Session;

/// OAuth 1.0a signer over borrowed consumer and token credentials
pub type Signer<'a> = Builder<'a, HmacSha1, &'a str, &'a str>;

/// Consumer holds the application credentials used to sign every request.
#[derive(Clone)]
pub struct Consumer {
    /// Consumer key sent as `oauth_consumer_key`
    pub key: String,
    /// Consumer secret, first half of the signing key
    secret: String,
}

impl Consumer {
    /// Create a new Consumer from its key and secret
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Consumer {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// HMAC-SHA1 signer for this consumer, with the token pair when one is given
    ///
    /// `oauth_version=1.0` is always sent. Nonce and timestamp are generated
    /// per request unless pinned on the returned builder.
    pub fn signer<'a>(&'a self, token: Option<&'a Session>) -> Signer<'a> {
        let mut signer = Builder::new(
            Credentials::new(self.key.as_str(), self.secret.as_str()),
            HmacSha1::new(),
        );
        signer
            .token(token.map(|session| Credentials::new(session.token(), session.secret())))
            .version(true);
        signer
    }
}

// Implement Debug manually to avoid exposing the consumer secret
impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Sign a request's parameters and lay them out for the wire
///
/// Returns the URL to call and the form body, if any. GET parameters and
/// the oauth_* fields go in the query string; POST puts them all in an
/// `x-www-form-urlencoded` body. Any query already on `url` is dropped.
pub fn sign(
    signer: &Signer<'_>,
    method: HttpMethod,
    url: &Url,
    params: Vec<(String, String)>,
) -> Result<(Url, Option<String>)> {
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);

    let params: ParameterList<String, String> = ParameterList::new(params);

    match method {
        HttpMethod::Get => {
            let signed = signer.to_query(method.as_str(), endpoint.as_str().to_owned(), &params);
            Ok((Url::parse(&signed)?, None))
        }
        HttpMethod::Post => {
            let body = signer.to_form(method.as_str(), endpoint.as_str(), &params);
            Ok((endpoint, Some(body)))
        }
    }
}
