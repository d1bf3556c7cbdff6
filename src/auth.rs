//! OAuth 1.0a handshake: request token, user authorization, access token.
//!
//! These calls are signed with the consumer credentials and, once obtained,
//! the request token. They never use the client's session.

use std::collections::HashMap;
use url::{form_urlencoded, Url};

use crate::client::Client;
use crate::error::{Result, WithingsError};
use crate::http::{HttpMethod, HttpResponse};
use crate::request::SignedRequest;
use crate::session::Session;

/// Temporary credentials obtained at the start of the handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub secret: String,
}

/// Long-lived user credentials obtained at the end of the handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
    /// Withings user id, when returned with the token
    pub user_id: Option<String>,
}

impl AccessToken {
    /// Session to configure a client with
    pub fn session(&self) -> Session {
        Session::derive(self.token.clone(), self.secret.clone())
    }
}

impl Client {
    fn oauth_request<'a>(&'a self, token: Option<&'a Session>) -> Result<SignedRequest<'a>> {
        let consumer = self.config().consumer()?;
        Ok(SignedRequest::new(
            self.transport(),
            consumer,
            token,
            &self.config().oauth_base_url,
        )
        .header("User-Agent", self.user_agent()))
    }

    /// Obtain a request token; the user is sent back to `callback_url` after authorizing
    pub fn request_token(&self, callback_url: &str) -> Result<RequestToken> {
        let response = self
            .oauth_request(None)?
            .callback(callback_url)
            .send_raw(HttpMethod::Get, "/request_token", Vec::new())?;

        let mut fields = parse_token_response(&response)?;
        Ok(RequestToken {
            token: take_field(&mut fields, "oauth_token")?,
            secret: take_field(&mut fields, "oauth_token_secret")?,
        })
    }

    /// URL the user must visit to grant access
    pub fn authorize_url(&self, request_token: &RequestToken) -> Result<Url> {
        let token = Session::derive(request_token.token.clone(), request_token.secret.clone());
        let request = self
            .oauth_request(Some(&token))?
            .build(HttpMethod::Get, "/authorize", Vec::new())?;
        Ok(request.url)
    }

    /// Exchange an authorized request token for an access token
    pub fn access_token(
        &self,
        request_token: &RequestToken,
        verifier: Option<&str>,
    ) -> Result<AccessToken> {
        let token = Session::derive(request_token.token.clone(), request_token.secret.clone());
        let response = self
            .oauth_request(Some(&token))?
            .verifier(verifier)
            .send_raw(HttpMethod::Get, "/access_token", Vec::new())?;

        let mut fields = parse_token_response(&response)?;
        Ok(AccessToken {
            token: take_field(&mut fields, "oauth_token")?,
            secret: take_field(&mut fields, "oauth_token_secret")?,
            user_id: fields.remove("userid"),
        })
    }
}

fn parse_token_response(response: &HttpResponse) -> Result<HashMap<String, String>> {
    if !response.is_success() {
        return Err(WithingsError::Http {
            status: response.status,
            body: response.text(),
        });
    }
    Ok(form_urlencoded::parse(&response.body).into_owned().collect())
}

fn take_field(fields: &mut HashMap<String, String>, name: &str) -> Result<String> {
    fields
        .remove(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WithingsError::OAuth(format!("token response is missing {}", name)))
}
