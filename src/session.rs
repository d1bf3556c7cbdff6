use serde::{Deserialize, Serialize};

/// Session holds a user's OAuth access token pair.
/// It is derived once when a client is built and never changes afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Access token identifying the user grant
    #[serde(rename = "oauth_token")]
    token: String,

    /// Secret paired with the access token, used as half of the signing key
    #[serde(rename = "oauth_token_secret")]
    secret: String,
}

impl Session {
    /// Derive a session from an access token and its secret
    pub fn derive(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Session {
            token: token.into(),
            secret: secret.into(),
        }
    }

    /// Derive a session only when both halves of the pair are non-empty
    pub fn from_parts(token: Option<&str>, secret: Option<&str>) -> Option<Self> {
        match (token, secret) {
            (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
                Some(Session::derive(token, secret))
            }
            _ => None,
        }
    }

    /// Access token sent as `oauth_token`
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Token secret used for signing
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// Implement Debug manually to avoid exposing the token secret
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}
