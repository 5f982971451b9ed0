use reqwest::RequestBuilder;
use serde::Deserialize;

/// Credential material for one farm.
///
/// Token refresh is the credential store's responsibility; the client only
/// attaches what it is given and never mutates it.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    Oauth {
        access_token: String,
        #[serde(default)]
        refresh_token: Option<String>,
        #[serde(default)]
        expires_at: Option<f64>,
    },
    Basic {
        username: String,
        password: String,
    },
}

impl Credential {
    /// Attach this credential to an outgoing request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Credential::Oauth { access_token, .. } => request.bearer_auth(access_token),
            Credential::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }
}

// Manual Debug so tokens and passwords never end up in logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Oauth { expires_at, .. } => f
                .debug_struct("Oauth")
                .field("access_token", &"<redacted>")
                .field("expires_at", expires_at)
                .finish(),
            Credential::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
