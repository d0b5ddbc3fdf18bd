use std::fmt;

use common::error::{AppError, Res};
use serde::{Deserialize, Serialize};

/// Federated identity providers this service can sign users in with.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
}
impl OAuthProvider {
    pub const ALL: [OAuthProvider; 1] = [OAuthProvider::Google];

    /// Returns the OAuth provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
        }
    }

    /// Creates an OAuth provider from a string.
    pub fn from_str(s: &str) -> Res<Self> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            ps => Err(AppError::BadRequest(format!(
                "Invalid OAuth provider: {}",
                ps
            ))),
        }
    }

    /// Returns the scopes for the OAuth provider.
    pub fn get_scopes(&self) -> Vec<&'static str> {
        match self {
            OAuthProvider::Google => vec!["openid", "email", "profile"],
        }
    }

    /// Extra authorization request parameters.
    ///
    /// `response_type=code` is always sent by the authorization code flow
    /// and is not repeated here.
    pub fn authorization_params(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            // consent + offline so Google issues a refresh token every time
            OAuthProvider::Google => vec![("prompt", "consent"), ("access_type", "offline")],
        }
    }
}
impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
