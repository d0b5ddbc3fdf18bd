use serde::{Deserialize, Serialize};

/// Query string Google appends when redirecting back to the callback.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthErrorQuery {
    pub error: Option<String>,
}

/// Subset of the OpenID Connect userinfo response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderProfile {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

impl ProviderProfile {
    pub fn display_name(&self) -> String {
        match (&self.name, &self.given_name, &self.family_name) {
            (Some(name), _, _) => name.clone(),
            (None, Some(given), Some(family)) => format!("{} {}", given, family),
            (None, Some(given), None) => given.clone(),
            _ => String::new(),
        }
    }
}

/// Identity kept in the session cookie once the sign-in gate accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub provider: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub signin_url: String,
    pub callback_url: String,
}

#[derive(Debug, Serialize)]
pub struct SignInPage {
    pub providers: Vec<ProviderInfo>,
}
