use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::{Success, redirect};
use std::sync::Arc;

use crate::dtos::auth::{
    AuthErrorQuery, OAuthCallbackQuery, ProviderInfo, SessionUser, SignInPage,
};
use crate::misc::oauth::OAuthProvider;
use crate::services::gate::{SignInAttempt, SignInGate};
use crate::{AUTH_ERROR_PATH, SESSION_USER_KEY, SIGN_IN_PATH, services};

/// Reasons the callback sends the browser to the auth error route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The sign-in gate refused the identity.
    AccessDenied,
    /// The provider reported an error or the code exchange failed.
    OAuthCallback,
}

impl AuthErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorKind::AccessDenied => "AccessDenied",
            AuthErrorKind::OAuthCallback => "OAuthCallback",
        }
    }

    pub fn error_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("error", self.as_str())
            .finish();
        format!("{}?{}", AUTH_ERROR_PATH, query)
    }
}

fn provider_info(provider: OAuthProvider, config: &Config) -> ProviderInfo {
    let callback_url = match provider {
        OAuthProvider::Google => config.google_client.redirect_uri.clone(),
    };
    ProviderInfo {
        id: provider.as_str(),
        name: provider.display_name(),
        signin_url: format!("{}/{}", SIGN_IN_PATH, provider.as_str()),
        callback_url,
    }
}

/// Lists the configured sign-in providers.
///
/// # Output
/// - Success: JSON array of `{ id, name, signinUrl, callbackUrl }`
#[get("/providers")]
async fn get_providers(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    let providers: Vec<ProviderInfo> = OAuthProvider::ALL
        .into_iter()
        .map(|provider| provider_info(provider, &config))
        .collect();
    Success::ok(providers)
}

/// Sign-in entry point. Protected pages send anonymous visitors here.
///
/// # Output
/// - Success: `{ "providers": [{ id, name, signinUrl, callbackUrl }] }`
#[get("/signin")]
async fn get_signin(config: web::Data<Arc<Config>>) -> Res<impl Responder> {
    let providers: Vec<ProviderInfo> = OAuthProvider::ALL
        .into_iter()
        .map(|provider| provider_info(provider, &config))
        .collect();
    Success::ok(SignInPage { providers })
}

/// Initiates OAuth authentication flow with the specified provider.
///
/// # Input
/// - `path`: OAuth provider name (google)
/// - `config`: Application configuration with OAuth settings
///
/// # Output
/// - Success: Redirects user to the provider's consent page with
///   `prompt=consent`, `access_type=offline` and `response_type=code`
/// - Error: Returns 400 Bad Request for invalid provider names
///
/// # Frontend Example
/// ```javascript
/// // A plain link, not an API call
/// <a href="/api/auth/signin/google">Sign up with Google</a>
/// ```
#[get("/signin/{provider}")]
async fn get_signin_provider(
    path: web::Path<String>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let provider = OAuthProvider::from_str(path.as_str())?;
    let client = services::auth::create_oauth_client(&provider, &config)?;
    let auth_url = services::auth::authorization_url(&provider, &client);
    Ok(redirect(&auth_url))
}

/// Handles the provider redirect after the user authenticates.
///
/// # Input
/// - `path`: OAuth provider name
/// - `query`: `code` on success, `error` when the user cancelled or the provider failed
/// - `gate`: decides whether the returned identity may sign in
/// - `session`: receives the signed-in user
///
/// # Output
/// - Accepted: session set, redirect to `WEB_APP_AUTH_CALLBACK_URL`
/// - Denied by the gate: redirect to `/api/auth/error?error=AccessDenied`
/// - Provider or exchange failure: redirect to `/api/auth/error?error=OAuthCallback`
/// - Unknown provider: 400 Bad Request
///
/// # Note
/// This endpoint is not called from frontend code. It is the redirect URI
/// registered with the provider.
#[get("/callback/{provider}")]
async fn get_callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    config: web::Data<Arc<Config>>,
    gate: web::Data<SignInGate>,
    session: Session,
) -> Res<HttpResponse> {
    let provider = OAuthProvider::from_str(path.as_str())
        .map_err(|_| AppError::BadRequest("Invalid provider".to_string()))?;
    let query = query.into_inner();

    let code = match (query.code, query.error) {
        (Some(code), None) => code,
        (_, error) => {
            log::warn!(
                "{} callback without code (error: {})",
                provider,
                error.as_deref().unwrap_or("none")
            );
            return Ok(redirect(&AuthErrorKind::OAuthCallback.error_url()));
        }
    };

    let profile = match complete_sign_in(&provider, code, &config).await {
        Ok(profile) => profile,
        Err(e) => {
            log::error!("{} sign-in failed: {}", provider, e);
            return Ok(redirect(&AuthErrorKind::OAuthCallback.error_url()));
        }
    };

    let attempt = SignInAttempt::new(provider.as_str(), profile.email.clone());
    if !gate.allows(&attempt) {
        log::warn!(
            "Sign-in denied for {} via {}",
            attempt.email.as_deref().unwrap_or("<no email>"),
            attempt.provider
        );
        return Ok(redirect(&AuthErrorKind::AccessDenied.error_url()));
    }

    let user = SessionUser {
        email: attempt.email.unwrap_or_default(),
        name: profile.display_name(),
        provider: attempt.provider,
    };
    log::info!("Sign-in accepted for {} via {}", user.email, user.provider);

    session.renew();
    session.insert(SESSION_USER_KEY, &user)?;

    Ok(redirect(&config.web_app_auth_callback_url))
}

async fn complete_sign_in(
    provider: &OAuthProvider,
    code: String,
    config: &Config,
) -> Res<crate::dtos::auth::ProviderProfile> {
    let client = services::auth::create_oauth_client(provider, config)?;
    let access_token = services::auth::exchange_code(&client, code).await?;
    services::auth::fetch_provider_profile(provider, &access_token, config).await
}

/// Reports why a sign-in did not complete.
///
/// # Output
/// - 403 for `AccessDenied`, 400 for anything else
#[get("/error")]
async fn get_error(query: web::Query<AuthErrorQuery>) -> Res<HttpResponse> {
    match query.error.as_deref() {
        Some("AccessDenied") => Err(AppError::Forbidden(
            "AccessDenied: this account may not sign in".to_string(),
        )),
        Some(other) => Err(AppError::BadRequest(other.to_string())),
        None => Err(AppError::BadRequest("Unknown sign-in error".to_string())),
    }
}
