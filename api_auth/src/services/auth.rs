use common::{
    env_config::Config,
    error::{AppError, Res},
};
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};

use crate::{dtos::auth::ProviderProfile, misc::oauth::OAuthProvider};

/// OAuth client with the authorization and token endpoints configured.
pub type ProviderClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Create OAuth client object.
///
/// # Arguments
///
/// * `provider` - The OAuth provider.
/// * `config` - The application configuration.
///
/// # Returns
///
/// A `ProviderClient` for the specified OAuth provider, or an internal
/// error when one of the configured endpoints is not a valid URL.
pub fn create_oauth_client(provider: &OAuthProvider, config: &Config) -> Res<ProviderClient> {
    let provider_client = match provider {
        OAuthProvider::Google => &config.google_client,
    };

    let client_id = ClientId::new(provider_client.client_id.clone());
    let client_secret = ClientSecret::new(provider_client.client_secret.clone());
    let auth_url = AuthUrl::new(provider_client.auth_url.clone())
        .map_err(|e| AppError::Internal(format!("Invalid authorization endpoint URL: {}", e)))?;
    let token_url = TokenUrl::new(provider_client.token_url.clone())
        .map_err(|e| AppError::Internal(format!("Invalid token endpoint URL: {}", e)))?;
    let redirect_url = RedirectUrl::new(provider_client.redirect_uri.clone())
        .map_err(|e| AppError::Internal(format!("Invalid redirect URL: {}", e)))?;

    let client = BasicClient::new(client_id)
        .set_client_secret(client_secret)
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}

/// Builds the URL the browser is sent to in order to sign in.
pub fn authorization_url(provider: &OAuthProvider, client: &ProviderClient) -> String {
    let mut request = client.authorize_url(CsrfToken::new_random).add_scopes(
        provider
            .get_scopes()
            .into_iter()
            .map(|s| Scope::new(s.to_string())),
    );
    for (name, value) in provider.authorization_params() {
        request = request.add_extra_param(name, value);
    }
    let (auth_url, _csrf_token) = request.url();
    auth_url.to_string()
}

/// Exchanges the authorization code for an access token.
pub async fn exchange_code(client: &ProviderClient, code: String) -> Res<String> {
    let http_client = oauth2::reqwest::ClientBuilder::new()
        .redirect(oauth2::reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client. {}", e)))?;

    let token = client
        .exchange_code(AuthorizationCode::new(code))
        .request_async(&http_client)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to exchange code. {}", e)))?;

    Ok(token.access_token().secret().clone())
}

/// Fetches the signed-in user's profile from the provider.
///
/// # Arguments
///
/// * `provider` - The OAuth provider.
/// * `access_token` - The access token.
/// * `config` - Holds the provider's userinfo endpoint.
pub async fn fetch_provider_profile(
    provider: &OAuthProvider,
    access_token: &str,
    config: &Config,
) -> Res<ProviderProfile> {
    match provider {
        OAuthProvider::Google => {
            fetch_google_profile(&config.google_client.userinfo_url, access_token).await
        }
    }
}

async fn fetch_google_profile(userinfo_url: &str, access_token: &str) -> Res<ProviderProfile> {
    let client = reqwest::Client::new();
    let response = client
        .get(userinfo_url)
        .bearer_auth(access_token)
        .send()
        .await?;

    if response.status().is_success() {
        let profile: ProviderProfile = response.json().await?;
        Ok(profile)
    } else {
        Err(AppError::Internal(format!(
            "Google API returned error status: {}",
            response.status()
        )))
    }
}
