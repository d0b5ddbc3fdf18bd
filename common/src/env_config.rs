use std::{env, sync::Arc};

use crate::error::ConfigError;

/// Minimum length accepted for `SESSION_SECRET`; the cookie signing key
/// is derived from it and needs at least 64 bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything needed to run the web service: bind address and
/// worker count, CORS and logging preferences, the session signing
/// secret, the Google OAuth client and the sign-in allow-list domain.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File the logger appends to alongside stdout.
    pub log_file: String,
    /// Where the browser lands after a sign-in is accepted.
    pub web_app_auth_callback_url: String,
    /// Secret used to sign session cookies.
    pub session_secret: String,
    /// Email domain whose members may sign in through Google.
    pub allowed_email_domain: String,
    /// Configuration for the Google OAuth2 client.
    pub google_client: OAuthProviderClient,
}

#[derive(Clone, Debug)]
/// `OAuthProviderClient` holds the configuration necessary for interacting with an OAuth 2.0 provider.
///
/// It contains the client ID and secret, the authorization, token and
/// userinfo endpoints, and the redirect URI registered with the provider.
pub struct OAuthProviderClient {
    /// The client ID for the OAuth 2.0 provider.
    pub client_id: String,
    /// The client secret for the OAuth 2.0 provider.
    pub client_secret: String,
    /// The authentication URL for the OAuth 2.0 provider.
    pub auth_url: String,
    /// The token URL for the OAuth 2.0 provider.
    pub token_url: String,
    /// The endpoint returning the signed-in user's profile.
    pub userinfo_url: String,
    /// The redirect URI for the OAuth 2.0 provider.
    pub redirect_uri: String,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads `.env` first when present, then reads the process
    /// environment through [`Config::from_lookup`].
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`: OAuth client credentials
    /// - `SESSION_SECRET`: at least 64 bytes, signs the session cookie
    ///
    /// Optional (with defaults):
    /// - `ENVIRONMENT`: "development"
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: default "campus.log"
    /// - `WEB_APP_AUTH_CALLBACK_URL`: Post sign-in landing URL (default: "/")
    /// - `ALLOWED_EMAIL_DOMAIN`: default "example.com"
    /// - `GOOGLE_AUTH_URL`, `GOOGLE_TOKEN_URL`, `GOOGLE_USERINFO_URL`, `GOOGLE_REDIRECT_URI`
    pub fn from_env() -> Result<Arc<Self>, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Arc<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let session_secret = required("SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid {
                var: "SESSION_SECRET",
                reason: format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            });
        }

        let allowed_email_domain = or_default("ALLOWED_EMAIL_DOMAIN", "example.com")
            .trim_start_matches('@')
            .to_string();
        if allowed_email_domain.is_empty() || allowed_email_domain.contains('@') {
            return Err(ConfigError::Invalid {
                var: "ALLOWED_EMAIL_DOMAIN",
                reason: "must be a bare domain such as example.com".to_string(),
            });
        }

        let google_client = OAuthProviderClient {
            client_id: required("GOOGLE_CLIENT_ID")?,
            client_secret: required("GOOGLE_CLIENT_SECRET")?,
            auth_url: parse_url(
                "GOOGLE_AUTH_URL",
                or_default("GOOGLE_AUTH_URL", "https://accounts.google.com/o/oauth2/v2/auth"),
            )?,
            token_url: parse_url(
                "GOOGLE_TOKEN_URL",
                or_default("GOOGLE_TOKEN_URL", "https://oauth2.googleapis.com/token"),
            )?,
            userinfo_url: parse_url(
                "GOOGLE_USERINFO_URL",
                or_default(
                    "GOOGLE_USERINFO_URL",
                    "https://openidconnect.googleapis.com/v1/userinfo",
                ),
            )?,
            redirect_uri: parse_url(
                "GOOGLE_REDIRECT_URI",
                or_default(
                    "GOOGLE_REDIRECT_URI",
                    "http://localhost:8080/api/auth/callback/google",
                ),
            )?,
        };

        let server_port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("{:?} is not a port number", port),
            })?,
            None => 8080,
        };

        Ok(Arc::new(Config {
            environment: or_default("ENVIRONMENT", "development"),
            server_host: or_default("IP", "127.0.0.1"),
            server_port,
            num_workers: or_default("WORKERS", "4").parse().unwrap_or(4),
            cors_allowed_origin: or_default("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            console_logging_enabled: or_default("ENABLE_CONSOLE_LOGGING", "true").to_lowercase()
                == "true",
            log_file: or_default("LOG_FILE", "campus.log"),
            web_app_auth_callback_url: or_default("WEB_APP_AUTH_CALLBACK_URL", "/"),
            session_secret,
            allowed_email_domain,
            google_client,
        }))
    }
}

fn parse_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    url::Url::parse(&value).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;
    Ok(value)
}
