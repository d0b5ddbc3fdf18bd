use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod routes {
    pub mod auth;
    pub mod session;
}
pub mod middleware {
    pub mod auth;
}
pub mod services {
    pub mod auth;
    pub mod gate;
}
pub mod dtos {
    pub mod auth;
}
pub mod misc {
    pub mod oauth;
}

pub use services::gate::{SignInAttempt, SignInGate};

/// Session key holding the signed-in [`dtos::auth::SessionUser`].
pub const SESSION_USER_KEY: &str = "user";
pub const SESSION_COOKIE_NAME: &str = "campus_session";
pub const SIGN_IN_PATH: &str = "/api/auth/signin";
pub const AUTH_ERROR_PATH: &str = "/api/auth/error";

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::get_providers)
        .service(routes::auth::get_signin)
        .service(routes::auth::get_signin_provider)
        .service(routes::auth::get_callback)
        .service(routes::auth::get_error)
        .service(routes::session::get_session)
        .service(routes::session::post_signout)
}

// Cookie-backed sessions; Lax so the cookie survives the provider redirect.
pub fn session_middleware(cookie_secure: bool, secret: &[u8]) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(secret))
        .cookie_name(SESSION_COOKIE_NAME.to_string())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

// Protected-page guard
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new(SIGN_IN_PATH)
}
