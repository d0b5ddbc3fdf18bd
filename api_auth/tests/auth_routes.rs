//! HTTP behaviour of the auth scope and the protected-page guard.

use std::collections::HashMap;
use std::sync::Arc;

use actix_session::Session;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer,
    http::{
        StatusCode,
        header::{AUTHORIZATION, LOCATION},
    },
    post, test as actix_test, web,
};
use api_auth::{
    SESSION_COOKIE_NAME, SESSION_USER_KEY, SignInGate, auth_middleware, dtos::auth::SessionUser,
    mount_auth, session_middleware,
};
use common::env_config::{Config, MIN_SESSION_SECRET_LEN};
use rstest::rstest;
use serde_json::{Value, json};

const SECRET: [u8; MIN_SESSION_SECRET_LEN] = [7; MIN_SESSION_SECRET_LEN];

fn config() -> Arc<Config> {
    config_with(&HashMap::new())
}

fn config_with(overrides: &HashMap<&str, String>) -> Arc<Config> {
    Config::from_lookup(|key| match key {
        "GOOGLE_CLIENT_ID" => Some("campus-client".to_string()),
        "GOOGLE_CLIENT_SECRET" => Some("campus-secret".to_string()),
        "SESSION_SECRET" => Some("k".repeat(MIN_SESSION_SECRET_LEN)),
        other => overrides.get(other).cloned(),
    })
    .expect("test config")
}

/// Token endpoint that issues the authorization code back as the access
/// token, so each test picks the identity through the code it sends.
async fn fake_token(form: web::Form<HashMap<String, String>>) -> HttpResponse {
    match form.get("code").map(String::as_str) {
        Some("token-outage") | None => HttpResponse::InternalServerError().finish(),
        Some(code) => HttpResponse::Ok().json(json!({
            "access_token": code,
            "token_type": "bearer",
            "expires_in": 3600,
        })),
    }
}

/// Userinfo endpoint that answers with the email carried in the bearer token.
async fn fake_userinfo(request: HttpRequest) -> HttpResponse {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();
    match token {
        "userinfo-outage" => HttpResponse::ServiceUnavailable().finish(),
        "no-email" => HttpResponse::Ok().json(json!({ "sub": "7", "name": "Anonymous" })),
        email => HttpResponse::Ok().json(json!({
            "sub": "42",
            "email": email,
            "name": "Ada Lovelace",
        })),
    }
}

/// Serves the Google token and userinfo endpoints on an ephemeral port and
/// returns a config that points the OAuth client at them.
fn google_stand_in() -> Arc<Config> {
    let server = HttpServer::new(|| {
        App::new()
            .route("/token", web::post().to(fake_token))
            .route("/userinfo", web::get().to(fake_userinfo))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind stand-in server");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let base = format!("http://{}", addr);
    config_with(&HashMap::from([
        ("GOOGLE_TOKEN_URL", format!("{}/token", base)),
        ("GOOGLE_USERINFO_URL", format!("{}/userinfo", base)),
        ("WEB_APP_AUTH_CALLBACK_URL", "/welcome".to_string()),
    ]))
}

#[post("/test/login")]
async fn test_login(session: Session) -> HttpResponse {
    session
        .insert(
            SESSION_USER_KEY,
            SessionUser {
                email: "ada@example.com".into(),
                name: "Ada Lovelace".into(),
                provider: "google".into(),
            },
        )
        .expect("session insert");
    HttpResponse::Ok().finish()
}

macro_rules! test_app {
    () => {
        test_app!(config())
    };
    ($config:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($config))
                .app_data(web::Data::new(SignInGate::domain_allow_list(
                    "google",
                    "example.com",
                )))
                .wrap(session_middleware(false, &SECRET))
                .service(test_login)
                .service(
                    web::scope("/protected")
                        .wrap(auth_middleware())
                        .route("", web::get().to(|| async { "You are authenticated!" })),
                )
                .service(web::scope("/api").service(mount_auth())),
        )
        .await
    };
}

fn session_cookie<B>(
    response: &actix_web::dev::ServiceResponse<B>,
) -> Option<actix_web::cookie::Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
}

fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn signin_redirects_to_google_consent() {
    let app = test_app!();
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/signin/google")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = location(&response);
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(location.contains("prompt=consent"));
    assert!(location.contains("access_type=offline"));
    assert!(location.contains("response_type=code"));
}

#[rstest]
#[case("/api/auth/signin/github")]
#[case("/api/auth/callback/github?code=abc")]
#[actix_web::test]
async fn unknown_provider_is_bad_request(#[case] uri: &str) {
    let app = test_app!();
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("/api/auth/callback/google?error=access_denied")]
#[case("/api/auth/callback/google")]
#[case("/api/auth/callback/google?code=abc&error=server_error")]
#[actix_web::test]
async fn callback_without_code_goes_to_error_page(#[case] uri: &str) {
    let app = test_app!();
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/api/auth/error?error=OAuthCallback");
}

#[rstest]
#[case("/api/auth/error?error=AccessDenied", StatusCode::FORBIDDEN)]
#[case("/api/auth/error?error=OAuthCallback", StatusCode::BAD_REQUEST)]
#[case("/api/auth/error", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn error_page_status(#[case] uri: &str, #[case] status: StatusCode) {
    let app = test_app!();
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), status);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn providers_lists_google() {
    let app = test_app!();
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/providers")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body[0]["id"], "google");
    assert_eq!(body[0]["signinUrl"], "/api/auth/signin/google");
    assert_eq!(
        body[0]["callbackUrl"],
        "http://localhost:8080/api/auth/callback/google"
    );
}

#[actix_web::test]
async fn anonymous_visitors_are_sent_to_signin() {
    let app = test_app!();
    let request = actix_test::TestRequest::get().uri("/protected").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/api/auth/signin");

    let request = actix_test::TestRequest::get()
        .uri("/api/auth/session")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn signed_in_session_opens_protected_page() {
    let app = test_app!();
    let request = actix_test::TestRequest::post().uri("/test/login").to_request();
    let response = actix_test::call_service(&app, request).await;
    let cookie = session_cookie(&response).expect("session cookie");

    let request = actix_test::TestRequest::get()
        .uri("/protected")
        .cookie(cookie.clone())
        .to_request();
    let body = actix_test::call_and_read_body(&app, request).await;
    assert_eq!(body, "You are authenticated!");

    let request = actix_test::TestRequest::get()
        .uri("/api/auth/session")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["provider"], "google");

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signout")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
}

#[actix_web::test]
async fn signin_page_lists_providers_as_json() {
    let app = test_app!();
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/signin")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["providers"][0]["id"], "google");
    assert_eq!(body["providers"][0]["signinUrl"], "/api/auth/signin/google");
}

#[actix_web::test]
async fn allowed_google_account_gets_a_session() {
    let app = test_app!(google_stand_in());
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/callback/google?code=A%40Example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/welcome");
    let cookie = session_cookie(&response).expect("session cookie");

    let request = actix_test::TestRequest::get()
        .uri("/api/auth/session")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["email"], "A@Example.com");
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["provider"], "google");

    let request = actix_test::TestRequest::get()
        .uri("/protected")
        .cookie(cookie)
        .to_request();
    let body = actix_test::call_and_read_body(&app, request).await;
    assert_eq!(body, "You are authenticated!");
}

#[rstest]
#[case("a%40other.com")]
#[case("no-email")]
#[actix_web::test]
async fn refused_google_account_gets_no_session(#[case] code: &str) {
    let app = test_app!(google_stand_in());
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/auth/callback/google?code={}", code))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/api/auth/error?error=AccessDenied");
    assert!(session_cookie(&response).is_none());
}

#[rstest]
#[case("token-outage")]
#[case("userinfo-outage")]
#[actix_web::test]
async fn provider_outage_goes_to_error_page(#[case] code: &str) {
    let app = test_app!(google_stand_in());
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/auth/callback/google?code={}", code))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/api/auth/error?error=OAuthCallback");
    assert!(session_cookie(&response).is_none());
}
