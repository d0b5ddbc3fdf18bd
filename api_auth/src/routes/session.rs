use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post};
use common::error::{AppError, Res};
use common::http::{Success, redirect};

use crate::SESSION_USER_KEY;
use crate::dtos::auth::SessionUser;

/// Retrieves the signed-in user from the session cookie.
///
/// # Input
/// - `session`: The user's session
///
/// # Output
/// - Success: `{ email, name, provider }`
/// - Error: Returns 401 Unauthorized if nobody is signed in
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/session', {
///   credentials: 'include' // Important for sending session cookies
/// });
///
/// if (response.status === 401) {
///   window.location.href = '/api/auth/signin';
/// }
/// ```
#[get("/session")]
async fn get_session(session: Session) -> Res<impl Responder> {
    let user = session
        .get::<SessionUser>(SESSION_USER_KEY)?
        .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))?;
    Success::ok(user)
}

/// Ends the session and returns to the landing page.
#[post("/signout")]
async fn post_signout(session: Session) -> HttpResponse {
    session.purge();
    redirect("/")
}
