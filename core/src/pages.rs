//! Page routes. Markup lives in the web front end; these bodies are placeholders.

use actix_web::{HttpResponse, Responder, get, web};

fn html(body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body.to_string())
}

#[get("/")]
async fn get_landing() -> impl Responder {
    html(
        "<h1>Campus</h1>\
         <p>Courses, mentors and a community for every student.</p>\
         <a href=\"/student/signup\">Register as a student</a>",
    )
}

#[get("/student/signup")]
async fn get_signup() -> impl Responder {
    html(
        "<h1>Student Registration</h1>\
         <p>Submit the form to <code>POST /api/students/register</code>.</p>\
         <a href=\"/api/auth/signin/google\">Sign up with Google</a>",
    )
}

async fn get_protected() -> impl Responder {
    html("<h1>Protected Page</h1><p>You are authenticated!</p>")
}

pub fn mount_pages() -> impl actix_web::dev::HttpServiceFactory {
    (
        get_landing,
        get_signup,
        web::scope("/protected")
            .wrap(api_auth::auth_middleware())
            .route("", web::get().to(get_protected)),
    )
}
