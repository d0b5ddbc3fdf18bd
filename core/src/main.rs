mod cors;
mod pages;

use std::io;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use api_auth::SignInGate;
use api_auth::misc::oauth::OAuthProvider;
use api_students::Registrar;
use common::env_config::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // get env vars
    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let config_data = config.clone();

    // get info
    let origin = config.cors_allowed_origin.clone();
    let cookie_secure = config.is_production() || !origin.contains("localhost");

    // init logger
    if config.console_logging_enabled {
        logger::setup(&config.log_file).map_err(|e| io::Error::other(e.to_string()))?;
    }

    // sign-in hook and registration handoff
    let gate = SignInGate::domain_allow_list(
        OAuthProvider::Google.as_str(),
        config.allowed_email_domain.clone(),
    );
    let registrar = Registrar::default();

    log::info!(
        "Starting on {}:{} ({}), sign-in restricted to @{}",
        config.server_host,
        config.server_port,
        config.environment,
        config.allowed_email_domain
    );

    HttpServer::new(move || {
        let secret = config_data.session_secret.as_bytes();
        App::new()
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(gate.clone()))
            .app_data(web::Data::new(registrar.clone()))
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 3rd
            .wrap(cors::middleware(&origin)) // 2nd
            .wrap(api_auth::session_middleware(cookie_secure, secret)) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(api_students::mount_students()),
            )
            .service(pages::mount_pages())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
