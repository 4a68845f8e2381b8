//! Route table

use actix_web::web;

pub mod auth;
pub mod health;

/// Registers every route on the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout)),
                )
                .service(web::scope("/test").route("/hello", web::get().to(test::hello))),
        );
}
