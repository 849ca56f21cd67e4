mod config;
mod context;
mod core;
mod database;
mod error;
mod handlers;
mod middlewares;
mod response;

use actix_web::web::{delete, get, post, put, resource, scope, Data};
use actix_web::HttpServer;
use sqlx::postgres::PgPoolOptions;

use config::Config;
use database::sqlx::PgManager;
use middlewares::jwt::Jwt;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,actix_web=info");
    }
    env_logger::init();
    let config = Config::from_env().expect("invalid configuration");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    let port = config.listen_port;
    log::info!("listening on 0.0.0.0:{}", port);
    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(PgManager::new(pool.clone())))
            .service(
                scope("")
                    .wrap(Jwt::new(config.jwt_secret.clone()))
                    .service(resource("balance").route(get().to(handlers::account::balance)))
                    .service(
                        scope("surveys")
                            .route("", get().to(handlers::survey::list_active))
                            .route("", post().to(handlers::survey::create))
                            .route("quote", get().to(handlers::survey::quote))
                            .route("mine", get().to(handlers::survey::list_mine))
                            .service(
                                scope("{survey_id}")
                                    .route("", get().to(handlers::survey::detail))
                                    .route("", put().to(handlers::survey::update))
                                    .route("", delete().to(handlers::survey::erase))
                                    .route("active", put().to(handlers::survey::set_active))
                                    .route("quota", post().to(handlers::survey::increase_quota))
                                    .route("answers", post().to(handlers::answer::submit))
                                    .route("responses", get().to(handlers::answer::responses))
                                    .route("tally", get().to(handlers::answer::tally)),
                            ),
                    ),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
