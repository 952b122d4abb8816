use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use formbuilder::{config::AppConfig, db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();

    db::ensure_parent_dir(&config.database_url)?;
    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to create DB pool");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let (host, port) = config.bind_addr();
    log::info!("Using database {}", config.database_url);
    log::info!("Starting server at http://{host}:{port}");

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind((host, port))?
    .run()
    .await
}
