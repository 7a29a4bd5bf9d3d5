mod config;
mod error;
mod processor;
mod routes;
mod upload;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use processor::RemoteProcessor;
use routes::configure_routes;
use std::env;
use upload::UploadLimit;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = ServerConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let processor_url = config
        .processor_url()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let processor = web::Data::new(RemoteProcessor::new(processor_url));
    let limit = web::Data::new(UploadLimit {
        max_bytes: config.max_upload_bytes,
    });

    log::info!("Relaying uploads to {}", processor.endpoint());
    log::info!("Serving frontend from {}", config.frontend_dir);

    let bind_address = config.bind_address();
    let frontend_dir = config.frontend_dir.clone();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .expose_headers(vec![actix_web::http::header::CONTENT_DISPOSITION])
                    .max_age(3600),
            )
            .app_data(processor.clone())
            .app_data(limit.clone())
            .configure(|cfg| configure_routes::<RemoteProcessor>(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
