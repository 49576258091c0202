use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use snaptest_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config
        .validate_for_production()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let cors_origin = config.cors_allowed_origin.clone();
    let max_payload_bytes = config.max_payload_bytes;

    log::info!(
        "Using model {} at {}",
        config.model_name,
        config.model_api_base
    );

    let state = AppState::new(config);
    let shutdown = state.shutdown.clone();
    let app_data = web::Data::new(state);

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
            .max_age(3600);

        App::new()
            .app_data(app_data.clone())
            .app_data(handlers::json_config(max_payload_bytes))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .configure(handlers::configure_routes)
    })
    .bind(bind_address)?
    .disable_signals()
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Shutdown signal received, cancelling in-flight flows");
            shutdown.cancel();
            handle.stop(true).await;
        }
    });

    server.await
}
