use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use marketplace::{routes::app, AppState, Settings};
use marketplace_env::logger;
use payment_providers::client::{ReqwestExecutor, RequestExecutor};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::new().expect("Unable to construct application configuration");
    let _guard = logger::setup(&settings.log);
    logger::info!(
        host = %settings.server.host,
        port = settings.server.port,
        "starting marketplace server"
    );

    let executor: Arc<dyn RequestExecutor> = Arc::new(ReqwestExecutor::new());
    let state = web::Data::new(AppState::new(settings.clone(), executor));

    HttpServer::new(move || {
        App::new()
            .service(app::Health::server(state.clone()))
            .service(app::Search::server(state.clone()))
            .service(app::Recommendations::server(state.clone()))
            .service(app::Submit::server(state.clone()))
            .service(app::Payments::server(state.clone()))
    })
    .bind((settings.server.host.as_str(), settings.server.port))?
    .workers(settings.server.workers)
    .run()
    .await
}
