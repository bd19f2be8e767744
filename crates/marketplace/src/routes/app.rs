//! Application state and per-domain route scopes.

use std::sync::Arc;

use actix_web::{web, HttpRequest, Scope};
use payment_providers::client::{RequestExecutor, SolitudeClient};

use super::{health, payments, recommendations, search, submit};
use crate::{
    configs::settings::Settings,
    core::{recommendations::RecommendationClient, search::EsClient},
    db::Stores,
};

/// Shared application state, cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub stores: Stores,
    pub es: EsClient,
    pub recommendations: RecommendationClient,
    pub billing: Arc<SolitudeClient>,
}

impl AppState {
    /// Build the state with every remote client sharing one executor.
    pub fn new(settings: Settings, executor: Arc<dyn RequestExecutor>) -> Self {
        let es = EsClient::new(&settings.search, Arc::clone(&executor));
        let recommendations =
            RecommendationClient::new(&settings.recommendations, Arc::clone(&executor));
        let billing = Arc::new(SolitudeClient::new(settings.billing.clone(), executor));
        Self {
            settings,
            stores: Stores::new(),
            es,
            recommendations,
            billing,
        }
    }
}

/// A request header as a string slice, when present and valid UTF-8.
pub fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

pub struct Health;

impl Health {
    pub fn server(state: web::Data<AppState>) -> Scope {
        web::scope("health")
            .app_data(state)
            .service(web::resource("").route(web::get().to(health::health)))
    }
}

pub struct Search;

impl Search {
    pub fn server(state: web::Data<AppState>) -> Scope {
        web::scope("/api/v2/apps/search")
            .app_data(state)
            .service(web::resource("").route(web::get().to(search::search)))
            .service(web::resource("/featured").route(web::get().to(search::featured)))
            .service(web::resource("/suggest").route(web::get().to(search::suggestions)))
            .service(web::resource("/rocketbar").route(web::get().to(search::rocketbar)))
    }
}

pub struct Recommendations;

impl Recommendations {
    pub fn server(state: web::Data<AppState>) -> Scope {
        web::scope("/api/v2/apps")
            .app_data(state)
            .service(
                web::resource("/recommend").route(web::get().to(recommendations::recommend)),
            )
            .service(
                web::resource("/installed")
                    .route(web::post().to(recommendations::record_install)),
            )
    }
}

pub struct Submit;

impl Submit {
    pub fn server(state: web::Data<AppState>) -> Scope {
        web::scope("/api/v2/submit")
            .app_data(state)
            .service(web::resource("/upload").route(web::post().to(submit::create_upload)))
            .service(web::resource("/app").route(web::post().to(submit::submit_app)))
    }
}

pub struct Payments;

impl Payments {
    pub fn server(state: web::Data<AppState>) -> Scope {
        web::scope("/api/v2/payments")
            .app_data(state)
            .service(web::resource("/providers").route(web::get().to(payments::list_providers)))
            .service(
                web::resource("/account")
                    .route(web::post().to(payments::create_account))
                    .route(web::get().to(payments::list_accounts)),
            )
            .service(
                web::resource("/account/{id}")
                    .route(web::get().to(payments::account_details))
                    .route(web::put().to(payments::update_account)),
            )
            .service(
                web::resource("/account/{id}/terms")
                    .route(web::get().to(payments::terms))
                    .route(web::post().to(payments::agree_terms)),
            )
            .service(
                web::resource("/account/{id}/product")
                    .route(web::post().to(payments::create_product)),
            )
    }
}
