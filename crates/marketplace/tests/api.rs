//! End-to-end handler tests against canned remote responses.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use actix_web::{test, web, App};
use api_models::search::{Collection, CollectionType, FeaturedSearchResponse, SearchResponse};
use common_utils::{errors::CustomResult, request::Request};
use error_stack::report;
use marketplace::{
    configs::settings::{
        RecommendationsConfig, SearchConfig, Server, Settings, SubmitConfig,
    },
    db::StoredCollection,
    routes::app,
    AppState,
};
use payment_providers::{
    client::{BillingConfig, RequestExecutor, Response},
    errors::ClientError,
    registry::ProvidersConfig,
};
use serde_json::json;

#[derive(Default)]
struct MockExecutor {
    responses: Mutex<VecDeque<(u16, serde_json::Value)>>,
}

impl MockExecutor {
    fn queue(&self, status: u16, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back((status, body));
    }
}

#[async_trait::async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, _request: Request) -> CustomResult<Response, ClientError> {
        let (status_code, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| report!(ClientError::RequestFailed))?;
        Ok(Response {
            status_code,
            response: bytes::Bytes::from(body.to_string()),
        })
    }
}

fn settings() -> Settings {
    Settings {
        server: Server {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: 1,
        },
        log: Default::default(),
        providers: ProvidersConfig::default(),
        billing: BillingConfig {
            solitude_base_url: "https://solitude.test".to_string(),
            zippy_base_url: "https://zippy.test".to_string(),
            boku_portal_url: None,
        },
        search: SearchConfig {
            es_url: "http://es.test:9200".to_string(),
            index: "apps".to_string(),
            default_limit: 25,
            max_limit: 50,
            max_query_length: 255,
        },
        recommendations: RecommendationsConfig {
            base_url: "http://reco.test".to_string(),
        },
        submit: SubmitConfig {
            unique_by_domain: true,
        },
    }
}

fn state_with(executor: Arc<MockExecutor>) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        settings(),
        executor as Arc<dyn RequestExecutor>,
    ))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .service(app::Health::server($state.clone()))
                .service(app::Search::server($state.clone()))
                .service(app::Recommendations::server($state.clone()))
                .service(app::Submit::server($state.clone()))
                .service(app::Payments::server($state.clone())),
        )
        .await
    };
}

fn es_hit(id: i64, name: &str) -> serde_json::Value {
    json!({
        "_source": {
            "id": id,
            "slug": name.to_lowercase(),
            "name": name,
            "description": "An app",
            "absolute_url": format!("/app/{}/", name.to_lowercase()),
            "icon": format!("/media/{}.png", name.to_lowercase()),
        }
    })
}

#[actix_web::test]
async fn search_returns_objects_and_meta() {
    let executor = Arc::new(MockExecutor::default());
    executor.queue(200, json!({"hits": {"total": 1, "hits": [es_hit(1, "Maps")]}}));
    let state = state_with(Arc::clone(&executor));
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/apps/search?q=maps")
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert!(resp.status().is_success());

    let body: SearchResponse = test::read_body_json(resp).await;
    assert_eq!(body.meta.total_count, 1);
    assert_eq!(body.meta.limit, 25);
    assert_eq!(body.objects[0].name, "Maps");
}

#[actix_web::test]
async fn invalid_parameters_return_form_errors() {
    let state = state_with(Arc::new(MockExecutor::default()));
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/apps/search?limit=nope&type=song")
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_type"], "validation");
    assert!(body["errors"]["limit"].is_array());
    assert!(body["errors"]["type"].is_array());
}

#[actix_web::test]
async fn suggestions_serve_the_array_payload() {
    let executor = Arc::new(MockExecutor::default());
    executor.queue(200, json!({"hits": {"total": 1, "hits": [es_hit(1, "Maps")]}}));
    let state = state_with(Arc::clone(&executor));
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/apps/search/suggest?q=maps")
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/x-suggestions+json"
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body[0], "maps");
    assert_eq!(body[1][0], "Maps");
    assert_eq!(body[3][0], "/app/maps/");
}

#[actix_web::test]
async fn rocketbar_serves_completion_options() {
    let executor = Arc::new(MockExecutor::default());
    executor.queue(
        200,
        json!({"apps": [{"options": [{
            "text": "Calculator",
            "score": 2.5,
            "payload": {"id": 7, "slug": "calc", "name": "Calculator"}
        }]}]}),
    );
    let state = state_with(Arc::clone(&executor));
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/apps/search/rocketbar?q=calc")
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/x-rocketbar+json"
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["text"], "Calculator");
    assert_eq!(body[0]["payload"]["slug"], "calc");
}

#[actix_web::test]
async fn featured_reports_filter_fallbacks() {
    let executor = Arc::new(MockExecutor::default());
    executor.queue(200, json!({"hits": {"total": 0, "hits": []}}));
    let state = state_with(Arc::clone(&executor));
    state.stores.collections.insert(StoredCollection {
        collection: Collection {
            id: 1,
            name: "Up and coming".to_string(),
            slug: "up-and-coming".to_string(),
            collection_type: CollectionType::Basic,
            apps: Vec::new(),
        },
        region: Some("us".to_string()),
        carrier: None,
    });
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/apps/search/featured")
        .insert_header(("X-Region", "br"))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(
        resp.headers()
            .get("API-Fallback-collections")
            .expect("fallback header"),
        "region"
    );

    let body: FeaturedSearchResponse = test::read_body_json(resp).await;
    assert_eq!(body.collections.len(), 1);
    assert!(body.featured.is_empty());
}

#[actix_web::test]
async fn submission_enforces_the_domain_rule() {
    let state = state_with(Arc::new(MockExecutor::default()));
    let service = test_app!(state);

    let resp = test::call_service(
        &service,
        test::TestRequest::post()
            .uri("/api/v2/submit/upload")
            .set_json(json!({"manifest_url": "https://apps.example.com/manifest.webapp"}))
            .to_request(),
    )
    .await;
    let upload: serde_json::Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &service,
        test::TestRequest::post()
            .uri("/api/v2/submit/app")
            .set_json(json!({"upload": upload["upload"], "read_dev_agreement": true}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    // Same domain again: rejected.
    let resp = test::call_service(
        &service,
        test::TestRequest::post()
            .uri("/api/v2/submit/upload")
            .set_json(json!({"manifest_url": "https://apps.example.com/v2.webapp"}))
            .to_request(),
    )
    .await;
    let second: serde_json::Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &service,
        test::TestRequest::post()
            .uri("/api/v2/submit/app")
            .set_json(json!({"upload": second["upload"], "read_dev_agreement": true}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_type"], "validation");
}

#[actix_web::test]
async fn anonymous_recommendations_are_empty() {
    let state = state_with(Arc::new(MockExecutor::default()));
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/apps/recommend")
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert!(resp.status().is_success());

    let body: SearchResponse = test::read_body_json(resp).await;
    assert!(body.objects.is_empty());
}

#[actix_web::test]
async fn install_recording_needs_the_user_hash() {
    let state = state_with(Arc::new(MockExecutor::default()));
    let service = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v2/apps/installed")
        .set_json(json!({"app_id": 42}))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn payment_account_creation_round_trips() {
    let executor = Arc::new(MockExecutor::default());
    // Seller, then the Bango package and bank details.
    executor.queue(201, json!({"resource_uri": "/generic/seller/8/"}));
    executor.queue(201, json!({"resource_uri": "/bango/package/21/", "package_id": 21}));
    executor.queue(201, json!({}));
    let state = state_with(Arc::clone(&executor));
    let service = test_app!(state);

    let resp = test::call_service(
        &service,
        test::TestRequest::post()
            .uri("/api/v2/payments/account")
            .insert_header(("X-User-Id", "10"))
            .set_json(json!({
                "provider": "bango",
                "account_name": "Main account",
                "adminEmailAddress": "admin@example.com",
                "supportEmailAddress": "support@example.com",
                "financeEmailAddress": "finance@example.com",
                "vendorName": "Vendor",
                "companyName": "Company Ltd",
                "address1": "1 Main St",
                "addressCity": "London",
                "addressState": "London",
                "addressZipCode": "N1",
                "addressPhone": "+44 20 0000 0000",
                "countryIso": "GBR",
                "currencyIso": "GBP",
                "bankAccountPayeeName": "Company Ltd",
                "bankAccountNumber": "12345678",
                "bankAccountCode": "00-00-00",
                "bankName": "Big Bank",
                "bankAddress1": "2 Bank St",
                "bankAddressZipCode": "N2",
                "bankAddressIso": "GBR"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["provider"], "bango");
    assert_eq!(body["account_id"], "21");
    assert_eq!(body["agreed_tos"], false);
    assert_eq!(body["id"], 1);

    // The account lists back for its owner.
    let resp = test::call_service(
        &service,
        test::TestRequest::get()
            .uri("/api/v2/payments/account")
            .insert_header(("X-User-Id", "10"))
            .to_request(),
    )
    .await;
    let accounts: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(accounts.as_array().expect("array").len(), 1);

    // And stays invisible to anyone else.
    let resp = test::call_service(
        &service,
        test::TestRequest::get()
            .uri("/api/v2/payments/account/1")
            .insert_header(("X-User-Id", "11"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn provider_listing_follows_the_allow_list() {
    let state = state_with(Arc::new(MockExecutor::default()));
    let service = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v2/payments/providers")
        .to_request();
    let resp = test::call_service(&service, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([{"name": "bango", "id": 1, "label": "Bango"}]));
}

#[actix_web::test]
async fn disabled_providers_cannot_open_accounts() {
    let state = state_with(Arc::new(MockExecutor::default()));
    let service = test_app!(state);

    let resp = test::call_service(
        &service,
        test::TestRequest::post()
            .uri("/api/v2/payments/account")
            .insert_header(("X-User-Id", "10"))
            .set_json(json!({
                "provider": "boku",
                "account_name": "Carrier",
                "service_id": "svc-1"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}
