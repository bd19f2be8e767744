//! Provider flow tests against canned billing-service responses.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use api_models::payments::PaymentAccountForm;
use common_utils::{errors::CustomResult, request::Request};
use error_stack::report;
use masking::PeekInterface;
use payment_providers::{
    client::{BillingConfig, RequestExecutor, Response, SolitudeClient},
    errors::{ClientError, ProviderError},
    provider::Provider,
    providers::{Bango, Boku, Reference},
    types::{PaymentAccount, ProviderName, User, WebappInfo},
};

/// Executor that replays queued responses and records every request.
#[derive(Default)]
struct MockExecutor {
    responses: Mutex<VecDeque<(u16, serde_json::Value)>>,
    requests: Mutex<Vec<Request>>,
}

impl MockExecutor {
    fn queue(&self, status: u16, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back((status, body));
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.requests()
            .into_iter()
            .filter_map(|request| request.body)
            .map(|body| serde_json::from_str(body.inner().peek()).expect("json body"))
            .collect()
    }
}

#[async_trait::async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, request: Request) -> CustomResult<Response, ClientError> {
        self.requests.lock().unwrap().push(request);
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

fn harness() -> (Arc<MockExecutor>, Arc<SolitudeClient>) {
    let executor = Arc::new(MockExecutor::default());
    let client = Arc::new(SolitudeClient::new(
        BillingConfig {
            solitude_base_url: "https://solitude.test".to_string(),
            zippy_base_url: "https://zippy.test".to_string(),
            boku_portal_url: Some("https://merchants.boku.test/signup".to_string()),
        },
        Arc::clone(&executor) as Arc<dyn RequestExecutor>,
    ));
    (executor, client)
}

fn account(provider: ProviderName) -> PaymentAccount {
    PaymentAccount {
        id: 4,
        user_id: 10,
        provider,
        uri: "/bango/package/21/".to_string(),
        account_id: "21".to_string(),
        seller_uri: "/generic/seller/8/".to_string(),
        name: "Main account".to_string(),
        agreed_tos: false,
    }
}

fn app() -> WebappInfo {
    WebappInfo {
        id: 337_141,
        name: "Steamcube".to_string(),
        slug: "steamcube".to_string(),
    }
}

fn bango_form() -> PaymentAccountForm {
    serde_json::from_value(serde_json::json!({
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
    .expect("valid form")
}

#[tokio::test]
async fn account_scoped_methods_reject_foreign_accounts() {
    let (_, client) = harness();
    let provider = Bango::new(client);
    let mut foreign = account(ProviderName::Reference);

    let err = provider.account_retrieve(&foreign).await.unwrap_err();
    assert!(matches!(
        err.current_context(),
        ProviderError::WrongProviderAccount {
            account: ProviderName::Reference,
            provider: ProviderName::Bango,
        }
    ));

    assert!(provider.product_create(&foreign, &app()).await.is_err());
    assert!(provider.terms_retrieve(&foreign).await.is_err());
    assert!(provider.terms_update(&mut foreign).await.is_err());
    assert!(provider
        .account_update(&mut foreign, &bango_form())
        .await
        .is_err());
}

#[tokio::test]
async fn bango_account_create_builds_package_and_bank_details() {
    let (executor, client) = harness();
    executor.queue(201, serde_json::json!({"resource_uri": "/generic/seller/8/"}));
    executor.queue(
        201,
        serde_json::json!({"resource_uri": "/bango/package/21/", "package_id": 21}),
    );
    executor.queue(201, serde_json::json!({}));

    let provider = Bango::new(client);
    let account = provider
        .account_create(&User { id: 10 }, &bango_form())
        .await
        .expect("account created");

    assert_eq!(account.provider, ProviderName::Bango);
    assert_eq!(account.uri, "/bango/package/21/");
    assert_eq!(account.account_id, "21");
    assert_eq!(account.seller_uri, "/generic/seller/8/");
    assert!(!account.agreed_tos);

    let urls: Vec<_> = executor
        .requests()
        .into_iter()
        .map(|request| request.url)
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://solitude.test/generic/seller/",
            "https://solitude.test/bango/package/",
            "https://solitude.test/bango/bank/",
        ]
    );

    let bodies = executor.request_bodies();
    assert_eq!(bodies[1]["seller"], "/generic/seller/8/");
    assert_eq!(bodies[1]["paypalEmailAddress"], "nobody@example.com");
    assert_eq!(bodies[2]["sellerBango"], "/bango/package/21/");
    assert_eq!(bodies[2]["bankAccountNumber"], "12345678");
}

#[tokio::test]
async fn bango_account_details_expose_only_package_fields() {
    let (executor, client) = harness();
    executor.queue(
        200,
        serde_json::json!({
            "resource_uri": "/bango/package/21/",
            "full": {
                "vendorName": "Vendor",
                "adminEmailAddress": "admin@example.com",
                "sellerId": 8,
                "bankAccountNumber": "12345678",
                "status": "OK"
            }
        }),
    );

    let provider = Bango::new(client);
    let details = provider
        .account_retrieve(&account(ProviderName::Bango))
        .await
        .expect("details");

    assert_eq!(details["account_name"], "Main account");
    assert_eq!(details["vendorName"], "Vendor");
    assert_eq!(details["adminEmailAddress"], "admin@example.com");
    // Internal and bank fields never reach the API.
    assert!(details.get("sellerId").is_none());
    assert!(details.get("bankAccountNumber").is_none());
    assert!(details.get("status").is_none());

    let urls: Vec<_> = executor
        .requests()
        .into_iter()
        .map(|request| request.url)
        .collect();
    assert_eq!(urls, vec!["https://solitude.test/bango/package/21/?full=true"]);
}

#[tokio::test]
async fn bango_rejects_foreign_account_forms() {
    let (_, client) = harness();
    let provider = Bango::new(client);
    let form: PaymentAccountForm = serde_json::from_value(serde_json::json!({
        "provider": "boku",
        "account_name": "Carrier",
        "service_id": "svc-1"
    }))
    .expect("valid form");

    let err = provider
        .account_create(&User { id: 10 }, &form)
        .await
        .unwrap_err();
    assert!(matches!(
        err.current_context(),
        ProviderError::UnsupportedAccountForm {
            provider: ProviderName::Bango,
        }
    ));
}

#[tokio::test]
async fn product_setup_is_idempotent() {
    let (executor, client) = harness();
    let provider = Boku::new(Arc::clone(&client));
    let account = PaymentAccount {
        provider: ProviderName::Boku,
        ..account(ProviderName::Boku)
    };

    // First call: nothing exists yet, so the product is created.
    executor.queue(200, serde_json::json!({"objects": []}));
    executor.queue(
        201,
        serde_json::json!({
            "resource_uri": "/generic/product/77/",
            "external_id": "marketplace-app:337141"
        }),
    );
    let first = provider
        .product_create(&account, &app())
        .await
        .expect("product created");
    assert_eq!(first, "/generic/product/77/");

    // Second call: the lookup finds the product and no POST happens.
    executor.queue(
        200,
        serde_json::json!({"objects": [{
            "resource_uri": "/generic/product/77/",
            "external_id": "marketplace-app:337141"
        }]}),
    );
    let second = provider
        .product_create(&account, &app())
        .await
        .expect("existing product returned");
    assert_eq!(second, first);

    let posts = executor
        .requests()
        .into_iter()
        .filter(|request| request.url.ends_with("/generic/product/") && request.body.is_some())
        .count();
    assert_eq!(posts, 1);
}

#[tokio::test]
async fn duplicated_remote_products_fail_loudly() {
    let (executor, client) = harness();
    let provider = Boku::new(client);
    let account = PaymentAccount {
        provider: ProviderName::Boku,
        ..account(ProviderName::Boku)
    };

    executor.queue(
        200,
        serde_json::json!({"objects": [
            {"resource_uri": "/generic/product/1/", "external_id": "marketplace-app:337141"},
            {"resource_uri": "/generic/product/2/", "external_id": "marketplace-app:337141"}
        ]}),
    );
    let err = provider.product_create(&account, &app()).await.unwrap_err();
    assert!(matches!(
        err.current_context(),
        ProviderError::MultipleRemoteResources
    ));
}

#[tokio::test]
async fn reference_terms_update_round_trips_the_seller_document() {
    let (executor, client) = harness();
    let provider = Reference::new(client);
    let mut account = PaymentAccount {
        provider: ProviderName::Reference,
        uri: "/reference/sellers/5/".to_string(),
        account_id: "5".to_string(),
        ..account(ProviderName::Reference)
    };

    executor.queue(
        200,
        serde_json::json!({
            "id": 5,
            "resource_uri": "/reference/sellers/5/",
            "resource_name": "sellers",
            "name": "Seller",
            "email": "seller@example.com",
            "status": "ACTIVE"
        }),
    );
    executor.queue(200, serde_json::json!({}));

    let terms = provider.terms_update(&mut account).await.expect("terms updated");
    assert!(terms.agreed);
    assert!(account.agreed_tos);

    let bodies = executor.request_bodies();
    let put_body = &bodies[0];
    assert!(put_body.get("id").is_none());
    assert!(put_body.get("resource_uri").is_none());
    assert!(put_body.get("resource_name").is_none());
    assert_eq!(put_body["name"], "Seller");
    let agreement = put_body["agreement"].as_str().expect("agreement date");
    assert_eq!(agreement.len(), 10);
}

#[tokio::test]
async fn reference_product_lookup_tolerates_missing_listing() {
    let (executor, client) = harness();
    let provider = Reference::new(client);
    let account = PaymentAccount {
        provider: ProviderName::Reference,
        uri: "/reference/sellers/5/".to_string(),
        account_id: "5".to_string(),
        ..account(ProviderName::Reference)
    };

    executor.queue(200, serde_json::json!({"objects": []}));
    executor.queue(
        201,
        serde_json::json!({
            "resource_uri": "/generic/product/12/",
            "external_id": "marketplace-app:337141"
        }),
    );
    // The provider API 404s when nothing matches; that reads as "create it".
    executor.queue(404, serde_json::json!({}));
    executor.queue(
        201,
        serde_json::json!({"resource_uri": "/reference/products/9/"}),
    );

    let uri = provider
        .product_create(&account, &app())
        .await
        .expect("product created");
    assert_eq!(uri, "/reference/products/9/");

    let urls: Vec<_> = executor
        .requests()
        .into_iter()
        .map(|request| request.url)
        .collect();
    assert!(urls[2].starts_with("https://zippy.test/reference/products/?external_id="));
    assert_eq!(urls[3], "https://zippy.test/reference/products/");
}

#[tokio::test]
async fn boku_accounts_start_agreed_and_expose_the_portal() {
    let (executor, client) = harness();
    executor.queue(201, serde_json::json!({"resource_uri": "/generic/seller/8/"}));
    executor.queue(201, serde_json::json!({"resource_uri": "/boku/seller/3/"}));

    let provider = Boku::new(client);
    let form: PaymentAccountForm = serde_json::from_value(serde_json::json!({
        "provider": "boku",
        "account_name": "Carrier",
        "service_id": "svc-1"
    }))
    .expect("valid form");

    let account = provider
        .account_create(&User { id: 10 }, &form)
        .await
        .expect("account created");
    assert!(account.agreed_tos);
    assert_eq!(account.account_id, "3");

    assert_eq!(
        provider.portal_url(None),
        "https://merchants.boku.test/signup"
    );

    // No editable account details on this side.
    let details = provider.account_retrieve(&account).await.expect("details");
    assert!(details.is_empty());

    let err = provider
        .account_update(&mut account.clone(), &form)
        .await
        .unwrap_err();
    assert!(matches!(
        err.current_context(),
        ProviderError::FlowNotSupported {
            flow: "account_update",
            provider: ProviderName::Boku,
        }
    ));
}
