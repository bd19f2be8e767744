//! In-memory stores standing in for framework-managed storage.
//!
//! Each store is a small `RwLock`-guarded map behind `Arc`, cloneable into
//! handlers and tests. A real database is explicitly out of scope.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc, RwLock,
    },
};

use api_models::{search::Collection, search::CollectionType, submission::PremiumType};
use payment_providers::types::PaymentAccount;

/// A published app.
#[derive(Clone, Debug)]
pub struct Webapp {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub app_domain: String,
    pub manifest_url: String,
    pub premium_type: PremiumType,
}

/// A validated manifest upload awaiting submission. `name` carries the
/// manifest URL, mirroring how the upload form fills it in.
#[derive(Clone, Debug)]
pub struct Upload {
    pub id: uuid::Uuid,
    pub name: String,
    pub valid: bool,
}

/// A curated collection with its targeting filters.
#[derive(Clone, Debug)]
pub struct StoredCollection {
    pub collection: Collection,
    pub region: Option<String>,
    pub carrier: Option<String>,
}

#[derive(Clone, Default)]
pub struct WebappStore {
    inner: Arc<RwLock<HashMap<i64, Webapp>>>,
    next_id: Arc<AtomicI64>,
}

impl WebappStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Insert the app, assigning its id.
    pub fn insert(&self, mut app: Webapp) -> Webapp {
        app.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .write()
            .expect("webapp store poisoned")
            .insert(app.id, app.clone());
        app
    }

    pub fn get(&self, id: i64) -> Option<Webapp> {
        self.inner
            .read()
            .expect("webapp store poisoned")
            .get(&id)
            .cloned()
    }

    pub fn domain_exists(&self, domain: &str) -> bool {
        self.inner
            .read()
            .expect("webapp store poisoned")
            .values()
            .any(|app| app.app_domain == domain)
    }
}

#[derive(Clone, Default)]
pub struct UploadStore {
    inner: Arc<RwLock<HashMap<uuid::Uuid, Upload>>>,
}

impl UploadStore {
    pub fn insert(&self, upload: Upload) {
        self.inner
            .write()
            .expect("upload store poisoned")
            .insert(upload.id, upload);
    }

    pub fn get(&self, id: uuid::Uuid) -> Option<Upload> {
        self.inner
            .read()
            .expect("upload store poisoned")
            .get(&id)
            .cloned()
    }
}

#[derive(Clone, Default)]
pub struct AccountStore {
    inner: Arc<RwLock<HashMap<i64, PaymentAccount>>>,
    next_id: Arc<AtomicI64>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::default(),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Insert the account, assigning its id.
    pub fn insert(&self, mut account: PaymentAccount) -> PaymentAccount {
        account.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .write()
            .expect("account store poisoned")
            .insert(account.id, account.clone());
        account
    }

    pub fn get(&self, id: i64) -> Option<PaymentAccount> {
        self.inner
            .read()
            .expect("account store poisoned")
            .get(&id)
            .cloned()
    }

    pub fn update(&self, account: PaymentAccount) {
        self.inner
            .write()
            .expect("account store poisoned")
            .insert(account.id, account);
    }

    pub fn for_user(&self, user_id: i64) -> Vec<PaymentAccount> {
        let mut accounts: Vec<_> = self
            .inner
            .read()
            .expect("account store poisoned")
            .values()
            .filter(|account| account.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }
}

#[derive(Clone, Default)]
pub struct CollectionStore {
    inner: Arc<RwLock<Vec<StoredCollection>>>,
}

impl CollectionStore {
    pub fn insert(&self, collection: StoredCollection) {
        self.inner
            .write()
            .expect("collection store poisoned")
            .push(collection);
    }

    /// Collections of `collection_type` matching the filters. An applied
    /// filter requires an exact targeting match; `None` skips that filter.
    pub fn matching(
        &self,
        collection_type: CollectionType,
        region: Option<&str>,
        carrier: Option<&str>,
    ) -> Vec<Collection> {
        self.inner
            .read()
            .expect("collection store poisoned")
            .iter()
            .filter(|stored| stored.collection.collection_type == collection_type)
            .filter(|stored| region.map_or(true, |region| stored.region.as_deref() == Some(region)))
            .filter(|stored| {
                carrier.map_or(true, |carrier| stored.carrier.as_deref() == Some(carrier))
            })
            .map(|stored| stored.collection.clone())
            .collect()
    }
}

/// Handle bundling every store, shared through the app state.
#[derive(Clone, Default)]
pub struct Stores {
    pub webapps: WebappStore,
    pub uploads: UploadStore,
    pub accounts: AccountStore,
    pub collections: CollectionStore,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            webapps: WebappStore::new(),
            uploads: UploadStore::default(),
            accounts: AccountStore::new(),
            collections: CollectionStore::default(),
        }
    }
}
