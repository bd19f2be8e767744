//! Curated-collection lookup for the featured search endpoint.

use std::collections::BTreeMap;

use api_models::search::{Collection, CollectionType, FeaturedSearchResponse, SearchResponse};

use crate::db::CollectionStore;

/// At most this many collections are returned per group.
const GROUP_LIMIT: usize = 1;

const GROUPS: &[(&str, CollectionType)] = &[
    ("collections", CollectionType::Basic),
    ("featured", CollectionType::Featured),
    ("operator", CollectionType::Operator),
];

/// Find collections of one type, dropping targeting filters until something
/// matches. Returns the matches plus the filters that had to be dropped, in
/// drop order; an empty drop list means the full filter set matched.
fn with_fallback(
    store: &CollectionStore,
    collection_type: CollectionType,
    region: Option<&str>,
    carrier: Option<&str>,
) -> (Vec<Collection>, Vec<String>) {
    // Region is dropped before carrier: carrier targeting is the stronger
    // signal for curated content.
    let attempts: [(Option<&str>, Option<&str>, &[&str]); 3] = [
        (region, carrier, &[]),
        (None, carrier, &["region"]),
        (None, None, &["region", "carrier"]),
    ];

    let mut last = Vec::new();
    let mut previous: Option<(Option<&str>, Option<&str>)> = None;
    for (try_region, try_carrier, dropped) in attempts {
        // Dropping a filter that was never applied is a no-op; skip attempts
        // that repeat the previous filter set.
        if previous == Some((try_region, try_carrier)) {
            continue;
        }
        previous = Some((try_region, try_carrier));
        let mut found = store.matching(collection_type, try_region, try_carrier);
        if !found.is_empty() {
            found.truncate(GROUP_LIMIT);
            let dropped = dropped
                .iter()
                .filter(|field| match **field {
                    "region" => region.is_some(),
                    "carrier" => carrier.is_some(),
                    _ => false,
                })
                .map(ToString::to_string)
                .collect();
            return (found, dropped);
        }
        last = found;
    }
    (last, Vec::new())
}

/// Merge the curated groups into a base search payload. The second value
/// maps group names to the filters dropped while resolving them, for the
/// `API-Fallback-<name>` response headers.
pub fn add_featured(
    store: &CollectionStore,
    base: SearchResponse,
    region: Option<&str>,
    carrier: Option<&str>,
) -> (FeaturedSearchResponse, BTreeMap<String, Vec<String>>) {
    let mut fallbacks = BTreeMap::new();
    let mut grouped: BTreeMap<&str, Vec<Collection>> = BTreeMap::new();

    for (name, collection_type) in GROUPS {
        let (found, dropped) = with_fallback(store, *collection_type, region, carrier);
        if !dropped.is_empty() {
            fallbacks.insert((*name).to_string(), dropped);
        }
        grouped.insert(*name, found);
    }

    let response = FeaturedSearchResponse {
        base,
        collections: grouped.remove("collections").unwrap_or_default(),
        featured: grouped.remove("featured").unwrap_or_default(),
        operator: grouped.remove("operator").unwrap_or_default(),
    };
    (response, fallbacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoredCollection;
    use api_models::search::Meta;

    fn collection(id: i64, collection_type: CollectionType) -> Collection {
        Collection {
            id,
            name: format!("Collection {id}"),
            slug: format!("collection-{id}"),
            collection_type,
            apps: Vec::new(),
        }
    }

    fn store() -> CollectionStore {
        let store = CollectionStore::default();
        store.insert(StoredCollection {
            collection: collection(1, CollectionType::Basic),
            region: Some("us".to_string()),
            carrier: None,
        });
        store.insert(StoredCollection {
            collection: collection(2, CollectionType::Featured),
            region: None,
            carrier: None,
        });
        store
    }

    #[test]
    fn matching_region_needs_no_fallback() {
        let (response, fallbacks) = add_featured(
            &store(),
            SearchResponse::default(),
            Some("us"),
            None,
        );
        assert_eq!(response.collections.len(), 1);
        assert!(!fallbacks.contains_key("collections"));
    }

    #[test]
    fn unmatched_region_falls_back_and_is_reported() {
        let (response, fallbacks) = add_featured(
            &store(),
            SearchResponse::default(),
            Some("br"),
            None,
        );
        // The us-targeted basic collection is found only after dropping the
        // region filter.
        assert_eq!(response.collections.len(), 1);
        assert_eq!(
            fallbacks.get("collections"),
            Some(&vec!["region".to_string()])
        );
    }

    #[test]
    fn carrier_falls_back_without_a_region() {
        let store = CollectionStore::default();
        store.insert(StoredCollection {
            collection: collection(3, CollectionType::Basic),
            region: None,
            carrier: None,
        });

        // No region applied; the unmatched carrier still has to fall back to
        // the untargeted collection.
        let (response, fallbacks) = add_featured(
            &store,
            SearchResponse::default(),
            None,
            Some("telco"),
        );
        assert_eq!(response.collections.len(), 1);
        assert_eq!(
            fallbacks.get("collections"),
            Some(&vec!["carrier".to_string()])
        );
    }

    #[test]
    fn base_payload_is_preserved() {
        let base = SearchResponse {
            meta: Meta {
                total_count: 3,
                limit: 25,
                offset: 0,
            },
            objects: Vec::new(),
        };
        let (response, _) = add_featured(&store(), base, None, None);
        assert_eq!(response.base.meta.total_count, 3);
    }
}
