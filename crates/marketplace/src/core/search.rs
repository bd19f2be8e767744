//! Search query validation, Elasticsearch query building and the ES client.

use api_models::search::{
    IndexedApp, Meta, RocketbarOption, SearchQueryParams, SearchResponse, SuggestionsPayload,
};
use api_models::errors::FormErrors;
use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, RequestBuilder, RequestContent},
};
use error_stack::{report, ResultExt};
use marketplace_env::logger;
use payment_providers::client::RequestExecutor;
use payment_providers::errors::ClientError;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::configs::settings::SearchConfig;

/// Region applied when neither the query nor the request carries one.
pub const REST_OF_WORLD: &str = "restofworld";

/// Indexed status of publicly listed apps.
const STATUS_PUBLIC: u8 = 4;

const DOC_TYPES: &[&str] = &["app", "privileged", "theme"];
const DEVICES: &[&str] = &["desktop", "mobile", "tablet", "firefoxos"];

/// Default size of a rocketbar completion request.
const ROCKETBAR_DEFAULT_LIMIT: u32 = 5;

/// Suggestion descriptions are truncated to this many characters.
const SUGGESTION_DESC_LENGTH: usize = 55;

/// A validated search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchForm {
    pub q: String,
    pub doc_type: String,
    pub limit: u32,
    pub offset: u32,
    /// Raw region override; resolved against the request by
    /// [`resolve_region`].
    pub region: Option<String>,
    pub device: Option<String>,
    pub premium_types: Vec<u8>,
}

/// Validate raw query parameters, collecting every per-field failure.
pub fn validate(
    params: &SearchQueryParams,
    config: &SearchConfig,
) -> Result<SearchForm, FormErrors> {
    let mut errors = FormErrors::new();

    let q = params.q.as_deref().unwrap_or_default().trim().to_string();
    if q.chars().count() > config.max_query_length {
        errors.add(
            "q",
            format!(
                "Ensure this value has at most {} characters.",
                config.max_query_length
            ),
        );
    }

    let doc_type = params.doc_type.clone().unwrap_or_else(|| "app".to_string());
    if !DOC_TYPES.contains(&doc_type.as_str()) {
        errors.add(
            "type",
            format!("Select a valid choice. {doc_type} is not one of the available choices."),
        );
    }

    let limit = match params.limit.as_deref() {
        None => config.default_limit,
        Some(raw) => match raw.parse::<u32>() {
            Ok(limit) if (1..=config.max_limit).contains(&limit) => limit,
            Ok(_) => {
                errors.add(
                    "limit",
                    format!(
                        "Ensure this value is between 1 and {}.",
                        config.max_limit
                    ),
                );
                config.default_limit
            }
            Err(_) => {
                errors.add("limit", "Enter a whole number.");
                config.default_limit
            }
        },
    };

    let offset = match params.offset.as_deref() {
        None => 0,
        Some(raw) => match raw.parse::<u32>() {
            Ok(offset) => offset,
            Err(_) => {
                errors.add("offset", "Enter a whole number.");
                0
            }
        },
    };

    let device = match params.device.as_deref() {
        None => None,
        Some(device) if DEVICES.contains(&device) => Some(device.to_string()),
        Some(device) => {
            errors.add(
                "device",
                format!("Select a valid choice. {device} is not one of the available choices."),
            );
            None
        }
    };

    let mut premium_types = Vec::new();
    if let Some(raw) = params.premium_types.as_deref() {
        for part in raw.split(',').filter(|part| !part.is_empty()) {
            match part.trim().parse::<u8>() {
                Ok(code) if code <= 4 => premium_types.push(code),
                _ => errors.add(
                    "premium_types",
                    format!("Select a valid choice. {part} is not one of the available choices."),
                ),
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SearchForm {
        q,
        doc_type,
        limit,
        offset,
        region: params.region.clone(),
        device,
        premium_types,
    })
}

/// Resolve the region to filter by. An explicit query value wins, the
/// literal `"None"` clears the region entirely, otherwise the
/// request-derived region applies, falling back to [`REST_OF_WORLD`].
pub fn resolve_region(query: Option<&str>, request: Option<&str>) -> Option<String> {
    match query {
        Some("None") => None,
        Some(region) => Some(region.to_string()),
        None => Some(request.unwrap_or(REST_OF_WORLD).to_string()),
    }
}

/// Build the filtered bool query for a validated form.
pub fn build_query(form: &SearchForm, region: Option<&str>) -> serde_json::Value {
    let mut filter = vec![
        json!({"term": {"status": STATUS_PUBLIC}}),
        json!({"term": {"doc_type": form.doc_type}}),
    ];
    if let Some(device) = &form.device {
        filter.push(json!({"term": {"device_types": device}}));
    }
    if !form.premium_types.is_empty() {
        filter.push(json!({"terms": {"premium_type": form.premium_types}}));
    }

    let mut must_not = Vec::new();
    if let Some(region) = region {
        must_not.push(json!({"term": {"region_exclusions": region}}));
    }

    let must = if form.q.is_empty() {
        json!({"match_all": {}})
    } else {
        json!({"multi_match": {
            "query": form.q,
            "fields": ["name^4", "description"],
        }})
    };

    json!({
        "query": {
            "bool": {
                "must": [must],
                "filter": filter,
                "must_not": must_not,
            }
        },
        "from": form.offset,
        "size": form.limit,
    })
}

/// Completion-suggester body used by the rocketbar endpoint.
pub fn build_rocketbar_query(q: &str, limit: u32) -> serde_json::Value {
    json!({
        "apps": {
            "completion": {"field": "name_suggest", "size": limit},
            "text": q.trim(),
        }
    })
}

/// Rocketbar page size: `limit` when present and parseable, else 5.
pub fn rocketbar_limit(params: &SearchQueryParams, config: &SearchConfig) -> u32 {
    params
        .limit
        .as_deref()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|limit| limit.min(config.max_limit))
        .unwrap_or(ROCKETBAR_DEFAULT_LIMIT)
}

#[derive(Clone, Debug, Deserialize)]
pub struct EsSearchResponse {
    pub hits: EsHits,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EsHits {
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<EsHit>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EsHit {
    #[serde(rename = "_source")]
    pub source: IndexedApp,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EsSuggestResponse {
    #[serde(default)]
    pub apps: Vec<EsSuggestGroup>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EsSuggestGroup {
    #[serde(default)]
    pub options: Vec<RocketbarOption>,
}

/// Minimal Elasticsearch client for the app index.
#[derive(Clone)]
pub struct EsClient {
    es_url: String,
    index: String,
    executor: Arc<dyn RequestExecutor>,
}

impl std::fmt::Debug for EsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsClient")
            .field("es_url", &self.es_url)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl EsClient {
    pub fn new(config: &SearchConfig, executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            es_url: config.es_url.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            executor,
        }
    }

    pub async fn search(
        &self,
        body: &serde_json::Value,
    ) -> CustomResult<EsSearchResponse, ClientError> {
        self.send("_search", body).await
    }

    pub async fn suggest(
        &self,
        body: &serde_json::Value,
    ) -> CustomResult<EsSuggestResponse, ClientError> {
        self.send("_suggest", body).await
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> CustomResult<T, ClientError> {
        let url = format!("{}/{}/{endpoint}", self.es_url, self.index);
        logger::debug!(%url, "elasticsearch request");

        let content = RequestContent::json(body).change_context(ClientError::RequestBuildFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .attach_default_headers()
            .set_body(content)
            .build();

        let response = self.executor.execute(request).await?;
        match response.status_code {
            200..=299 => response
                .response
                .parse_struct("elasticsearch response")
                .change_context(ClientError::ResponseDeserializationFailed),
            status_code => {
                logger::warn!(%url, status_code, "elasticsearch call failed");
                Err(report!(ClientError::UnexpectedStatus { status_code }))
            }
        }
    }
}

/// Shape an ES result into the API payload.
pub fn to_search_response(form: &SearchForm, es: EsSearchResponse) -> SearchResponse {
    SearchResponse {
        meta: Meta {
            total_count: es.hits.total,
            limit: form.limit,
            offset: form.offset,
        },
        objects: es.hits.hits.into_iter().map(|hit| hit.source).collect(),
    }
}

/// Shape a search result into the suggestions array
/// `[query, names, descriptions, urls, icons]`.
pub fn to_suggestions(query: &str, response: &SearchResponse) -> SuggestionsPayload {
    let mut names = Vec::new();
    let mut descriptions = Vec::new();
    let mut urls = Vec::new();
    let mut icons = Vec::new();
    for app in &response.objects {
        names.push(app.name.clone());
        descriptions.push(truncate(&app.description, SUGGESTION_DESC_LENGTH));
        urls.push(app.absolute_url.clone());
        icons.push(app.icon.clone());
    }
    SuggestionsPayload(query.to_string(), names, descriptions, urls, icons)
}

/// Truncate to at most `length` characters, appending an ellipsis when
/// anything was cut. Character-boundary safe.
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig {
            es_url: "http://localhost:9200".to_string(),
            index: "apps".to_string(),
            default_limit: 25,
            max_limit: 50,
            max_query_length: 255,
        }
    }

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let form = validate(&SearchQueryParams::default(), &config()).expect("valid");
        assert_eq!(form.q, "");
        assert_eq!(form.doc_type, "app");
        assert_eq!(form.limit, 25);
        assert_eq!(form.offset, 0);
        assert!(form.premium_types.is_empty());
    }

    #[test]
    fn invalid_fields_collect_per_field_errors() {
        let params = SearchQueryParams {
            doc_type: Some("song".to_string()),
            limit: Some("many".to_string()),
            premium_types: Some("1,9".to_string()),
            ..Default::default()
        };
        let errors = validate(&params, &config()).unwrap_err();
        assert!(errors.field("type").is_some());
        assert!(errors.field("limit").is_some());
        assert!(errors.field("premium_types").is_some());
    }

    #[test]
    fn limit_is_bounded() {
        let params = SearchQueryParams {
            limit: Some("51".to_string()),
            ..Default::default()
        };
        assert!(validate(&params, &config()).is_err());

        let params = SearchQueryParams {
            limit: Some("50".to_string()),
            ..Default::default()
        };
        assert_eq!(validate(&params, &config()).expect("valid").limit, 50);
    }

    #[test]
    fn region_resolution_order() {
        assert_eq!(resolve_region(Some("br"), Some("us")), Some("br".to_string()));
        assert_eq!(resolve_region(Some("None"), Some("us")), None);
        assert_eq!(resolve_region(None, Some("us")), Some("us".to_string()));
        assert_eq!(resolve_region(None, None), Some(REST_OF_WORLD.to_string()));
    }

    #[test]
    fn query_carries_filters_and_pagination() {
        let form = SearchForm {
            q: "maps".to_string(),
            doc_type: "app".to_string(),
            limit: 10,
            offset: 20,
            region: None,
            device: Some("firefoxos".to_string()),
            premium_types: vec![0, 2],
        };
        let query = build_query(&form, Some("br"));

        assert_eq!(query["from"], 20);
        assert_eq!(query["size"], 10);
        assert_eq!(
            query["query"]["bool"]["must"][0]["multi_match"]["query"],
            "maps"
        );
        let filters = query["query"]["bool"]["filter"].as_array().expect("filters");
        assert!(filters.contains(&json!({"term": {"device_types": "firefoxos"}})));
        assert!(filters.contains(&json!({"terms": {"premium_type": [0, 2]}})));
        assert_eq!(
            query["query"]["bool"]["must_not"][0],
            json!({"term": {"region_exclusions": "br"}})
        );
    }

    #[test]
    fn empty_query_matches_all() {
        let form = SearchForm {
            q: String::new(),
            doc_type: "app".to_string(),
            limit: 25,
            offset: 0,
            region: None,
            device: None,
            premium_types: Vec::new(),
        };
        let query = build_query(&form, None);
        assert_eq!(query["query"]["bool"]["must"][0], json!({"match_all": {}}));
        assert!(query["query"]["bool"]["must_not"]
            .as_array()
            .expect("must_not")
            .is_empty());
    }

    #[test]
    fn rocketbar_query_shape() {
        let query = build_rocketbar_query(" calc ", 5);
        assert_eq!(
            query,
            json!({"apps": {"completion": {"field": "name_suggest", "size": 5}, "text": "calc"}})
        );
    }

    #[test]
    fn truncation_appends_ellipsis_only_when_needed() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn suggestions_payload_shape() {
        let response = SearchResponse {
            meta: Meta::default(),
            objects: vec![IndexedApp {
                id: 1,
                slug: "maps".to_string(),
                name: "Maps".to_string(),
                description: "Find your way".to_string(),
                absolute_url: "/app/maps/".to_string(),
                icon: "/media/maps.png".to_string(),
                ..Default::default()
            }],
        };
        let payload = to_suggestions("maps", &response);
        assert_eq!(payload.0, "maps");
        assert_eq!(payload.1, vec!["Maps"]);
        assert_eq!(payload.3, vec!["/app/maps/"]);
    }
}
