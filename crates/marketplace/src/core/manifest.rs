//! Pure data-shaping helpers over raw webapp manifests.
//!
//! All functions here are deterministic and total over well-formed input;
//! malformed or legacy shapes degrade to empty results instead of erroring.

use std::collections::BTreeMap;

use serde_json::Value;

/// Locales the marketplace ships translations for.
const SUPPORTED_LOCALES: &[&str] = &[
    "bg", "bn-BD", "ca", "cs", "da", "de", "el", "en-US", "es", "eu", "fr", "ga-IE", "hu", "it",
    "ja", "ko", "nl", "pl", "pt-BR", "pt-PT", "ro", "ru", "sk", "sq", "sr", "sv-SE", "tr", "zh-CN",
    "zh-TW",
];

/// Bare language codes mapped to the full locale the marketplace supports.
const SHORTER_LANGUAGES: &[(&str, &str)] = &[
    ("en", "en-US"),
    ("ga", "ga-IE"),
    ("pt", "pt-PT"),
    ("sv", "sv-SE"),
    ("zh", "zh-CN"),
];

/// Rating labels per body, indexed by the numeric codes stored in manifests.
/// Body order matches the stable body ids.
const RATINGS_BODIES: &[(&str, &[&str])] = &[
    ("classind", &["0", "10", "12", "14", "16", "18"]),
    ("generic", &["3", "7", "12", "16", "18"]),
    ("esrb", &["everyone", "10", "13", "17", "18"]),
    ("pegi", &["3", "7", "12", "16", "18"]),
    ("usk", &["0", "6", "12", "16", "18"]),
];

/// Known content descriptor keys, `BODY_LABEL` shaped.
const RATING_DESCS: &[&str] = &[
    "CLASSIND_CRIMINAL_ACTS",
    "CLASSIND_DRUGS",
    "CLASSIND_LANG",
    "CLASSIND_NO_DESCS",
    "CLASSIND_NUDITY",
    "CLASSIND_SEX_CONTENT",
    "CLASSIND_SHOCKING",
    "CLASSIND_VIOLENCE",
    "CLASSIND_VIOLENCE_EXTREME",
    "ESRB_ALCOHOL_REF",
    "ESRB_BLOOD",
    "ESRB_BLOOD_GORE",
    "ESRB_CRUDE_HUMOR",
    "ESRB_DRUG_REF",
    "ESRB_FANTASY_VIOLENCE",
    "ESRB_INTENSE_VIOLENCE",
    "ESRB_LANG",
    "ESRB_MILD_BLOOD",
    "ESRB_MILD_LANG",
    "ESRB_MILD_VIOLENCE",
    "ESRB_NO_DESCS",
    "ESRB_NUDITY",
    "ESRB_PARTIAL_NUDITY",
    "ESRB_REAL_GAMBLING",
    "ESRB_SEX_CONTENT",
    "ESRB_SIM_GAMBLING",
    "ESRB_STRONG_LANG",
    "ESRB_SUGGESTIVE",
    "ESRB_TOBACCO_REF",
    "ESRB_USE_ALCOHOL",
    "ESRB_USE_DRUG",
    "ESRB_USE_TOBACCO",
    "ESRB_VIOLENCE",
    "ESRB_VIOLENCE_REF",
    "GENERIC_DISCRIMINATION",
    "GENERIC_DRUGS",
    "GENERIC_GAMBLING",
    "GENERIC_LANG",
    "GENERIC_NO_DESCS",
    "GENERIC_NUDITY",
    "GENERIC_SCARY",
    "GENERIC_SEX_CONTENT",
    "GENERIC_VIOLENCE",
    "PEGI_DISCRIMINATION",
    "PEGI_DRUGS",
    "PEGI_GAMBLING",
    "PEGI_LANG",
    "PEGI_NO_DESCS",
    "PEGI_NUDITY",
    "PEGI_ONLINE",
    "PEGI_SCARY",
    "PEGI_SEX_CONTENT",
    "PEGI_VIOLENCE",
    "USK_DISCRIMINATION",
    "USK_DRUGS",
    "USK_LANG",
    "USK_NO_DESCS",
    "USK_NUDITY",
    "USK_SCARY",
    "USK_SEX_CONTENT",
    "USK_VIOLENCE",
];

/// Known interactive-element keys.
const RATING_INTERACTIVES: &[&str] = &[
    "DIGITAL_CONTENT_PORTAL",
    "DIGITAL_PURCHASES",
    "SHARES_INFO",
    "SHARES_LOCATION",
    "SOCIAL_NETWORKING",
    "USERS_INTERACT",
];

/// Per-locale values of `property`, with the default locale picking up the
/// root-level value.
pub fn get_locale_properties(manifest: &Value, property: &str) -> BTreeMap<String, Value> {
    let mut properties = BTreeMap::new();

    if let Some(locales) = manifest.get("locales").and_then(Value::as_object) {
        for (locale, fields) in locales {
            if let Some(value) = fields.get(property) {
                properties.insert(locale.clone(), value.clone());
            }
        }
    }

    let default = manifest.get("default_locale").and_then(Value::as_str);
    let root = manifest.get(property);
    if let (Some(default), Some(root)) = (default, root) {
        properties.insert(default.to_string(), root.clone());
    }

    properties
}

/// Canonical supported locale for a language tag, normalizing bare language
/// codes through the shorter-languages table. Case-insensitive.
fn find_language(locale: &str) -> Option<&'static str> {
    if let Some(supported) = SUPPORTED_LOCALES
        .iter()
        .find(|supported| supported.eq_ignore_ascii_case(locale))
    {
        return Some(supported);
    }
    SHORTER_LANGUAGES
        .iter()
        .find(|(short, _)| short.eq_ignore_ascii_case(locale))
        .map(|(_, full)| *full)
}

/// Supported locales named in the manifest's `locales` property, normalized
/// and sorted. The default locale is not included.
pub fn get_supported_locales(manifest: &Value) -> Vec<String> {
    let mut locales: Vec<String> = manifest
        .get("locales")
        .and_then(Value::as_object)
        .map(|locales| {
            locales
                .keys()
                .filter_map(|locale| find_language(locale))
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();
    locales.sort();
    locales.dedup();
    locales
}

fn as_index(value: Option<&Value>) -> Option<usize> {
    let value = value?;
    if let Some(index) = value.as_u64() {
        return usize::try_from(index).ok();
    }
    // Numeric strings count as integers, anything else is the legacy shape.
    value.as_str()?.parse().ok()
}

/// `{body, rating}` numeric codes to the rating label. The legacy format
/// (non-integer fields) comes back as an empty object, never an error.
pub fn dehydrate_content_rating(rating: &Value) -> Value {
    let label = as_index(rating.get("body"))
        .and_then(|body| RATINGS_BODIES.get(body))
        .and_then(|(_, labels)| {
            as_index(rating.get("rating")).and_then(|index| labels.get(index))
        });
    match label {
        Some(label) => Value::String((*label).to_string()),
        None => Value::Object(serde_json::Map::new()),
    }
}

/// Dehydrate every body entry of a content-ratings object.
pub fn dehydrate_content_ratings(content_ratings: &Value) -> Value {
    match content_ratings.as_object() {
        Some(ratings) => Value::Object(
            ratings
                .iter()
                .map(|(body, rating)| (body.clone(), dehydrate_content_rating(rating)))
                .collect(),
        ),
        None => Value::Object(serde_json::Map::new()),
    }
}

/// Known descriptor keys to body-grouped slug lists:
/// `["ESRB_BLOOD"]` becomes `{"esrb": ["blood"]}`. The `no-descs` sentinel
/// is dropped, unknown keys are ignored.
pub fn dehydrate_descriptors(keys: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut results: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for key in keys {
        if !RATING_DESCS.contains(&key.as_str()) {
            continue;
        }
        let slug = key.to_lowercase().replace('_', "-");
        if let Some((body, label)) = slug.split_once('-') {
            if label != "no-descs" {
                results
                    .entry(body.to_string())
                    .or_default()
                    .push(label.to_string());
            }
        }
    }
    results
}

/// Known interactive keys to slugs, unknown keys dropped.
pub fn dehydrate_interactives(keys: &[String]) -> Vec<String> {
    keys.iter()
        .filter(|key| RATING_INTERACTIVES.contains(&key.as_str()))
        .map(|key| key.to_lowercase().replace('_', "-"))
        .collect()
}
