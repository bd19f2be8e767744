//! App submission validation and the one-app-per-domain rule.

use api_models::{
    errors::FormErrors,
    submission::{AppSubmitRequest, AppSubmitResponse, PremiumType},
};
use marketplace_env::logger;

use crate::{
    configs::settings::SubmitConfig,
    db::{Stores, Webapp},
};

/// Normalize a manifest URL to its app domain: scheme plus host, lowercased.
pub fn domain_from_url(manifest_url: &str) -> Option<String> {
    let url = url::Url::parse(manifest_url).ok()?;
    let host = url.host_str()?;
    Some(format!("{}://{}", url.scheme(), host).to_lowercase())
}

/// Enforce the one-app-per-domain rule when it is enabled.
pub fn verify_app_domain(
    stores: &Stores,
    config: &SubmitConfig,
    manifest_url: &str,
) -> Result<(), String> {
    if !config.unique_by_domain {
        return Ok(());
    }
    let Some(domain) = domain_from_url(manifest_url) else {
        return Err("Enter a valid URL.".to_string());
    };
    if stores.webapps.domain_exists(&domain) {
        return Err(
            "An app already exists on this domain; only one app per domain is allowed."
                .to_string(),
        );
    }
    Ok(())
}

fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Validate a submission and create the app record.
pub fn submit_app(
    stores: &Stores,
    config: &SubmitConfig,
    request: &AppSubmitRequest,
) -> Result<AppSubmitResponse, FormErrors> {
    let mut errors = FormErrors::new();

    let upload = match stores.uploads.get(request.upload) {
        Some(upload) if upload.valid => Some(upload),
        _ => {
            errors.add(
                "upload",
                "There was an error with your upload. Please try again.",
            );
            None
        }
    };

    if !request.read_dev_agreement {
        errors.add("read_dev_agreement", "This field is required.");
    }

    let premium_type = match request.premium_type {
        None => PremiumType::Free,
        Some(code) => PremiumType::try_from(code).unwrap_or_else(|code| {
            errors.add(
                "premium_type",
                format!("Select a valid choice. {code} is not one of the available choices."),
            );
            PremiumType::Free
        }),
    };

    if let Some(upload) = &upload {
        if let Err(message) = verify_app_domain(stores, config, &upload.name) {
            errors.add("upload", message);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let upload = upload.expect("validated above");
    let app_domain = domain_from_url(&upload.name).expect("validated above");
    let host = app_domain
        .split_once("://")
        .map(|(_, host)| host)
        .unwrap_or(&app_domain);

    let app = stores.webapps.insert(Webapp {
        id: 0,
        slug: slugify(host),
        name: host.to_string(),
        app_domain: app_domain.clone(),
        manifest_url: upload.name.clone(),
        premium_type,
    });
    logger::info!(app_id = app.id, domain = %app.app_domain, "app submitted");

    Ok(AppSubmitResponse {
        id: app.id,
        slug: app.slug,
        name: app.name,
        app_domain: app.app_domain,
        manifest_url: app.manifest_url,
        premium_type: app.premium_type,
    })
}
