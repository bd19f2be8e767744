//! Provider resolution against the deployment allow-list.

use std::{str::FromStr, sync::Arc};

use common_utils::errors::CustomResult;
use error_stack::report;
use serde::Deserialize;

use crate::{
    client::SolitudeClient,
    errors::RegistryError,
    provider::Provider,
    providers::{Bango, Boku, Reference},
    types::ProviderName,
};

/// Which providers a deployment exposes, and which one requests get when
/// they do not name one.
#[derive(Clone, Debug, Deserialize)]
pub struct ProvidersConfig {
    pub enabled: Vec<ProviderName>,
    pub default: ProviderName,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            enabled: vec![ProviderName::Bango],
            default: ProviderName::Bango,
        }
    }
}

fn construct(name: ProviderName, client: Arc<SolitudeClient>) -> Box<dyn Provider> {
    match name {
        ProviderName::Bango => Box::new(Bango::new(client)),
        ProviderName::Reference => Box::new(Reference::new(client)),
        ProviderName::Boku => Box::new(Boku::new(client)),
    }
}

/// Resolve a provider by name or numeric id, falling back to the configured
/// default. Providers outside the allow-list resolve to an error even when
/// the name itself is known.
pub fn get_provider(
    name: Option<&str>,
    id: Option<u8>,
    config: &ProvidersConfig,
    client: Arc<SolitudeClient>,
) -> CustomResult<Box<dyn Provider>, RegistryError> {
    let resolved = match (name, id) {
        (_, Some(id)) => {
            ProviderName::from_id(id).ok_or_else(|| report!(RegistryError::UnknownProviderId(id)))?
        }
        (Some(name), None) => ProviderName::from_str(name)
            .map_err(|_| report!(RegistryError::UnknownProvider(name.to_string())))?,
        (None, None) => config.default,
    };

    if !config.enabled.contains(&resolved) {
        return Err(report!(RegistryError::NotEnabled(resolved)));
    }
    Ok(construct(resolved, client))
}

/// All enabled providers, in configuration order.
pub fn get_providers(config: &ProvidersConfig, client: Arc<SolitudeClient>) -> Vec<Box<dyn Provider>> {
    config
        .enabled
        .iter()
        .map(|name| construct(*name, Arc::clone(&client)))
        .collect()
}
