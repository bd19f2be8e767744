//! Provider-layer error types.

use crate::types::ProviderName;

/// Failures talking to a remote billing service.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to encode the outgoing request body")]
    RequestBuildFailed,
    #[error("Failed to send the request to the billing service")]
    RequestFailed,
    #[error("Resource not found on the billing service")]
    NotFound,
    #[error("Billing service returned an unexpected status: {status_code}")]
    UnexpectedStatus { status_code: u16 },
    #[error("Failed to deserialize the billing service response")]
    ResponseDeserializationFailed,
}

/// Failures inside a provider operation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The account passed into an account-scoped method belongs to a
    /// different provider. Fatal, never retried.
    #[error("Wrong account: {account} != {provider}")]
    WrongProviderAccount {
        account: ProviderName,
        provider: ProviderName,
    },
    #[error("{flow} is not supported by the {provider} provider")]
    FlowNotSupported {
        flow: &'static str,
        provider: ProviderName,
    },
    #[error("The {provider} provider cannot handle this account form")]
    UnsupportedAccountForm { provider: ProviderName },
    #[error("The billing service returned more than one resource")]
    MultipleRemoteResources,
    #[error("Billing service call failed")]
    BillingCall,
}

/// Failures resolving a provider from the registry.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown payment provider: {0}")]
    UnknownProvider(String),
    #[error("Unknown payment provider id: {0}")]
    UnknownProviderId(u8),
    #[error("The provider {0} is not one of the allowed payment providers")]
    NotEnabled(ProviderName),
}
