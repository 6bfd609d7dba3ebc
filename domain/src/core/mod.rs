//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderId`] - the two concrete AI providers
//! - [`provider::ProviderChoice`] - a provider or the virtual `auto` selector
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod provider;
