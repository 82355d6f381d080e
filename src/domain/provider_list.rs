//! Ordered, identifier-unique provider collections.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{AppError, Provider};

/// Ordered list of providers with unique identifiers.
///
/// Insertion order is preserved; the first entry is the default when only one
/// provider exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProviderList(Vec<Provider>);

impl ProviderList {
    /// Validate and wrap a caller-supplied list.
    ///
    /// Fails when the list is empty, any provider is malformed, or an identifier
    /// repeats.
    pub fn new(providers: Vec<Provider>) -> Result<Self, AppError> {
        if providers.is_empty() {
            return Err(AppError::EmptyProviderList);
        }

        let mut seen = HashSet::with_capacity(providers.len());
        for (index, provider) in providers.iter().enumerate() {
            provider.validate().map_err(|reason| AppError::InvalidProvider { index, reason })?;
            if !seen.insert(provider.identifier()) {
                return Err(AppError::DuplicateProvider(provider.identifier().to_string()));
            }
        }

        Ok(Self(providers))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Provider> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Provider] {
        &self.0
    }

    /// Look up a provider by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Provider> {
        self.0.iter().find(|provider| provider.identifier() == identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.0.iter().map(Provider::identifier).collect()
    }

    pub fn into_vec(self) -> Vec<Provider> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ProviderList {
    type Item = &'a Provider;
    type IntoIter = std::slice::Iter<'a, Provider>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
