// Tenant resolution collaborator. Persistence lives in the managed backend;
// this service keeps an in-memory slug directory seeded from configuration so
// the routing layer can resolve a claims slug to a tenant company reference.
// Lookup failures are data for the snapshot (tenant_error), never panics.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::config;
use crate::session::TenantRef;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("unknown tenant '{0}'")]
    UnknownTenant(String),
    #[error("invalid tenant seed entry '{0}'")]
    InvalidSeed(String),
}

/// Provider seam for tenant resolution. The HTTP layer depends on this trait
/// so tests and future backends can swap the directory out.
#[async_trait]
pub trait TenantResolver: Send + Sync {
    async fn resolve_tenant(&self, slug: &str) -> Result<TenantRef, DirectoryError>;
}

#[derive(Debug, Clone, Default)]
pub struct TenantDirectory {
    tenants: HashMap<String, TenantRef>,
}

impl TenantDirectory {
    /// Build the directory from `slug:Display Name` seed entries.
    pub fn from_seed(seed: &[String]) -> Result<Self, DirectoryError> {
        let mut tenants = HashMap::new();
        for entry in seed {
            let (slug, name) = entry
                .split_once(':')
                .ok_or_else(|| DirectoryError::InvalidSeed(entry.clone()))?;
            if slug.trim().is_empty() || name.trim().is_empty() {
                return Err(DirectoryError::InvalidSeed(entry.clone()));
            }
            tenants.insert(
                slug.trim().to_string(),
                TenantRef {
                    slug: slug.trim().to_string(),
                    name: name.trim().to_string(),
                },
            );
        }
        Ok(Self { tenants })
    }

    pub fn from_config() -> Result<Self, DirectoryError> {
        Self::from_seed(&config::config().tenants.seed)
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    pub fn lookup(&self, slug: &str) -> Result<TenantRef, DirectoryError> {
        self.tenants
            .get(slug)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownTenant(slug.to_string()))
    }
}

#[async_trait]
impl TenantResolver for TenantDirectory {
    async fn resolve_tenant(&self, slug: &str) -> Result<TenantRef, DirectoryError> {
        self.lookup(slug)
    }
}
