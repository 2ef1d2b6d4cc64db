// Session/Tenant state aggregation - the single input surface of the resolver.
//
// Auth, tenant, device and onboarding state are owned by external providers
// (identity service, tenant directory, client viewport, onboarding tracker);
// this module only composes their current values into one immutable snapshot
// per evaluation. It never mutates or caches provider state - staleness is the
// providers' concern.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

/// Minimal user identity carried through the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Uuid,
    pub email: String,
}

/// Minimal tenant company reference carried through the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRef {
    pub slug: String,
    pub name: String,
}

/// Current auth provider output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<UserRef>,
    pub is_authenticated: bool,
    pub loading: bool,
}

/// Current tenant provider output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantState {
    pub is_super_admin: bool,
    pub tenant_company: Option<TenantRef>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Current device/viewport provider output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceState {
    pub is_mobile: bool,
}

/// Current onboarding provider output. Open/close of the wizard overlay is
/// fully owned by the provider; the routing core only forwards the flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingState {
    pub show_onboarding_wizard: bool,
}

/// One consolidated, immutable view of all provider state for a single
/// resolution pass. Recomputed on every change; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub auth_loading: bool,
    pub is_authenticated: bool,
    pub user: Option<UserRef>,
    pub tenant_loading: bool,
    pub tenant_error: Option<String>,
    pub is_super_admin: bool,
    pub tenant_company: Option<TenantRef>,
    pub is_mobile: bool,
    pub show_onboarding_wizard: bool,
}

impl SessionSnapshot {
    /// Either provider still resolving. While true, no route table may be
    /// consulted - the resolver maps this to `Loading` before anything else.
    pub fn is_loading(&self) -> bool {
        self.auth_loading || self.tenant_loading
    }
}

/// Compose provider states into a snapshot. Pure and synchronous: same inputs,
/// same snapshot, no side effects beyond optional diagnostic logging.
pub fn aggregate(
    auth: &AuthState,
    tenant: &TenantState,
    device: &DeviceState,
    onboarding: &OnboardingState,
) -> SessionSnapshot {
    let snapshot = SessionSnapshot {
        auth_loading: auth.loading,
        is_authenticated: auth.is_authenticated,
        user: auth.user.clone(),
        tenant_loading: tenant.is_loading,
        tenant_error: tenant.error.clone(),
        is_super_admin: tenant.is_super_admin,
        tenant_company: tenant.tenant_company.clone(),
        is_mobile: device.is_mobile,
        show_onboarding_wizard: onboarding.show_onboarding_wizard,
    };

    if config::config().routing.log_snapshots {
        tracing::debug!(?snapshot, "aggregated session snapshot");
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_copies_all_provider_fields() {
        let auth = AuthState {
            user: Some(UserRef {
                id: Uuid::new_v4(),
                email: "hr@acme.example".to_string(),
            }),
            is_authenticated: true,
            loading: false,
        };
        let tenant = TenantState {
            is_super_admin: false,
            tenant_company: Some(TenantRef {
                slug: "acme".to_string(),
                name: "Acme GmbH".to_string(),
            }),
            is_loading: false,
            error: None,
        };
        let device = DeviceState { is_mobile: true };
        let onboarding = OnboardingState {
            show_onboarding_wizard: true,
        };

        let snapshot = aggregate(&auth, &tenant, &device, &onboarding);

        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.user, auth.user);
        assert_eq!(snapshot.tenant_company, tenant.tenant_company);
        assert!(snapshot.is_mobile);
        assert!(snapshot.show_onboarding_wizard);
        assert!(!snapshot.is_loading());
    }

    #[test]
    fn test_loading_when_either_provider_is_pending() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_loading());

        snapshot.auth_loading = true;
        assert!(snapshot.is_loading());

        snapshot.auth_loading = false;
        snapshot.tenant_loading = true;
        assert!(snapshot.is_loading());
    }

    #[test]
    fn test_default_snapshot_is_anonymous_marketing_state() {
        let snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_super_admin);
        assert!(snapshot.tenant_company.is_none());
        assert!(snapshot.tenant_error.is_none());
    }

    #[test]
    fn test_snapshot_deserializes_with_partial_body() {
        // Clients may post only the fields they care about
        let snapshot: SessionSnapshot =
            serde_json::from_str(r#"{"tenant_loading": true}"#).expect("snapshot");
        assert!(snapshot.tenant_loading);
        assert!(!snapshot.is_authenticated);
    }
}
