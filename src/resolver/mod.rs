// View resolver - the presentation-mode state machine.
//
// Given one session snapshot, selects exactly one presentation mode. The
// branch order below is load-bearing and must not be reordered:
//
//   1. loading (either provider pending)
//   2. tenant error (non-super-admin only)
//   3. super-admin (suppresses tenant mode even with a loaded tenant context)
//   4. tenant company
//   5. authenticated without any association
//   6. public marketing
//
// Loading before everything else is what prevents a wrong portal or a 404
// flashing for a frame while auth/tenant resolution is in flight. Super-admin
// before tenant is the impersonation/preview rule: an operator with a tenant
// context loaded still sees the operator portal.

use serde::{Deserialize, Serialize};

use crate::session::SessionSnapshot;

/// The mutually exclusive top-level UI states. Exactly one is active per
/// snapshot; transient, recomputed on every snapshot change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    Loading,
    TenantError,
    SuperAdminUnauthed,
    SuperAdminAuthed,
    TenantUnauthed,
    TenantAuthed,
    FallbackAuthed,
    MarketingUnauthed,
}

impl PresentationMode {
    /// Modes that render the full application shell (sidebar, assistant, ...).
    pub fn is_authenticated_app(&self) -> bool {
        matches!(
            self,
            PresentationMode::SuperAdminAuthed
                | PresentationMode::TenantAuthed
                | PresentationMode::FallbackAuthed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationMode::Loading => "loading",
            PresentationMode::TenantError => "tenant_error",
            PresentationMode::SuperAdminUnauthed => "super_admin_unauthed",
            PresentationMode::SuperAdminAuthed => "super_admin_authed",
            PresentationMode::TenantUnauthed => "tenant_unauthed",
            PresentationMode::TenantAuthed => "tenant_authed",
            PresentationMode::FallbackAuthed => "fallback_authed",
            PresentationMode::MarketingUnauthed => "marketing_unauthed",
        }
    }
}

impl std::str::FromStr for PresentationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loading" => Ok(PresentationMode::Loading),
            "tenant_error" => Ok(PresentationMode::TenantError),
            "super_admin_unauthed" => Ok(PresentationMode::SuperAdminUnauthed),
            "super_admin_authed" => Ok(PresentationMode::SuperAdminAuthed),
            "tenant_unauthed" => Ok(PresentationMode::TenantUnauthed),
            "tenant_authed" => Ok(PresentationMode::TenantAuthed),
            "fallback_authed" => Ok(PresentationMode::FallbackAuthed),
            "marketing_unauthed" => Ok(PresentationMode::MarketingUnauthed),
            other => Err(format!("unknown presentation mode '{}'", other)),
        }
    }
}

/// Outcome of one resolution pass.
///
/// The two `should_show_*` flags are derived diagnostics that mirror the
/// branch outcome; they are logged and returned for observability but are
/// never consulted as an independent source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub mode: PresentationMode,
    pub should_show_super_admin_area: bool,
    pub should_show_tenant_area: bool,
}

/// Select the presentation mode for a snapshot. Pure function: no state, no
/// side effects, idempotent for equal snapshots.
pub fn resolve(snapshot: &SessionSnapshot) -> Resolution {
    let should_show_super_admin_area = snapshot.is_super_admin;
    let should_show_tenant_area = snapshot.tenant_company.is_some() && !snapshot.is_super_admin;

    let mode = if snapshot.is_loading() {
        PresentationMode::Loading
    } else if snapshot.tenant_error.is_some() && !snapshot.is_super_admin {
        PresentationMode::TenantError
    } else if snapshot.is_super_admin {
        if !snapshot.is_authenticated {
            PresentationMode::SuperAdminUnauthed
        } else {
            PresentationMode::SuperAdminAuthed
        }
    } else if snapshot.tenant_company.is_some() {
        if !snapshot.is_authenticated {
            PresentationMode::TenantUnauthed
        } else {
            PresentationMode::TenantAuthed
        }
    } else if snapshot.is_authenticated {
        PresentationMode::FallbackAuthed
    } else {
        PresentationMode::MarketingUnauthed
    };

    tracing::debug!(
        mode = mode.as_str(),
        should_show_super_admin_area,
        should_show_tenant_area,
        "resolved presentation mode"
    );

    Resolution {
        mode,
        should_show_super_admin_area,
        should_show_tenant_area,
    }
}
