// Table construction. One canonical application feature list, tagged with the
// surfaces each entry belongs to; per-mode tables are built by filtering that
// list instead of repeating near-identical route lists per role/device combo.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::resolver::PresentationMode;

use super::{GuardKind, RegistryError, RouteEntry, RouteTable, RouteTarget};

/// The five concrete route tables. `Loading` and `TenantError` render fixed
/// placeholder UI and map to no table at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Marketing,
    SuperAdminApp,
    TenantLogin,
    TenantApp,
    FallbackApp,
}

impl TableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Marketing => "marketing",
            TableKind::SuperAdminApp => "super_admin_app",
            TableKind::TenantLogin => "tenant_login",
            TableKind::TenantApp => "tenant_app",
            TableKind::FallbackApp => "fallback_app",
        }
    }
}

/// Authenticated application surfaces a feature route can appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppSurface {
    SuperAdmin,
    Tenant,
    Fallback,
}

struct FeatureRoute {
    pattern: &'static str,
    page: &'static str,
    /// Gated behind `RequireSuperAdmin` instead of plain `RequireAuth`.
    super_admin_only: bool,
    surfaces: &'static [AppSurface],
}

const ALL_SURFACES: &[AppSurface] = &[
    AppSurface::SuperAdmin,
    AppSurface::Tenant,
    AppSurface::Fallback,
];

/// Canonical application feature surface. Order matters: first match wins,
/// so the more specific patterns precede their parents where relevant.
///
/// The `/admin/*` subtree is absent from the tenant surface entirely, and
/// carries `RequireSuperAdmin` on the surfaces that do include it. For the
/// fallback surface that guard can never pass - kept deliberately so a future
/// association change cannot silently expose the operator console.
const CORE_FEATURES: &[FeatureRoute] = &[
    FeatureRoute {
        pattern: "/",
        page: "dashboard",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/dashboard",
        page: "dashboard",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/employees",
        page: "employees",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/employees/:id",
        page: "employee-detail",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/absences",
        page: "absences",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/time",
        page: "time-tracking",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/tasks",
        page: "tasks",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/projects",
        page: "projects",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/projects/:id",
        page: "project-detail",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/documents",
        page: "documents",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings",
        page: "settings",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings/profile",
        page: "settings-profile",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings/company",
        page: "settings-company",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings/users",
        page: "settings-users",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings/absences",
        page: "settings-absences",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings/notifications",
        page: "settings-notifications",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/settings/integrations",
        page: "settings-integrations",
        super_admin_only: false,
        surfaces: ALL_SURFACES,
    },
    FeatureRoute {
        pattern: "/admin/*",
        page: "admin",
        super_admin_only: true,
        surfaces: &[AppSurface::SuperAdmin, AppSurface::Fallback],
    },
];

fn app_table(kind: TableKind, surface: AppSurface) -> Result<RouteTable, RegistryError> {
    let login_path = match surface {
        AppSurface::Tenant => "/login",
        AppSurface::SuperAdmin | AppSurface::Fallback => "/auth/login",
    };

    let mut entries = Vec::new();
    for feature in CORE_FEATURES.iter().filter(|f| f.surfaces.contains(&surface)) {
        let guard = if feature.super_admin_only {
            GuardKind::RequireSuperAdmin
        } else {
            GuardKind::RequireAuth
        };
        entries.push(RouteEntry::new(
            feature.pattern,
            RouteTarget::Page(feature.page),
            guard,
        )?);
    }
    entries.push(RouteEntry::new(
        "/*",
        RouteTarget::Page("not-found"),
        GuardKind::RequireAuth,
    )?);

    RouteTable::new(kind, login_path, entries)
}

/// Public marketing site plus auth entry points. Shared by the anonymous
/// marketing mode and the unauthenticated super-admin mode.
fn marketing_table() -> Result<RouteTable, RegistryError> {
    let page = |raw, page| RouteEntry::new(raw, RouteTarget::Page(page), GuardKind::None);

    let entries = vec![
        page("/", "home")?,
        page("/funktionen", "features")?,
        page("/preise", "pricing")?,
        page("/blog", "blog")?,
        page("/blog/:slug", "blog-post")?,
        page("/ueber-uns", "about")?,
        page("/impressum", "imprint")?,
        page("/datenschutz", "privacy")?,
        page("/agb", "terms")?,
        page("/auth/login", "auth-login")?,
        page("/auth/register", "auth-register")?,
        // Legacy path kept alive as a redirect
        RouteEntry::new("/login", RouteTarget::Redirect("/auth/login"), GuardKind::None)?,
        RouteEntry::new("/*", RouteTarget::Redirect("/"), GuardKind::None)?,
    ];

    RouteTable::new(TableKind::Marketing, "/auth/login", entries)
}

/// Tenant portal before sign-in: the tenant login page and nothing else.
fn tenant_login_table() -> Result<RouteTable, RegistryError> {
    let entries = vec![
        RouteEntry::new("/login", RouteTarget::Page("tenant-login"), GuardKind::None)?,
        RouteEntry::new("/*", RouteTarget::Redirect("/login"), GuardKind::None)?,
    ];

    RouteTable::new(TableKind::TenantLogin, "/login", entries)
}

/// All five tables, compiled and validated once at startup.
#[derive(Debug)]
pub struct RouteRegistry {
    marketing: RouteTable,
    super_admin_app: RouteTable,
    tenant_login: RouteTable,
    tenant_app: RouteTable,
    fallback_app: RouteTable,
}

impl RouteRegistry {
    pub fn build() -> Result<Self, RegistryError> {
        Ok(Self {
            marketing: marketing_table()?,
            super_admin_app: app_table(TableKind::SuperAdminApp, AppSurface::SuperAdmin)?,
            tenant_login: tenant_login_table()?,
            tenant_app: app_table(TableKind::TenantApp, AppSurface::Tenant)?,
            fallback_app: app_table(TableKind::FallbackApp, AppSurface::Fallback)?,
        })
    }

    /// The route table for a presentation mode. `Loading` and `TenantError`
    /// render placeholders and have none.
    pub fn table_for(&self, mode: PresentationMode) -> Option<&RouteTable> {
        match mode {
            PresentationMode::Loading | PresentationMode::TenantError => None,
            PresentationMode::MarketingUnauthed | PresentationMode::SuperAdminUnauthed => {
                Some(&self.marketing)
            }
            PresentationMode::SuperAdminAuthed => Some(&self.super_admin_app),
            PresentationMode::TenantUnauthed => Some(&self.tenant_login),
            PresentationMode::TenantAuthed => Some(&self.tenant_app),
            PresentationMode::FallbackAuthed => Some(&self.fallback_app),
        }
    }

    pub fn tables(&self) -> [&RouteTable; 5] {
        [
            &self.marketing,
            &self.super_admin_app,
            &self.tenant_login,
            &self.tenant_app,
            &self.fallback_app,
        ]
    }
}

static REGISTRY: Lazy<RouteRegistry> = Lazy::new(|| {
    RouteRegistry::build()
        .unwrap_or_else(|e| panic!("invalid route table configuration: {}", e))
});

/// Shared registry singleton. `main` touches this early so a broken table
/// definition fails startup instead of the first request.
pub fn registry() -> &'static RouteRegistry {
    &REGISTRY
}
