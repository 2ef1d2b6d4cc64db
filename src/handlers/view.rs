// GET /api/view/{*path} - the full routing pipeline for one request.
//
// Snapshot (from the session middleware) -> presentation mode -> route table
// lookup -> guard evaluation -> shell composition. Placeholder modes short
// circuit before any table is consulted.

use std::collections::HashMap;

use axum::extract::{Extension, Path};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::resolver::{self, PresentationMode};
use crate::routes::{self, GuardKind, TableKind};
use crate::session::SessionSnapshot;
use crate::shell::{self, ShellPlan};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody {
    /// Auth/tenant resolution still in flight; render the loading screen,
    /// consult no route table.
    Loading,
    /// Tenant resolution failed for a non-super-admin. Terminal: the only
    /// recovery is a full reload of the application.
    TenantError {
        message: String,
        recovery: &'static str,
    },
    /// Guard failure; send the session to the surface's login path.
    Redirect { to: String, hops: Vec<String> },
    /// A leaf page, wrapped in the composed shell chrome.
    Page {
        page: &'static str,
        pattern: &'static str,
        params: HashMap<String, String>,
        hops: Vec<String>,
        shell: ShellPlan,
    },
}

#[derive(Debug, Serialize)]
pub struct ViewDecision {
    pub mode: PresentationMode,
    pub should_show_super_admin_area: bool,
    pub should_show_tenant_area: bool,
    pub table: Option<TableKind>,
    pub view: ViewBody,
}

pub async fn view_root(
    Extension(snapshot): Extension<SessionSnapshot>,
) -> Result<ApiResponse<ViewDecision>, ApiError> {
    decide(&snapshot, "/")
}

pub async fn view_get(
    Extension(snapshot): Extension<SessionSnapshot>,
    Path(path): Path<String>,
) -> Result<ApiResponse<ViewDecision>, ApiError> {
    decide(&snapshot, &format!("/{}", path))
}

fn decide(snapshot: &SessionSnapshot, path: &str) -> Result<ApiResponse<ViewDecision>, ApiError> {
    let resolution = resolver::resolve(snapshot);

    let (table_kind, view) = match resolution.mode {
        PresentationMode::Loading => (None, ViewBody::Loading),
        PresentationMode::TenantError => (
            None,
            ViewBody::TenantError {
                message: snapshot
                    .tenant_error
                    .clone()
                    .unwrap_or_else(|| "tenant resolution failed".to_string()),
                recovery: "reload",
            },
        ),
        mode => {
            let table = routes::registry().table_for(mode).ok_or_else(|| {
                ApiError::internal_server_error(format!(
                    "mode '{}' unexpectedly has no route table",
                    mode.as_str()
                ))
            })?;

            let matched = table.resolve_path(path)?;

            let allowed = match matched.guard {
                GuardKind::None => true,
                GuardKind::RequireAuth => snapshot.is_authenticated,
                GuardKind::RequireSuperAdmin => {
                    snapshot.is_authenticated && snapshot.is_super_admin
                }
            };

            let view = if allowed {
                ViewBody::Page {
                    page: matched.page,
                    pattern: matched.pattern,
                    params: matched.params,
                    hops: matched.hops,
                    shell: shell::compose(mode, snapshot.is_mobile, snapshot.show_onboarding_wizard),
                }
            } else {
                tracing::debug!(
                    path,
                    guard = ?matched.guard,
                    "guard rejected route, redirecting to login"
                );
                ViewBody::Redirect {
                    to: table.login_path().to_string(),
                    hops: matched.hops,
                }
            };

            (Some(table.kind()), view)
        }
    };

    Ok(ApiResponse::success(ViewDecision {
        mode: resolution.mode,
        should_show_super_admin_area: resolution.should_show_super_admin_area,
        should_show_tenant_area: resolution.should_show_tenant_area,
        table: table_kind,
        view,
    }))
}
