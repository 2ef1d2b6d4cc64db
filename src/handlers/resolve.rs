// POST /api/resolve - resolve a client-supplied snapshot.
//
// Unlike /api/view, the snapshot arrives verbatim in the body, so callers can
// exercise transient states a server-derived snapshot never has (loading,
// tenant error) and preview what a given provider state would render.

use axum::Json;
use serde::Serialize;

use crate::middleware::ApiResponse;
use crate::resolver::{self, PresentationMode};
use crate::routes::{self, TableKind};
use crate::session::SessionSnapshot;

#[derive(Debug, Serialize)]
pub struct ResolveBody {
    pub mode: PresentationMode,
    pub should_show_super_admin_area: bool,
    pub should_show_tenant_area: bool,
    /// Route table the mode maps to; absent for placeholder modes.
    pub table: Option<TableKind>,
}

pub async fn resolve_post(Json(snapshot): Json<SessionSnapshot>) -> ApiResponse<ResolveBody> {
    let resolution = resolver::resolve(&snapshot);
    let table = routes::registry()
        .table_for(resolution.mode)
        .map(|t| t.kind());

    ApiResponse::success(ResolveBody {
        mode: resolution.mode,
        should_show_super_admin_area: resolution.should_show_super_admin_area,
        should_show_tenant_area: resolution.should_show_tenant_area,
        table,
    })
}
