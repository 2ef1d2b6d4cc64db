// GET /api/routes/{mode} - route table introspection for debugging and for
// operators verifying which surface a mode exposes.

use axum::extract::Path;
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::resolver::PresentationMode;
use crate::routes::{self, GuardKind, RouteTarget, TableKind};

#[derive(Debug, Serialize)]
pub struct TableEntryBody {
    pub pattern: &'static str,
    pub target: RouteTarget,
    pub guard: GuardKind,
}

#[derive(Debug, Serialize)]
pub struct TableBody {
    pub mode: PresentationMode,
    pub table: TableKind,
    pub login_path: &'static str,
    pub entries: Vec<TableEntryBody>,
}

pub async fn table_get(Path(mode): Path<String>) -> Result<ApiResponse<TableBody>, ApiError> {
    let mode: PresentationMode = mode.parse().map_err(|e: String| ApiError::not_found(e))?;

    let table = routes::registry().table_for(mode).ok_or_else(|| {
        ApiError::bad_request(format!(
            "mode '{}' renders a fixed placeholder and has no route table",
            mode.as_str()
        ))
    })?;

    let entries = table
        .entries()
        .iter()
        .map(|entry| TableEntryBody {
            pattern: entry.pattern.raw(),
            target: entry.target,
            guard: entry.guard,
        })
        .collect();

    Ok(ApiResponse::success(TableBody {
        mode,
        table: table.kind(),
        login_path: table.login_path(),
        entries,
    }))
}
