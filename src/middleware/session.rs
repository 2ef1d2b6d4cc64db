use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::services::TenantResolver;
use crate::session::{
    aggregate, AuthState, DeviceState, OnboardingState, TenantState, UserRef,
};

/// Viewport class hint sent by the client, `mobile` or `desktop`.
pub const VIEWPORT_HEADER: &str = "x-viewport";
/// Onboarding wizard hint sent by the onboarding provider, `pending` to show.
pub const ONBOARDING_HEADER: &str = "x-onboarding";

/// Builds the session snapshot for a request and injects it into request
/// extensions. This middleware never rejects: a missing or invalid token
/// degrades to the anonymous snapshot, and a failed tenant lookup is recorded
/// as snapshot data for the resolver to branch on. Server-derived snapshots
/// always carry both loading flags as false - by the time a request reaches
/// us, auth and tenant state are settled.
pub async fn session_middleware(
    Extension(tenants): Extension<Arc<dyn TenantResolver>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = bearer_token(&headers).and_then(|token| match auth::decode_jwt(&token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!("discarding invalid bearer token: {}", e);
            None
        }
    });

    let auth_state = match &claims {
        Some(claims) => AuthState {
            user: Some(UserRef {
                id: claims.user_id,
                email: claims.email.clone(),
            }),
            is_authenticated: true,
            loading: false,
        },
        None => AuthState::default(),
    };

    let mut tenant_state = TenantState::default();
    if let Some(claims) = &claims {
        tenant_state.is_super_admin = claims.is_super_admin;
        if let Some(slug) = &claims.tenant {
            match tenants.resolve_tenant(slug).await {
                Ok(tenant) => tenant_state.tenant_company = Some(tenant),
                Err(e) => {
                    tracing::warn!(slug = slug.as_str(), "tenant resolution failed: {}", e);
                    tenant_state.error = Some(e.to_string());
                }
            }
        }
    }

    let device_state = DeviceState {
        is_mobile: header_equals(&headers, VIEWPORT_HEADER, "mobile"),
    };
    let onboarding_state = OnboardingState {
        show_onboarding_wizard: header_equals(&headers, ONBOARDING_HEADER, "pending"),
    };

    let snapshot = aggregate(&auth_state, &tenant_state, &device_state, &onboarding_state);
    request.extensions_mut().insert(snapshot);

    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn header_equals(headers: &HeaderMap, name: &str, value: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case(value))
        .unwrap_or(false)
}
