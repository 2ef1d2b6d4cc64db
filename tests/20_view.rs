mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

struct ViewRequest<'a> {
    path: &'a str,
    token: Option<String>,
    viewport: Option<&'a str>,
    onboarding: bool,
}

impl<'a> ViewRequest<'a> {
    fn anonymous(path: &'a str) -> Self {
        Self {
            path,
            token: None,
            viewport: None,
            onboarding: false,
        }
    }

    fn authed(path: &'a str, token: String) -> Self {
        Self {
            path,
            token: Some(token),
            viewport: None,
            onboarding: false,
        }
    }
}

async fn view(req: ViewRequest<'_>) -> Result<Value> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let mut builder = client.get(format!("{}/api/view{}", server.base_url, req.path));
    if let Some(token) = &req.token {
        builder = builder.bearer_auth(token);
    }
    if let Some(viewport) = req.viewport {
        builder = builder.header("x-viewport", viewport);
    }
    if req.onboarding {
        builder = builder.header("x-onboarding", "pending");
    }

    let res = builder.send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let envelope = res.json::<Value>().await?;
    assert_eq!(envelope["success"], true);
    Ok(envelope["data"].clone())
}

#[tokio::test]
async fn anonymous_request_sees_marketing_pricing_page() -> Result<()> {
    let data = view(ViewRequest::anonymous("/preise")).await?;

    assert_eq!(data["mode"], "marketing_unauthed");
    assert_eq!(data["view"]["kind"], "page");
    assert_eq!(data["view"]["page"], "pricing");
    assert_eq!(data["view"]["shell"]["chrome"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn anonymous_dashboard_request_falls_through_to_home() -> Result<()> {
    let data = view(ViewRequest::anonymous("/dashboard")).await?;

    assert_eq!(data["mode"], "marketing_unauthed");
    assert_eq!(data["view"]["page"], "home");
    assert_eq!(data["view"]["hops"][0], "/");
    Ok(())
}

#[tokio::test]
async fn legacy_login_path_redirects_to_auth_login() -> Result<()> {
    let data = view(ViewRequest::anonymous("/login")).await?;

    assert_eq!(data["view"]["page"], "auth-login");
    assert_eq!(data["view"]["hops"][0], "/auth/login");
    Ok(())
}

#[tokio::test]
async fn invalid_token_degrades_to_marketing() -> Result<()> {
    let data = view(ViewRequest::authed("/preise", "not.a.jwt".to_string())).await?;

    assert_eq!(data["mode"], "marketing_unauthed");
    assert_eq!(data["view"]["page"], "pricing");
    Ok(())
}

#[tokio::test]
async fn super_admin_desktop_gets_admin_page_in_sidebar_shell() -> Result<()> {
    let data = view(ViewRequest::authed(
        "/admin/companies",
        common::token(None, true),
    ))
    .await?;

    assert_eq!(data["mode"], "super_admin_authed");
    assert_eq!(data["table"], "super_admin_app");
    assert_eq!(data["view"]["kind"], "page");
    assert_eq!(data["view"]["page"], "admin");
    let chrome = data["view"]["shell"]["chrome"].as_array().expect("chrome");
    assert!(chrome.contains(&Value::String("sidebar".to_string())));
    assert!(chrome.contains(&Value::String("role_preview_banner".to_string())));
    Ok(())
}

#[tokio::test]
async fn super_admin_settings_users_page_resolves() -> Result<()> {
    let data = view(ViewRequest::authed(
        "/settings/users",
        common::token(None, true),
    ))
    .await?;

    assert_eq!(data["mode"], "super_admin_authed");
    assert_eq!(data["view"]["page"], "settings-users");
    Ok(())
}

#[tokio::test]
async fn tenant_member_on_mobile_gets_404_for_admin_paths() -> Result<()> {
    let mut req = ViewRequest::authed("/admin/anything", common::token(Some("acme"), false));
    req.viewport = Some("mobile");
    let data = view(req).await?;

    assert_eq!(data["mode"], "tenant_authed");
    assert_eq!(data["table"], "tenant_app");
    assert_eq!(data["view"]["page"], "not-found");
    let chrome = data["view"]["shell"]["chrome"].as_array().expect("chrome");
    assert!(!chrome.contains(&Value::String("sidebar".to_string())));
    assert!(chrome.contains(&Value::String("assistant_widget".to_string())));
    Ok(())
}

#[tokio::test]
async fn tenant_member_preview_of_super_admin_wins_for_operators() -> Result<()> {
    // Operator token that also carries a tenant context: operator portal wins
    let data = view(ViewRequest::authed(
        "/dashboard",
        common::token(Some("acme"), true),
    ))
    .await?;

    assert_eq!(data["mode"], "super_admin_authed");
    assert_eq!(data["should_show_tenant_area"], false);
    Ok(())
}

#[tokio::test]
async fn unknown_tenant_slug_surfaces_tenant_error() -> Result<()> {
    let data = view(ViewRequest::authed(
        "/dashboard",
        common::token(Some("initech"), false),
    ))
    .await?;

    assert_eq!(data["mode"], "tenant_error");
    assert_eq!(data["view"]["kind"], "tenant_error");
    assert_eq!(data["view"]["recovery"], "reload");
    assert_eq!(data["table"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn fallback_user_is_redirected_off_the_admin_subtree() -> Result<()> {
    let data = view(ViewRequest::authed(
        "/admin/companies",
        common::token(None, false),
    ))
    .await?;

    assert_eq!(data["mode"], "fallback_authed");
    assert_eq!(data["view"]["kind"], "redirect");
    assert_eq!(data["view"]["to"], "/auth/login");
    Ok(())
}

#[tokio::test]
async fn onboarding_overlay_is_forwarded_into_the_shell() -> Result<()> {
    let mut req = ViewRequest::authed("/dashboard", common::token(Some("acme"), false));
    req.onboarding = true;
    let data = view(req).await?;

    assert_eq!(data["mode"], "tenant_authed");
    let chrome = data["view"]["shell"]["chrome"].as_array().expect("chrome");
    assert!(chrome.contains(&Value::String("onboarding_overlay".to_string())));
    Ok(())
}

#[tokio::test]
async fn route_table_introspection_lists_entries() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/routes/tenant_authed", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let envelope = res.json::<Value>().await?;
    let data = &envelope["data"];
    assert_eq!(data["table"], "tenant_app");
    assert_eq!(data["login_path"], "/login");
    let entries = data["entries"].as_array().expect("entries");
    assert!(entries.iter().all(|e| e["pattern"] != "/admin/*"));
    assert_eq!(entries.last().expect("wildcard")["pattern"], "/*");

    // Placeholder modes have no table
    let res = client
        .get(format!("{}/api/routes/loading", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown mode names are a 404
    let res = client
        .get(format!("{}/api/routes/nonsense", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
