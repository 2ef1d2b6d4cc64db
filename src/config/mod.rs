use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub routing: RoutingConfig,
    pub security: SecurityConfig,
    pub tenants: TenantsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Emit a debug line with the full session snapshot for every request.
    pub log_snapshots: bool,
    /// Upper bound on redirect entries followed during path resolution.
    pub redirect_hop_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantsConfig {
    /// Seed entries for the in-memory tenant directory, `slug:Display Name`.
    pub seed: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Routing overrides
        if let Ok(v) = env::var("PORTAL_LOG_SNAPSHOTS") {
            self.routing.log_snapshots = v.parse().unwrap_or(self.routing.log_snapshots);
        }
        if let Ok(v) = env::var("PORTAL_REDIRECT_HOP_LIMIT") {
            self.routing.redirect_hop_limit = v.parse().unwrap_or(self.routing.redirect_hop_limit);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Tenant directory overrides
        if let Ok(v) = env::var("PORTAL_TENANT_SEED") {
            self.tenants.seed = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            routing: RoutingConfig {
                log_snapshots: true,
                redirect_hop_limit: 8,
            },
            security: SecurityConfig {
                jwt_secret: "portal-dev-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            tenants: TenantsConfig {
                seed: vec![
                    "acme:Acme GmbH".to_string(),
                    "globex:Globex AG".to_string(),
                ],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            routing: RoutingConfig {
                log_snapshots: true,
                redirect_hop_limit: 8,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            tenants: TenantsConfig { seed: vec![] },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            routing: RoutingConfig {
                log_snapshots: false,
                redirect_hop_limit: 8,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 12,
                enable_cors: false,
                cors_origins: vec![],
            },
            tenants: TenantsConfig { seed: vec![] },
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

/// Global configuration singleton, initialized from the environment on first use
pub fn config() -> &'static AppConfig {
    &CONFIG
}
