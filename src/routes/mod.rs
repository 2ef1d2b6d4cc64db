// Route table registry - static, per-presentation-mode route configuration.
//
// Tables are data, not behavior: an ordered list of (pattern, target, guard)
// entries, first match wins, with a mandatory trailing wildcard so no path can
// miss. Redirect entries re-enter resolution at their target path.

pub mod pattern;
pub mod registry;

use std::collections::HashMap;

use serde::Serialize;

use crate::config;

pub use pattern::PathPattern;
pub use registry::{registry, RouteRegistry, TableKind};

/// Authorization precondition attached to a route entry. Checked only after
/// table selection; the presentation mode already encodes the coarse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardKind {
    None,
    RequireAuth,
    RequireSuperAdmin,
}

/// What a matched entry resolves to: a leaf page (opaque identifier, pages
/// fetch their own data) or a redirect that re-enters path resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    Page(&'static str),
    Redirect(&'static str),
}

/// One static route configuration entry. Immutable at runtime.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: PathPattern,
    pub target: RouteTarget,
    pub guard: GuardKind,
}

impl RouteEntry {
    fn new(
        raw: &'static str,
        target: RouteTarget,
        guard: GuardKind,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            pattern: PathPattern::compile(raw)?,
            target,
            guard,
        })
    }
}

/// Successful path resolution: the terminal page entry, the redirect hops
/// taken to reach it, and the captured path params.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMatch {
    pub page: &'static str,
    pub pattern: &'static str,
    pub guard: GuardKind,
    pub params: HashMap<String, String>,
    /// Paths entered via redirect entries on the way to the page, in order.
    pub hops: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid pattern '{raw}': {reason}")]
    InvalidPattern { raw: &'static str, reason: String },
    #[error("table '{table}' is missing a trailing wildcard entry")]
    MissingWildcard { table: &'static str },
    #[error("table '{table}' has a wildcard entry before the end")]
    MisplacedWildcard { table: &'static str },
    #[error("table '{table}' defines pattern '{pattern}' twice")]
    DuplicatePattern {
        table: &'static str,
        pattern: &'static str,
    },
    #[error("table '{table}' redirect starting at '{path}' exceeds the hop limit")]
    RedirectLoop { table: &'static str, path: String },
    #[error("table '{table}' has no entry matching '{path}'")]
    NoMatch { table: &'static str, path: String },
}

/// Ordered route set for one presentation mode.
#[derive(Debug, Clone)]
pub struct RouteTable {
    kind: TableKind,
    login_path: &'static str,
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    fn new(
        kind: TableKind,
        login_path: &'static str,
        entries: Vec<RouteEntry>,
    ) -> Result<Self, RegistryError> {
        let table = Self {
            kind,
            login_path,
            entries,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Where a failed guard sends the session for this table's surface.
    pub fn login_path(&self) -> &'static str {
        self.login_path
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Structural checks, run once at startup:
    /// - exactly one wildcard entry, and it is the final entry
    /// - no duplicate patterns among non-wildcard entries
    /// - every redirect chain terminates within the hop limit
    fn validate(&self) -> Result<(), RegistryError> {
        let table = self.kind.as_str();

        let wildcard_count = self
            .entries
            .iter()
            .filter(|e| e.pattern.is_wildcard())
            .count();
        match self.entries.last() {
            Some(last) if last.pattern.is_wildcard() => {}
            _ => return Err(RegistryError::MissingWildcard { table }),
        }
        if wildcard_count != 1 {
            return Err(RegistryError::MisplacedWildcard { table });
        }

        let mut seen: Vec<&'static str> = Vec::new();
        for entry in self.entries.iter().filter(|e| !e.pattern.is_wildcard()) {
            let raw = entry.pattern.raw();
            if seen.contains(&raw) {
                return Err(RegistryError::DuplicatePattern {
                    table,
                    pattern: raw,
                });
            }
            seen.push(raw);
        }

        for entry in &self.entries {
            if let RouteTarget::Redirect(target) = entry.target {
                self.resolve_path(target)?;
            }
        }

        Ok(())
    }

    fn first_match(&self, path: &str) -> Option<(&RouteEntry, HashMap<String, String>)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
    }

    /// First-match lookup with redirect follow-through. Redirect entries are
    /// terminal matches that immediately re-enter resolution at their target;
    /// the trailing wildcard guarantees termination at some entry.
    pub fn resolve_path(&self, path: &str) -> Result<RouteMatch, RegistryError> {
        let hop_limit = config::config().routing.redirect_hop_limit as usize;
        let mut current = path.to_string();
        let mut hops: Vec<String> = Vec::new();

        loop {
            let (entry, params) =
                self.first_match(&current)
                    .ok_or_else(|| RegistryError::NoMatch {
                        table: self.kind.as_str(),
                        path: current.clone(),
                    })?;

            match entry.target {
                RouteTarget::Page(page) => {
                    return Ok(RouteMatch {
                        page,
                        pattern: entry.pattern.raw(),
                        guard: entry.guard,
                        params,
                        hops,
                    });
                }
                RouteTarget::Redirect(target) => {
                    if hops.len() >= hop_limit {
                        return Err(RegistryError::RedirectLoop {
                            table: self.kind.as_str(),
                            path: path.to_string(),
                        });
                    }
                    hops.push(target.to_string());
                    current = target.to_string();
                }
            }
        }
    }
}
