use std::collections::HashMap;

use super::RegistryError;

/// One compiled segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// Compiled path template. Supports exact segments, dynamic `:name` segments
/// and a single trailing `*` wildcard, e.g. `/employees/:id`, `/admin/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: &'static str,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn compile(raw: &'static str) -> Result<Self, RegistryError> {
        if !raw.starts_with('/') {
            return Err(RegistryError::InvalidPattern {
                raw,
                reason: "pattern must start with '/'".to_string(),
            });
        }

        let mut segments = Vec::new();
        let parts: Vec<&str> = raw.trim_matches('/').split('/').collect();

        // "/" compiles to zero segments
        if !(parts.len() == 1 && parts[0].is_empty()) {
            for (idx, part) in parts.iter().enumerate() {
                if part.is_empty() {
                    return Err(RegistryError::InvalidPattern {
                        raw,
                        reason: "empty path segment".to_string(),
                    });
                }
                if *part == "*" {
                    if idx != parts.len() - 1 {
                        return Err(RegistryError::InvalidPattern {
                            raw,
                            reason: "wildcard is only allowed as the final segment".to_string(),
                        });
                    }
                    segments.push(Segment::Wildcard);
                } else if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(RegistryError::InvalidPattern {
                            raw,
                            reason: "dynamic segment needs a name".to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Literal((*part).to_string()));
                }
            }
        }

        Ok(Self { raw, segments })
    }

    pub fn raw(&self) -> &'static str {
        self.raw
    }

    /// True for patterns ending in a `*` segment.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// True for patterns without dynamic or wildcard segments.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Match a concrete request path, returning captured dynamic segments.
    /// The wildcard captures the joined remainder (possibly empty) under `*`.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let trimmed = path.trim_matches('/');
        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut params = HashMap::new();
        let mut idx = 0;

        for segment in &self.segments {
            match segment {
                Segment::Wildcard => {
                    params.insert("*".to_string(), parts[idx..].join("/"));
                    return Some(params);
                }
                Segment::Literal(lit) => {
                    if parts.get(idx) != Some(&lit.as_str()) {
                        return None;
                    }
                    idx += 1;
                }
                Segment::Param(name) => {
                    let value = parts.get(idx)?;
                    params.insert(name.clone(), (*value).to_string());
                    idx += 1;
                }
            }
        }

        if idx == parts.len() {
            Some(params)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let pattern = PathPattern::compile("/preise").expect("pattern");
        assert!(pattern.matches("/preise").is_some());
        assert!(pattern.matches("/preise/").is_some());
        assert!(pattern.matches("/preis").is_none());
        assert!(pattern.matches("/preise/extra").is_none());
        assert!(pattern.is_static());
    }

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::compile("/").expect("pattern");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/x").is_none());
    }

    #[test]
    fn test_dynamic_segment_captures_value() {
        let pattern = PathPattern::compile("/employees/:id").expect("pattern");
        let params = pattern.matches("/employees/42").expect("match");
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert!(pattern.matches("/employees").is_none());
        assert!(pattern.matches("/employees/42/edit").is_none());
        assert!(!pattern.is_static());
    }

    #[test]
    fn test_trailing_wildcard_matches_subtree() {
        let pattern = PathPattern::compile("/admin/*").expect("pattern");
        assert_eq!(
            pattern
                .matches("/admin/companies/7")
                .and_then(|p| p.get("*").cloned()),
            Some("companies/7".to_string())
        );
        // Wildcard also matches the bare subtree root
        assert!(pattern.matches("/admin").is_some());
        assert!(pattern.matches("/settings").is_none());
        assert!(pattern.is_wildcard());
    }

    #[test]
    fn test_universal_wildcard() {
        let pattern = PathPattern::compile("/*").expect("pattern");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/anything/at/all").is_some());
    }

    #[test]
    fn test_non_trailing_wildcard_is_rejected() {
        assert!(PathPattern::compile("/admin/*/users").is_err());
        assert!(PathPattern::compile("relative").is_err());
        assert!(PathPattern::compile("/x//y").is_err());
        assert!(PathPattern::compile("/x/:").is_err());
    }
}
