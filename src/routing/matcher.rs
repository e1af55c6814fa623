//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile patterns such as `/products/{id}` into segments
//! - Match a request path segment by segment (case-sensitive)
//! - Extract named parameters
//!
//! # Design Decisions
//! - Segment counts must be equal; no wildcards
//! - A parameter never matches an empty segment
//! - No regex to guarantee O(n) matching

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. `{name}` segments capture, everything else is literal.
    pub fn new(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                    _ => Segment::Literal(segment.to_string()),
                }
            })
            .collect();
        Self { segments }
    }

    /// Match `path`, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::default();
        let mut parts = split_path(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.values.push((name.clone(), part.to_string()));
                }
                _ => return None,
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

/// Parameters captured from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

// "/" → [""], "/products/" → ["products", ""]
fn split_path(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::new("/products");
        assert_eq!(pattern.matches("/products"), Some(PathParams::default()));
        assert!(pattern.matches("/products/").is_none());
        assert!(pattern.matches("/Products").is_none());
        assert!(pattern.matches("/productsx").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn test_param_pattern() {
        let pattern = PathPattern::new("/products/{id}");
        let params = pattern.matches("/products/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("name"), None);

        assert_eq!(
            pattern.matches("/products/abc").unwrap().get("id"),
            Some("abc")
        );
        assert!(pattern.matches("/products/").is_none());
        assert!(pattern.matches("/products").is_none());
        assert!(pattern.matches("/products/1/2").is_none());
        assert!(pattern.matches("/items/1").is_none());
    }
}
