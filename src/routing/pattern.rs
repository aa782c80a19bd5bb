//! Route pattern compilation.
//!
//! # Responsibilities
//! - Split a pattern into literal text and `{name}` placeholders
//! - Compile it once into an anchored matcher
//! - Extract positional parameters from a canonical path
//!
//! # Design Decisions
//! - A placeholder is `{` + one or more non-`}` characters + `}`
//! - Placeholders capture one or more non-slash characters
//! - Literal text is escaped, so `.` or `+` in a pattern match themselves
//! - Placeholder names are kept for introspection only; captures are positional

use regex::Regex;

/// Error compiling a route pattern.
#[derive(Debug, thiserror::Error)]
#[error("invalid route pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
}

/// Split a pattern into literal runs and placeholders, left to right.
fn segments(pattern: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while let Some(offset) = pattern[i..].find('{') {
        let open = i + offset;
        let rest = &pattern[open + 1..];
        match rest.find('}') {
            Some(len) if len > 0 => {
                if open > literal_start {
                    out.push(Segment::Literal(&pattern[literal_start..open]));
                }
                out.push(Segment::Param(&rest[..len]));
                i = open + len + 2;
                literal_start = i;
            }
            // `{}` or an unclosed brace stays literal text
            _ => i = open + 1,
        }
    }

    if literal_start < pattern.len() {
        out.push(Segment::Literal(&pattern[literal_start..]));
    }
    out
}

/// A registered route pattern with its matcher compiled up front.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    params: Vec<String>,
    matcher: Option<Regex>,
}

impl RoutePattern {
    /// Compile a pattern. Literal patterns get no matcher; they only ever
    /// match through exact lookup.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let segments = segments(source);
        let params: Vec<String> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.to_string()),
                Segment::Literal(_) => None,
            })
            .collect();

        let matcher = if params.is_empty() {
            None
        } else {
            let mut expr = String::from("^");
            for segment in &segments {
                match segment {
                    Segment::Literal(text) => expr.push_str(&regex::escape(text)),
                    Segment::Param(_) => expr.push_str("([^/]+)"),
                }
            }
            expr.push('$');
            let regex = Regex::new(&expr).map_err(|err| PatternError {
                pattern: source.to_string(),
                source: err,
            })?;
            Some(regex)
        };

        Ok(Self {
            source: source.to_string(),
            params,
            matcher,
        })
    }

    /// The pattern exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholder names, left to right.
    pub fn param_names(&self) -> &[String] {
        &self.params
    }

    /// True when the pattern has no placeholders.
    pub fn is_literal(&self) -> bool {
        self.matcher.is_none()
    }

    /// Match a canonical path, returning the captured parameters in order.
    ///
    /// Literal patterns compare the whole path and capture nothing.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        match &self.matcher {
            None => (self.source == path).then(Vec::new),
            Some(regex) => {
                let caps = regex.captures(path)?;
                Some(
                    caps.iter()
                        .skip(1)
                        .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                        .collect(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        assert_eq!(
            segments("/users/{id}/posts/{postId}"),
            vec![
                Segment::Literal("/users/"),
                Segment::Param("id"),
                Segment::Literal("/posts/"),
                Segment::Param("postId"),
            ]
        );
        assert_eq!(segments("/plain"), vec![Segment::Literal("/plain")]);
    }

    #[test]
    fn test_unclosed_and_empty_braces_are_literal() {
        assert_eq!(segments("/a/{"), vec![Segment::Literal("/a/{")]);
        assert_eq!(segments("/a/{}"), vec![Segment::Literal("/a/{}")]);
        assert!(RoutePattern::compile("/a/{}").unwrap().is_literal());
    }

    #[test]
    fn test_literal_pattern() {
        let pattern = RoutePattern::compile("/login").unwrap();
        assert!(pattern.is_literal());
        assert_eq!(pattern.captures("/login"), Some(vec![]));
        assert_eq!(pattern.captures("/login/x"), None);
    }

    #[test]
    fn test_single_param() {
        let pattern = RoutePattern::compile("/admin/subjects/{id}").unwrap();
        assert_eq!(pattern.param_names(), ["id".to_string()]);
        assert_eq!(pattern.captures("/admin/subjects/12"), Some(vec!["12".into()]));
        assert_eq!(pattern.captures("/admin/subjects/"), None);
        assert_eq!(pattern.captures("/admin/subjects/1/2"), None);
    }

    #[test]
    fn test_params_in_order() {
        let pattern = RoutePattern::compile("/users/{id}/posts/{postId}").unwrap();
        assert_eq!(
            pattern.captures("/users/7/posts/99"),
            Some(vec!["7".to_string(), "99".to_string()])
        );
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let pattern = RoutePattern::compile("/files/{name}.txt").unwrap();
        assert_eq!(pattern.captures("/files/report.txt"), Some(vec!["report".into()]));
        assert_eq!(pattern.captures("/files/reportxtxt"), None);
    }

    #[test]
    fn test_match_is_anchored() {
        let pattern = RoutePattern::compile("/users/{id}").unwrap();
        assert_eq!(pattern.captures("/api/users/1"), None);
        assert_eq!(pattern.captures("/users/1/edit"), None);
    }
}
