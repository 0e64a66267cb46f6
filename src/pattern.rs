//! Compiled URL patterns.
//!
//! Pattern syntax and matching belong to [`matchit`]: `{name}` captures one
//! segment, `{*name}` captures the rest of the path. Each [`UrlPattern`] is a
//! one-entry radix tree, so a route knows how to test itself and a
//! dispatcher can walk a per-method list in order.

use std::fmt;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::error::Error;

/// A compiled URL template. Cheap to clone; every route a builder produces
/// shares one.
#[derive(Clone)]
pub struct UrlPattern {
    template: Arc<str>,
    tree: Arc<MatchitRouter<()>>,
}

impl UrlPattern {
    /// Compiles `template`. Fails with [`Error::InvalidPattern`] when matchit
    /// rejects the syntax.
    pub fn parse(template: &str) -> Result<Self, Error> {
        if template.is_empty() {
            return Err(Error::EmptyTemplate);
        }
        let mut tree = MatchitRouter::new();
        tree.insert(template, ()).map_err(|source| Error::InvalidPattern {
            template: template.to_owned(),
            source,
        })?;
        Ok(Self { template: template.into(), tree: Arc::new(tree) })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the captured parameters if `path` matches.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let matched = self.tree.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some(Params(params))
    }
}

impl fmt::Debug for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UrlPattern").field(&self.template).finish()
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Path parameters captured by a match, in template order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_named_segments() {
        let p = UrlPattern::parse("/users/{id}/posts/{post}").unwrap();
        let params = p.matches("/users/42/posts/7").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("post"), Some("7"));
        assert_eq!(params.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["id", "post"]);
    }

    #[test]
    fn static_template_matches_only_itself() {
        let p = UrlPattern::parse("/users").unwrap();
        assert!(p.matches("/users").unwrap().is_empty());
        assert!(p.matches("/users/42").is_none());
        assert!(p.matches("/accounts").is_none());
    }

    #[test]
    fn catch_all_takes_the_tail() {
        let p = UrlPattern::parse("/files/{*path}").unwrap();
        assert_eq!(p.matches("/files/a/b/c.txt").unwrap().get("path"), Some("a/b/c.txt"));
    }

    #[test]
    fn rejects_bad_syntax() {
        let err = UrlPattern::parse("/files/{*path}/meta").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref template, .. } if template == "/files/{*path}/meta"));
        assert!(matches!(UrlPattern::parse(""), Err(Error::EmptyTemplate)));
    }
}
