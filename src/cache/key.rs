//! Cache key construction

use std::fmt;

/// Key identifying one cached resource instance.
///
/// Rendered as `resource?name=value&name=value` with parameters sorted by
/// name and reserved characters percent-escaped, so equal parameter sets give
/// equal keys and different sets can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a key from a resource name and its discriminating parameters
    pub fn new(resource: &str, params: &[(&str, &str)]) -> Self {
        let mut sorted: Vec<_> = params.iter().collect();
        sorted.sort();

        let mut key = escape(resource);
        for (i, (name, value)) in sorted.into_iter().enumerate() {
            key.push(if i == 0 { '?' } else { '&' });
            key.push_str(&escape(name));
            key.push('=');
            key.push_str(&escape(value));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CacheKey {
    fn from(resource: &str) -> Self {
        Self::new(resource, &[])
    }
}

fn escape(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' | '?' | '&' | '=' => out.push_str(&format!("%{:02X}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}
