//! Document origin and file URLs
//!
//! `data-url` values are stored as paths. The View Layer turns them into
//! absolute URLs by prefixing the current document origin (scheme, host and
//! any non-default port). Ports 80 for `http` and 443 for `https` are
//! omitted.

use ::url::Url;
use std::fmt;

use crate::error::{CrudError, Result};

/// Scheme, host and optional non-default port of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    root: String,
}

impl Origin {
    /// Parse an origin from any absolute URL, keeping only the origin part
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_crud::url::Origin;
    ///
    /// let origin = Origin::parse("https://example.com:443/admin?page=2").unwrap();
    /// assert_eq!(origin.as_str(), "https://example.com");
    ///
    /// let origin = Origin::parse("http://localhost:3000").unwrap();
    /// assert_eq!(origin.file_url("/uploads/a.png"), "http://localhost:3000/uploads/a.png");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| CrudError::InvalidOrigin {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        let host = url.host_str().ok_or_else(|| CrudError::InvalidOrigin {
            input: input.to_string(),
            reason: "URL has no host".to_string(),
        })?;

        // `Url::port` is already `None` for the scheme's default port
        let root = match url.port() {
            Some(port) => format!("{}://{host}:{port}", url.scheme()),
            None => format!("{}://{host}", url.scheme()),
        };

        Ok(Self { root })
    }

    /// Build an origin from its parts
    pub fn from_parts(scheme: &str, host: &str, port: Option<u16>) -> Result<Self> {
        let input = match port {
            Some(port) => format!("{scheme}://{host}:{port}"),
            None => format!("{scheme}://{host}"),
        };
        Self::parse(&input)
    }

    /// Origin without trailing slash
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.root
    }

    /// Absolute URL of a stored file path
    #[must_use]
    pub fn file_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.root)
        } else {
            format!("{}/{path}", self.root)
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)
    }
}
