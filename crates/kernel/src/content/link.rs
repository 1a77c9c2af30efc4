//! Link reference resolution.
//!
//! A stored link may point at an internal page, an external URL, or carry a
//! free-form literal from older content. Resolution always produces a usable
//! `(url, is_external)` pair; broken references degrade to a placeholder and
//! are logged instead of failing the document.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::models::{ContentStore, PageId};

/// Everything a block may know about a link target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRef {
    pub is_external: bool,
    pub external_url: Option<String>,
    pub page: Option<PageId>,
    /// Free-form URL from content saved before page choosers existed.
    pub literal: Option<String>,
}

impl LinkRef {
    pub fn page(id: PageId) -> Self {
        Self {
            page: Some(id),
            ..Self::default()
        }
    }

    pub fn external(url: impl Into<String>) -> Self {
        Self {
            is_external: true,
            external_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn literal(url: impl Into<String>) -> Self {
        Self {
            literal: Some(url.into()),
            ..Self::default()
        }
    }
}

/// A resolved link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub url: String,
    pub is_external: bool,
}

impl ResolvedLink {
    /// The placeholder for "no link".
    pub fn none() -> Self {
        Self {
            url: "#".to_string(),
            is_external: false,
        }
    }
}

/// Why an internal page reference could not be turned into a URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("page {0} does not exist")]
    MissingPage(PageId),

    #[error("page {0} is not routable")]
    Unroutable(PageId),
}

/// Compute the URL of an internal page.
pub fn page_url(store: &dyn ContentStore, id: PageId) -> Result<String, LinkError> {
    let page = store.page(id).ok_or(LinkError::MissingPage(id))?;
    page.url
        .filter(|url| !url.trim().is_empty())
        .ok_or(LinkError::Unroutable(id))
}

/// Resolve a link reference.
///
/// Priority: an external URL flagged as external, then an internal page, then
/// a legacy literal (always treated as external), then `("#", false)`.
pub fn resolve(store: &dyn ContentStore, link: &LinkRef) -> ResolvedLink {
    if link.is_external
        && let Some(url) = trimmed(link.external_url.as_deref())
    {
        return ResolvedLink {
            url: url.to_string(),
            is_external: true,
        };
    }

    if let Some(page_id) = link.page {
        let url = match page_url(store, page_id) {
            Ok(url) => url,
            Err(e) => {
                warn!(page_id, error = %e, "broken page link, falling back to site root");
                "/".to_string()
            }
        };
        return ResolvedLink {
            url,
            is_external: false,
        };
    }

    if let Some(url) = trimmed(link.literal.as_deref()) {
        return ResolvedLink {
            url: url.to_string(),
            is_external: true,
        };
    }

    ResolvedLink::none()
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{InMemoryStore, PageRecord};

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.insert_page(PageRecord {
            id: 3,
            title: "Contact".to_string(),
            slug: "contact".to_string(),
            url: Some("/contact/".to_string()),
            ..PageRecord::default()
        });
        store.insert_page(PageRecord {
            id: 4,
            title: "Orphan".to_string(),
            slug: "orphan".to_string(),
            url: None,
            ..PageRecord::default()
        });
        store
    }

    #[test]
    fn empty_reference_is_placeholder() {
        assert_eq!(resolve(&store(), &LinkRef::default()), ResolvedLink::none());
    }

    #[test]
    fn external_wins_over_page() {
        let link = LinkRef {
            is_external: true,
            external_url: Some("https://example.com".to_string()),
            page: Some(3),
            literal: None,
        };
        let resolved = resolve(&store(), &link);
        assert_eq!(resolved.url, "https://example.com");
        assert!(resolved.is_external);
    }

    #[test]
    fn external_flag_without_url_uses_page() {
        let link = LinkRef {
            is_external: true,
            external_url: Some("  ".to_string()),
            page: Some(3),
            literal: None,
        };
        let resolved = resolve(&store(), &link);
        assert_eq!(resolved.url, "/contact/");
        assert!(!resolved.is_external);
    }

    #[test]
    fn external_url_without_flag_is_ignored() {
        let link = LinkRef {
            is_external: false,
            external_url: Some("https://example.com".to_string()),
            ..LinkRef::default()
        };
        assert_eq!(resolve(&store(), &link), ResolvedLink::none());
    }

    #[test]
    fn broken_page_falls_back_to_root() {
        for id in [4, 99] {
            let resolved = resolve(&store(), &LinkRef::page(id));
            assert_eq!(resolved.url, "/");
            assert!(!resolved.is_external);
        }
    }

    #[test]
    fn page_url_reports_reason() {
        let store = store();
        assert_eq!(page_url(&store, 99), Err(LinkError::MissingPage(99)));
        assert_eq!(page_url(&store, 4), Err(LinkError::Unroutable(4)));
        assert_eq!(page_url(&store, 3).unwrap(), "/contact/");
    }

    #[test]
    fn literal_is_external() {
        let resolved = resolve(&store(), &LinkRef::literal("#contact"));
        assert_eq!(resolved.url, "#contact");
        assert!(resolved.is_external);
    }
}
