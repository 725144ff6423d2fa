//! Page side-effect sinks.

use std::sync::Arc;

use meridian_domain::MetaData;

/// Receives page metadata (SEO tags).
pub trait SeoMetaSink: Send + Sync {
    /// Applies the metadata to the page.
    fn apply_meta(&self, meta: &MetaData);
}

/// Receives favicon changes.
pub trait FaviconSink: Send + Sync {
    /// Sets the favicon, `None` restoring the host default.
    fn set_favicon(&self, href: Option<&str>);
}

/// Optional sinks for page-level side effects.
#[derive(Clone, Default)]
pub struct PageSinks {
    /// SEO metadata sink.
    pub seo: Option<Arc<dyn SeoMetaSink>>,
    /// Favicon sink.
    pub favicon: Option<Arc<dyn FaviconSink>>,
}

impl std::fmt::Debug for PageSinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSinks")
            .field("seo", &self.seo.is_some())
            .field("favicon", &self.favicon.is_some())
            .finish()
    }
}
