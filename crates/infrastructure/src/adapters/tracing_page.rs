//! Page sinks for hosts without a document head.

use meridian_application::ports::{FaviconSink, SeoMetaSink};
use meridian_domain::MetaData;

/// Logs page metadata and favicon changes instead of rendering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPageSink;

impl SeoMetaSink for TracingPageSink {
    fn apply_meta(&self, meta: &MetaData) {
        for (name, content) in meta {
            tracing::info!(name = %name, content = %content, "page metadata");
        }
    }
}

impl FaviconSink for TracingPageSink {
    fn set_favicon(&self, href: Option<&str>) {
        tracing::info!(favicon = href.unwrap_or("none"), "page favicon");
    }
}
