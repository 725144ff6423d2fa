//! Load document use case.

use meridian_domain::ClientConfiguration;
use serde_json::Value;

use crate::ports::{DocumentError, DocumentFetcher, DocumentImporter, ImportedDocument};
use crate::store::WorkspaceStore;
use crate::ApplicationResult;

/// Use case seeding the store from the configured document source.
pub struct LoadDocument<F: DocumentFetcher, I: DocumentImporter> {
    fetcher: F,
    importer: I,
}

impl<F: DocumentFetcher, I: DocumentImporter> LoadDocument<F, I> {
    /// Creates a new `LoadDocument` use case.
    #[must_use]
    pub const fn new(fetcher: F, importer: I) -> Self {
        Self { fetcher, importer }
    }

    /// Imports `content`, or else fetches and imports `url`.
    ///
    /// Returns the name the document was stored under, or `None` when the
    /// configuration has no document source.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be fetched or parsed.
    pub async fn execute(
        &self,
        config: &ClientConfiguration,
        store: &WorkspaceStore,
    ) -> ApplicationResult<Option<String>> {
        let source = match (&config.content, &config.url) {
            (Some(Value::String(text)), _) => text.clone(),
            (Some(tree), _) => serde_json::to_string(tree)
                .map_err(|e| DocumentError::Parse(e.to_string()))?,
            (None, Some(url)) => {
                tracing::info!(%url, "fetching document");
                self.fetcher.fetch(url).await?
            }
            (None, None) => return Ok(None),
        };

        let ImportedDocument {
            name,
            document,
            requests,
        } = self.importer.import(&source)?;
        tracing::info!(document = %name, requests = requests.len(), "document imported");
        store.collections().add(&name, document, requests)?;
        Ok(Some(name))
    }
}
