//! Adapters for the application ports.

mod reqwest_fetcher;
mod tracing_page;

pub use reqwest_fetcher::ReqwestDocumentFetcher;
pub use tracing_page::TracingPageSink;
