//! Bundle pagination
//!
//! Follows `next` links page by page and gathers every entry of the target
//! type. Collection is all-or-nothing: any failed page aborts the whole
//! search.

use crate::adapters::fhir::models::{Bundle, RawEntry};
use crate::adapters::fhir::transport::{get_ok, Transport};
use crate::domain::{FhirError, ResourceType, Result};
use crate::log_page_followed;

/// Default ceiling on followed pages
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Entries gathered across every page of one search
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Entries in natural page order
    pub entries: Vec<RawEntry>,
    /// Number of Bundle pages read, including the first one
    pub pages: usize,
}

/// Walks the `next` chain of a search result through a transport
pub struct BundleCollector<'a> {
    transport: &'a dyn Transport,
    max_pages: usize,
}

impl<'a> BundleCollector<'a> {
    pub fn new(transport: &'a dyn Transport, max_pages: usize) -> Self {
        Self {
            transport,
            max_pages,
        }
    }

    /// Gather every entry of `resource_type`, starting from the first page
    ///
    /// # Errors
    ///
    /// Fails on any non-200 page, on a body that is not a Bundle, and with
    /// [`FhirError::PageLimitExceeded`] when a `next` link would exceed the
    /// page ceiling.
    pub async fn collect(&self, first: Bundle, resource_type: ResourceType) -> Result<Vec<RawEntry>> {
        Ok(self.collect_pages(first, resource_type).await?.entries)
    }

    /// Same as [`collect`](Self::collect), also reporting the page count
    pub async fn collect_pages(
        &self,
        first: Bundle,
        resource_type: ResourceType,
    ) -> Result<Collection> {
        let mut collection = Collection::default();
        let mut page = first;

        loop {
            collection.pages += 1;
            collection.entries.extend(page.take_entries(resource_type));

            let Some(next) = page.next_link().map(str::to_owned) else {
                break;
            };

            if collection.pages >= self.max_pages {
                tracing::warn!(
                    limit = self.max_pages,
                    next = %next,
                    "Page limit reached with further pages pending"
                );
                return Err(FhirError::PageLimitExceeded {
                    limit: self.max_pages,
                }
                .into());
            }

            log_page_followed!(collection.pages + 1, self.max_pages, next);
            let response = get_ok(&next, Some(self.transport)).await?;
            page = Bundle::from_body(&response.body)?;
        }

        tracing::debug!(
            resource_type = %resource_type,
            entries = collection.entries.len(),
            pages = collection.pages,
            "Collected search results"
        );

        Ok(collection)
    }
}
