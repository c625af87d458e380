use cinemeta_core::{FieldMap, ImdbId};

use crate::error::FetchError;

/// One external provider of per-title fields.
///
/// `fetch` returns only the fields the provider is responsible for; the
/// caller merges them into the record. Implementations must bound every call
/// with a timeout and must not retry on their own: retry and pacing belong
/// to the batch driver.
pub trait EnrichmentSource {
    /// Short name for logs (e.g., "imdb-api").
    fn name(&self) -> &str;

    fn fetch(&self, id: ImdbId) -> Result<FieldMap, FetchError>;
}

impl<S: EnrichmentSource + ?Sized> EnrichmentSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, id: ImdbId) -> Result<FieldMap, FetchError> {
        (**self).fetch(id)
    }
}

impl<S: EnrichmentSource + ?Sized> EnrichmentSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, id: ImdbId) -> Result<FieldMap, FetchError> {
        (**self).fetch(id)
    }
}
