//! Response decoding shared by the providers.

use postmill_core::ProviderError;
use postmill_transport::HttpResponse;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Decodes a successful response body.
///
/// A 2xx body that does not have the documented shape is an opaque platform
/// failure; the raw body is kept for diagnosis.
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ProviderError> {
    response.json().map_err(|e| {
        warn!(status = response.status, error = %e, "Unexpected response shape");
        ProviderError::UnclassifiedProvider {
            status: response.status,
            body: response.text().into_owned(),
        }
    })
}
