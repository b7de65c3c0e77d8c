//! Media type resolution from raw header values.

use crate::error::ConvertError;
use crate::media_type::{MediaType, Registry};

/// Strip everything from the last `;` onward.
///
/// Only the final parameter is removed, so a value carrying several
/// parameters keeps all but the last:
///
/// ```
/// use msgconv_core::clean_media_type;
///
/// assert_eq!(clean_media_type("application/json; charset=UTF-8"), "application/json");
/// assert_eq!(clean_media_type("application/json"), "application/json");
/// assert_eq!(
///     clean_media_type("application/json; charset=UTF-8; boundary=x"),
///     "application/json; charset=UTF-8"
/// );
/// ```
pub fn clean_media_type(raw: &str) -> &str {
    match raw.rfind(';') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

/// Resolve a raw header value to one of the `supported` media types.
///
/// The value is cleaned with [`clean_media_type`] and compared against the
/// registry's wire string of each supported media type, in order. The first
/// match wins. Supported media types without a registry entry never match.
pub fn resolve_media_type(
    raw: &str,
    supported: &[MediaType],
    registry: &Registry,
) -> Result<MediaType, ConvertError> {
    let cleaned = clean_media_type(raw);
    supported
        .iter()
        .copied()
        .find(|m| registry.media_type_str(*m) == Some(cleaned))
        .ok_or_else(|| {
            tracing::debug!(target: "msgconv::negotiate", raw, "no supported media type matches");
            ConvertError::unsupported(raw)
        })
}
