//! Object key helpers shared by all backends.

use std::borrow::Cow;

/// Decode a key as delivered in a storage notification.
///
/// Notifications encode keys like HTML form values: `+` is a space and other
/// reserved characters are percent-escaped. Keys that fail to decode are
/// returned verbatim.
pub fn decode_event_key(raw: &str) -> Cow<'_, str> {
    if !raw.contains('+') && !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => {
            tracing::debug!(key = %raw, "Object key is not valid percent-encoding, using as-is");
            Cow::Borrowed(raw)
        }
    }
}

/// Last path segment of a key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Keys must stay relative and must not climb out of their bucket.
pub fn validate_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('/') && !key.split('/').any(|segment| segment == "..")
}
