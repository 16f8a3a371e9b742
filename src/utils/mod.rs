use chrono::{DateTime, SecondsFormat, Utc};

/// Share hash alphabet (URL-safe, same set as nanoid).
pub const HASH_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // ThreadRng 是 CSPRNG，hash 不可预测
    iter::repeat_with(|| HASH_ALPHABET[rand::random_range(0..HASH_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Whether every byte of `value` belongs to [`HASH_ALPHABET`].
pub fn is_url_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// ISO-8601 UTC with millisecond precision, e.g. `2025-01-08T12:00:00.000Z`.
pub fn format_iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde helper for API timestamps.
pub mod iso8601_millis {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_iso8601(ts))
    }
}
