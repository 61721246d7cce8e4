//! Log sanitization utilities
//!
//! Keeps API keys and large response bodies (zone listings carry every record
//! in the account) out of debug/error logs.

/// Maximum number of bytes of a response body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible.
const SECRET_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` bytes with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret, keeping a short prefix so operators can tell keys apart.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(SECRET_PREFIX).collect();
    if secret.chars().count() <= SECRET_PREFIX * 2 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
