//! Endpoint URL construction.

/// Join a configured endpoint path onto the base URL.
///
/// Absolute `http://` / `https://` paths are returned unchanged. `base_url`
/// is expected to carry no trailing slash.
pub fn build_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}
