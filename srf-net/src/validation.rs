// srf-net/src/validation.rs
use srf_common::error::{Result, SrfError};
use url::Url;

/// Validates a URL, ensuring it uses the HTTPS scheme.
pub fn validate_url(url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| SrfError::Generic(format!("Failed to parse URL '{url_str}': {e}")))?;
    if url.scheme() == "https" {
        Ok(())
    } else {
        Err(SrfError::ValidationError(format!(
            "Invalid URL scheme for '{}': Must be https, but got '{}'",
            url_str,
            url.scheme()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_passes_http_fails() {
        assert!(validate_url("https://example.com/file.pth").is_ok());
        assert!(validate_url("http://example.com/file.pth").is_err());
        assert!(validate_url("not a url").is_err());
    }
}
