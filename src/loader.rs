//! Thing Description loading from files, strings, and HTTP URLs.

use std::path::Path;

use serde_json::Value;

use crate::description::ThingDescription;
use crate::error::DescriptionError;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a Thing Description from a file path.
///
/// # Errors
///
/// Returns `DescriptionError::FileNotFound` if the file doesn't exist,
/// `DescriptionError::InvalidJson` if it isn't valid JSON, or a parse error
/// if the document is not a valid TD.
pub fn load_description(path: &Path) -> Result<ThingDescription, DescriptionError> {
    if !path.exists() {
        return Err(DescriptionError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| DescriptionError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_description_str(&content)
}

/// Load a Thing Description from a JSON string.
pub fn load_description_str(content: &str) -> Result<ThingDescription, DescriptionError> {
    let doc: Value =
        serde_json::from_str(content).map_err(|source| DescriptionError::InvalidJson { source })?;
    ThingDescription::from_value(&doc)
}

/// Load a Thing Description from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
#[cfg(feature = "remote")]
pub fn load_description_url(url: &str) -> Result<ThingDescription, DescriptionError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| DescriptionError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|source| DescriptionError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let doc: Value = response
        .json()
        .map_err(|source| DescriptionError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    ThingDescription::from_value(&doc)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a Thing Description from a file path or URL.
///
/// Automatically detects whether the source is a URL or file path.
/// URL loading requires the `remote` feature.
pub fn load_description_auto(source: &str) -> Result<ThingDescription, DescriptionError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_description_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(DescriptionError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_description(Path::new(source))
    }
}
