//! Downloading resources published over HTTP

use crate::error::{Error, Result};
use std::io::Read;

/// Largest resource accepted from a server
const MAX_DOWNLOAD_SIZE: u64 = 512 * 1024 * 1024;

/// Fetch the body of `url`
pub(crate) fn download(url: &str) -> Result<Vec<u8>> {
    tracing::debug!("Downloading {url}");
    let response = ureq::get(url).call().map_err(|err| Error::Download {
        url: url.to_string(),
        message: err.to_string(),
    })?;

    let mut data = Vec::new();
    response
        .into_reader()
        .take(MAX_DOWNLOAD_SIZE)
        .read_to_end(&mut data)?;
    Ok(data)
}
