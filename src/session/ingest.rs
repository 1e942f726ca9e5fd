use crate::{
    assets::decode::EncodedImage,
    foundation::error::{FotobooError, FotobooResult},
};

/// Outcome of handing a batch of user files to the booth.
#[derive(Clone, Debug, Default)]
pub struct Ingested {
    /// Recognized images, in the order they were supplied.
    pub images: Vec<EncodedImage>,
    /// File names of `images`, index for index.
    pub names: Vec<String>,
    /// Names of the files that were not images.
    pub rejected: Vec<String>,
}

/// Keep the raster images among `files` (`(name, bytes)` pairs).
///
/// Non-images are listed in [`Ingested::rejected`]; the batch only fails when nothing in it is an
/// image.
pub fn ingest_files(files: Vec<(String, Vec<u8>)>) -> FotobooResult<Ingested> {
    let mut out = Ingested::default();
    for (name, bytes) in files {
        match EncodedImage::sniff(bytes) {
            Some(image) => {
                out.images.push(image);
                out.names.push(name);
            }
            None => {
                tracing::debug!(%name, "not an image");
                out.rejected.push(name);
            }
        }
    }

    if out.images.is_empty() {
        return Err(FotobooError::validation("Please select valid image files"));
    }
    if !out.rejected.is_empty() {
        tracing::warn!(rejected = out.rejected.len(), "ignored files that are not images");
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/session/ingest.rs"]
mod tests;
