use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::{decode::EncodedImage, encode::encode_png},
    foundation::error::FotobooResult,
    strip::{
        compositor::{ExportReport, StripCompositor},
        job::RenderJob,
    },
};

/// An encoded strip ready to be saved or handed to a host.
#[derive(Clone, Debug)]
pub struct StripExport {
    pub file_name: String,
    pub png: EncodedImage,
    pub report: ExportReport,
    pub width: u32,
    pub height: u32,
}

impl StripExport {
    /// Write the PNG into `dir` under [`Self::file_name`], creating the directory if needed.
    pub fn write_to_dir(&self, dir: &Path) -> FotobooResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.png.bytes())
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "strip written");
        Ok(path)
    }
}

/// `<prefix>-<millis>.png`, or `<prefix>-custom-<millis>.png` for decorated strips.
pub fn export_file_name(prefix: &str, custom: bool, millis: u128) -> String {
    if custom {
        format!("{prefix}-custom-{millis}.png")
    } else {
        format!("{prefix}-{millis}.png")
    }
}

/// Milliseconds since the Unix epoch; 0 if the clock is before it.
pub fn timestamp_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

impl StripCompositor {
    /// Render `job` and encode it as PNG under a timestamped file name.
    #[tracing::instrument(skip(self, job), fields(custom = job.custom))]
    pub fn export(&mut self, job: &RenderJob, prefix: &str) -> FotobooResult<StripExport> {
        let rendered = self.render(job)?;
        let png = encode_png(&rendered.image)?;
        Ok(StripExport {
            file_name: export_file_name(prefix, job.custom, timestamp_millis()),
            png,
            report: rendered.report,
            width: rendered.image.width(),
            height: rendered.image.height(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip/export.rs"]
mod tests;
