//! Interactive save flow: confirm, pick a name, write every sample.
use std::{
    fs,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use image::ImageFormat;
use ndarray::ArrayD;
use tracing::{debug, info, warn};

use crate::{
    batch::SampleBatch,
    error::{SampleError, SaveError},
    pixels,
    prompt::{self, Prompt},
    summary::SaveSummary,
};

pub const SAVE_QUESTION: &str = "Would you like to save the images? ";
pub const DEFAULT_NAME: &str = "generated";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    /// Base file name; asked for interactively when absent.
    pub name: Option<String>,
    pub output_dir: PathBuf,
    /// File extension, handed to the encoder as-is.
    pub format: String,
    pub default_name: String,
}

impl Default for SaveRequest {
    fn default() -> Self {
        Self {
            name: None,
            output_dir: PathBuf::from("output"),
            format: "png".to_string(),
            default_name: DEFAULT_NAME.to_string(),
        }
    }
}

/// `<output_dir>/<name>_<index:03>.<format>`. Indices past 999 simply grow wider.
pub fn sample_path(output_dir: &Path, name: &str, index: usize, format: &str) -> PathBuf {
    output_dir.join(format!("{name}_{index:03}.{format}"))
}

/// Run the save flow for `batch`, writing progress lines to `out`.
///
/// Per-sample failures are reported and counted; only terminal I/O and output
/// directory creation abort the flow.
pub fn save_batch(
    batch: &SampleBatch,
    request: &SaveRequest,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<SaveSummary, SaveError> {
    let total = batch.len();
    if !prompt::confirm(prompt, SAVE_QUESTION)? {
        info!(total, "save declined");
        return Ok(SaveSummary::declined(total));
    }

    let name = match &request.name {
        Some(name) => name.clone(),
        None => {
            let name = prompt::ask_name(prompt, &request.default_name)?;
            writeln!(out, "Using name: {name}")?;
            name
        }
    };

    fs::create_dir_all(&request.output_dir).map_err(|source| SaveError::OutputDir {
        path: request.output_dir.clone(),
        source,
    })?;
    debug!(
        dir = %request.output_dir.display(),
        base_name = %name,
        format = %request.format,
        "saving samples"
    );

    let mut summary = SaveSummary::new(total);
    for (index, sample) in batch.iter().enumerate() {
        let path = sample_path(&request.output_dir, &name, index, &request.format);
        match save_sample(sample, &path) {
            Ok(()) => {
                summary.record_saved();
                writeln!(out, "Saved image {}/{}: {}", index + 1, total, path.display())?;
            }
            Err(err) => {
                summary.record_failed();
                warn!(index, path = %path.display(), error = %err, "failed to save sample");
                writeln!(out, "Error saving image {index}: {err}")?;
            }
        }
    }

    info!(saved = summary.saved, failed = summary.failed, total, "save finished");
    Ok(summary)
}

/// Encode one sample and write it to `path`; the extension picks the encoder.
///
/// Encoding happens in memory, so a rejected sample never creates or truncates
/// the file at `path`.
pub fn save_sample(sample: &ArrayD<f32>, path: &Path) -> Result<(), SampleError> {
    let image = pixels::to_image(sample)?;
    let format = ImageFormat::from_path(path)?;

    let mut encoded = Vec::new();
    image.write_to(&mut Cursor::new(&mut encoded), format)?;
    fs::write(path, encoded)?;
    Ok(())
}
