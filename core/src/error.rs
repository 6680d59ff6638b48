use std::{io, path::PathBuf};

use ndarray_npy::ReadNpzError;
use thiserror::Error;

/// Fatal failures while reading the sample container.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read npz archive {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: ReadNpzError,
    },

    #[error("no arrays found in {}", .0.display())]
    Empty(PathBuf),

    #[error("array '{key}' has an unsupported element type (expected f32, f64 or u8)")]
    UnsupportedDtype { key: String },

    #[error("array '{key}' is zero-dimensional and holds no samples")]
    NotABatch { key: String },
}

/// Failure to turn one sample into an image file. Recovered by the saver.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("unsupported sample shape {shape:?} (expected HxW, HxWx1, HxWx3 or HxWx4)")]
    UnsupportedShape { shape: Vec<usize> },

    #[error(transparent)]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Write(#[from] io::Error),
}

/// Failures that abort the save flow as a whole.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    #[error("failed to create output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
