pub mod batch;
pub mod config;
pub mod error;
pub mod grid;
pub mod loader;
pub mod pixels;
pub mod preview;
pub mod prompt;
pub mod saver;
pub mod summary;

pub use batch::SampleBatch;
pub use config::{load_config, ViewerConfig};
pub use error::{ConfigError, LoadError, PreviewError, SampleError, SaveError};
pub use grid::{grid_cells, GridLayout};
pub use loader::{load_batch, DEFAULT_KEY};
pub use preview::{FilePreviewer, Previewer, TerminalPreviewer};
pub use prompt::{LinePrompt, Prompt};
pub use saver::{sample_path, save_batch, SaveRequest};
pub use summary::SaveSummary;
