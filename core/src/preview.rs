//! Display surfaces for the grid preview.
//!
//! `TerminalPreviewer` draws the canvas with 24-bit ANSI colors, two pixel
//! rows per text line using the upper half block glyph. `FilePreviewer`
//! writes the canvas to an image file for environments without a color
//! terminal.
use std::{
    fs,
    io::Write,
    path::PathBuf,
};

use image::{
    imageops::{self, FilterType},
    RgbImage,
};
use tracing::{debug, info};

use crate::{
    batch::SampleBatch,
    error::PreviewError,
    grid::{GridLayout, CANVAS_HEIGHT, CANVAS_WIDTH},
};

pub const DEFAULT_TERMINAL_WIDTH: u32 = 100;

pub trait Previewer {
    fn show(&mut self, batch: &SampleBatch, layout: &GridLayout) -> Result<(), PreviewError>;
}

pub struct TerminalPreviewer<W> {
    out: W,
    width: u32,
}

impl<W: Write> TerminalPreviewer<W> {
    pub fn new(out: W, width: u32) -> Self {
        Self {
            out,
            width: width.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Terminal-sized copy of the canvas; height is rounded up to an even row count.
    fn downsample(&self, canvas: &RgbImage) -> RgbImage {
        let height = (u64::from(self.width) * u64::from(CANVAS_HEIGHT) / u64::from(CANVAS_WIDTH))
            .max(2) as u32;
        let height = height + height % 2;
        imageops::resize(canvas, self.width, height, FilterType::Nearest)
    }
}

impl<W: Write> Previewer for TerminalPreviewer<W> {
    fn show(&mut self, batch: &SampleBatch, layout: &GridLayout) -> Result<(), PreviewError> {
        let canvas = layout.render(batch);
        let small = self.downsample(&canvas);
        debug!(
            width = small.width(),
            height = small.height(),
            shown = layout.shown(batch.len()),
            "drawing terminal preview"
        );

        for y in (0..small.height()).step_by(2) {
            for x in 0..small.width() {
                let [tr, tg, tb] = small.get_pixel(x, y).0;
                let [br, bg, bb] = small.get_pixel(x, (y + 1).min(small.height() - 1)).0;
                write!(
                    self.out,
                    "\x1b[38;2;{tr};{tg};{tb}m\x1b[48;2;{br};{bg};{bb}m\u{2580}"
                )?;
            }
            writeln!(self.out, "\x1b[0m")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

pub struct FilePreviewer {
    path: PathBuf,
}

impl FilePreviewer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Previewer for FilePreviewer {
    fn show(&mut self, batch: &SampleBatch, layout: &GridLayout) -> Result<(), PreviewError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        layout.render(batch).save(&self.path)?;
        info!(path = %self.path.display(), "wrote grid preview");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn single_black_sample() -> SampleBatch {
        SampleBatch::new("arr_0", vec![ArrayD::zeros(IxDyn(&[8, 8]))])
    }

    #[test]
    fn terminal_preview_emits_one_line_per_two_pixel_rows() {
        let mut previewer = TerminalPreviewer::new(Vec::new(), 50);
        previewer
            .show(&single_black_sample(), &GridLayout::new(2, 5))
            .unwrap();
        let output = String::from_utf8(previewer.into_inner()).unwrap();

        // 50 columns -> 20 pixel rows -> 10 text lines.
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 10);
        for line in &lines {
            assert_eq!(line.matches('\u{2580}').count(), 50);
            assert!(line.ends_with("\x1b[0m"));
        }
    }

    #[test]
    fn terminal_preview_uses_sample_colors() {
        let mut previewer = TerminalPreviewer::new(Vec::new(), 10);
        previewer
            .show(&single_black_sample(), &GridLayout::new(1, 1))
            .unwrap();
        let output = String::from_utf8(previewer.into_inner()).unwrap();
        assert!(output.contains("\x1b[38;2;0;0;0m"), "black sample pixels expected");
        assert!(output.contains("\x1b[38;2;255;255;255m"), "white margins expected");
    }

    #[test]
    fn zero_width_is_raised_to_one_column() {
        let mut previewer = TerminalPreviewer::new(Vec::new(), 0);
        previewer
            .show(&single_black_sample(), &GridLayout::new(1, 1))
            .unwrap();
        let output = String::from_utf8(previewer.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
