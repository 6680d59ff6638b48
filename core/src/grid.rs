use image::{
    imageops::{self, FilterType},
    Rgb, RgbImage,
};
use tracing::warn;

use crate::{batch::SampleBatch, pixels};

/// Fixed canvas size: a 15x6 figure at 100 dpi.
pub const CANVAS_WIDTH: u32 = 1500;
pub const CANVAS_HEIGHT: u32 = 600;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Row-major cell assignment: cell `k` shows sample `k` when the batch has one.
pub fn grid_cells(batch_len: usize, rows: usize, cols: usize) -> Vec<Option<usize>> {
    cells(batch_len, rows, cols).collect()
}

fn cells(batch_len: usize, rows: usize, cols: usize) -> impl Iterator<Item = Option<usize>> {
    (0..rows.saturating_mul(cols)).map(move |cell| (cell < batch_len).then_some(cell))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of samples that end up on the canvas.
    pub fn shown(&self, batch_len: usize) -> usize {
        batch_len.min(self.rows.saturating_mul(self.cols))
    }

    /// Pixel size of one cell, at least 1x1.
    pub fn cell_size(&self) -> (u32, u32) {
        let split = |extent: u32, count: usize| {
            let count = u32::try_from(count).unwrap_or(u32::MAX).max(1);
            (extent / count).max(1)
        };
        (split(CANVAS_WIDTH, self.cols), split(CANVAS_HEIGHT, self.rows))
    }

    /// Compose the first `rows * cols` samples onto a white canvas.
    pub fn render(&self, batch: &SampleBatch) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
        if self.rows == 0 || self.cols == 0 {
            return canvas;
        }

        let (cell_w, cell_h) = self.cell_size();
        // Filled cells form a prefix of the layout.
        for index in cells(batch.len(), self.rows, self.cols).map_while(|cell| cell) {
            let Some(sample) = batch.get(index) else {
                break;
            };
            let tile = match pixels::to_display_rgb(sample) {
                Ok(tile) => tile,
                Err(err) => {
                    warn!(index, error = %err, "leaving preview cell blank");
                    continue;
                }
            };

            let fitted = fit_into(&tile, cell_w, cell_h);
            let row = (index / self.cols) as u32;
            let col = (index % self.cols) as u32;
            let x = col * cell_w + (cell_w - fitted.width()) / 2;
            let y = row * cell_h + (cell_h - fitted.height()) / 2;
            imageops::replace(&mut canvas, &fitted, i64::from(x), i64::from(y));
        }

        canvas
    }
}

/// Nearest-neighbour scale preserving aspect ratio so the tile fits the cell.
fn fit_into(tile: &RgbImage, cell_w: u32, cell_h: u32) -> RgbImage {
    let scale = f64::min(
        f64::from(cell_w) / f64::from(tile.width()),
        f64::from(cell_h) / f64::from(tile.height()),
    );
    let width = ((f64::from(tile.width()) * scale) as u32).clamp(1, cell_w);
    let height = ((f64::from(tile.height()) * scale) as u32).clamp(1, cell_h);
    imageops::resize(tile, width, height, FilterType::Nearest)
}
