//! The shared whiteboard: a fixed-size grid of colors.

use pictionary_protocol::{Color, Pixel};
use serde::{Deserialize, Serialize};

use crate::GameError;

/// A `height × width` grid of cell colors, indexed `cells[x][y]`.
///
/// Paint and erase are all-or-nothing: every pixel in a stroke is bounds
/// checked before the first cell is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whiteboard {
    height: usize,
    width: usize,
    cells: Vec<Vec<Color>>,
}

impl Whiteboard {
    /// Allocates an all-white board.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: blank_cells(height, width),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<&Color> {
        self.cells.get(x).and_then(|row| row.get(y))
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> &[Vec<Color>] {
        &self.cells
    }

    /// Applies each pixel's color to its cell.
    pub fn paint(&mut self, pixels: &[Pixel]) -> Result<(), GameError> {
        let targets = self.validate(pixels)?;
        for ((x, y), pixel) in targets.into_iter().zip(pixels) {
            self.cells[x][y] = pixel.color.clone();
        }
        Ok(())
    }

    /// Whitens each pixel's cell. The pixel's own color is ignored.
    pub fn erase(&mut self, pixels: &[Pixel]) -> Result<(), GameError> {
        let targets = self.validate(pixels)?;
        for (x, y) in targets {
            self.cells[x][y] = Color::white();
        }
        Ok(())
    }

    /// Reallocates the grid to all-white.
    pub fn reset(&mut self) {
        self.cells = blank_cells(self.height, self.width);
    }

    /// Returns `true` if no cell holds anything but white.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(Color::is_white)
    }

    /// Checks every pixel and converts coordinates to indices.
    fn validate(&self, pixels: &[Pixel]) -> Result<Vec<(usize, usize)>, GameError> {
        pixels
            .iter()
            .map(|p| {
                let x = usize::try_from(p.x).ok().filter(|x| *x < self.height);
                let y = usize::try_from(p.y).ok().filter(|y| *y < self.width);
                match (x, y) {
                    (Some(x), Some(y)) => Ok((x, y)),
                    _ => Err(GameError::OutOfBounds { x: p.x, y: p.y }),
                }
            })
            .collect()
    }
}

fn blank_cells(height: usize, width: usize) -> Vec<Vec<Color>> {
    vec![vec![Color::white(); width]; height]
}
