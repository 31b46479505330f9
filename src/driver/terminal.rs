//! Terminal simulator: the tree seen from above, in 24-bit color

use std::fmt::Write as _;
use std::io::Write;

use super::{DisplayError, OutputDriver};
use crate::color::Rgb;
use crate::geometry::Geometry;

const CURSOR_HOME: &str = "\x1b[H";
const CLEAR_SCREEN: &str = "\x1b[2J";
const RESET: &str = "\x1b[0m";
const DOT: char = '●';

/// Plots every pixel at its projected position on a square grid
///
/// Each grid cell is two characters wide to keep the plot roughly round.
/// Pixels landing on the same cell overwrite each other, higher indices last.
pub struct TerminalDriver<W: Write> {
    out: W,
    size: usize,
    cells: Vec<usize>,
    grid: Vec<Option<Rgb>>,
    frame: String,
    started: bool,
}

impl<W: Write> TerminalDriver<W> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(out: W, geometry: &Geometry, size: usize) -> Self {
        let size = size.max(2);
        let span = (size - 1) as f32;
        let cells = (0..geometry.count())
            .map(|index| {
                let (x, y) = geometry.position(index);
                let col = (x * span).round() as usize;
                // Screen rows grow downwards
                let row = ((1.0 - y) * span).round() as usize;
                row.min(size - 1) * size + col.min(size - 1)
            })
            .collect();

        Self {
            out,
            size,
            cells,
            grid: vec![None; size * size],
            frame: String::new(),
            started: false,
        }
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    /// Build the escape sequence text for one frame
    pub fn draw(&mut self, colors: &[Rgb]) -> &str {
        self.grid.fill(None);
        for (cell, color) in self.cells.iter().zip(colors) {
            self.grid[*cell] = Some(*color);
        }

        self.frame.clear();
        if !self.started {
            self.frame.push_str(CLEAR_SCREEN);
        }
        self.frame.push_str(CURSOR_HOME);
        for row in self.grid.chunks(self.size) {
            for cell in row {
                match cell {
                    Some(Rgb { r, g, b }) => {
                        let _ = write!(self.frame, "\x1b[38;2;{r};{g};{b}m{DOT} ");
                    }
                    None => self.frame.push_str("  "),
                }
            }
            self.frame.push_str(RESET);
            self.frame.push('\n');
        }
        &self.frame
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputDriver for TerminalDriver<W> {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DisplayError> {
        self.draw(colors);
        self.started = true;
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        self.out.write_all(RESET.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
