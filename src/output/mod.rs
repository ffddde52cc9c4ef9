use std::fmt::Write as FmtWrite;

use common_stdx::Point;

use crate::{
    UPoint,
    color::{Cell, Rgb, Rgba},
    error::EngineError,
};

pub mod printer;
pub use printer::{CapturePrinter, CrosstermPrinter, TerminalPrinter};

/// The final image shown in the terminal, and the printer it goes to.
pub struct Output {
    resolution: UPoint,
    image: Vec<Cell>,
    printer: Box<dyn TerminalPrinter>,
    terminal_size: (u16, u16),
}

impl Output {
    pub fn new(resolution: UPoint, printer: impl TerminalPrinter + 'static) -> Self {
        let terminal_size = printer.terminal_size();
        Self {
            resolution,
            image: vec![Cell::default(); resolution.x as usize * resolution.y as usize],
            printer: Box::new(printer),
            terminal_size,
        }
    }

    pub fn resolution(&self) -> UPoint {
        self.resolution
    }

    pub fn resize(&mut self, resolution: UPoint) {
        self.resolution = resolution;
        self.image = vec![Cell::default(); resolution.x as usize * resolution.y as usize];
    }

    pub fn image(&self) -> &[Cell] {
        &self.image
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        if x >= self.resolution.x || y >= self.resolution.y {
            return None;
        }
        self.image
            .get(y as usize * self.resolution.x as usize + x as usize)
    }

    /// Resets the image to blank cells. Doesn't touch the terminal.
    pub fn clear(&mut self) {
        self.image.fill(Cell::default());
    }

    /// Draws the `[start, end)` part of a rendered image at `position`.
    ///
    /// Characters are copied, colours are blended with `alpha`.
    pub fn draw(
        &mut self,
        image: &[Cell],
        image_resolution: UPoint,
        position: Point<i32>,
        start: UPoint,
        end: UPoint,
        alpha: u8,
    ) {
        let end_x = end.x.min(image_resolution.x) as i64;
        let end_y = end.y.min(image_resolution.y) as i64;
        let (start_x, start_y) = (start.x as i64, start.y as i64);
        if start_x >= end_x || start_y >= end_y {
            return;
        }

        // skip whatever lands left of or above the output
        let skip_x = (-(position.x as i64)).max(0);
        let skip_y = (-(position.y as i64)).max(0);
        let dst_x = (position.x as i64).max(0);
        let dst_y = (position.y as i64).max(0);
        let width = (end_x - start_x - skip_x).min(self.resolution.x as i64 - dst_x);
        let height = (end_y - start_y - skip_y).min(self.resolution.y as i64 - dst_y);
        if width <= 0 || height <= 0 {
            return;
        }

        let src_w = image_resolution.x as usize;
        let dst_w = self.resolution.x as usize;
        for row in 0..height as usize {
            let src = (start_y + skip_y) as usize + row;
            let dst = dst_y as usize + row;
            for col in 0..width as usize {
                let Some(source) = image.get(src * src_w + (start_x + skip_x) as usize + col)
                else {
                    continue;
                };
                let target = &mut self.image[dst * dst_w + dst_x as usize + col];
                target.character = source.character;
                blend(&mut target.foreground, source.foreground, alpha);
                blend(&mut target.background, source.background, alpha);
            }
        }
    }

    /// Builds the escape sequence string for a terminal of `terminal_size`.
    ///
    /// Colours are only emitted when they differ from the previous cell in scan
    /// order. Rows and columns beyond the terminal are cut off.
    pub fn frame(&self, terminal_size: (u16, u16)) -> String {
        let width = (self.resolution.x as usize).min(terminal_size.0 as usize);
        let height = (self.resolution.y as usize).min(terminal_size.1 as usize);
        let mut output = String::with_capacity(width * height * 8 + 16);

        output.push_str("\x1b[H");

        let mut current_fg: Option<Rgb> = None;
        let mut current_bg: Option<Rgb> = None;

        for y in 0..height {
            if y != 0 {
                output.push_str("\r\n");
            }
            let row = &self.image[y * self.resolution.x as usize..][..width];
            for cell in row {
                if current_fg != Some(cell.foreground) {
                    let Rgb { r, g, b } = cell.foreground;
                    let _ = write!(output, "\x1b[38;2;{};{};{}m", r, g, b);
                    current_fg = Some(cell.foreground);
                }
                if current_bg != Some(cell.background) {
                    let Rgb { r, g, b } = cell.background;
                    let _ = write!(output, "\x1b[48;2;{};{};{}m", r, g, b);
                    current_bg = Some(cell.background);
                }
                output.push(printable(cell.character));
            }
        }

        output.push_str("\x1b[0m");
        output
    }

    /// Writes the image to the printer, clipped to the current terminal size.
    pub fn print(&mut self) -> Result<(), EngineError> {
        self.terminal_size = self.printer.terminal_size();
        let frame = self.frame(self.terminal_size);
        self.printer.write_frame(&frame)
    }

    /// Whether the terminal changed size since the last print or check.
    pub fn terminal_resized(&mut self) -> bool {
        let size = self.printer.terminal_size();
        if size != self.terminal_size {
            self.terminal_size = size;
            return true;
        }
        false
    }
}

fn blend(dst: &mut Rgb, src: Rgb, alpha: u8) {
    if let Some(baked) = Rgba::from(src).bake_with(alpha) {
        dst.draw_baked(baked);
    }
}

fn printable(c: char) -> char {
    if c.is_control() { '?' } else { c }
}
