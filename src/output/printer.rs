use std::{
    io::{BufWriter, Stdout, Write, stdout},
    sync::{Arc, Mutex},
};

use crate::error::EngineError;

/// Where finished frames go.
pub trait TerminalPrinter {
    /// Current terminal size as (columns, rows).
    fn terminal_size(&self) -> (u16, u16);

    fn write_frame(&mut self, frame: &str) -> Result<(), EngineError>;
}

impl<P: TerminalPrinter + ?Sized> TerminalPrinter for Box<P> {
    fn terminal_size(&self) -> (u16, u16) {
        (**self).terminal_size()
    }

    fn write_frame(&mut self, frame: &str) -> Result<(), EngineError> {
        (**self).write_frame(frame)
    }
}

/// Prints to stdout, sized by the real terminal.
#[derive(Debug)]
pub struct CrosstermPrinter {
    out: BufWriter<Stdout>,
}

impl Default for CrosstermPrinter {
    fn default() -> Self {
        Self {
            out: BufWriter::new(stdout()),
        }
    }
}

impl TerminalPrinter for CrosstermPrinter {
    fn terminal_size(&self) -> (u16, u16) {
        match crossterm::terminal::size() {
            Ok(size) => size,
            Err(e) => {
                log::error!("Failed to query terminal size: {}", e);
                (0, 0)
            }
        }
    }

    fn write_frame(&mut self, frame: &str) -> Result<(), EngineError> {
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Records frames in memory instead of printing them.
///
/// Clones share the same frame list, so a test can keep one clone while the
/// engine owns the other.
#[derive(Debug, Clone)]
pub struct CapturePrinter {
    size: (u16, u16),
    frames: Arc<Mutex<Vec<String>>>,
}

impl CapturePrinter {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            size: (columns, rows),
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.frames.lock().ok().and_then(|f| f.last().cloned())
    }
}

impl TerminalPrinter for CapturePrinter {
    fn terminal_size(&self) -> (u16, u16) {
        self.size
    }

    fn write_frame(&mut self, frame: &str) -> Result<(), EngineError> {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(frame.to_string());
        }
        Ok(())
    }
}
