//! Raw-mode terminal setup for a running engine.
//!
//! The engine owns stdout while it runs, so the alternate screen and raw mode
//! have to be undone on every way out: a normal return, Ctrl-C and panics.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Result, stdout};

/// Prepares the terminal for the engine and makes sure it gets restored on
/// Ctrl-C signals and panics. Use inside a function returning a `Result`
/// whose error converts from `std::io::Error`.
#[macro_export]
macro_rules! init_terminal {
    () => {
        $crate::initial_terminal_state()?;
        $crate::install_restore_handlers()?;
    };
}

pub fn initial_terminal_state() -> Result<()> {
    let mut stdout = stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All), Hide)?;
    Ok(())
}

pub fn restore_terminal() -> Result<()> {
    let mut stdout = stdout();
    execute!(
        stdout,
        Clear(ClearType::All),
        Show,
        MoveTo(0, 0),
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    Ok(())
}

pub fn install_restore_handlers() -> Result<()> {
    ctrlc::set_handler(|| {
        let _ = restore_terminal();
        std::process::exit(130);
    })
    .map_err(std::io::Error::other)?;

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        prev_hook(panic_info);
    }));
    Ok(())
}
