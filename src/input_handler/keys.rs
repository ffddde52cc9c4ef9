//! Input strings as a terminal sends them, used as keys for [`super::Input`].

pub const UP: &str = "\x1b[A";
pub const DOWN: &str = "\x1b[B";
pub const RIGHT: &str = "\x1b[C";
pub const LEFT: &str = "\x1b[D";

pub const HOME: &str = "\x1b[H";
pub const END: &str = "\x1b[F";
pub const INSERT: &str = "\x1b[2~";
pub const DELETE: &str = "\x1b[3~";
pub const PAGE_UP: &str = "\x1b[5~";
pub const PAGE_DOWN: &str = "\x1b[6~";

pub const F1: &str = "\x1bOP";
pub const F2: &str = "\x1bOQ";
pub const F3: &str = "\x1bOR";
pub const F4: &str = "\x1bOS";
pub const F5: &str = "\x1b[15~";
pub const F6: &str = "\x1b[17~";
pub const F7: &str = "\x1b[18~";
pub const F8: &str = "\x1b[19~";
pub const F9: &str = "\x1b[20~";
pub const F10: &str = "\x1b[21~";
pub const F11: &str = "\x1b[23~";
pub const F12: &str = "\x1b[24~";

pub const ESCAPE: &str = "\x1b";
pub const RETURN: &str = "\r";
pub const TAB: &str = "\t";
pub const SHIFT_TAB: &str = "\x1b[Z";
pub const BACKSPACE: &str = "\x7f";

/// Ctrl+<letter> arrives as the letter's control code.
pub fn ctrl(letter: char) -> Option<String> {
    letter
        .is_ascii_alphabetic()
        .then(|| ((letter.to_ascii_lowercase() as u8 - b'a' + 1) as char).to_string())
}
