use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};

use crate::{error::InputError, input_handler::keys};

/// What the reader thread hands to the main thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// A key press in its terminal string form.
    Key(String),
    /// The terminal changed size.
    Resize(u16, u16),
}

/// Turns a key event into the string a terminal would have sent for it.
pub fn key_event_to_sequence(key: &KeyEvent) -> Option<String> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let seq = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => keys::ctrl(c)?,
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => keys::UP.to_string(),
        KeyCode::Down => keys::DOWN.to_string(),
        KeyCode::Right => keys::RIGHT.to_string(),
        KeyCode::Left => keys::LEFT.to_string(),
        KeyCode::Home => keys::HOME.to_string(),
        KeyCode::End => keys::END.to_string(),
        KeyCode::Insert => keys::INSERT.to_string(),
        KeyCode::Delete => keys::DELETE.to_string(),
        KeyCode::PageUp => keys::PAGE_UP.to_string(),
        KeyCode::PageDown => keys::PAGE_DOWN.to_string(),
        KeyCode::Enter => keys::RETURN.to_string(),
        KeyCode::Tab => keys::TAB.to_string(),
        KeyCode::BackTab => keys::SHIFT_TAB.to_string(),
        KeyCode::Backspace => keys::BACKSPACE.to_string(),
        KeyCode::Esc => keys::ESCAPE.to_string(),
        KeyCode::F(n) => function_key(n)?.to_string(),
        _ => return None,
    };
    Some(seq)
}

fn function_key(n: u8) -> Option<&'static str> {
    const SEQUENCES: [&str; 12] = [
        keys::F1,
        keys::F2,
        keys::F3,
        keys::F4,
        keys::F5,
        keys::F6,
        keys::F7,
        keys::F8,
        keys::F9,
        keys::F10,
        keys::F11,
        keys::F12,
    ];
    SEQUENCES.get((n as usize).checked_sub(1)?).copied()
}

/// Background thread blocking on terminal input.
///
/// The thread only forwards messages. The quit key is the exception, it clears
/// the shared running flag so a stuck game loop can still be left.
pub struct InputManager {
    shutdown_flag: Arc<AtomicBool>,
    reader_handle: Option<JoinHandle<()>>,
}

impl InputManager {
    pub fn start(
        sender: Sender<InputMessage>,
        running: Arc<AtomicBool>,
        quit_key: String,
    ) -> Result<Self, InputError> {
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::clone(&shutdown_flag);

        let handle = thread::Builder::new()
            .name("input-reader".into())
            .spawn(move || {
                info!("input reader started");
                while !shutdown.load(Ordering::Relaxed) {
                    if !event::poll(Duration::from_millis(5)).unwrap_or(false) {
                        continue;
                    }
                    let message = match event::read() {
                        Ok(Event::Key(key)) => match key_event_to_sequence(&key) {
                            Some(seq) => InputMessage::Key(seq),
                            None => continue,
                        },
                        Ok(Event::Resize(w, h)) => InputMessage::Resize(w, h),
                        Ok(_) => continue,
                        Err(e) => {
                            warn!("failed reading terminal event: {e}");
                            continue;
                        }
                    };

                    if matches!(&message, InputMessage::Key(k) if *k == quit_key) {
                        running.store(false, Ordering::Relaxed);
                    }
                    if sender.send(message).is_err() {
                        break;
                    }
                }
                info!("input reader stopped");
            })
            .map_err(InputError::SpawnFailed)?;

        Ok(Self {
            shutdown_flag,
            reader_handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        self.shutdown_flag.store(true, Ordering::Relaxed);
        if let Some(h) = self.reader_handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for InputManager {
    fn drop(&mut self) {
        self.stop();
    }
}
