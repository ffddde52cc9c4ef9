use std::sync::{Arc, atomic::AtomicBool};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

use crate::{
    error::InputError,
    input_handler::manager::{InputManager, InputMessage},
    world::World,
};

/// Handles one input string. Returns `true` to request a render.
pub type InputCallback = Box<dyn FnMut(&mut World, &str) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Trigger {
    Exact(String),
    /// Single-character input within an inclusive range.
    Range(char, char),
}

impl Trigger {
    fn matches(&self, input: &str) -> bool {
        match self {
            Trigger::Exact(key) => key == input,
            Trigger::Range(start, end) => {
                let mut chars = input.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => (*start..=*end).contains(&c),
                    _ => false,
                }
            }
        }
    }
}

struct Registered {
    id: CallbackId,
    trigger: Trigger,
    enabled: bool,
    callback: InputCallback,
}

/// Main-thread side of input: a queue of input strings and the callbacks they trigger.
///
/// Nothing runs when input arrives; [`Input::call_callbacks`] drains the queue
/// once per tick and dispatches on the calling thread.
pub struct Input {
    sender: Sender<InputMessage>,
    receiver: Receiver<InputMessage>,
    callbacks: Vec<Registered>,
    next_id: u64,
    input: String,
    quit_key: Option<String>,
    resized: Option<(u16, u16)>,
    manager: Option<InputManager>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            callbacks: Vec::new(),
            next_id: 0,
            input: String::new(),
            quit_key: None,
            resized: None,
            manager: None,
        }
    }

    /// Input that should stop the game loop.
    pub fn set_quit_key(&mut self, key: impl Into<String>) {
        self.quit_key = Some(key.into());
    }

    /// Starts the terminal reader thread feeding this queue.
    pub fn start_reader(&mut self, running: Arc<AtomicBool>) -> Result<(), InputError> {
        if self.manager.is_some() {
            return Ok(());
        }
        let quit_key = self.quit_key.clone().unwrap_or_default();
        self.manager = Some(InputManager::start(self.sender.clone(), running, quit_key)?);
        Ok(())
    }

    pub fn stop_reader(&mut self) {
        if let Some(mut manager) = self.manager.take() {
            manager.stop();
        }
    }

    /// A sender other sources can use to inject input.
    pub fn sender(&self) -> Sender<InputMessage> {
        self.sender.clone()
    }

    /// Queues an input string as if it was typed.
    pub fn push(&self, input: impl Into<String>) {
        // the receiver lives in self, so this can't disconnect
        let _ = self.sender.send(InputMessage::Key(input.into()));
    }

    fn add(&mut self, trigger: Trigger, callback: InputCallback) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.callbacks.push(Registered {
            id,
            trigger,
            enabled: true,
            callback,
        });
        id
    }

    /// Calls `callback` whenever the input equals `key` exactly.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        callback: impl FnMut(&mut World, &str) -> bool + 'static,
    ) -> CallbackId {
        self.add(Trigger::Exact(key.into()), Box::new(callback))
    }

    /// Calls `callback` for single-character input between `start` and `end`, inclusive.
    pub fn register_range(
        &mut self,
        start: char,
        end: char,
        callback: impl FnMut(&mut World, &str) -> bool + 'static,
    ) -> CallbackId {
        self.add(Trigger::Range(start, end), Box::new(callback))
    }

    pub fn set_enabled(&mut self, id: CallbackId, enabled: bool) -> bool {
        match self.callbacks.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|c| c.id != id);
        self.callbacks.len() != before
    }

    /// The input string being (or last) dispatched.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the last dispatched input was a single character.
    pub fn is_char(&self) -> bool {
        self.input.chars().count() == 1
    }

    /// New terminal size if it changed since the last call.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    /// Drains queued input and runs the matching enabled callbacks in
    /// registration order. Returns `true` if any of them asked for a render.
    pub fn call_callbacks(&mut self, world: &mut World) -> bool {
        let mut render = false;
        while let Ok(message) = self.receiver.try_recv() {
            let key = match message {
                InputMessage::Key(key) => key,
                InputMessage::Resize(w, h) => {
                    self.resized = Some((w, h));
                    continue;
                }
            };
            if self.quit_key.as_deref() == Some(key.as_str()) {
                debug!("quit key received");
                world.quit();
            }
            for registered in self
                .callbacks
                .iter_mut()
                .filter(|c| c.enabled && c.trigger.matches(&key))
            {
                render |= (registered.callback)(world, &key);
            }
            self.input = key;
        }
        render
    }
}

impl Drop for Input {
    fn drop(&mut self) {
        self.stop_reader();
    }
}

/// A set of callbacks switched on and off together, e.g. per menu or game state.
#[derive(Debug, Clone, Default)]
pub struct CallbackGroup {
    ids: Vec<CallbackId>,
    enabled: bool,
}

impl CallbackGroup {
    pub fn new(enabled: bool) -> Self {
        Self {
            ids: Vec::new(),
            enabled,
        }
    }

    /// Adds a callback, bringing it in line with the group's state.
    pub fn add(&mut self, input: &mut Input, id: CallbackId) {
        input.set_enabled(id, self.enabled);
        self.ids.push(id);
    }

    pub fn enable(&mut self, input: &mut Input) {
        self.set_enabled(input, true);
    }

    pub fn disable(&mut self, input: &mut Input) {
        self.set_enabled(input, false);
    }

    fn set_enabled(&mut self, input: &mut Input, enabled: bool) {
        self.enabled = enabled;
        for &id in &self.ids {
            input.set_enabled(id, enabled);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Unregisters every callback of the group.
    pub fn remove_all(&mut self, input: &mut Input) {
        for id in self.ids.drain(..) {
            input.remove(id);
        }
    }
}
