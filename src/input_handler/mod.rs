pub mod handler;
pub use handler::{CallbackGroup, CallbackId, Input, InputCallback};
pub mod keys;
pub mod manager;
pub use manager::{InputManager, InputMessage, key_event_to_sequence};
