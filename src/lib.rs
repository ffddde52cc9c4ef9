pub use common_stdx::Point;

/// Sizes and resolutions.
pub type UPoint = Point<u32>;

/// Shifts a position, saturating at the `i32` range instead of overflowing.
pub(crate) fn offset(position: Point<i32>, by: Point<i32>) -> Point<i32> {
    Point::new(
        position.x.saturating_add(by.x),
        position.y.saturating_add(by.y),
    )
}

pub mod color;
pub use color::{Cell, CellA, Rgb, Rgba, colors};

pub mod registry;
pub use registry::{Handle, Registry};

pub mod world;
pub use world::{
    Animation, Camera, CameraId, Collider, CollisionEvent, Instruction, Layer, LayerId, Map,
    MapId, Object, ObjectBehavior, ObjectId, Texture, World,
};

pub mod collision;
pub use collision::{Collision, CollisionResult};

pub mod time;
pub use time::{InvocationId, Invocations, Measurement, Time};

pub mod input_handler;
pub use input_handler::{CallbackGroup, CallbackId, Input, keys};

pub mod output;
pub use output::{CapturePrinter, CrosstermPrinter, Output, TerminalPrinter};

pub mod engine;
pub use engine::{Engine, EngineBuilder, EngineConfig};

pub mod error;
pub use error::{ConfigError, EngineError, FileError, InputError};

pub mod logging;
pub use logging::setup_logger;

pub mod term_utils;
pub use term_utils::{initial_terminal_state, install_restore_handlers, restore_terminal};
