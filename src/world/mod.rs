use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{collision::Collision, registry::Handle, registry::Registry, time::Invocations};

pub mod animation;
pub use animation::{Animation, Instruction};
pub mod behavior;
pub use behavior::{CollisionEvent, ObjectBehavior};
pub mod camera;
pub use camera::Camera;
pub mod collider;
pub use collider::{Collider, ColliderShape};
pub mod layer;
pub use layer::Layer;
pub mod map;
pub use map::Map;
pub mod object;
pub use object::Object;
pub mod texture;
pub use texture::{Texture, TextureKind};
mod texture_file;

pub type ObjectId = Handle<Object>;
pub type LayerId = Handle<Layer>;
pub type MapId = Handle<Map>;
pub type CameraId = Handle<Camera>;

/// Everything a game mutates while it runs.
///
/// Holds the world structure registries together with the collision rules and
/// the pending invocations, so behaviors, input callbacks and invocations all
/// work against the same `&mut World`.
pub struct World {
    pub(crate) objects: Registry<Object>,
    pub(crate) layers: Registry<Layer>,
    pub(crate) maps: Registry<Map>,
    pub(crate) cameras: Registry<Camera>,
    pub collision: Collision,
    pub invocations: Invocations,
    running: Arc<AtomicBool>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Collision::default(), Arc::new(AtomicBool::new(true)))
    }
}

impl World {
    pub fn new(collision: Collision, running: Arc<AtomicBool>) -> Self {
        Self {
            objects: Registry::new(),
            layers: Registry::new(),
            maps: Registry::new(),
            cameras: Registry::new(),
            collision,
            invocations: Invocations::default(),
            running,
        }
    }

    pub fn objects(&self) -> &Registry<Object> {
        &self.objects
    }

    pub fn layers(&self) -> &Registry<Layer> {
        &self.layers
    }

    pub fn maps(&self) -> &Registry<Map> {
        &self.maps
    }

    pub fn cameras(&self) -> &Registry<Camera> {
        &self.cameras
    }

    /// Signals the game loop to stop after the current tick.
    pub fn quit(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}
