use common_stdx::Point;

use crate::world::{ObjectId, World};

/// Details of one collider pair taking part in a move.
///
/// `collider` indexes the receiving object's colliders, `other_collider` the
/// colliders of `other_object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub direction: Point<i32>,
    pub collider: usize,
    pub other_object: ObjectId,
    pub other_collider: usize,
}

/// Per-object hooks invoked by the tick loop and the collision engine.
///
/// Every method defaults to doing nothing. While a hook runs, the behavior is
/// detached from its object, so hooks may mutate the world freely, including
/// moving or removing their own object.
pub trait ObjectBehavior {
    /// Called once per tick. Return `true` to request a render.
    fn on_tick(&mut self, _world: &mut World, _this: ObjectId) -> bool {
        false
    }

    /// This object moved by `direction`, either on its own or by being pushed.
    fn on_move(&mut self, _world: &mut World, _this: ObjectId, _direction: Point<i32>) {}

    /// This object pushed `event.other_object`.
    fn on_push(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// This object was pushed by `event.other_object`.
    fn on_pushed(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// This object tried to move and was stopped by `event.other_object`.
    fn on_blocked(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// This object stopped `event.other_object` from moving.
    fn on_block(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// This object moved into `event.other_object`.
    fn on_overlap(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// This object moved out of `event.other_object`.
    fn on_overlap_exit(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// `event.other_object` moved into this object.
    fn on_overlapped(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}

    /// `event.other_object` moved out of this object.
    fn on_overlapped_exit(&mut self, _world: &mut World, _this: ObjectId, _event: CollisionEvent) {}
}

impl World {
    /// Runs `f` with the object's behavior detached, then reattaches it if the
    /// object still exists and didn't get a new behavior meanwhile.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut dyn ObjectBehavior, &mut World) -> R,
    ) -> Option<R> {
        let mut behavior = self.objects.get_mut(id)?.behavior.take()?;
        let result = f(behavior.as_mut(), self);
        if let Some(object) = self.objects.get_mut(id) {
            if object.behavior.is_none() {
                object.behavior = Some(behavior);
            }
        }
        Some(result)
    }

    /// Calls every object's [`ObjectBehavior::on_tick`].
    ///
    /// Returns `true` if any of them asked for a render.
    pub fn call_on_ticks(&mut self) -> bool {
        let mut render = false;
        for id in self.objects.handles() {
            render |= self
                .with_behavior(id, |b, world| b.on_tick(world, id))
                .unwrap_or(false);
        }
        render
    }
}
