use common_stdx::Point;
use log::debug;

use crate::{
    error::ConfigError,
    offset,
    world::{CollisionEvent, ObjectId, World},
};

mod overlap;
pub(crate) use overlap::colliders_overlap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionResult {
    /// The moving collider can't enter the other.
    Block,
    /// The other object moves along.
    Push,
    /// Both may share space, entering and leaving is reported.
    Overlap,
}

/// Square table of collision results, indexed `[moving type][passive type]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    types: Vec<Vec<CollisionResult>>,
}

impl Default for Collision {
    /// Type 0 is immovable, type 1 is pushable, type 2 overlaps everything.
    fn default() -> Self {
        use CollisionResult::*;
        Self {
            types: vec![
                vec![Block, Push, Overlap],
                vec![Block, Push, Overlap],
                vec![Overlap, Overlap, Overlap],
            ],
        }
    }
}

impl Collision {
    pub fn new(types: Vec<Vec<CollisionResult>>) -> Result<Self, ConfigError> {
        let size = types.len();
        if let Some((row, r)) = types.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(ConfigError::NonSquareCollisionMatrix {
                row,
                len: r.len(),
                size,
            });
        }
        Ok(Self { types })
    }

    pub fn types(&self) -> &[Vec<CollisionResult>] {
        &self.types
    }

    /// Replaces the whole table, keeping the old one if `types` isn't square.
    pub fn set_matrix(&mut self, types: Vec<Vec<CollisionResult>>) -> Result<(), ConfigError> {
        *self = Self::new(types)?;
        Ok(())
    }

    /// Looks up the result for a pair of collider types.
    ///
    /// Types outside the table always overlap.
    pub fn classify(&self, moving: u8, passive: u8) -> CollisionResult {
        self.types
            .get(moving as usize)
            .and_then(|row| row.get(passive as usize))
            .copied()
            .unwrap_or(CollisionResult::Overlap)
    }
}

/// Collider pair recorded while expanding a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Contact {
    active: ObjectId,
    active_collider: usize,
    passive: ObjectId,
    passive_collider: usize,
}

impl Contact {
    fn active_event(&self, direction: Point<i32>) -> CollisionEvent {
        CollisionEvent {
            direction,
            collider: self.active_collider,
            other_object: self.passive,
            other_collider: self.passive_collider,
        }
    }

    fn passive_event(&self, direction: Point<i32>) -> CollisionEvent {
        CollisionEvent {
            direction,
            collider: self.passive_collider,
            other_object: self.active,
            other_collider: self.active_collider,
        }
    }
}

/// Everything one move will touch, grown while objects get pushed.
#[derive(Debug, Default)]
struct MovementTree {
    pushes: Vec<Contact>,
    blocks: Vec<Contact>,
    overlaps: Vec<Contact>,
    exits: Vec<Contact>,
}

impl MovementTree {
    fn is_committed(&self, id: ObjectId) -> bool {
        self.pushes.iter().any(|p| p.active == id || p.passive == id)
    }
}

impl World {
    /// Moves an object by `direction`, pushing whatever it pushes.
    ///
    /// Either every object in the push chain moves by exactly `direction`, or
    /// nothing moves at all. Positions are updated before any behavior hook runs.
    /// Returns whether the move happened.
    pub fn move_object(&mut self, id: ObjectId, direction: Point<i32>) -> bool {
        let Some(object) = self.objects.get(id) else {
            return false;
        };

        let Some(layer) = object.parent_layer.and_then(|l| self.layers.get(l)) else {
            // nothing to collide with
            if let Some(object) = self.objects.get_mut(id) {
                object.position = offset(object.position, direction);
            }
            self.with_behavior(id, |b, world| b.on_move(world, id, direction));
            return true;
        };
        let others = layer.objects.clone();

        let mut tree = MovementTree::default();
        self.expand_movement_tree(id, direction, &others, &mut tree);
        let mut i = 0;
        while i < tree.pushes.len() {
            let pushed = tree.pushes[i].passive;
            self.expand_movement_tree(pushed, direction, &others, &mut tree);
            i += 1;
        }

        if !tree.blocks.is_empty() {
            debug!(
                "move of object {id} by ({}, {}) blocked by {} contact(s)",
                direction.x,
                direction.y,
                tree.blocks.len()
            );
            for block in &tree.blocks {
                let (active, passive) = (block.active, block.passive);
                let event = block.active_event(direction);
                self.with_behavior(active, |b, world| b.on_blocked(world, active, event));
                let event = block.passive_event(direction);
                self.with_behavior(passive, |b, world| b.on_block(world, passive, event));
            }
            return false;
        }

        let mut moved = vec![id];
        for push in &tree.pushes {
            if !moved.contains(&push.passive) {
                moved.push(push.passive);
            }
        }
        for &m in &moved {
            if let Some(object) = self.objects.get_mut(m) {
                object.position = offset(object.position, direction);
            }
        }

        for push in &tree.pushes {
            let (active, passive) = (push.active, push.passive);
            let event = push.active_event(direction);
            self.with_behavior(active, |b, world| b.on_push(world, active, event));
            let event = push.passive_event(direction);
            self.with_behavior(passive, |b, world| b.on_pushed(world, passive, event));
        }
        for overlap in &tree.overlaps {
            let (active, passive) = (overlap.active, overlap.passive);
            let event = overlap.active_event(direction);
            self.with_behavior(active, |b, world| b.on_overlap(world, active, event));
            let event = overlap.passive_event(direction);
            self.with_behavior(passive, |b, world| b.on_overlapped(world, passive, event));
        }
        for exit in &tree.exits {
            let (active, passive) = (exit.active, exit.passive);
            let event = exit.active_event(direction);
            self.with_behavior(active, |b, world| b.on_overlap_exit(world, active, event));
            let event = exit.passive_event(direction);
            self.with_behavior(passive, |b, world| {
                b.on_overlapped_exit(world, passive, event)
            });
        }
        for &m in &moved {
            self.with_behavior(m, |b, world| b.on_move(world, m, direction));
        }
        true
    }

    /// Classifies every other object of the layer against `mover` moving by
    /// `direction`, appending results to `tree`.
    fn expand_movement_tree(
        &self,
        mover: ObjectId,
        direction: Point<i32>,
        layer_objects: &[ObjectId],
        tree: &mut MovementTree,
    ) {
        let Some(this) = self.objects.get(mover) else {
            return;
        };

        for &other_id in layer_objects {
            if other_id == mover || tree.is_committed(other_id) {
                continue;
            }
            let Some(other) = self.objects.get(other_id) else {
                continue;
            };

            let mut result = CollisionResult::Overlap;
            let mut contact = None;

            for (c, collider) in this.colliders.iter().enumerate() {
                if !collider.is_effective() {
                    continue;
                }
                let pos = offset(this.position, collider.relative_position);
                let future = offset(pos, direction);

                for (oc, other_collider) in other.colliders.iter().enumerate() {
                    if !other_collider.is_effective() {
                        continue;
                    }
                    let other_pos = offset(other.position, other_collider.relative_position);
                    let pair = Contact {
                        active: mover,
                        active_collider: c,
                        passive: other_id,
                        passive_collider: oc,
                    };

                    let potential = self
                        .collision
                        .classify(collider.collider_type, other_collider.collider_type);
                    match potential {
                        CollisionResult::Overlap => {
                            let now = colliders_overlap(collider, pos, other_collider, other_pos);
                            let next =
                                colliders_overlap(collider, future, other_collider, other_pos);
                            if !now && next {
                                tree.overlaps.push(pair);
                            } else if now && !next {
                                tree.exits.push(pair);
                            }
                        }
                        // a push already decided this pair
                        _ if result == CollisionResult::Push => {}
                        _ if result == potential => {}
                        _ => {
                            if colliders_overlap(collider, future, other_collider, other_pos) {
                                if (potential == CollisionResult::Block && contact.is_none())
                                    || potential == CollisionResult::Push
                                {
                                    contact = Some(pair);
                                }
                                result = potential;
                            }
                        }
                    }
                }
            }

            match (result, contact) {
                (CollisionResult::Block, Some(pair)) => tree.blocks.push(pair),
                (CollisionResult::Push, Some(pair)) => tree.pushes.push(pair),
                _ => {}
            }
        }
    }
}
