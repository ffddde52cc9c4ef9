use std::{cell::RefCell, rc::Rc};

use common_stdx::Point;

use crate::{
    time::{InvocationId, Measurement},
    world::{ObjectId, World},
};

/// One step of an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Teleports the object, ignoring collision.
    ParentSetPosition(Point<i32>),
    /// Moves the object through the collision engine.
    ParentMove(Point<i32>),
    /// Shows only the texture at this index.
    TextureSet(usize),
    TextureSetPosition(usize, Point<i32>),
    TextureMove(usize, Point<i32>),
    TextureShow(usize),
    TextureHide(usize),
    /// Pauses the script.
    Delay(u64, Measurement),
}

#[derive(Debug)]
struct AnimationState {
    object: ObjectId,
    instructions: Vec<Instruction>,
    cursor: usize,
    invocation: Option<InvocationId>,
}

/// A script of instructions played against one object, paused by invocations.
///
/// Cloning yields another handle to the same playback.
#[derive(Debug, Clone)]
pub struct Animation {
    state: Rc<RefCell<AnimationState>>,
}

impl Animation {
    pub fn new(object: ObjectId, instructions: Vec<Instruction>) -> Self {
        Self {
            state: Rc::new(RefCell::new(AnimationState {
                object,
                instructions,
                cursor: 0,
                invocation: None,
            })),
        }
    }

    /// Runs instructions until the next delay or the end of the script.
    ///
    /// Doesn't restart a finished animation, call [`Animation::stop`] first.
    /// Returns `true` if anything visible changed.
    pub fn play(&self, world: &mut World) -> bool {
        let mut changed = false;
        loop {
            let (object, instruction) = {
                let mut state = self.state.borrow_mut();
                let Some(&instruction) = state.instructions.get(state.cursor) else {
                    state.invocation = None;
                    return changed;
                };
                state.cursor += 1;
                (state.object, instruction)
            };

            if let Instruction::Delay(amount, measurement) = instruction {
                let next = self.clone();
                let id = world
                    .invocations
                    .invoke(amount, measurement, move |w| next.play(w));
                self.state.borrow_mut().invocation = Some(id);
                return changed;
            }
            changed |= apply(world, object, instruction);
        }
    }

    /// Cancels a pending delay and rewinds to the first instruction.
    pub fn stop(&self, world: &mut World) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.invocation.take() {
            world.invocations.cancel(id);
        }
        state.cursor = 0;
    }

    /// Whether playback is waiting on a delay.
    pub fn is_playing(&self, world: &World) -> bool {
        self.state
            .borrow()
            .invocation
            .is_some_and(|id| world.invocations.is_pending(id))
    }
}

fn apply(world: &mut World, id: ObjectId, instruction: Instruction) -> bool {
    if let Instruction::ParentMove(direction) = instruction {
        world.move_object(id, direction);
        return true;
    }
    let Some(object) = world.objects.get_mut(id) else {
        return false;
    };
    let textures = &mut object.textures;
    match instruction {
        Instruction::ParentSetPosition(position) => object.position = position,
        Instruction::TextureSet(index) => {
            for (i, texture) in textures.iter_mut().enumerate() {
                texture.active = i == index;
            }
        }
        Instruction::TextureSetPosition(index, position) => {
            if let Some(t) = textures.get_mut(index) {
                t.relative_position = position;
            }
        }
        Instruction::TextureMove(index, offset) => {
            if let Some(t) = textures.get_mut(index) {
                t.relative_position = crate::offset(t.relative_position, offset);
            }
        }
        Instruction::TextureShow(index) => {
            if let Some(t) = textures.get_mut(index) {
                t.active = true;
            }
        }
        Instruction::TextureHide(index) => {
            if let Some(t) = textures.get_mut(index) {
                t.active = false;
            }
        }
        Instruction::ParentMove(_) | Instruction::Delay(..) => return false,
    }
    true
}
