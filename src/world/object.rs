use common_stdx::Point;

use crate::world::{
    LayerId, ObjectId, World, behavior::ObjectBehavior, collider::Collider, texture::Texture,
};

/// A positioned entity carrying textures and colliders.
pub struct Object {
    pub name: String,
    pub position: Point<i32>,
    pub textures: Vec<Texture>,
    pub colliders: Vec<Collider>,
    pub(crate) parent_layer: Option<LayerId>,
    pub(crate) behavior: Option<Box<dyn ObjectBehavior>>,
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("textures", &self.textures.len())
            .field("colliders", &self.colliders.len())
            .field("parent_layer", &self.parent_layer)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}

impl Object {
    pub fn new(position: Point<i32>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            textures: Vec::new(),
            colliders: Vec::new(),
            parent_layer: None,
            behavior: None,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.textures.push(texture);
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.colliders.push(collider);
        self
    }

    pub fn with_behavior(mut self, behavior: impl ObjectBehavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn set_behavior(&mut self, behavior: impl ObjectBehavior + 'static) {
        self.behavior = Some(Box::new(behavior));
    }

    pub fn take_behavior(&mut self) -> Option<Box<dyn ObjectBehavior>> {
        self.behavior.take()
    }

    pub fn parent_layer(&self) -> Option<LayerId> {
        self.parent_layer
    }
}

impl World {
    /// Stores an object that doesn't belong to any layer yet.
    pub fn add_object(&mut self, mut object: Object) -> ObjectId {
        object.parent_layer = None;
        self.objects.insert(object)
    }

    /// Stores an object and appends it to `layer`.
    pub fn spawn_object(&mut self, object: Object, layer: LayerId) -> ObjectId {
        let id = self.add_object(object);
        self.enter_layer(id, layer);
        id
    }

    /// Removes an object, detaching it from its layer first.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Object> {
        self.leave_layer(id);
        self.objects.remove(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    /// Moves `object` into `layer`, leaving its previous layer.
    pub fn enter_layer(&mut self, object: ObjectId, layer: LayerId) -> bool {
        if !self.objects.contains(object) || !self.layers.contains(layer) {
            return false;
        }
        self.leave_layer(object);
        if let Some(l) = self.layers.get_mut(layer) {
            l.objects.push(object);
        }
        if let Some(o) = self.objects.get_mut(object) {
            o.parent_layer = Some(layer);
        }
        true
    }

    pub fn leave_layer(&mut self, object: ObjectId) -> bool {
        let Some(layer) = self.objects.get_mut(object).and_then(|o| o.parent_layer.take()) else {
            return false;
        };
        if let Some(l) = self.layers.get_mut(layer) {
            l.objects.retain(|&o| o != object);
        }
        true
    }
}
