use crate::{
    color::{Rgba, colors},
    world::{LayerId, MapId, ObjectId, World},
};

/// An ordered group of objects that render together and collide with each other.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    /// Opacity applied to every texture in the layer.
    pub alpha: u8,
    /// Tint composited over all foregrounds after the layer is drawn.
    pub frgba: Rgba,
    /// Tint composited over all backgrounds after the layer is drawn.
    pub brgba: Rgba,
    pub(crate) objects: Vec<ObjectId>,
    pub(crate) parent_map: Option<MapId>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            name: String::new(),
            visible: true,
            alpha: 255,
            frgba: colors::TRANSPARENT,
            brgba: colors::TRANSPARENT,
            objects: Vec::new(),
            parent_map: None,
        }
    }
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub fn parent_map(&self) -> Option<MapId> {
        self.parent_map
    }
}

impl World {
    pub fn add_layer(&mut self, mut layer: Layer) -> LayerId {
        layer.objects.clear();
        layer.parent_map = None;
        self.layers.insert(layer)
    }

    /// Removes a layer. Its objects stay alive but lose their parent layer.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        self.map_remove_layer(id);
        let layer = self.layers.remove(id)?;
        for &object in &layer.objects {
            if let Some(o) = self.objects.get_mut(object) {
                o.parent_layer = None;
            }
        }
        Some(layer)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }
}
