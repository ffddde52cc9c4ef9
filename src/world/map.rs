use crate::world::{CameraId, LayerId, MapId, World};

/// One game world: layers drawn bottom to top, and the cameras looking at them.
#[derive(Debug, Clone, Default)]
pub struct Map {
    pub name: String,
    pub active_camera: usize,
    pub(crate) layers: Vec<LayerId>,
    pub(crate) cameras: Vec<CameraId>,
}

impl Map {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    pub fn cameras(&self) -> &[CameraId] {
        &self.cameras
    }

    pub fn active_camera(&self) -> Option<CameraId> {
        self.cameras.get(self.active_camera).copied()
    }
}

impl World {
    pub fn add_map(&mut self, mut map: Map) -> MapId {
        map.layers.clear();
        map.cameras.clear();
        map.active_camera = 0;
        self.maps.insert(map)
    }

    /// Removes a map. Its layers and cameras survive without a parent.
    pub fn remove_map(&mut self, id: MapId) -> Option<Map> {
        let map = self.maps.remove(id)?;
        for &layer in &map.layers {
            if let Some(l) = self.layers.get_mut(layer) {
                l.parent_map = None;
            }
        }
        for &camera in &map.cameras {
            if let Some(c) = self.cameras.get_mut(camera) {
                c.parent_map = None;
            }
        }
        Some(map)
    }

    pub fn map(&self, id: MapId) -> Option<&Map> {
        self.maps.get(id)
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut Map> {
        self.maps.get_mut(id)
    }

    /// Appends `layer` on top of the map's layers, leaving its previous map.
    pub fn map_add_layer(&mut self, map: MapId, layer: LayerId) -> bool {
        if !self.maps.contains(map) || !self.layers.contains(layer) {
            return false;
        }
        self.map_remove_layer(layer);
        if let Some(m) = self.maps.get_mut(map) {
            m.layers.push(layer);
        }
        if let Some(l) = self.layers.get_mut(layer) {
            l.parent_map = Some(map);
        }
        true
    }

    pub fn map_remove_layer(&mut self, layer: LayerId) -> bool {
        let Some(map) = self.layers.get_mut(layer).and_then(|l| l.parent_map.take()) else {
            return false;
        };
        if let Some(m) = self.maps.get_mut(map) {
            m.layers.retain(|&l| l != layer);
        }
        true
    }

    /// Adds `camera` to the map, optionally making it the active one.
    pub fn map_add_camera(&mut self, map: MapId, camera: CameraId, make_active: bool) -> bool {
        if !self.maps.contains(map) || !self.cameras.contains(camera) {
            return false;
        }
        self.map_remove_camera(camera);
        if let Some(m) = self.maps.get_mut(map) {
            m.cameras.push(camera);
            if make_active {
                m.active_camera = m.cameras.len() - 1;
            }
        }
        if let Some(c) = self.cameras.get_mut(camera) {
            c.parent_map = Some(map);
        }
        true
    }

    pub fn map_remove_camera(&mut self, camera: CameraId) -> bool {
        let Some(map) = self.cameras.get_mut(camera).and_then(|c| c.parent_map.take()) else {
            return false;
        };
        if let Some(m) = self.maps.get_mut(map) {
            if let Some(i) = m.cameras.iter().position(|&c| c == camera) {
                m.cameras.remove(i);
                if m.active_camera > i {
                    m.active_camera -= 1;
                } else if m.active_camera == i {
                    // fall back to the first camera
                    m.active_camera = 0;
                }
            }
        }
        true
    }

    /// Renders the map's active camera. Returns `false` if there is none.
    pub fn render_map(&mut self, map: MapId) -> bool {
        match self.maps.get(map).and_then(Map::active_camera) {
            Some(camera) => self.render_camera(camera),
            None => false,
        }
    }
}
