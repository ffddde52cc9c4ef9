use common_stdx::Point;

use crate::{
    UPoint,
    color::{Cell, CellA, Rgba, composite, draws_character},
    offset,
    registry::Registry,
    world::{
        CameraId, LayerId, MapId, World,
        layer::Layer,
        object::Object,
        texture::{Texture, TextureKind},
    },
};

/// A viewport that composites layers into an opaque cell image.
#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    pub position: Point<i32>,
    pub background: CellA,
    resolution: UPoint,
    image: Vec<Cell>,
    pub(crate) parent_map: Option<MapId>,
}

/// Visible part of a texture placed on the image.
struct Clip {
    src_x: usize,
    src_y: usize,
    dst_x: usize,
    dst_y: usize,
    width: usize,
    height: usize,
}

/// Clips a rectangle at `start` of `size` against `[0, res)` on each axis.
fn clip(start: Point<i32>, size: UPoint, res: UPoint) -> Option<Clip> {
    let axis = |start: i32, len: u32, res: u32| -> Option<(usize, usize, usize)> {
        let start = start as i64;
        let end = start + len as i64;
        let lo = start.max(0);
        let hi = end.min(res as i64);
        if lo >= hi {
            return None;
        }
        Some(((lo - start) as usize, lo as usize, (hi - lo) as usize))
    };
    let (src_x, dst_x, width) = axis(start.x, size.x, res.x)?;
    let (src_y, dst_y, height) = axis(start.y, size.y, res.y)?;
    Some(Clip {
        src_x,
        src_y,
        dst_x,
        dst_y,
        width,
        height,
    })
}

impl Camera {
    pub fn new(position: Point<i32>, resolution: UPoint, name: impl Into<String>) -> Self {
        let background = CellA::new(' ', Rgba::new(0, 0, 0, 255), Rgba::new(0, 0, 0, 255));
        Self {
            name: name.into(),
            position,
            background,
            resolution,
            image: vec![Cell::from(background); resolution.x as usize * resolution.y as usize],
            parent_map: None,
        }
    }

    pub fn with_background(mut self, background: CellA) -> Self {
        self.background = background;
        self
    }

    pub fn resolution(&self) -> UPoint {
        self.resolution
    }

    pub fn resize(&mut self, resolution: UPoint) {
        self.resolution = resolution;
        self.image.resize(
            resolution.x as usize * resolution.y as usize,
            Cell::from(self.background),
        );
    }

    pub fn parent_map(&self) -> Option<MapId> {
        self.parent_map
    }

    /// The last rendered image, row-major.
    pub fn image(&self) -> &[Cell] {
        &self.image
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        if x >= self.resolution.x || y >= self.resolution.y {
            return None;
        }
        self.image
            .get(y as usize * self.resolution.x as usize + x as usize)
    }

    /// Renders `layer_ids` bottom to top into a fresh image.
    ///
    /// Ids that no longer resolve are skipped.
    pub fn render(
        &mut self,
        layer_ids: &[LayerId],
        layers: &Registry<Layer>,
        objects: &Registry<Object>,
    ) {
        self.image.fill(Cell::from(self.background));

        for layer in layer_ids.iter().filter_map(|&id| layers.get(id)) {
            if !layer.visible {
                continue;
            }
            for object in layer.objects.iter().filter_map(|&id| objects.get(id)) {
                for texture in object.textures.iter().filter(|t| t.active) {
                    let placed = offset(object.position, texture.relative_position);
                    let start = Point::new(
                        placed.x.saturating_sub(self.position.x),
                        placed.y.saturating_sub(self.position.y),
                    );
                    self.render_texture(texture, start, layer.alpha);
                }
            }
            self.render_overlay(layer.frgba, layer.brgba);
        }
    }

    fn render_texture(&mut self, texture: &Texture, start: Point<i32>, layer_alpha: u8) {
        let Some(clip) = clip(start, texture.size(), self.resolution) else {
            return;
        };
        let res_x = self.resolution.x as usize;

        match texture.kind() {
            TextureKind::Simple(value) => {
                let draw_char = draws_character(value.character);
                let fg = value.foreground.bake_with(layer_alpha);
                let bg = value.background.bake_with(layer_alpha);
                for y in clip.dst_y..clip.dst_y + clip.height {
                    for cell in &mut self.image[y * res_x + clip.dst_x..][..clip.width] {
                        if draw_char {
                            cell.character = value.character;
                        }
                        if let Some(fg) = fg {
                            cell.foreground.draw_baked(fg);
                        }
                        if let Some(bg) = bg {
                            cell.background.draw_baked(bg);
                        }
                    }
                }
            }
            TextureKind::Complex(cells) => {
                let tex_x = texture.size().x as usize;
                for row in 0..clip.height {
                    let src = (clip.src_y + row) * tex_x + clip.src_x;
                    let dst = (clip.dst_y + row) * res_x + clip.dst_x;
                    let src_row = &cells[src..src + clip.width];
                    let dst_row = &mut self.image[dst..dst + clip.width];
                    for (d, s) in dst_row.iter_mut().zip(src_row) {
                        composite(d, s, layer_alpha);
                    }
                }
            }
        }
    }

    fn render_overlay(&mut self, frgba: Rgba, brgba: Rgba) {
        if let Some(f) = frgba.bake() {
            self.image.iter_mut().for_each(|c| c.foreground.draw_baked(f));
        }
        if let Some(b) = brgba.bake() {
            self.image.iter_mut().for_each(|c| c.background.draw_baked(b));
        }
    }
}

impl World {
    pub fn add_camera(&mut self, mut camera: Camera) -> CameraId {
        camera.parent_map = None;
        self.cameras.insert(camera)
    }

    pub fn remove_camera(&mut self, id: CameraId) -> Option<Camera> {
        self.map_remove_camera(id);
        self.cameras.remove(id)
    }

    pub fn camera(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(id)
    }

    pub fn camera_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(id)
    }

    /// Renders the layers of the camera's own map.
    pub fn render_camera(&mut self, camera: CameraId) -> bool {
        let Some(layers) = self
            .cameras
            .get(camera)
            .and_then(|c| c.parent_map)
            .and_then(|m| self.maps.get(m))
            .map(|m| m.layers.clone())
        else {
            return false;
        };
        self.render_camera_layers(camera, &layers)
    }

    /// Renders an explicit list of layers, e.g. a close-up of another camera's map.
    pub fn render_camera_layers(&mut self, camera: CameraId, layer_ids: &[LayerId]) -> bool {
        let World {
            cameras,
            layers,
            objects,
            ..
        } = self;
        match cameras.get_mut(camera) {
            Some(c) => {
                c.render(layer_ids, layers, objects);
                true
            }
            None => false,
        }
    }
}
