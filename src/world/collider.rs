use common_stdx::Point;

use crate::{UPoint, color::CellA, world::texture::Texture};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColliderShape {
    /// Solid rectangle covering the whole size.
    Simple,
    /// Row-major occupancy mask, always `size.x * size.y` long.
    Complex(Vec<bool>),
}

/// An occupancy region tagged with a type that indexes the collision matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collider {
    pub active: bool,
    pub collider_type: u8,
    pub relative_position: Point<i32>,
    size: UPoint,
    shape: ColliderShape,
}

impl Collider {
    pub fn simple(size: UPoint, collider_type: u8, relative_position: Point<i32>) -> Self {
        Self {
            active: true,
            collider_type,
            relative_position,
            size,
            shape: ColliderShape::Simple,
        }
    }

    /// Builds a mask from text rows, any non-space character is solid.
    pub fn write<S: AsRef<str>>(
        rows: &[S],
        collider_type: u8,
        relative_position: Point<i32>,
    ) -> Self {
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut mask = vec![false; width * rows.len()];
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.as_ref().chars().enumerate() {
                mask[y * width + x] = c != ' ';
            }
        }
        Self {
            active: true,
            collider_type,
            relative_position,
            size: Point::new(width as u32, rows.len() as u32),
            shape: ColliderShape::Complex(mask),
        }
    }

    fn from_texture(
        texture: &Texture,
        collider_type: u8,
        solid: impl Fn(&CellA) -> bool,
    ) -> Self {
        Self {
            active: true,
            collider_type,
            relative_position: texture.relative_position,
            size: texture.size(),
            shape: ColliderShape::Complex(texture.cells().iter().map(solid).collect()),
        }
    }

    /// Solid wherever the texture's character differs from `excluded`.
    pub fn by_texture_character(texture: &Texture, collider_type: u8, excluded: char) -> Self {
        Self::from_texture(texture, collider_type, |c| c.character != excluded)
    }

    /// Solid wherever the texture's background alpha exceeds `alpha_threshold`.
    pub fn by_texture_background(texture: &Texture, collider_type: u8, alpha_threshold: u8) -> Self {
        Self::from_texture(texture, collider_type, |c| c.background.a > alpha_threshold)
    }

    /// Solid wherever the texture's foreground alpha exceeds `alpha_threshold`.
    pub fn by_texture_foreground(texture: &Texture, collider_type: u8, alpha_threshold: u8) -> Self {
        Self::from_texture(texture, collider_type, |c| c.foreground.a > alpha_threshold)
    }

    pub fn size(&self) -> UPoint {
        self.size
    }

    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    pub fn is_simple(&self) -> bool {
        matches!(self.shape, ColliderShape::Simple)
    }

    /// Whether this collider takes part in collision at all.
    pub fn is_effective(&self) -> bool {
        self.active && self.size.x > 0 && self.size.y > 0
    }

    /// Local occupancy query, out of range is empty.
    pub fn occupied(&self, x: u32, y: u32) -> bool {
        if x >= self.size.x || y >= self.size.y {
            return false;
        }
        match &self.shape {
            ColliderShape::Simple => true,
            ColliderShape::Complex(mask) => mask
                .get(y as usize * self.size.x as usize + x as usize)
                .copied()
                .unwrap_or(false),
        }
    }
}
