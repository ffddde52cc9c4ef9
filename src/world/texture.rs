use std::path::Path;

use common_stdx::Point;
use log::warn;

use crate::{
    UPoint,
    color::{CellA, Rgba, colors},
    error::FileError,
    world::texture_file,
};

#[derive(Debug, Clone, PartialEq)]
pub enum TextureKind {
    /// One value broadcast over the whole size.
    Simple(CellA),
    /// Row-major cells, always `size.x * size.y` long.
    Complex(Vec<CellA>),
}

/// A rectangle of cells drawn at an offset from its owning object.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub active: bool,
    pub relative_position: Point<i32>,
    size: UPoint,
    kind: TextureKind,
}

fn area(size: UPoint) -> usize {
    size.x as usize * size.y as usize
}

impl Texture {
    pub fn simple(size: UPoint, value: CellA, relative_position: Point<i32>) -> Self {
        Self {
            active: true,
            relative_position,
            size,
            kind: TextureKind::Simple(value),
        }
    }

    /// A complex texture filled with `value`, editable cell by cell afterwards.
    pub fn rectangle(size: UPoint, value: CellA, relative_position: Point<i32>) -> Self {
        Self {
            active: true,
            relative_position,
            size,
            kind: TextureKind::Complex(vec![value; area(size)]),
        }
    }

    /// Builds a texture out of text rows.
    ///
    /// Every non-space character gets `foreground` and `background`, spaces are
    /// fully transparent. Short rows are padded with transparent cells.
    pub fn write<S: AsRef<str>>(
        rows: &[S],
        foreground: Rgba,
        background: Rgba,
        relative_position: Point<i32>,
    ) -> Self {
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let size = Point::new(width as u32, rows.len() as u32);
        let mut cells = vec![CellA::default(); area(size)];
        for (y, row) in rows.iter().enumerate() {
            for (x, character) in row.as_ref().chars().enumerate() {
                if character != ' ' {
                    cells[y * width + x] = CellA::new(character, foreground, background);
                }
            }
        }
        Self {
            active: true,
            relative_position,
            size,
            kind: TextureKind::Complex(cells),
        }
    }

    /// The 2x2 checkerboard substituted for textures that failed to load.
    pub fn missing(relative_position: Point<i32>) -> Self {
        let magenta = CellA::new(' ', colors::TRANSPARENT, colors::MAGENTA);
        let black = CellA::new(' ', colors::TRANSPARENT, colors::BLACK);
        Self {
            active: true,
            relative_position,
            size: Point::new(2, 2),
            kind: TextureKind::Complex(vec![magenta, black, black, magenta]),
        }
    }

    /// Loads a texture file, substituting [`Texture::missing`] when it can't be read.
    pub fn from_file(path: impl AsRef<Path>, relative_position: Point<i32>) -> Self {
        match Self::try_from_file(&path, relative_position) {
            Ok(texture) => texture,
            Err(e) => {
                warn!("using missing texture placeholder: {e}");
                Self::missing(relative_position)
            }
        }
    }

    pub fn try_from_file(
        path: impl AsRef<Path>,
        relative_position: Point<i32>,
    ) -> Result<Self, FileError> {
        let (size, cells) = texture_file::read(path.as_ref())?;
        Ok(Self {
            active: true,
            relative_position,
            size,
            kind: TextureKind::Complex(cells),
        })
    }

    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let cells = self.cells();
        texture_file::write(path.as_ref(), self.size, &cells)
    }

    pub fn size(&self) -> UPoint {
        self.size
    }

    pub fn kind(&self) -> &TextureKind {
        &self.kind
    }

    pub fn is_simple(&self) -> bool {
        matches!(self.kind, TextureKind::Simple(_))
    }

    /// All cells in row-major order, expanding a simple texture.
    pub fn cells(&self) -> Vec<CellA> {
        match &self.kind {
            TextureKind::Simple(value) => vec![*value; area(self.size)],
            TextureKind::Complex(cells) => cells.clone(),
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&CellA> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        match &self.kind {
            TextureKind::Simple(value) => Some(value),
            TextureKind::Complex(cells) => cells.get(self.size.x as usize * y as usize + x as usize),
        }
    }

    /// Mutable access to one cell. A simple texture is converted to complex first.
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut CellA> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        let width = self.size.x as usize;
        match self.complexify() {
            TextureKind::Complex(cells) => cells.get_mut(width * y as usize + x as usize),
            TextureKind::Simple(_) => None,
        }
    }

    pub fn set_cell(&mut self, x: u32, y: u32, value: CellA) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Turns a simple texture into an equivalent complex one.
    pub fn complexify(&mut self) -> &mut TextureKind {
        if let TextureKind::Simple(value) = self.kind {
            self.kind = TextureKind::Complex(vec![value; area(self.size)]);
        }
        &mut self.kind
    }

    /// Collapses a texture to a simple one filled with `value`.
    pub fn simplify(&mut self, value: CellA) {
        self.kind = TextureKind::Simple(value);
    }

    /// Changes the size. Overlapping cells are kept, new cells get `fill`.
    pub fn resize(&mut self, size: UPoint, fill: CellA) {
        if let TextureKind::Complex(cells) = &mut self.kind {
            let mut resized = vec![fill; area(size)];
            let copy_w = self.size.x.min(size.x) as usize;
            let copy_h = self.size.y.min(size.y) as usize;
            for y in 0..copy_h {
                let src = y * self.size.x as usize;
                let dst = y * size.x as usize;
                resized[dst..dst + copy_w].copy_from_slice(&cells[src..src + copy_w]);
            }
            *cells = resized;
        }
        self.size = size;
    }

    fn for_each_cell(&mut self, mut f: impl FnMut(&mut CellA)) {
        match &mut self.kind {
            TextureKind::Simple(value) => f(value),
            TextureKind::Complex(cells) => cells.iter_mut().for_each(f),
        }
    }

    pub fn set_foreground(&mut self, value: Rgba) {
        self.for_each_cell(|c| c.foreground = value);
    }

    pub fn set_background(&mut self, value: Rgba) {
        self.for_each_cell(|c| c.background = value);
    }

    pub fn set_character(&mut self, value: char) {
        self.for_each_cell(|c| c.character = value);
    }

    pub fn set_foreground_alpha(&mut self, alpha: u8) {
        self.for_each_cell(|c| c.foreground.a = alpha);
    }

    pub fn set_background_alpha(&mut self, alpha: u8) {
        self.for_each_cell(|c| c.background.a = alpha);
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.for_each_cell(|c| {
            c.foreground.a = alpha;
            c.background.a = alpha;
        });
    }

    pub fn replace_character(&mut self, from: char, to: char) {
        self.for_each_cell(|c| {
            if c.character == from {
                c.character = to;
            }
        });
    }
}
