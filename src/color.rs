#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composites a colour produced by [`Rgba::bake_with`] over this one.
    ///
    /// The baked colour carries pre-multiplied channels and its effective alpha,
    /// so this is `baked + self * (255 - alpha) / 255` per channel.
    pub fn draw_baked(&mut self, baked: Rgba) {
        let keep = 255 - baked.a as u16;
        self.r = baked.r.saturating_add((self.r as u16 * keep / 255) as u8);
        self.g = baked.g.saturating_add((self.g as u16 * keep / 255) as u8);
        self.b = baked.b.saturating_add((self.b as u16 * keep / 255) as u8);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Scales the alpha by `alpha` and pre-multiplies the channels with the result.
    ///
    /// Returns `None` when the effective alpha is zero, meaning drawing the
    /// colour would not change anything.
    pub fn bake_with(&self, alpha: u8) -> Option<Rgba> {
        let effective = (self.a as u16 * alpha as u16 / 255) as u8;
        if effective == 0 {
            return None;
        }
        let scale = |c: u8| (c as u16 * effective as u16 / 255) as u8;
        Some(Rgba::new(
            scale(self.r),
            scale(self.g),
            scale(self.b),
            effective,
        ))
    }

    pub fn bake(&self) -> Option<Rgba> {
        self.bake_with(255)
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Rgba::new(c.r, c.g, c.b, 255)
    }
}

pub mod colors {
    use super::{Rgb, Rgba};

    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const GRAY: Rgba = Rgba::new(128, 128, 128, 255);
    pub const RED: Rgba = Rgba::new(255, 0, 0, 255);
    pub const GREEN: Rgba = Rgba::new(0, 255, 0, 255);
    pub const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
    pub const YELLOW: Rgba = Rgba::new(255, 255, 0, 255);
    pub const CYAN: Rgba = Rgba::new(0, 255, 255, 255);
    pub const MAGENTA: Rgba = Rgba::new(255, 0, 220, 255);

    pub const RGB_BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RGB_WHITE: Rgb = Rgb::new(255, 255, 255);
}

/// An opaque, printable terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub character: char,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Cell {
    pub const fn new(character: char, foreground: Rgb, background: Rgb) -> Self {
        Self {
            character,
            foreground,
            background,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::new(' ', colors::RGB_BLACK, colors::RGB_BLACK)
    }
}

/// Flattens every colour over black using its own alpha.
impl From<CellA> for Cell {
    fn from(cell: CellA) -> Self {
        let flatten = |c: Rgba| {
            let mut base = colors::RGB_BLACK;
            if let Some(baked) = c.bake() {
                base.draw_baked(baked);
            }
            base
        };
        Cell::new(
            cell.character,
            flatten(cell.foreground),
            flatten(cell.background),
        )
    }
}

/// A cell that still carries alpha, used while compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellA {
    pub character: char,
    pub foreground: Rgba,
    pub background: Rgba,
}

impl CellA {
    pub const fn new(character: char, foreground: Rgba, background: Rgba) -> Self {
        Self {
            character,
            foreground,
            background,
        }
    }
}

impl Default for CellA {
    fn default() -> Self {
        CellA::new(' ', colors::TRANSPARENT, colors::TRANSPARENT)
    }
}

/// Space means "nothing here", so earlier characters show through.
pub(crate) fn draws_character(c: char) -> bool {
    c != ' '
}

/// Blends a source cell onto a destination cell with an extra alpha factor.
pub(crate) fn composite(dst: &mut Cell, src: &CellA, alpha: u8) {
    if draws_character(src.character) {
        dst.character = src.character;
    }
    if let Some(baked) = src.foreground.bake_with(alpha) {
        dst.foreground.draw_baked(baked);
    }
    if let Some(baked) = src.background.bake_with(alpha) {
        dst.background.draw_baked(baked);
    }
}
