use crate::prelude::Rgb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon(Vec<ScreenPoint>),
    Disc { center: ScreenPoint, radius: f32 },
}

/// One flat-coloured 2D shape with the view depth it was projected from.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub depth: f32,
    pub color: Rgb,
    pub shape: Shape,
}

/// Output of one render pass, primitives ordered back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub width: f32,
    pub height: f32,
    pub background: Rgb,
    pub primitives: Vec<Primitive>,
}

impl RenderedFrame {
    pub fn blank(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Rgb::from_hex(0x000000),
            primitives: Vec::new(),
        }
    }

    pub fn discs(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p.shape, Shape::Disc { .. }))
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p.shape, Shape::Polygon(_)))
    }
}

impl Default for RenderedFrame {
    fn default() -> Self {
        Self::blank(0.0, 0.0)
    }
}
