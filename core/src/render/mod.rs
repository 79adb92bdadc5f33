pub mod frame;
pub mod rasterizer;

pub use frame::{Primitive, RenderedFrame, ScreenPoint, Shape};
pub use rasterizer::Rasterizer;
