use crate::Message;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path},
    Color, Point, Rectangle, Renderer, Theme,
};
use radarcore::prelude::Rgb;
use radarcore::render::{RenderedFrame, Shape};

/// Paints the rasterizer's latest frame onto an iced canvas.
pub struct RadarView<'a> {
    frame: &'a RenderedFrame,
}

impl<'a> RadarView<'a> {
    pub fn new(frame: &'a RenderedFrame) -> Self {
        Self { frame }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.r, rgb.g, rgb.b)
}

impl canvas::Program<Message> for RadarView<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            to_color(self.frame.background),
        );

        // the canvas may be laid out at a different size than the viewport
        let sx = bounds.width / self.frame.width.max(1.0);
        let sy = bounds.height / self.frame.height.max(1.0);

        for primitive in &self.frame.primitives {
            let color = to_color(primitive.color);
            match &primitive.shape {
                Shape::Polygon(points) => {
                    let path = Path::new(|builder| {
                        for (i, point) in points.iter().enumerate() {
                            let p = Point::new(point.x * sx, point.y * sy);
                            if i == 0 {
                                builder.move_to(p);
                            } else {
                                builder.line_to(p);
                            }
                        }
                        builder.close();
                    });
                    frame.fill(&path, color);
                }
                Shape::Disc { center, radius } => {
                    let marker = Path::circle(
                        Point::new(center.x * sx, center.y * sy),
                        radius * sx.min(sy),
                    );
                    frame.fill(&marker, color);
                }
            }
        }

        vec![frame.into_geometry()]
    }
}
