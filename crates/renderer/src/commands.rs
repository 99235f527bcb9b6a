use crate::geometry::{Point, Rect};
use ping_theme::Color;

/// Where a text command's position sits relative to the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Position is the right edge, vertically centred.
    MiddleRight,
}

/// One drawing primitive.  The host shell replays these onto its canvas in
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect:  Rect,
        color: Color,
    },
    Line {
        from:  Point,
        to:    Point,
        color: Color,
        width: f32,
    },
    /// Open stroked path through `points`.
    Polyline {
        points: Vec<Point>,
        color:  Color,
        width:  f32,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color:  Color,
    },
    Text {
        position: Point,
        text:     String,
        color:    Color,
        size:     f32,
        anchor:   TextAnchor,
    },
}
