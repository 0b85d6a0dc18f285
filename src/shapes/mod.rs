pub mod circle;
pub mod segment;

pub use circle::Circle;
pub use segment::Segment;

/// Collision geometry attached to a rigid body, in body-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Segment(Segment),
}
