use crate::math::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    /// Centre of the circle in the owning body's local frame.
    pub offset: Vec2,
}

impl Circle {
    pub fn new(radius: f64, offset: Vec2) -> Self {
        assert!(radius >= 0.0, "Circle radius cannot be negative");
        Self { radius, offset }
    }

    /// A circle centred on the body origin.
    pub fn centered(radius: f64) -> Self {
        Self::new(radius, Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_new() {
        let c = Circle::new(5.0, Vec2::new(1.0, 0.0));
        assert_eq!(c.radius, 5.0);
        assert_eq!(c.offset, Vec2::new(1.0, 0.0));
        assert_eq!(Circle::centered(15.0).offset, Vec2::ZERO);
    }

    #[test]
    #[should_panic]
    fn test_circle_new_negative_radius() {
        Circle::centered(-1.0);
    }
}
