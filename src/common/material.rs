//! Surface properties used by contact resolution.

/// Physical properties of a shape's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient of restitution. Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub elasticity: f64,
    /// Coulomb friction coefficient. Range [0, infinity).
    pub friction: f64,
}

impl Material {
    /// Creates a new material, clamping both values into their valid ranges.
    pub fn new(elasticity: f64, friction: f64) -> Self {
        Material {
            elasticity: elasticity.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }

    /// Elasticity of a contact between two materials.
    pub fn combined_elasticity(&self, other: &Material) -> f64 {
        self.elasticity * other.elasticity
    }

    /// Friction of a contact between two materials.
    pub fn combined_friction(&self, other: &Material) -> f64 {
        self.friction * other.friction
    }
}

impl Default for Material {
    /// Frictionless, inelastic surface.
    fn default() -> Self {
        Material {
            elasticity: 0.0,
            friction: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_clamps() {
        let m = Material::new(1.5, -0.2);
        assert_eq!(m.elasticity, 1.0);
        assert_eq!(m.friction, 0.0);
    }

    #[test]
    fn test_material_combines_by_product() {
        let ball = Material::new(0.5, 0.7);
        let lever = Material::new(0.0, 0.7);
        assert_eq!(ball.combined_elasticity(&lever), 0.0);
        assert!((ball.combined_friction(&lever) - 0.49).abs() < 1e-12);
    }
}
