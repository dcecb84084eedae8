//! Point and vector types

use nalgebra::Point3;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// Sentinel marking a removed vertex, face slot or edge endpoint.
///
/// Never a valid index: no mesh can hold `usize::MAX` elements.
pub const NULL_INDEX: usize = usize::MAX;

/// Midpoint of two points
pub fn midpoint(a: &Point3d, b: &Point3d) -> Point3d {
    Point3d::from((a.coords + b.coords) * 0.5)
}

/// The point at infinity used to close mesh boundaries.
pub fn point_at_infinity() -> Point3d {
    Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midpoint() {
        let m = midpoint(&Point3d::new(0.0, 0.0, 0.0), &Point3d::new(2.0, -4.0, 1.0));
        assert_relative_eq!(m, Point3d::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn test_midpoint_with_infinity_stays_infinite() {
        let m = midpoint(&point_at_infinity(), &Point3d::new(1.0, 2.0, 3.0));
        assert!(m.coords.iter().all(|c| c.is_infinite()));
    }
}
