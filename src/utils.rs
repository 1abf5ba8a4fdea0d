//! Utils

use serde::{Deserialize, Serialize};

use crate::{Point, Vec3};

/// Vector as it appears in config files
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SerdeVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}
impl From<Vec3> for SerdeVector {
    fn from(v: Vec3) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

/// Euclidean distance between two points
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a - b).norm()
}

/// Exact zero-length test, no tolerance
pub fn is_zero_length(v: &Vec3) -> bool {
    v.norm_squared() == 0.0
}

/// Exact coordinate equality
pub fn same_point(a: &Point, b: &Point) -> bool {
    a[0] == b[0] && a[1] == b[1] && a[2] == b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_algebra() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, -1.0);
        assert_eq!(a - b, Vec3::new(-1.0, 0.0, 1.0));

        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));

        assert!(is_zero_length(&a));
        assert!(!is_zero_length(&b));
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(x.dot(&x), 1.0);
    }

    #[test]
    fn zero_length_has_no_tolerance() {
        assert!(!is_zero_length(&Vec3::new(1e-200, 0.0, 0.0)));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(1.0, 2.0, 2.0);
        let o = Point::zeros();
        assert_eq!(distance(&a, &o), 3.0);
        assert_eq!(distance(&o, &a), 3.0);
    }

    #[test]
    fn serde_vector_converts() {
        let v: Vec3 = SerdeVector {
            x: 1.0,
            y: -2.0,
            z: 0.5,
        }
        .into();
        assert_eq!(v, Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(SerdeVector::from(v).y, -2.0);
    }
}
