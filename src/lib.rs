//! X-Ray Tracing Library
//!
//! Casts one ray per film pixel from a point emitter through triangulated meshes and turns the
//! distance travelled inside each mesh into a grayscale radiograph.

use nalgebra::Vector3;

pub mod films;
pub mod machine;
pub mod materials;
pub mod objects;
pub mod scene;
pub mod utils;

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;

/// Prelude
pub mod prelude {
    pub use crate::films::{Film, FilmConfig, FilmError, Intensity};
    pub use crate::machine::XRayMachine;
    pub use crate::materials::MaterialLibrary;
    pub use crate::objects::{Intersection, Mesh, MeshError, Triangle};
    pub use crate::scene::{Scene, SceneConfig, SceneError};
    pub use crate::{Point, Ray, Vec3};
}

/// The ray in ray tracing
///
/// Goes from the emitter through a target point on the film. The direction is not normalized, so
/// a parameter of 1 lands exactly on the target.
#[derive(Debug, Clone)]
pub struct Ray {
    pub orig: Point,
    pub target: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, target: Point) -> Self {
        Self {
            orig,
            target,
            dir: target - orig,
        }
    }

    pub fn get(&self, r: f64) -> Point {
        self.orig + r * self.dir
    }
}
