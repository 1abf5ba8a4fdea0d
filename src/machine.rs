//! The x-ray machine
//!
//! Brute force: for every pixel, send a ray from the emitter through every mesh and subtract the
//! attenuation of each stretch travelled inside one. For simple models and small images this is
//! enough, so there is no acceleration structure.
use indicatif::ProgressBar;
use log::{info, trace};

use crate::{
    films::{Film, FilmError, Intensity},
    objects::Mesh,
    utils, Point, Ray,
};

/// Intensity of a ray that crossed nothing
pub const MAX_INTENSITY: f64 = Intensity::MAX as f64;

/// Drives the scan, one ray per film pixel
#[derive(Clone)]
pub struct XRayMachine {
    progress: ProgressBar,
}
impl Default for XRayMachine {
    fn default() -> Self {
        Self {
            progress: ProgressBar::hidden(),
        }
    }
}
impl XRayMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress on `bar`, one tick per film column
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Expose every pixel of the film
    ///
    /// Assumes every mesh is closed and consistently oriented, and that the emitter is outside
    /// all of them: the sorted crossings of a ray then alternate entering and leaving the mesh.
    /// When that does not hold the image is wrong but the scan still completes.
    ///
    /// The result only depends on the inputs, scanning twice gives the same pixels.
    pub fn scan(&self, emitter: &Point, meshes: &[Mesh], film: &mut Film) -> Result<(), FilmError> {
        info!(
            "scanning {}x{} film through {} meshes",
            film.x_resolution(),
            film.y_resolution(),
            meshes.len()
        );
        self.progress.set_length(film.x_resolution() as u64);

        for x in 0..film.x_resolution() {
            for y in 0..film.y_resolution() {
                let ray = Ray::new(*emitter, film.position_of_pixel(x, y));
                let intensity = Self::pixel_value(&ray, meshes);
                trace!("pixel ({x}, {y}): {intensity}");
                film.expose(x, y, intensity)?;
            }
            self.progress.inc(1);
        }

        self.progress.finish();
        info!("scan complete");
        Ok(())
    }

    /// Pixel value for a single ray
    ///
    /// Inverted like a real radiograph: the more material crossed, the brighter.
    pub fn pixel_value(ray: &Ray, meshes: &[Mesh]) -> Intensity {
        let mut intensity = MAX_INTENSITY;

        for mesh in meshes {
            let hits = mesh.intersect(ray);
            if hits.is_empty() {
                continue;
            }
            let crossings = sorted_crossings(hits, &ray.orig);
            intensity = attenuate(intensity, &crossings, mesh.shielding_strength());
        }

        // So much material that the ray stopped before the film
        let intensity = intensity.max(0.0);
        Intensity::MAX - intensity as Intensity
    }
}

/// Sort hits by distance from the emitter and drop repeated points
///
/// A ray through an edge shared by two triangles hits both at the same spot. Only exact
/// duplicates are removed.
pub fn sorted_crossings(mut hits: Vec<Point>, emitter: &Point) -> Vec<Point> {
    hits.sort_by(|a, b| utils::distance(a, emitter).total_cmp(&utils::distance(b, emitter)));
    hits.dedup_by(|a, b| utils::same_point(a, b));
    hits
}

/// Walk the sorted crossings of one mesh, subtracting each inside stretch from `intensity`
///
/// The first pair of crossings is inside, the next stretch outside, and so on. Stretches are
/// subtracted one at a time, in order along the ray. With an odd count the last crossing has no
/// partner and is ignored.
pub fn attenuate(intensity: f64, crossings: &[Point], shielding_strength: f64) -> f64 {
    crossings
        .windows(2)
        .step_by(2)
        .fold(intensity, |intensity, pair| {
            intensity - utils::distance(&pair[0], &pair[1]) * shielding_strength
        })
}
