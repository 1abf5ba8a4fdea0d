//! Film and configs for films
//!
//! Stand-in for the film that receives the x-rays: a grid of grayscale pixels that also knows
//! where it sits in space, so rays can be aimed at it.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::{GrayImage, Luma};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Point;

/// Grayscale value, matches the PGM format
pub type Intensity = u8;

/// Errors raised by the film
#[derive(Debug, Error)]
pub enum FilmError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} film")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("failed to write film: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode film: {0}")]
    Image(#[from] image::ImageError),
}

/// Film Config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmConfig {
    pub x_resolution: usize,
    pub y_resolution: usize,
    pub z: f64,
    pub extent: f64,
}
impl Default for FilmConfig {
    fn default() -> Self {
        Self {
            x_resolution: 256,
            y_resolution: 256,
            z: -1.1,
            extent: 3.5,
        }
    }
}

/// Square film parallel to the XY plane, centered on the Z axis at depth `z`, `extent` units
/// on each side
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    x_resolution: usize,
    y_resolution: usize,
    z: f64,
    extent: f64,
    pixels: Vec<Intensity>,
}
impl Film {
    pub fn new(x_resolution: usize, y_resolution: usize, z: f64, extent: f64) -> Self {
        Self {
            x_resolution,
            y_resolution,
            z,
            extent,
            pixels: vec![0; x_resolution * y_resolution],
        }
    }

    pub fn from_config(config: &FilmConfig) -> Self {
        Self::new(
            config.x_resolution,
            config.y_resolution,
            config.z,
            config.extent,
        )
    }

    pub fn x_resolution(&self) -> usize {
        self.x_resolution
    }

    pub fn y_resolution(&self) -> usize {
        self.y_resolution
    }

    /// Linearized pixel buffer, `x + x_resolution * y`
    pub fn pixels(&self) -> &[Intensity] {
        &self.pixels
    }

    /// Reference position of the pixel in space
    ///
    /// This is the pixel's corner rather than its center; at the resolutions used it makes no
    /// visible difference. Coordinates are not bounds checked.
    pub fn position_of_pixel(&self, x: usize, y: usize) -> Point {
        Point::new(
            (x as f64 - self.x_resolution as f64 / 2.0) * self.extent / self.x_resolution as f64,
            (y as f64 - self.y_resolution as f64 / 2.0) * self.extent / self.y_resolution as f64,
            self.z,
        )
    }

    /// Send light to the pixel. 0 is black.
    pub fn expose(&mut self, x: usize, y: usize, intensity: Intensity) -> Result<(), FilmError> {
        let i = self.index_of(x, y)?;
        self.pixels[i] = intensity;
        Ok(())
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Intensity, FilmError> {
        Ok(self.pixels[self.index_of(x, y)?])
    }

    /// Write the film as a plain PGM (P2)
    ///
    /// One line per x, values separated (and trailed) by a space.
    pub fn dump_pgm<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink, "P2")?;
        writeln!(sink, "{} {}", self.x_resolution, self.y_resolution)?;
        writeln!(sink, "{}", Intensity::MAX)?;
        for x in 0..self.x_resolution {
            for y in 0..self.y_resolution {
                write!(sink, "{} ", self.pixels[x + self.x_resolution * y])?;
            }
            writeln!(sink)?;
        }
        Ok(())
    }

    /// Image laid out like the PGM dump: one image row per x
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(
            self.y_resolution as u32,
            self.x_resolution as u32,
            |col, row| Luma([self.pixels[row as usize + self.x_resolution * col as usize]]),
        )
    }

    /// Save to disk, as PGM for `.pgm` files and through `image` for anything else
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FilmError> {
        let path = path.as_ref();
        let is_pgm = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("pgm"));
        if is_pgm {
            let mut sink = BufWriter::new(File::create(path)?);
            self.dump_pgm(&mut sink)?;
            sink.flush()?;
        } else {
            self.to_image().save(path)?;
        }
        info!("saved film to {}", path.display());
        Ok(())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, FilmError> {
        if x >= self.x_resolution || y >= self.y_resolution {
            return Err(FilmError::OutOfBounds {
                x,
                y,
                width: self.x_resolution,
                height: self.y_resolution,
            });
        }
        Ok(x + self.x_resolution * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_positions() {
        let f = Film::new(512, 512, 10.0, 1.0);
        assert_eq!(f.position_of_pixel(256, 256), Point::new(0.0, 0.0, 10.0));
        assert_eq!(f.position_of_pixel(512, 512), Point::new(0.5, 0.5, 10.0));
        assert_eq!(f.position_of_pixel(0, 0), Point::new(-0.5, -0.5, 10.0));

        let f = Film::new(4, 8, -2.0, 3.0);
        assert_eq!(f.position_of_pixel(2, 4), Point::new(0.0, 0.0, -2.0));
        assert_eq!(f.position_of_pixel(3, 0), Point::new(0.75, -1.5, -2.0));
    }

    #[test]
    fn expose_and_read_back() {
        let mut f = Film::new(3, 2, 0.0, 1.0);
        f.expose(2, 1, 200).unwrap();
        assert_eq!(f.get(2, 1).unwrap(), 200);
        assert_eq!(f.get(1, 1).unwrap(), 0);
        assert_eq!(f.pixels()[2 + 3], 200);
    }

    #[test]
    fn out_of_bounds() {
        let mut f = Film::new(3, 2, 0.0, 1.0);
        assert!(matches!(
            f.expose(3, 0, 1),
            Err(FilmError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        ));
        assert!(f.get(0, 2).is_err());
    }

    #[test]
    fn pgm_dump_iterates_x_then_y() {
        let mut f = Film::new(2, 3, 0.0, 1.0);
        for x in 0..2 {
            for y in 0..3 {
                f.expose(x, y, (10 * x + y) as Intensity).unwrap();
            }
        }
        let mut out = Vec::new();
        f.dump_pgm(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P2\n2 3\n255\n0 1 2 \n10 11 12 \n"
        );
    }

    #[test]
    fn image_matches_pgm_layout() {
        let mut f = Film::new(2, 3, 0.0, 1.0);
        f.expose(1, 2, 42).unwrap();
        let img = f.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &Luma([42]));
        assert_eq!(img.get_pixel(0, 0), &Luma([0]));
    }

    #[test]
    fn config_defaults() {
        let f = Film::from_config(&FilmConfig::default());
        assert_eq!(f.x_resolution(), 256);
        assert_eq!(f.y_resolution(), 256);
        assert_eq!(f.position_of_pixel(128, 128), Point::new(0.0, 0.0, -1.1));
    }
}
