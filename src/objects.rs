//! Objects
//!
//! Triangles, meshes built from them, and the ray intersection queries the x-ray machine relies
//! on.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use crate::{materials::MaterialLibrary, utils, Point, Ray, Vec3};

/// Below this, the ray is considered parallel to the triangle's plane
pub const PARALLEL_TOLERANCE: f64 = 1e-8;

/// How a ray relates to a single triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The triangle has no area and is never tested
    Degenerate,
    /// No intersection
    Disjoint,
    /// The ray lies in the triangle's plane
    Coplanar,
    /// The ray crosses the triangle at this point
    Hit(Point),
}
impl Intersection {
    pub fn point(&self) -> Option<Point> {
        match self {
            Intersection::Hit(p) => Some(*p),
            _ => None,
        }
    }
}

/// Triangle ABC, with its edges, normal and degeneracy cached at construction
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
    u: Vec3,
    v: Vec3,
    n: Vec3,
    degenerate: bool,
}
impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        let u = b - a;
        let v = c - a;
        let n = u.cross(&v);
        Self {
            a,
            b,
            c,
            u,
            v,
            n,
            degenerate: utils::is_zero_length(&n),
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Edges B - A and C - A
    pub fn edges(&self) -> (Vec3, Vec3) {
        (self.u, self.v)
    }

    /// Not normalized
    pub fn normal(&self) -> Vec3 {
        self.n
    }

    /// A, B and C are collinear or coincident
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Ray-triangle intersection
    ///
    /// The ray is a half-line: anything at or past the origin counts, including points beyond
    /// the target. Containment uses the parametric (s, t) coordinates along the edges.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        if self.degenerate {
            return Intersection::Degenerate;
        }

        let a = self.n.dot(&(self.a - ray.orig));
        let b = self.n.dot(&ray.dir);

        if b.abs() < PARALLEL_TOLERANCE {
            return if a == 0.0 {
                Intersection::Coplanar
            } else {
                Intersection::Disjoint
            };
        }

        let r = a / b;
        if r < 0.0 {
            // Plane is behind the origin
            return Intersection::Disjoint;
        }

        let p = ray.get(r);

        let uu = self.u.dot(&self.u);
        let uv = self.u.dot(&self.v);
        let vv = self.v.dot(&self.v);
        let w = p - self.a;
        let wu = w.dot(&self.u);
        let wv = w.dot(&self.v);
        let d = uv * uv - uu * vv;

        let s = (uv * wv - vv * wu) / d;
        if !(0.0..=1.0).contains(&s) {
            return Intersection::Disjoint;
        }
        let t = (uv * wu - uu * wv) / d;
        if t < 0.0 || s + t > 1.0 {
            return Intersection::Disjoint;
        }

        Intersection::Hit(p)
    }
}

/// Errors while reading a mesh description
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed vertex `{text}`")]
    MalformedVertex { line: usize, text: String },
    #[error("line {line}: malformed face `{text}`")]
    MalformedFace { line: usize, text: String },
    #[error("line {line}: face refers to vertex {index}, but only {count} are defined")]
    FaceIndexOutOfRange {
        line: usize,
        index: usize,
        count: usize,
    },
    #[error("line {line}: usemtl without a material name")]
    MissingMaterialName { line: usize },
    #[error("line {line}: unknown material `{name}`")]
    UnknownMaterial { line: usize, name: String },
}

/// Triangle mesh with a single shielding strength
///
/// Vertices are duplicated in every triangle, there is no index buffer. The mesh is read-only
/// once built.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    shielding_strength: f64,
}
impl Mesh {
    pub fn new(triangles: Vec<Triangle>, shielding_strength: f64) -> Self {
        Self {
            triangles,
            shielding_strength,
        }
    }

    /// Open and parse an OBJ file
    pub fn load(path: impl AsRef<Path>, materials: &MaterialLibrary) -> Result<Self, MeshError> {
        let path = path.as_ref();
        info!("opening mesh at {}", path.display());
        let file = File::open(path)?;
        Self::from_obj(BufReader::new(file), materials)
    }

    /// Parse the subset of OBJ this project needs: `v`, `f` and `usemtl` lines
    ///
    /// Faces must be triangles and may only refer to vertices defined above them. Anything else
    /// in the file is skipped.
    pub fn from_obj<R: BufRead>(reader: R, materials: &MaterialLibrary) -> Result<Self, MeshError> {
        let mut vertices: Vec<Point> = Vec::new();
        let mut triangles = Vec::new();
        let mut shielding_strength = materials.default_strength();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;

            if let Some(rest) = line.strip_prefix("v ") {
                let p = parse_vertex(rest).ok_or_else(|| MeshError::MalformedVertex {
                    line: line_no,
                    text: line.clone(),
                })?;
                vertices.push(p);
            } else if let Some(rest) = line.strip_prefix("f ") {
                let indices = parse_face(rest).ok_or_else(|| MeshError::MalformedFace {
                    line: line_no,
                    text: line.clone(),
                })?;
                let mut corners = [Point::zeros(); 3];
                for (corner, index) in corners.iter_mut().zip(indices) {
                    // OBJ indices start from one
                    *corner = index
                        .checked_sub(1)
                        .and_then(|k| vertices.get(k))
                        .copied()
                        .ok_or(MeshError::FaceIndexOutOfRange {
                            line: line_no,
                            index,
                            count: vertices.len(),
                        })?;
                }
                triangles.push(Triangle::new(corners[0], corners[1], corners[2]));
            } else if let Some(rest) = line.strip_prefix("usemtl ") {
                let name = rest
                    .split_whitespace()
                    .next()
                    .ok_or(MeshError::MissingMaterialName { line: line_no })?;
                shielding_strength =
                    materials
                        .strength(name)
                        .ok_or_else(|| MeshError::UnknownMaterial {
                            line: line_no,
                            name: name.to_string(),
                        })?;
                debug!("line {line_no}: material {name}, shielding strength {shielding_strength}");
            }
        }

        let mesh = Self::new(triangles, shielding_strength);
        let degenerate = mesh.triangles.iter().filter(|t| t.is_degenerate()).count();
        if degenerate > 0 {
            warn!("{degenerate} degenerate triangles will be ignored");
        }
        info!(
            "{} vertices, {} triangles, shielding strength {}",
            vertices.len(),
            mesh.len(),
            mesh.shielding_strength
        );
        Ok(mesh)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn shielding_strength(&self) -> f64 {
        self.shielding_strength
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Every point where the ray crosses a triangle, in no particular order
    ///
    /// A ray through an edge shared by two triangles is reported once per triangle.
    pub fn intersect(&self, ray: &Ray) -> Vec<Point> {
        self.triangles
            .iter()
            .filter_map(|t| t.intersect(ray).point())
            .collect()
    }
}

fn parse_vertex(rest: &str) -> Option<Point> {
    let mut coords = rest.split_whitespace().map(|tok| tok.parse::<f64>().ok());
    let x = coords.next()??;
    let y = coords.next()??;
    let z = coords.next()??;
    Some(Point::new(x, y, z))
}

/// Vertex indices of a face, dropping any `/vt/vn` suffix
fn parse_face(rest: &str) -> Option<[usize; 3]> {
    let mut indices = rest.split_whitespace().map(|tok| {
        tok.split('/')
            .next()
            .and_then(|index| index.parse::<usize>().ok())
    });
    let a = indices.next()??;
    let b = indices.next()??;
    let c = indices.next()??;
    Some([a, b, c])
}
