//! Scene description: emitter, film, materials and the meshes to x-ray

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    films::{Film, FilmConfig, FilmError},
    machine::XRayMachine,
    materials::{MaterialLibrary, MaterialLibraryConfig},
    objects::{Mesh, MeshError},
    utils::SerdeVector,
    Point,
};

/// Errors while loading or rendering a scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scene description: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to load mesh {path}: {source}")]
    Mesh { path: PathBuf, source: MeshError },
    #[error(transparent)]
    Film(#[from] FilmError),
}

fn default_emitter() -> SerdeVector {
    SerdeVector {
        x: 0.0,
        y: 0.0,
        z: 4.1,
    }
}

/// Scene Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_emitter")]
    pub emitter: SerdeVector,
    #[serde(default)]
    pub film: FilmConfig,
    /// Added to, or replacing, the default material table
    #[serde(default)]
    pub materials: MaterialLibraryConfig,
    /// OBJ files, relative paths are taken from `base_dir`
    pub meshes: Vec<PathBuf>,
    #[serde(skip)]
    pub base_dir: PathBuf,
}
impl SceneConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SceneError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML scene; mesh paths become relative to the file's directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&yaml)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn mesh_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.meshes.iter().map(|p| self.base_dir.join(p))
    }
}

/// Everything needed for one exposure
#[derive(Debug, Clone)]
pub struct Scene {
    pub emitter: Point,
    pub film: FilmConfig,
    pub materials: MaterialLibrary,
    pub meshes: Vec<Mesh>,
}
impl Scene {
    pub fn from_config(config: SceneConfig) -> Result<Self, SceneError> {
        let materials = MaterialLibrary::from_config(config.materials.clone());
        let meshes = config
            .mesh_paths()
            .map(|path| {
                Mesh::load(&path, &materials).map_err(|source| SceneError::Mesh { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "scene has {} meshes, {} triangles in total",
            meshes.len(),
            meshes.iter().map(Mesh::len).sum::<usize>()
        );
        Ok(Self {
            emitter: config.emitter.into(),
            film: config.film,
            materials,
            meshes,
        })
    }

    /// Scan a fresh film
    pub fn render(&self, machine: &XRayMachine) -> Result<Film, SceneError> {
        let mut film = Film::from_config(&self.film);
        machine.scan(&self.emitter, &self.meshes, &mut film)?;
        Ok(film)
    }
}
