//! Shielding materials

use std::collections::HashMap;

/// Name of the Blender default material, used when a mesh never selects one
pub const DEFAULT_MATERIAL: &str = "Material";

/// Overrides for the material library, keyed by material name
pub type MaterialLibraryConfig = HashMap<String, f64>;

/// Maps material names to shielding strengths (attenuation per unit distance)
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialLibrary(HashMap<String, f64>);
impl MaterialLibrary {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Defaults with the config entries laid on top
    pub fn from_config(config: MaterialLibraryConfig) -> Self {
        let mut s = Self::default();
        for (name, strength) in config {
            s.insert(name, strength);
        }
        s
    }

    pub fn insert(&mut self, name: impl Into<String>, strength: f64) {
        self.0.insert(name.into(), strength);
    }

    pub fn strength(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Strength of a mesh with no `usemtl` line
    pub fn default_strength(&self) -> f64 {
        self.strength(DEFAULT_MATERIAL).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Default for MaterialLibrary {
    fn default() -> Self {
        let mut s = Self::empty();
        s.insert(DEFAULT_MATERIAL, 100.0);
        s.insert("Muscles", 50.0);
        s.insert("Bone", 80.0);
        s.insert("Brain", 345.0);
        s
    }
}
