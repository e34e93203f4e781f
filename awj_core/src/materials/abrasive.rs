//! Abrasive grit sizes.
//!
//! Mesh number is the sieve count per inch: a higher mesh means finer
//! particles and a smoother cut surface.

use serde::{Deserialize, Serialize};

/// Standard abrasive mesh size with its nominal particle size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSize {
    /// Mesh number
    pub mesh: u32,
    /// Nominal particle size (μm)
    pub particle_size_um: u32,
}

impl MeshSize {
    /// Label such as "80 mesh (177 μm)"
    pub fn label(&self) -> String {
        format!("{} mesh ({} μm)", self.mesh, self.particle_size_um)
    }

    /// Find the catalog entry for a mesh number
    pub fn lookup(mesh: u32) -> Option<&'static MeshSize> {
        MESH_SIZES.iter().find(|m| m.mesh == mesh)
    }
}

/// Mesh sizes offered for selection, coarse to fine
pub const MESH_SIZES: [MeshSize; 3] = [
    MeshSize { mesh: 50, particle_size_um: 297 },
    MeshSize { mesh: 80, particle_size_um: 177 },
    MeshSize { mesh: 120, particle_size_um: 125 },
];

/// Mesh assumed when none is given
pub const DEFAULT_MESH: u32 = 80;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_labels() {
        assert_eq!(MESH_SIZES[1].label(), "80 mesh (177 μm)");
    }

    #[test]
    fn test_mesh_lookup() {
        assert_eq!(MeshSize::lookup(DEFAULT_MESH).map(|m| m.particle_size_um), Some(177));
        assert!(MeshSize::lookup(220).is_none());
    }

    #[test]
    fn test_catalog_is_coarse_to_fine() {
        assert!(MESH_SIZES.windows(2).all(|w| w[0].mesh < w[1].mesh));
        assert!(MESH_SIZES.windows(2).all(|w| w[0].particle_size_um > w[1].particle_size_um));
    }
}
