pub use anyhow::{anyhow, bail, Context, Result};

pub use glam::Vec3;

pub use itertools::Itertools;

pub use crate::config::{Extent, TerrainParams};
pub use crate::mesh::errors::TerrainError;
pub use crate::mesh::gpu_buffer_generation::{lines_from_triangles, VertexIndexBuffers};
pub use crate::mesh::heightmap::{HeightField, HeightSource, BASELINE_HEIGHT};
pub use crate::mesh::terrain::{build_mesh_from_heights, build_terrain_mesh, grid_normals};

pub use terrain_commons::math::*;
pub use terrain_commons::utils::*;
