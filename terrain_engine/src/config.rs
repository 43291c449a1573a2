// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Axis-aligned rectangle in the XY plane covered by the terrain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
        }
    }
}

/// Everything needed to generate one terrain mesh. Stored as RON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Grid cells per side. Must be a power of two.
    pub subdivisions: usize,
    pub extent: Extent,
    /// Scales the random displacement applied at each subdivision level.
    pub roughness: f32,
    /// Multiplies heightfield values before they become vertex Z.
    pub height_scale: f32,
    /// Fixed seed for reproducible terrain. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            subdivisions: 64,
            extent: Extent::default(),
            roughness: 0.2,
            height_scale: 0.03,
            seed: None,
        }
    }
}

impl TerrainParams {
    pub fn from_ron_str(data: &str) -> Result<Self> {
        Ok(ron::from_str(data)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = std::io::BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("Could not open {}", path.display()))?,
        );
        let params = ron::de::from_reader(reader)
            .with_context(|| format!("Could not parse terrain parameters in {}", path.display()))?;
        Ok(params)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Generates the terrain described by these parameters.
    pub fn build(&self) -> Result<VertexIndexBuffers> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.build_with_rng(&mut rng)
    }

    /// Like [`Self::build`], but draws from the given generator and ignores
    /// `seed`.
    pub fn build_with_rng<R: Rng>(&self, rng: &mut R) -> Result<VertexIndexBuffers> {
        build_terrain_mesh(
            self.subdivisions,
            &self.extent,
            self.roughness,
            self.height_scale,
            rng,
        )
    }
}
