// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Failure modes shared by heightfield generation and mesh assembly.
pub mod errors;

/// A square heightfield filled in by recursive square-diamond subdivision.
pub mod heightmap;

/// Turns a heightfield into an indexed triangle grid with per-sample normals.
pub mod terrain;

/// Flat vertex and index buffers, suitable to be uploaded to the GPU.
pub mod gpu_buffer_generation;
