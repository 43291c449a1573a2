// Copyright (C) 2022 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Some useful re-exports
pub mod prelude;

/// Heightfield synthesis, terrain mesh assembly and GPU-ready buffers
pub mod mesh;

/// Serializable generation parameters
pub mod config;
