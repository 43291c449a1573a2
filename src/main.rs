// Copyright (C) 2022 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Result;
use terrain_engine::prelude::{TerrainParams, Vec3};

/// Command line arguments.
mod cli_args;

use cli_args::CLI_ARGS;

fn main() -> Result<()> {
    #[cfg(feature = "tracy")]
    let _client = profiling::tracy_client::Client::start();

    // Setup logging
    env_logger::init();

    let mut params = match &CLI_ARGS.config {
        Some(path) => TerrainParams::load_from_file(path)?,
        None => TerrainParams::default(),
    };
    CLI_ARGS.apply_overrides(&mut params);

    if CLI_ARGS.print_params {
        println!("{}", params.to_ron_string()?);
        return Ok(());
    }

    log::info!(
        "Generating terrain: {n}x{n} cells, roughness {r}, height scale {s}",
        n = params.subdivisions,
        r = params.roughness,
        s = params.height_scale,
    );
    let mesh = params.build()?;

    let (low, high) = mesh
        .positions
        .iter()
        .fold((Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)), |(lo, hi), p| {
            (lo.min(*p), hi.max(*p))
        });
    println!("vertices:  {}", mesh.num_vertices());
    println!("triangles: {}", mesh.num_triangles());
    println!("normals:   {}", mesh.normals.len());
    println!("bounds:    {low} .. {high}");

    if CLI_ARGS.wireframe {
        let lines = mesh.generate_line_indices();
        println!("lines:     {}", lines.len() / 2);
    }

    profiling::finish_frame!();
    Ok(())
}
