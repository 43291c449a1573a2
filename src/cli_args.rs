use clap::Parser;
use once_cell::sync::Lazy;
use terrain_engine::config::TerrainParams;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Loads terrain parameters from the given `.ron` file
    pub config: Option<String>,

    /// Grid cells per side. Must be a power of two.
    #[arg(short = 'n', long)]
    pub subdivisions: Option<usize>,

    /// Seed for the random displacement. Omit for a different terrain on
    /// every run.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub roughness: Option<f32>,

    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Also derive the wireframe line indices.
    #[arg(long)]
    pub wireframe: bool,

    /// Print the effective parameters as RON instead of generating.
    #[arg(long)]
    pub print_params: bool,
}

impl Args {
    /// Command line flags take precedence over the config file.
    pub fn apply_overrides(&self, params: &mut TerrainParams) {
        if let Some(subdivisions) = self.subdivisions {
            params.subdivisions = subdivisions;
        }
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        if let Some(roughness) = self.roughness {
            params.roughness = roughness;
        }
        if let Some(height_scale) = self.height_scale {
            params.height_scale = height_scale;
        }
    }
}

/// CLI args are stored in a lazy static variable so they're accessible from
/// everywhere. Arguments are parsed on first access.
pub static CLI_ARGS: Lazy<Args> = Lazy::new(Args::parse);
