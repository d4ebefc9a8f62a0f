use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use draco_decoder::flat::{self, layout::MeshLayout};
use draco_decoder::prelude::*;

#[derive(Parser)]
#[command(name = "draco-cli")]
#[command(about = "Flattens Draco geometry into tightly packed buffers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a mesh and write its flat buffer
    Flatten {
        /// Input .drc file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the flat buffer
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the buffer layout as JSON
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// Print the flat buffer size and layout of a mesh
    Size {
        /// Input .drc file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Extract the positions of a point cloud as f32 triples
    Points {
        /// Input .drc file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the positions
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Encode an OBJ file as an uncompressed Draco bitstream
    Encode {
        /// Input .obj file
        #[arg(short, long)]
        input: PathBuf,

        /// Output .drc file
        #[arg(short, long)]
        output: PathBuf,

        /// Drop the faces and write a point cloud
        #[arg(long)]
        point_cloud: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Flatten { input, output, layout } => flatten(&input, &output, layout.as_deref()),
        Command::Size { input } => size(&input),
        Command::Points { input, output } => points(&input, &output),
        Command::Encode { input, output, point_cloud } => convert_obj_to_drc(&input, &output, point_cloud),
    }
}

fn read_mesh(input: &Path) -> Result<Mesh> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let mesh = decode::decode_mesh(&mut data.iter(), &decode::Config::default())
        .with_context(|| format!("Failed to decode {}", input.display()))?;
    info!("Decoded {} faces and {} points from {}", mesh.num_faces(), mesh.num_points(), input.display());
    Ok(mesh)
}

fn flatten(input: &Path, output: &Path, layout_path: Option<&Path>) -> Result<()> {
    let mesh = read_mesh(input)?;
    let layout = MeshLayout::from_mesh(&mesh).context("Mesh cannot be flattened")?;

    let mut buffer = vec![0u8; layout.byte_len()];
    let written = flat::write_mesh(&mesh, &mut buffer).context("Failed to flatten mesh")?;
    std::fs::write(output, &buffer[..written])
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {} bytes to {}", written, output.display());

    if let Some(path) = layout_path {
        let json = serde_json::to_string_pretty(&layout)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn size(input: &Path) -> Result<()> {
    let mesh = read_mesh(input)?;
    let layout = MeshLayout::from_mesh(&mesh).context("Mesh cannot be flattened")?;
    println!("{}", layout.byte_len());
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn points(input: &Path, output: &Path) -> Result<()> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let positions = draco_decoder::decode_point_cloud(&data);
    if positions.is_empty() {
        bail!("{} has no readable positions", input.display());
    }
    std::fs::write(output, &positions)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {} points to {}", positions.len() / flat::POINT_STRIDE, output.display());
    Ok(())
}

fn convert_obj_to_drc(input: &Path, output: &Path, point_cloud: bool) -> Result<()> {
    // Check input file extension
    if input.extension().and_then(|s| s.to_str()) != Some("obj") {
        bail!("Input file must be a .obj file");
    }

    let mesh = draco_decoder::io::obj::load_obj(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    let config = encode::Config::default();
    let mut buffer = Vec::new();
    if point_cloud {
        encode_point_cloud(&mesh.into_point_cloud(), &mut buffer, &config)
            .context("Failed to encode point cloud")?;
    } else {
        encode_mesh(&mesh, &mut buffer, &config)
            .context("Failed to encode mesh")?;
    }

    std::fs::write(output, &buffer)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {} bytes to {}", buffer.len(), output.display());
    Ok(())
}
