//! Terrain preview tool: renders the plot partition around the world origin
//! and exercises the generator end to end.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;
use plotworld_core::CellKind;
use plotworld_engine::settings::PlotLevelSettings;
use plotworld_engine::settings::preset::GeneratorPreset;
use plotworld_engine::settings::worlds::WorldConfig;
use plotworld_engine::world::ChunkPos;
use plotworld_engine::world::generation::ChunkGenerator;
use plotworld_engine::world::generation::plots::MapgenPlots;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Preset file to load the generator settings from
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Edge length of the previewed square region, in columns
    #[arg(short, long, default_value_t = 96)]
    size: u32,

    /// Verbosity level (up to -vvv)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let preset = match &args.preset {
        Some(path) => GeneratorPreset::decode(&fs::read_to_string(path)?),
        None => GeneratorPreset::default(),
    };
    let settings = Arc::new(PlotLevelSettings::new(
        "preview".into(),
        &preset,
        &WorldConfig::default(),
    ));
    let grid = settings.grid();
    let generator = MapgenPlots::new(Arc::clone(&settings));

    info!(
        "previewing generator '{name}' with preset {preset}",
        name = generator.name(),
        preset = generator.preset().encode()
    );

    let half = i64::from(args.size / 2);
    let mut rendering = String::new();
    for z in -half..half {
        for x in -half..half {
            rendering.push(match grid.classify(x, z) {
                CellKind::Plot => '.',
                CellKind::Road => ' ',
                CellKind::Wall => '#',
            });
        }
        rendering.push('\n');
    }
    #[expect(clippy::print_stdout, reason = "the rendered map is this tool's output")]
    print!("{rendering}");

    let spawn = generator.spawn_point();
    let spawn_chunk = generator.generate_chunk(ChunkPos::for_column(spawn.x, spawn.z));
    info!(
        "spawn point at ({x}, {y}, {z}) in chunk {chunk} with {layers} layers",
        x = spawn.x,
        y = spawn.y,
        z = spawn.z,
        chunk = spawn_chunk.pos(),
        layers = spawn_chunk.layer_count()
    );

    Ok(())
}
