mod scene;

use clap::{Parser, ValueEnum};
use hyperdraw_geom::Transmatrix;
use hyperdraw_render::{DrawRecord, RenderConfig, Renderer};
use hyperdraw_shapes::{ModelParams, ShapeCatalog, SilhouetteLibrary};
use hyperdraw_world::{CellGraph, CellId, Map, MapConfig};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GeometryArg {
    /// {7,3}
    Hyperbolic,
    /// {6,3}
    Euclidean,
    /// {5,3}
    Spherical,
}

impl GeometryArg {
    fn tiling(self) -> (u32, u32) {
        match self {
            GeometryArg::Hyperbolic => (7, 3),
            GeometryArg::Euclidean => (6, 3),
            GeometryArg::Spherical => (5, 3),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Renders a demo tiling into a prioritized draw queue")]
struct Args {
    /// Config file with `[world]`, `[render]`, `[models]` and `[[silhouette]]` tables
    #[arg(long, default_value = "assets/hyperdraw.toml")]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = GeometryArg::Hyperbolic)]
    geometry: GeometryArg,

    /// Steps from the origin cell that are generated and drawn
    #[arg(long, default_value_t = 4)]
    radius: u32,

    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Milliseconds between frames
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Draw with the 3D models instead of the flat display
    #[arg(long)]
    solid: bool,

    /// Print every record of the last frame
    #[arg(long)]
    dump_queue: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}: {}", args.config.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let text = if args.config.exists() {
        fs::read_to_string(&args.config)?
    } else {
        log::warn!("config {} not found; using defaults", args.config.display());
        String::new()
    };
    let render_cfg = RenderConfig::from_toml_str(&text)?;
    let mut params = ModelParams::from_toml_str(&text)?;
    params.solid |= args.solid;
    let lib = SilhouetteLibrary::from_toml_str(&text)?;
    let mut world_cfg = MapConfig::from_toml_str(&text)?;
    let (p, q) = args.geometry.tiling();
    world_cfg.p = p;
    world_cfg.q = q;
    world_cfg.radius = args.radius;

    let t0 = Instant::now();
    let mut map = Map::generate(&world_cfg);
    let mut actors = scene::populate(&mut map);
    log::info!(target: "perf", "ms={} map cells={} geometry={:?}", t0.elapsed().as_millis(), map.cell_count(), map.geometry());

    let cat = ShapeCatalog::build(map.geometry(), map.tiling(), params, &lib, &[p]);

    let mut renderer = Renderer::new(render_cfg);
    let mut out: Vec<DrawRecord> = Vec::new();
    let t1 = Instant::now();
    let mut records = 0;
    for f in 0..args.frames {
        renderer.begin_frame(f as u64 * args.tick_ms);
        scene::script(&mut renderer, &mut map, &mut actors, f);
        renderer.draw_map(&map, &cat, CellId(0), &Transmatrix::IDENTITY, args.radius);
        out.clear();
        let stats = renderer.end_frame(&cat, &mut out);
        records += stats.records;
    }
    let st = renderer.state();
    log::info!(
        target: "perf",
        "ms={} frames={} records={} last: cells={} clipped={} panels={} center={:?}",
        t1.elapsed().as_millis(),
        args.frames,
        records,
        st.stats.cells_drawn,
        st.stats.clipped,
        st.stats.panels,
        st.center_over()
    );

    if args.dump_queue {
        for rec in &out {
            println!("{:?}", rec);
        }
    }
    Ok(())
}
