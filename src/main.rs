use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use dimensional::config::SceneConfig;
use dimensional::light::PointLight;
use dimensional::render::{Raster, Renderer, VisibilityMode};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "dimensional")]
#[command(about = "Headless software rasterizer: renders a TOML scene to an image")]
struct Args {
    /// Scene description (TOML). Without one, a placeholder cube is drawn.
    #[arg(value_name = "SCENE")]
    scene: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Resolve visibility with the legacy back-to-front sort
    #[arg(long)]
    painter: bool,

    /// Shade faces by distance to a light at (0, 0, 100) when the scene has none
    #[arg(long)]
    light: bool,

    /// Number of frames to render; with more than one, each is saved with a frame suffix
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Y rotation applied to every model between frames, in radians
    #[arg(long, default_value_t = 0.0)]
    spin: f32,

    /// -v for debug output, -vv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// `out.png` -> `out_0003.png`
fn frame_path(output: &Path, frame: u32) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{}_{:04}.{}", stem, frame, ext.to_string_lossy()),
        None => format!("{}_{:04}", stem, frame),
    };
    output.with_file_name(name)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => {
            info!("No scene given, rendering the placeholder cube");
            SceneConfig::default()
        }
    };
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.painter {
        config.render.visibility = VisibilityMode::PainterSort;
    }
    config.validate()?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.render.output));

    let mut models = config.build_models()?;
    let camera = config.camera();
    let mut renderer = Renderer::with_visibility(config.render.visibility);
    let light = config
        .light()
        .or_else(|| args.light.then(PointLight::default));
    renderer.set_light(light);
    let mut raster = Raster::new(config.render.width, config.render.height);
    let background = config.background();

    info!(
        "Rendering {} model(s) at {}x{} with {:?}, light {:?}",
        models.len(),
        raster.width(),
        raster.height(),
        renderer.visibility(),
        renderer.light().map(|l| l.position)
    );

    for frame in 0..args.frames {
        if frame > 0 {
            for model in &mut models {
                model.transform_mut().rotate_y(args.spin);
            }
        }

        let start = Instant::now();
        raster.clear(background);
        let stats = renderer.render(&models, &camera, &mut raster);
        info!(
            "Frame {}: {} of {} triangles drawn, {} pixels in {:.2?}",
            frame,
            stats.rasterized,
            stats.submitted,
            stats.pixels_written,
            start.elapsed()
        );

        let path = if args.frames > 1 {
            frame_path(&output, frame)
        } else {
            output.clone()
        };
        raster.save(&path)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
