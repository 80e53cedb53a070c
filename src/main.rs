use clap::Parser;
use log::warn;
use softras::core::color::ColorRgb;
use softras::io::config::Config;
use softras::io::image::save_buffer_to_image;
use softras::pipeline::renderer::Renderer;
use softras::scene::loader::build_scene;
use softras::shading::{RenderOptions, ShadingMode};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(about = "Software rasterizer driven by a TOML scene description")]
struct Args {
    /// Scene description file (defaults to scene.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image path (overrides the scene file)
    #[arg(short, long)]
    output: Option<String>,

    /// Shading mode: observed-area, diffuse, specular or combined
    #[arg(short, long)]
    mode: Option<String>,

    /// Disable normal mapping
    #[arg(long)]
    no_normal_map: bool,

    /// Also write a depth-buffer visualization next to the output image
    #[arg(long)]
    depth: bool,

    /// Number of frames to advance the scene before capturing (overrides the scene file)
    #[arg(long)]
    frames: Option<u32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref(), Path::new("scene.toml")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(output) = &args.output {
        config.render.output = output.clone();
    }
    if let Some(mode) = &args.mode {
        config.render.shading_mode = mode.clone();
    }
    if args.no_normal_map {
        config.render.use_normal_map = false;
    }
    if args.depth {
        config.render.visualize_depth = true;
    }
    if let Some(frames) = args.frames {
        config.render.frames = frames;
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolves the scene description. An explicitly passed path must load, as
/// must an existing fallback file; only a missing fallback degrades to the
/// built-in defaults.
fn load_config(explicit: Option<&Path>, fallback: &Path) -> Result<Config, String> {
    match explicit {
        Some(path) => Config::load(path),
        None if fallback.exists() => Config::load(fallback),
        None => {
            warn!("{:?} not found - using built-in defaults", fallback);
            Ok(Config::default())
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    let render = &config.render;
    let background = ColorRgb::new(
        render.background[0],
        render.background[1],
        render.background[2],
    );

    let options = RenderOptions {
        shading_mode: render
            .shading_mode
            .parse::<ShadingMode>()
            .map_err(|e| format!("Invalid shading mode: {}", e))?,
        use_normal_map: render.use_normal_map,
        visualize_depth: render.visualize_depth,
    };

    let mut renderer = Renderer::new(render.width, render.height, background);
    let mut scene = build_scene(config, renderer.aspect_ratio())?;

    println!(
        "Rendering {} frame(s) at {}x{} ({:?} shading)",
        render.frames, render.width, render.height, options.shading_mode
    );

    for _ in 0..render.frames {
        scene.update(render.frame_time);
        renderer.render(&scene, &options)?;
    }

    let colors = renderer.framebuffer.pack_colors();
    save_buffer_to_image(&colors, render.width, render.height, &render.output)?;

    if options.visualize_depth {
        let depth = renderer.framebuffer.pack_depth();
        let depth_path = depth_output_path(&render.output);
        save_buffer_to_image(&depth, render.width, render.height, &depth_path)?;
    }

    Ok(())
}

fn depth_output_path(output: &str) -> String {
    let path = Path::new(output);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("render");
    match path.parent() {
        Some(parent) if parent != Path::new("") => parent
            .join(format!("{}_depth.png", stem))
            .to_string_lossy()
            .into_owned(),
        _ => format!("{}_depth.png", stem),
    }
}
