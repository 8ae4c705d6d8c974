use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use orb_core::{RenderSettings, Scene, PRESET_NAMES};
use orb_renderer::{save_ppm, write_ppm, RenderMode, RenderProgress, Renderer, DEFAULT_BUCKET_SIZE};

/// Render a sphere scene with a Monte Carlo path tracer and write a PPM image.
#[derive(Parser, Debug)]
#[command(name = "orb", version)]
struct Args {
    /// Built-in scene (cornell, wada) or path to a JSON scene file
    #[arg(long, default_value = "cornell")]
    scene: String,

    /// Width of the rendered image
    #[arg(short = 'W', long, default_value_t = 100)]
    width: u32,

    /// Height of the rendered image
    #[arg(short = 'H', long, default_value_t = 100)]
    height: u32,

    /// Samples per sub-pixel cell; each pixel has 2x2 cells
    #[arg(short, long, default_value_t = 40)]
    samples: u32,

    /// Random seed
    #[arg(long, default_value_t = 12345)]
    seed: u32,

    /// Output file; the image goes to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render buckets on all cores. Uses per-pixel random streams, so the
    /// noise differs from a sequential render with the same seed.
    #[arg(long)]
    parallel: bool,

    /// Bucket edge length in pixels for --parallel
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Worker threads for --parallel (default: one per core)
    #[arg(long, requires = "parallel", value_parser = clap::value_parser!(u32).range(1..))]
    threads: Option<u32>,

    /// Hide the progress bar and informational logs
    #[arg(short, long)]
    quiet: bool,

    /// Print the selected scene as JSON and exit
    #[arg(long)]
    dump_scene: bool,
}

fn load_scene(name: &str) -> Result<Scene> {
    if PRESET_NAMES.iter().any(|&preset| preset == name) {
        log::info!("Using built-in scene '{}'", name);
        return Ok(Scene::preset(name)?);
    }
    Scene::load(name).with_context(|| format!("failed to load scene '{}'", name))
}

fn progress_bar(total: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} px ({percent}%) ETA {eta}",
        )?
        .progress_chars("#>-"),
    );
    Ok(bar)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let scene = load_scene(&args.scene)?;

    if args.dump_scene {
        println!("{}", scene.to_json()?);
        return Ok(());
    }

    let settings = RenderSettings::new(args.width, args.height, args.samples, args.seed);
    let mode = if args.parallel {
        if let Some(threads) = args.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads as usize)
                .build_global()
                .context("failed to configure worker threads")?;
        }
        RenderMode::Parallel {
            bucket_size: args.bucket_size,
        }
    } else {
        RenderMode::Sequential
    };

    let renderer = Renderer::new(&scene, settings)
        .context("invalid render input")?
        .with_mode(mode);

    let image = if args.quiet {
        renderer.render()?
    } else {
        let bar = progress_bar(settings.pixel_count())?;
        let image = renderer
            .render_with_progress(&|p: RenderProgress| bar.set_position(p.completed as u64))?;
        bar.finish_and_clear();
        image
    };

    match &args.output {
        Some(path) => save_ppm(&image, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => write_ppm(&image, io::stdout().lock()).context("failed to write image")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["orb"]).expect("defaults parse");
        assert_eq!(args.scene, "cornell");
        assert_eq!((args.width, args.height), (100, 100));
        assert_eq!(args.samples, 40);
        assert_eq!(args.seed, 12345);
        assert!(!args.parallel);
        assert_eq!(args.threads, None);
    }

    #[test]
    fn test_threads_needs_parallel() {
        assert!(Args::try_parse_from(["orb", "--threads", "4"]).is_err());

        let args = Args::try_parse_from(["orb", "--parallel", "--threads", "4"])
            .expect("threads with parallel");
        assert_eq!(args.threads, Some(4));
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(Args::try_parse_from(["orb", "--parallel", "--threads", "0"]).is_err());
    }
}
