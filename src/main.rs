use anyhow::Result;
use clap::Parser;
use freq_visualiser::audio::AudioFile;
use freq_visualiser::export::PngSequenceSink;
use freq_visualiser::render::{describe, Properties, RendererRegistry};
use freq_visualiser::{FramePipeline, VisualiserConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "freq-visualiser")]
#[command(about = "Render an audio file's frequency spectrum as animation frames", long_about = None)]
struct Args {
    /// Audio file to generate animation for
    #[arg(short = 'f', long, required_unless_present = "list_options")]
    file: Option<String>,

    /// Number of frequency buckets
    #[arg(short = 'b', long, default_value = "10")]
    buckets: i64,

    /// Explicit ascending bucket thresholds in Hz (e.g. 60,250,1000,4000)
    #[arg(long, value_delimiter = ',', conflicts_with = "buckets")]
    thresholds: Vec<u32>,

    /// Speed of animation in fps
    #[arg(short = 's', long, default_value = "8")]
    speed: u32,

    /// Time window in seconds over which frequency extrema are taken
    #[arg(short = 'w', long, default_value = "10")]
    window: u32,

    /// Frame renderer (column, line, grid3d)
    #[arg(short = 'd', long, default_value = "column")]
    drawer: String,

    /// Properties file for the chosen renderer
    #[arg(short = 'p', long)]
    properties: Option<String>,

    /// Output directory for PNG frames (default: <file>.frames)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Also write the bucketed frame data as JSON
    #[arg(long)]
    dump_json: Option<String>,

    /// Print the chosen renderer's properties and exit
    #[arg(long)]
    list_options: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let registry = RendererRegistry::with_builtin();

    // Renderer properties
    let overrides = match &args.properties {
        Some(path) => Properties::load(&expand(path))?,
        None => Properties::new(),
    };
    let mut renderer = registry.create(&args.drawer, &overrides)?;

    if args.list_options {
        print!("{}", describe(renderer.options()));
        return Ok(());
    }

    let file = match &args.file {
        Some(file) => expand(file),
        None => anyhow::bail!("--file is required"),
    };

    let mut config = VisualiserConfig::new()
        .with_fps(args.speed)
        .with_extrema_window_secs(args.window);
    config = if args.thresholds.is_empty() {
        config.with_bucket_count(args.buckets)
    } else {
        config.with_thresholds(args.thresholds.clone())
    };

    let pipeline = FramePipeline::new(config)?;

    let output = match &args.output {
        Some(dir) => expand(dir),
        None => {
            let mut dir = file.clone().into_os_string();
            dir.push(".frames");
            PathBuf::from(dir)
        }
    };

    log::info!("Freq Visualiser");
    log::info!("===============");
    log::info!("Input: {:?}", file);
    log::info!("Renderer: {}", renderer.name());
    log::debug!("Renderer properties:\n{}", renderer.properties());

    let mut sink = PngSequenceSink::new(output)?;
    let analysis = pipeline.run(&AudioFile::new(file), renderer.as_mut(), &mut sink)?;

    if let Some(path) = &args.dump_json {
        analysis.write_json(&expand(path))?;
    }

    log::info!("{} frames ready at: {:?}", analysis.frame_count(), sink.dir());
    Ok(())
}
