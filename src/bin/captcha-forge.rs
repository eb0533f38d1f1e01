use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use captcha_forge::{
    AnimationSpec, CaptchaConfig, CaptchaEngine, Canvas, FontStyle, SeededRandom,
};

const DEFAULT_WIDTH: u32 = 300;
const DEFAULT_HEIGHT: u32 = 100;

#[derive(Parser, Debug)]
#[command(name = "captcha-forge", version)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single CAPTCHA as a PNG.
    Frame(FrameArgs),
    /// Render an animated GIF of independent CAPTCHA frames.
    Gif(GifArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file (.ttf/.otf/.ttc).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font family to look up in the system font directories.
    #[arg(long)]
    family: Option<String>,

    #[arg(long, value_enum)]
    style: Option<StyleChoice>,

    /// Glyph size in pixels.
    #[arg(long)]
    size_px: Option<f32>,

    /// Fixed text instead of generated text.
    #[arg(long)]
    text: Option<String>,

    /// Length of generated text.
    #[arg(long)]
    length: Option<usize>,

    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Enable grayscale Gaussian noise.
    #[arg(long)]
    gaussian: bool,

    /// Enable stroke noise with this many curves.
    #[arg(long)]
    strokes: Option<u32>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct GifArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frames after the first one.
    #[arg(long)]
    frames: Option<u32>,

    /// Per-frame delay in milliseconds.
    #[arg(long)]
    delay_ms: Option<u32>,

    /// Play the animation once instead of looping.
    #[arg(long)]
    no_loop: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl From<StyleChoice> for FontStyle {
    fn from(s: StyleChoice) -> Self {
        match s {
            StyleChoice::Plain => Self::Plain,
            StyleChoice::Bold => Self::Bold,
            StyleChoice::Italic => Self::Italic,
            StyleChoice::BoldItalic => Self::BoldItalic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Gif(args) => cmd_gif(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &CommonArgs) -> anyhow::Result<CaptchaConfig> {
    let mut cfg = match &args.config {
        Some(path) => CaptchaConfig::from_path(path)?,
        None => CaptchaConfig::new(Canvas {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }),
    };

    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    if let Some(font) = &args.font {
        cfg.font.path = Some(font.clone());
    }
    if let Some(family) = &args.family {
        cfg.font.family = Some(family.clone());
    }
    if let Some(style) = args.style {
        cfg.font.style = style.into();
    }
    if let Some(size) = args.size_px {
        cfg.font.size_px = size;
    }
    if let Some(text) = &args.text {
        cfg.text.fixed = Some(text.clone());
    }
    if let Some(len) = args.length {
        cfg.text.length = len;
    }
    if args.gaussian {
        cfg.gaussian_noise.enabled = true;
    }
    if let Some(count) = args.strokes {
        cfg.stroke_noise.enabled = true;
        cfg.stroke_noise.count = count;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn build_engine(cfg: &CaptchaConfig) -> anyhow::Result<CaptchaEngine> {
    let font = cfg.load_font().context("load captcha font")?;
    let spec = cfg.captcha_spec(font)?;
    tracing::info!(
        width = spec.canvas.width,
        height = spec.canvas.height,
        "captcha configured"
    );
    Ok(CaptchaEngine::new(spec)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let mut engine = build_engine(&cfg)?;
    let mut rng = SeededRandom::from_optional_seed(cfg.seed);

    let rendered = engine.produce_frame(&mut rng)?;
    captcha_forge::write_png(&rendered.frame, &args.common.out)?;

    println!("{}", rendered.text);
    eprintln!("wrote {}", args.common.out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if let Some(frames) = args.frames {
        cfg.animation.frames = frames;
    }
    if let Some(delay) = args.delay_ms {
        cfg.animation.delay_ms = delay;
    }
    if args.no_loop {
        cfg.animation.looped = false;
    }

    let mut engine = build_engine(&cfg)?;
    let mut rng = SeededRandom::from_optional_seed(cfg.seed);
    let anim: AnimationSpec = cfg.animation();

    let texts = captcha_forge::write_captcha_gif(&mut engine, anim, &mut rng, &args.common.out)?;
    for text in &texts {
        println!("{text}");
    }
    eprintln!("wrote {} ({} frames)", args.common.out.display(), texts.len());
    Ok(())
}
