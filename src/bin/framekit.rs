use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framekit", version, about = "Trim and compose exported animation frames")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose frames into a sprite sheet plus a JSON sidecar.
    Sheet(SheetArgs),
    /// Encode frames as a looping animated GIF.
    Gif(GifArgs),
    /// Print size and black-frame flags for every matching frame.
    Inspect(InspectArgs),
    /// Run a JSON job file.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory holding the frames.
    #[arg(long)]
    dir: PathBuf,

    /// Only frames whose file name starts with this.
    #[arg(long)]
    prefix: Option<String>,

    /// Only frames whose file name, without extension, ends with this.
    #[arg(long)]
    suffix: Option<String>,

    /// Only frames with this extension.
    #[arg(long, default_value = "png")]
    ext: String,
}

impl InputArgs {
    fn list(&self) -> anyhow::Result<framekit::FrameSequence> {
        let filter = framekit::FrameFilter {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            extension: Some(self.ext.clone()),
        };
        let seq = framekit::list_frames(&self.dir, &filter)
            .with_context(|| format!("list frames in '{}'", self.dir.display()))?;
        Ok(seq)
    }
}

#[derive(Parser, Debug)]
struct SheetArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path; the sheet is written to `<parent>/<name>/<name>.png`.
    #[arg(long)]
    out: PathBuf,

    /// Reject frames whose width differs from the first frame.
    #[arg(long)]
    strict_width: bool,
}

#[derive(Parser, Debug)]
struct GifArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = framekit::DEFAULT_FRAME_DELAY_MS)]
    delay_ms: u32,

    /// Play this many times instead of looping forever.
    #[arg(long)]
    loops: Option<u16>,

    /// Drop trailing black frames first.
    #[arg(long)]
    trim: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Job file (JSON).
    #[arg(long)]
    job: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sheet(args) => cmd_sheet(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    let mut seq = args.input.list()?;
    let opts = framekit::SheetOpts {
        width_policy: if args.strict_width {
            framekit::WidthPolicy::Strict
        } else {
            framekit::WidthPolicy::FirstFrame
        },
    };

    let layout = framekit::SheetLayout::from_output_path(&args.out)?;
    let meta = framekit::to_sprite_sheet(&mut seq, &args.out, &opts)
        .with_context(|| format!("compose sprite sheet '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} frames)",
        layout.image_path.display(),
        meta.total_width,
        meta.total_height,
        meta.frame_count
    );
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let mut seq = args.input.list()?;
    if args.trim {
        framekit::trim_trailing_black(&mut seq).context("trim trailing black frames")?;
    }

    let opts = framekit::AnimationOpts {
        frame_delay_ms: args.delay_ms,
        looping: args
            .loops
            .map_or(framekit::Looping::Forever, framekit::Looping::Times),
    };
    framekit::to_animation(&seq, &args.out, &opts)
        .with_context(|| format!("encode animation '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let seq = args.input.list()?;
    for path in seq.iter() {
        let img = framekit::decode_frame(path)?;
        let size = framekit::FrameSize::of(&img);
        let flag = if framekit::is_solid_black(&img) {
            "solid-black"
        } else if framekit::is_black(&img) {
            "black"
        } else {
            "-"
        };
        println!("{}\t{size}\t{flag}", path.display());
    }
    eprintln!("{} frames", seq.len());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let job = framekit::Job::load(&args.job)?;
    match job.run().with_context(|| format!("run job '{}'", args.job.display()))? {
        framekit::JobOutput::Sheet { layout, meta } => eprintln!(
            "wrote {} ({}x{}, {} frames)",
            layout.image_path.display(),
            meta.total_width,
            meta.total_height,
            meta.frame_count
        ),
        framekit::JobOutput::Animation { path, frames } => {
            eprintln!("wrote {} ({frames} frames)", path.display())
        }
    }
    Ok(())
}
