use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fotoboo::{
    CropRequest, FotobooConfig, RenderJob, StripCompositor, StripProject,
    assets::decode::decode_image,
    decor::catalog,
};

#[derive(Parser, Debug)]
#[command(name = "fotoboo", version)]
struct Cli {
    /// JSON config file; defaults plus `FOTOBOO_*` environment overrides when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop one image as described by a crop request and write the JPEG.
    Crop(CropArgs),
    /// Render a strip project to a timestamped PNG.
    Strip(StripArgs),
    /// List fonts, stickers and background presets.
    Catalog(CatalogArgs),
    /// Validate a strip project without rendering it.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct CropArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Crop request JSON (display size, region, pointer script, zoom, rotations).
    #[arg(long)]
    request: PathBuf,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Strip project JSON; photo paths are relative to it.
    #[arg(long)]
    project: PathBuf,

    /// Directory the PNG is written to.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[arg(long)]
    project: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Crop(args) => cmd_crop(args, &config),
        Command::Strip(args) => cmd_strip(args, &config),
        Command::Catalog(args) => cmd_catalog(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FotobooConfig> {
    let config = match path {
        Some(path) => FotobooConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => FotobooConfig::from_env()?,
    };
    Ok(config)
}

fn cmd_crop(args: CropArgs, config: &FotobooConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let image = decode_image(&bytes)?;
    let request = CropRequest::load(&args.request)?;

    let cropped = request.run(image, config.crop.clone())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, cropped.bytes())
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_strip(args: StripArgs, config: &FotobooConfig) -> anyhow::Result<()> {
    let project = StripProject::load(&args.project)?;
    let root = args.project.parent().unwrap_or_else(|| Path::new("."));
    let strip = project.into_strip(root)?;

    let mut compositor = StripCompositor::from_font_config(&config.fonts);
    let job = RenderJob::from_strip(&strip, &config.strip, &config.export);
    let export = compositor.export(&job, &config.export.file_prefix)?;

    for (slot, reason) in &export.report.failed_slots {
        eprintln!("warning: photo {} left blank: {reason}", slot + 1);
    }
    for (id, reason) in &export.report.skipped_elements {
        eprintln!("warning: {id} not drawn: {reason}");
    }
    if job.watermark.enabled && !export.report.watermark_drawn {
        eprintln!("warning: watermark not drawn (no usable font)");
    }

    let path = export.write_to_dir(&args.out_dir)?;
    eprintln!("wrote {} ({}x{})", path.display(), export.width, export.height);
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let presets: Vec<String> = catalog::background_presets().map(|c| c.to_hex()).collect();
    if args.json {
        let doc = serde_json::json!({
            "fonts": catalog::FONTS,
            "stickers": catalog::STICKERS,
            "backgrounds": presets,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("fonts:");
    for font in catalog::FONTS {
        println!("  {:<12} {}", font.name, font.value);
    }
    println!("stickers:");
    for category in catalog::STICKERS {
        println!("  {:<8} {}", category.name, category.items.join(" "));
    }
    println!("backgrounds:");
    println!("  {}", presets.join(" "));
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let project = StripProject::load(&args.project)?;
    project.validate()?;
    println!(
        "ok: {} photos, {} decorations",
        project.photos.len(),
        project.decorations.len()
    );
    Ok(())
}
