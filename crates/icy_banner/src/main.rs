#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod options;

use options::{MissingGlyphOption, Options};

use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, Naming};
use icy_figlet::{Font, FontRegistry, LayoutMask, PrintDirection, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl From<Direction> for PrintDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Ltr => PrintDirection::LeftToRight,
            Direction::Rtl => PrintDirection::RightToLeft,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Prints text as FIGlet banners.", long_about = None)]
pub struct Args {
    #[arg(help = "Text to render. Read from stdin if omitted.")]
    text: Vec<String>,

    #[arg(short, long, help = "Font name or path to a .flf/.zip file.")]
    font: Option<String>,

    #[arg(short = 'd', long = "font-dir", value_name = "DIR", help = "Additional directory to search for fonts.")]
    font_dirs: Vec<PathBuf>,

    #[arg(
        long,
        value_name = "MODE",
        value_parser = parse_smush_mode,
        help = "Layout: full, fitting, smushing or a numeric full layout."
    )]
    smush_mode: Option<LayoutMask>,

    #[arg(long, value_enum, help = "Overrides the print direction of the font.")]
    direction: Option<Direction>,

    #[arg(long, value_enum, help = "What to do with characters the font has no glyph for.")]
    missing: Option<MissingGlyphOption>,

    #[arg(long, default_value_t = false, help = "Lists the available fonts and exits.")]
    list: bool,

    #[arg(long, default_value_t = false, help = "Prints the font header and exits.")]
    info: bool,
}

fn parse_smush_mode(arg: &str) -> Result<LayoutMask, String> {
    match arg.to_ascii_lowercase().as_str() {
        "full" => Ok(LayoutMask::empty()),
        "fitting" => Ok(LayoutMask::FITTING),
        "smushing" => Ok(LayoutMask::SMUSHING),
        other => match other.parse::<u32>() {
            Ok(bits) => LayoutMask::from_bits(bits).ok_or_else(|| format!("invalid layout bits: {bits}")),
            Err(_) => Err(format!("unknown smush mode '{arg}'")),
        },
    }
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "icy_banner") {
        let dir = proj_dirs.config_dir().to_path_buf();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<flexi_logger::LoggerHandle> {
    if let Some(log_dir) = get_log_dir() {
        let logger = Logger::try_with_env_or_str("info")
            .ok()?
            .log_to_file(FileSpec::default().directory(&log_dir).basename("icy_banner").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .create_symlink(log_dir.join("icy_banner.log"))
            .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
            .start();
        if let Ok(handle) = logger {
            return Some(handle);
        }
    }
    eprintln!("Failed to create log file");
    Logger::try_with_env_or_str("warn").ok()?.log_to_stderr().start().ok()
}

fn is_font_path(font: &str) -> bool {
    let path = Path::new(font);
    path.is_file() || path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("flf") || ext.eq_ignore_ascii_case("zip"))
}

fn resolve_font(registry: &FontRegistry, font: &str) -> anyhow::Result<Arc<Font>> {
    if is_font_path(font) {
        let loaded = Font::load(Path::new(font)).with_context(|| format!("loading font file {font}"))?;
        return Ok(Arc::new(loaded));
    }
    registry.get(font).with_context(|| format!("loading font {font}"))
}

fn print_info(font: &Font) {
    let header = font.header();
    println!("name:            {}", font.name());
    println!("hard blank:      {:?}", header.hard_blank_char());
    println!("height:          {}", header.height());
    println!("baseline:        {}", header.baseline());
    println!("max length:      {}", header.max_length());
    println!("old layout:      {}", header.old_layout());
    println!("full layout:     {} ({:?})", header.full_layout().bits(), header.horiz_layout());
    println!("print direction: {:?}", header.print_direction());
    println!("glyphs:          {}", font.glyph_count());
    if !header.comment().is_empty() {
        println!();
        println!("{}", header.comment());
    }
}

fn read_text(args: &Args) -> anyhow::Result<String> {
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text).context("reading stdin")?;
    Ok(text.trim_end_matches('\n').to_string())
}

fn run(args: &Args, options: &Options) -> anyhow::Result<()> {
    let mut registry = FontRegistry::new(options.font_dirs.clone());
    for dir in &args.font_dirs {
        registry.add_search_path(dir.clone());
    }

    if args.list {
        for name in registry.font_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let font_name = args.font.as_deref().unwrap_or(&options.default_font);
    let font = resolve_font(&registry, font_name)?;
    log::info!("using font {} ({} glyphs)", font.name(), font.glyph_count());

    if args.info {
        print_info(&font);
        return Ok(());
    }

    let mut renderer = Renderer::new(&font);
    if let Some(mode) = args.smush_mode {
        renderer.set_smush_mode(mode);
    }
    if let Some(direction) = args.direction {
        renderer.set_print_direction(direction.into());
    }
    renderer.set_missing_glyph(options.missing_glyph(args.missing.unwrap_or(options.missing_glyph)));

    let text = read_text(args)?;
    for line in renderer.render_lines(&text)? {
        println!("{line}");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let logger = start_logger();

    let options = match Options::load_options() {
        Ok(options) => options,
        Err(err) => {
            log::error!("Error reading options.toml: {err}");
            Options::default()
        }
    };

    if let Err(err) = run(&args, &options) {
        log::error!("{err:#}");
        if logger.is_none() {
            eprintln!("error: {err:#}");
        }
        drop(logger);
        std::process::exit(1);
    }
}
