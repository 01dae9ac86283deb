mod config;
mod replay;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use canvas::codec::{self, ExportError, ImportError};
use canvas::doc::ElementKind;
use canvas::engine::EngineCore;
use canvas::page::PAGE_SIZES;
use canvas::palette;
use canvas::template::{TEMPLATES, Template};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::{Value, json};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError, DEFAULT_PAGE};
use crate::replay::ReplayError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("unknown template {0:?}; run `brochure templates` for the list")]
    UnknownTemplate(String),
    #[error("unsupported image type for {0}; expected png, jpg, gif, webp or svg")]
    UnsupportedImage(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "brochure", about = "Headless brochure canvas engine")]
struct Cli {
    /// Page format, e.g. "A4 Portrait" or "letter-landscape".
    #[arg(long, env = "BROCHURE_PAGE", default_value = DEFAULT_PAGE, global = true)]
    page: String,

    /// Raster pixels per page unit for PDF export (default 2, or `BROCHURE_RASTER_SCALE`).
    #[arg(long, global = true)]
    raster_scale: Option<f64>,

    #[arg(long, env = "BROCHURE_PRETTY", default_value_t = true, action = ArgAction::Set, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List page formats.
    Pages,
    /// List built-in templates.
    Templates,
    /// Write a new document, optionally seeded from a template.
    New {
        #[arg(long)]
        template: Option<String>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Validate a document file and summarize it.
    Inspect {
        #[arg(default_value = "-", help = "Document path, or - for stdin")]
        input: String,
    },
    /// Add an image file to a document as an inline upload.
    AddImage {
        #[arg(help = "Document path, or - for stdin")]
        input: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Drive the engine with a scripted sequence of pointer and key events.
    Replay {
        script: PathBuf,
        #[arg(long, help = "Starting document; empty when omitted")]
        document: Option<String>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print where the rasterized page lands in an exported PDF.
    PdfLayout,
}

fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::resolve(&cli.page, cli.raster_scale, cli.pretty)?;
    tracing::debug!(page = config.page.name, raster_scale = config.raster_scale, "config resolved");

    match cli.command {
        Command::Pages => {
            print_pages();
            Ok(())
        }
        Command::Templates => {
            print_templates();
            Ok(())
        }
        Command::New { template, output } => run_new(&config, template.as_deref(), output.as_deref()),
        Command::Inspect { input } => run_inspect(&config, &input),
        Command::AddImage { input, image, output } => run_add_image(&config, &input, &image, output.as_deref()),
        Command::Replay { script, document, output } => {
            run_replay(&config, &script, document.as_deref(), output.as_deref())
        }
        Command::PdfLayout => run_pdf_layout(&config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn print_pages() {
    for page in PAGE_SIZES {
        let orientation = if page.is_landscape() { "landscape" } else { "portrait" };
        println!("{:<20} {:>6} x {:<6} {orientation}", page.name, page.width, page.height);
    }
}

fn print_templates() {
    for template in TEMPLATES {
        println!("{:<12} {:<20} {} elements", template.id, template.name, template.elements().len());
    }
}

fn run_new(config: &Config, template: Option<&str>, output: Option<&Path>) -> Result<(), CliError> {
    let mut core = core_for(config);
    if let Some(name) = template {
        let template = Template::find(name).ok_or_else(|| CliError::UnknownTemplate(name.to_owned()))?;
        core.load_template(&template);
    }
    tracing::info!(elements = core.doc.len(), "document created");
    write_document(&core, config, output)
}

fn run_inspect(config: &Config, input: &str) -> Result<(), CliError> {
    let text = read_input(input)?;
    let imported = codec::import_json(&text)?;

    let mut kinds: BTreeMap<&'static str, usize> = BTreeMap::new();
    for el in &imported.elements {
        *kinds.entry(el.kind.as_str()).or_default() += 1;
    }
    let bounds = config.page.bounds();
    let off_page: Vec<&str> = imported
        .elements
        .iter()
        .filter(|el| el.x < 0.0 || el.y < 0.0 || el.x + el.width > bounds.width || el.y + el.height > bounds.height)
        .map(|el| el.id.as_str())
        .collect();
    let inline_images = imported
        .elements
        .iter()
        .filter(|el| matches!(el.kind, ElementKind::Image | ElementKind::Logo))
        .filter(|el| el.src.as_deref().is_some_and(|s| s.starts_with("data:")))
        .count();

    let summary = json!({
        "elements": imported.elements.len(),
        "kinds": kinds,
        "metadata": imported.metadata,
        "page": config.page.name,
        "offPage": off_page,
        "inlineImages": inline_images,
    });
    print_json(&summary, config.pretty)
}

fn run_add_image(config: &Config, input: &str, image: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let mime = image
        .extension()
        .and_then(|e| e.to_str())
        .and_then(palette::mime_for_extension)
        .ok_or_else(|| CliError::UnsupportedImage(image.display().to_string()))?;
    let bytes = fs::read(image).map_err(|source| io_error(image, source))?;

    let mut core = core_for(config);
    core.import_json(&read_input(input)?)?;
    core.add_uploaded_image(mime, &bytes);
    tracing::info!(image = %image.display(), bytes = bytes.len(), mime, "image added");
    write_document(&core, config, output)
}

fn run_replay(config: &Config, script: &Path, document: Option<&str>, output: Option<&Path>) -> Result<(), CliError> {
    let script_text = fs::read_to_string(script).map_err(|source| io_error(script, source))?;
    let script = replay::parse_script(&script_text)?;

    let mut core = core_for(config);
    if let Some(input) = document {
        core.import_json(&read_input(input)?)?;
    }
    let report = replay::replay(&mut core, &script)?;
    tracing::info!(
        steps = report.steps,
        created = report.created(),
        updated = report.updates(),
        deleted = report.deleted(),
        frames = report.frames_requested,
        "replay finished"
    );
    write_document(&core, config, output)
}

fn run_pdf_layout(config: &Config) -> Result<(), CliError> {
    let layout = canvas::pdf::layout(&config.page, config.raster_scale);
    print_json(&serde_json::to_value(layout)?, config.pretty)
}

fn core_for(config: &Config) -> EngineCore {
    let mut core = EngineCore::new();
    core.set_page(config.page);
    core
}

fn write_document(core: &EngineCore, config: &Config, output: Option<&Path>) -> Result<(), CliError> {
    let text = core.export_json(OffsetDateTime::now_utc(), config.pretty)?;
    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n")).map_err(|source| io_error(path, source))?;
            tracing::info!(path = %path.display(), elements = core.doc.len(), "document written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").map_err(|source| io_error(Path::new("<stdout>"), source))?;
        }
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(|source| io_error(Path::new("<stdin>"), source))?;
        return Ok(text);
    }
    fs::read_to_string(input).map_err(|source| io_error(Path::new(input), source))
}

fn print_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let text = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{text}");
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> CliError {
    CliError::Io { path: path.display().to_string(), source }
}
