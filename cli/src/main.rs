//! docsift CLI - PDF outline and persona analysis tool

mod dispatch;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::pipeline::{self, has_pdf_extension};
use docsift::render::{write_json, PersonaReport};
use docsift::{
    collect_pdfs, ExtractOptions, JsonFormat, OutlineEngine, PersonaEngine, ProfileTable,
};

use dispatch::Engine;

/// Output file of a persona run.
const PERSONA_OUTPUT: &str = "persona_intelligence_output.json";

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a reader persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and headings from a PDF file or a directory of PDFs
    Outline {
        /// Input PDF file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Skip font metadata and use plain page text
        #[arg(long)]
        plain: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Detect the reader persona of a document collection and rank its pages
    Persona {
        /// Directory of PDF files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Persona profile table (JSON)
        #[arg(long, value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Pick an engine from the input directory's contents and run it
    Run {
        /// Input directory
        #[arg(long, value_name = "DIR", env = "DOCSIFT_INPUT", default_value = "/app/input")]
        input: PathBuf,

        /// Output directory
        #[arg(long, value_name = "DIR", env = "DOCSIFT_OUTPUT", default_value = "/app/output")]
        output: PathBuf,

        /// Directory of persona descriptions (defaults to `persona/` beside the input)
        #[arg(long, value_name = "DIR")]
        persona_dir: Option<PathBuf>,

        /// Persona profile table (JSON)
        #[arg(long, value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Skip detection and run the given engine
        #[arg(long, value_enum)]
        force: Option<EngineArg>,
    },

    /// Show the persona profile table
    Profiles {
        /// Persona profile table (JSON)
        #[arg(long, value_name = "FILE")]
        profiles: Option<PathBuf>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EngineArg {
    /// Outline extraction
    Outline,
    /// Persona analysis
    Persona,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Outline => Engine::Outline,
            EngineArg::Persona => Engine::Persona,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            plain,
            compact,
        } => cmd_outline(&input, &output, plain, json_format(compact)),
        Commands::Persona {
            input,
            output,
            profiles,
            compact,
        } => cmd_persona(&input, &output, profiles.as_deref(), json_format(compact)),
        Commands::Run {
            input,
            output,
            persona_dir,
            profiles,
            force,
        } => cmd_run(
            &input,
            &output,
            persona_dir.as_deref(),
            profiles.as_deref(),
            force,
        ),
        Commands::Profiles { profiles, json } => cmd_profiles(profiles.as_deref(), json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn load_profiles(path: Option<&Path>) -> docsift::Result<ProfileTable> {
    match path {
        Some(p) => ProfileTable::from_path(p),
        None => Ok(ProfileTable::builtin()),
    }
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    plain: bool,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = if input.is_dir() {
        collect_pdfs(input)?
    } else if has_pdf_extension(input) {
        vec![input.to_path_buf()]
    } else {
        return Err(format!("Not a PDF file: {}", input.display()).into());
    };

    let mut options = ExtractOptions::new();
    if plain {
        options = options.plain_only();
    }

    let pb = spinner(&format!("Extracting outlines from {} PDFs...", paths.len()))?;
    let entries = pipeline::outline_files(&paths, &options, &OutlineEngine::new())?;
    pb.finish_and_clear();

    for entry in &entries {
        let file = output.join(format!("{}.json", entry.stem()));
        write_json(&file, &entry.result, format)?;
        if entry.is_failed() {
            println!(
                "{} {} {}",
                "Failed".yellow(),
                entry.path.display(),
                "(wrote empty outline)".dimmed()
            );
        } else {
            println!(
                "{} {} ({} headings)",
                "Saved".green(),
                file.display(),
                entry.result.outline.len()
            );
        }
    }

    println!(
        "\n{} {} documents processed",
        "Done!".green().bold(),
        entries.len()
    );
    Ok(())
}

fn cmd_persona(
    input: &Path,
    output: &Path,
    profiles: Option<&Path>,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = PersonaEngine::new(load_profiles(profiles)?)?;
    let paths = collect_pdfs(input)?;

    let pb = spinner(&format!("Analyzing {} documents...", paths.len()))?;
    let result = pipeline::analyze_files(&paths, &ExtractOptions::default(), &engine);
    pb.finish_and_clear();
    let result = result?;

    println!("{}: {}", "Persona".bold(), result.persona.cyan());
    println!("{}: {}", "Job".bold(), result.job_to_be_done);
    println!("{}: {:.1}", "Confidence".bold(), result.confidence);
    println!("{}: {}", "Sections".bold(), result.section_count());

    let file = output.join(PERSONA_OUTPUT);
    write_json(&file, &PersonaReport::now(result), format)?;
    println!("\n{} {}", "Saved to".green(), file.display());
    Ok(())
}

fn cmd_run(
    input: &Path,
    output: &Path,
    persona_dir: Option<&Path>,
    profiles: Option<&Path>,
    force: Option<EngineArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("Input directory not found: {}", input.display()).into());
    }

    println!("{}: {}", "Input".bold(), input.display());
    println!("{}: {}", "Output".bold(), output.display());

    let engine = match force {
        Some(arg) => arg.into(),
        None => {
            let default_persona_dir = input.parent().map(|p| p.join("persona"));
            let persona_dir = persona_dir.or(default_persona_dir.as_deref());
            let detection = dispatch::detect(input, persona_dir)?;
            log::info!("Input analysis: {:?}", detection);
            detection.engine()
        }
    };

    match engine {
        Engine::Outline => {
            println!("{}", "Running outline extraction".cyan());
            cmd_outline(input, output, false, JsonFormat::Pretty)
        }
        Engine::Persona => {
            println!("{}", "Running persona analysis".cyan());
            cmd_persona(input, output, profiles, JsonFormat::Pretty)
        }
    }
}

fn cmd_profiles(profiles: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_profiles(profiles)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{}", "Persona Profiles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for profile in table.iter() {
        println!("{} ({})", profile.display_name().bold(), profile.name.dimmed());
        println!("  {}: {}", "Keywords".bold(), profile.keywords.len());
        println!("  {}: {}", "Priority".bold(), profile.priority_sections.join(", "));
        println!("  {}: {}", "Job".bold(), profile.job_to_be_done(1));
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona analysis tool");
    println!();
    println!("License: MIT");
}
