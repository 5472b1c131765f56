use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use log::info;

use oasc_core::config::{self, CONFIG_FILE_NAME, OascConfig};
use oasc_core::ir::Namespace;
use oasc_core::parse::{self, spec::OpenApiSpec};
use oasc_core::sink::DirectorySink;
use oasc_core::{CompileOptions, check, compile};
use oasc_rust_client::RustClientGenerator;

#[derive(Parser)]
#[command(name = "oasc", about = "OpenAPI 3.x to Rust client compiler", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Rust client from an OpenAPI document
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory to write generated modules to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Package that generated modules live under, like `petstore.client`
        #[arg(short, long)]
        base_package: Option<String>,
    },

    /// Check that a document compiles, without writing anything
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Initialize a new oasc configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Path or http(s) URL of the OpenAPI document (YAML or JSON)
    #[arg(short, long)]
    source: Option<String>,

    /// Don't fail when the document uses unsupported features
    #[arg(long)]
    allow_warnings: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            output_dir,
            base_package,
        } => cmd_generate(source, output_dir, base_package),

        Commands::Validate { source } => cmd_validate(source),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oasc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<OascConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let config = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    Ok(config.unwrap_or_default())
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Reads a document from a file or URL. JSON is detected by extension;
/// anything else is read as YAML.
fn load_spec(source: &str) -> Result<OpenApiSpec> {
    let content = if is_url(source) {
        info!("fetching {source}");
        ureq::get(source)
            .call()
            .and_then(|mut response| response.body_mut().read_to_string())
            .with_context(|| format!("failed to fetch {source}"))?
    } else {
        fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };

    let path = source.split(['?', '#']).next().unwrap_or(source);
    let spec = match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("json") => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to load {source}"))?;
    Ok(spec)
}

fn cmd_generate(
    args: SourceArgs,
    output_dir: Option<PathBuf>,
    base_package: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?;
    let source = args.source.unwrap_or(cfg.source);
    let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(&cfg.output_dir));
    let Some(base_package) = base_package.or(cfg.base_package) else {
        anyhow::bail!("--base-package is required, or set `base_package` in {CONFIG_FILE_NAME}");
    };

    let spec = load_spec(&source)?;
    let options = CompileOptions {
        base_package: Namespace::parse(&base_package),
        allow_warnings: args.allow_warnings || cfg.allow_warnings,
    };

    eprintln!("Generating {} → {}", source, output_dir.display());
    let mut sink = DirectorySink::new(output_dir.clone());
    let report = compile(&spec, &options, &RustClientGenerator, &mut sink)?;
    for warning in &report.warnings {
        eprintln!("  warning: {warning}");
    }
    for path in &report.files {
        eprintln!("  wrote {}", output_dir.join(path).display());
    }
    eprintln!(
        "Generated {} files in {}",
        report.files.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(args: SourceArgs) -> Result<()> {
    let cfg = try_load_config()?;
    let source = args.source.unwrap_or(cfg.source);
    let spec = load_spec(&source)?;

    eprintln!("Valid OpenAPI {} document: {}", spec.openapi, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!("  Schemas: {}", spec.components.schemas.len());

    // Build the model too, collecting warnings instead of failing on them.
    let options = CompileOptions {
        base_package: Namespace::parse(cfg.base_package.as_deref().unwrap_or("api")),
        allow_warnings: true,
    };
    let model = check(&spec, &options)?;
    eprintln!("  Nodes: {}", model.nodes.len());
    if let Some(api) = model.api() {
        eprintln!("  Operations: {}", api.operations.len());
    }
    for warning in &model.warnings {
        eprintln!("  warning: {warning}");
    }

    if !model.warnings.is_empty() && !(args.allow_warnings || cfg.allow_warnings) {
        anyhow::bail!(
            "{} warnings; pass --allow-warnings to accept them",
            model.warnings.len()
        );
    }
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
