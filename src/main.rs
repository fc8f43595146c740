use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use markdown_ex::{MarkdownEx, MarkdownExConfig, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Highlighting theme used when `css` is given no `--theme`.
const DEFAULT_THEME: &str = "InspiredGitHub";

/// Render markdown through the markdown_ex template function.
#[derive(Debug, Parser)]
#[command(name = "markdown-ex", version, about, long_about = None)]
struct Cli {
    /// Enable info level logging (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a markdown file to HTML
    Render(RenderArgs),
    /// Validate a markdown_ex directive file
    Check {
        /// Directive file
        config: PathBuf,
    },
    /// Print the stylesheet for highlighted code blocks
    Css {
        /// Syntax highlighting theme
        #[arg(long, default_value = DEFAULT_THEME)]
        theme: String,

        /// List bundled themes instead
        #[arg(long)]
        list: bool,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Markdown input, stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// markdown_ex directive file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mermaid script location, overrides the directive file
    #[arg(long)]
    mermaid_js: Option<String>,
}

impl RenderArgs {
    /// Resolves adapter configuration from the directive file and flags.
    ///
    /// # Errors
    ///
    /// Returns error if the directive file cannot be read or parsed.
    fn load_config(&self) -> Result<MarkdownExConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => MarkdownExConfig::default(),
        };

        if let Some(location) = &self.mermaid_js {
            config.mermaid_js = Some(location.clone());
        }

        Ok(config)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("Failed to read input: {}", path.display())),
            _ => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("Failed to read stdin")?;
                Ok(input)
            }
        }
    }
}

fn read_config(path: &Path) -> Result<MarkdownExConfig> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    MarkdownExConfig::from_directive(&source)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

fn render(args: RenderArgs) -> Result<()> {
    let config = args.load_config()?;
    let markdown_ex = MarkdownEx::configure(config).provision();

    let input = args.read_input()?;
    let html = markdown_ex
        .convert(&Value::String(input))
        .context("Failed to convert markdown")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = html.len(), "Wrote HTML");
        }
        None => io::stdout()
            .write_all(html.as_bytes())
            .context("Failed to write stdout")?,
    }

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let config = read_config(path)?;

    match &config.mermaid_js {
        Some(location) => println!("mermaid_js: {}", location),
        None => println!("mermaid_js: (none, diagram script disabled)"),
    }

    Ok(())
}

fn css(theme: &str, list: bool) -> Result<()> {
    if list {
        for name in markdown_ex::theme_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let css = markdown_ex::stylesheet(theme).context("Failed to generate stylesheet")?;
    io::stdout()
        .write_all(css.as_bytes())
        .context("Failed to write stdout")?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Render(args) => render(args),
        Command::Check { config } => check(&config),
        Command::Css { theme, list } => css(&theme, list),
    }
}
