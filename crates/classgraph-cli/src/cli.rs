//! Command-line interface for the classgraph utility
//!
//! Provides a CLI to analyze TypeScript sources and emit Mermaid diagrams.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use classgraph::analysis::Analyzer;
use classgraph::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use classgraph::languages::SourceLanguage;
use classgraph::plugins::EncoderRegistry;
use classgraph::{AnalysisOptions, AnalysisResult, DiagramType, Direction, EncodeOptions};

/// Classgraph - Turn TypeScript sources into Mermaid diagrams
#[derive(Parser)]
#[command(name = "classgraph")]
#[command(about = "Extract classes and interfaces from TypeScript and emit Mermaid diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Options shared by every command that analyzes source
#[derive(clap::Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Input source file (use - for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Source language; defaults to the input file extension, else TypeScript
    #[arg(long, value_enum)]
    pub language: Option<LanguageChoice>,

    /// Drop private members from the output
    #[arg(long)]
    pub exclude_private: bool,

    /// How many levels of nested declarations to extract (1-10)
    #[arg(long, default_value_t = classgraph::DEFAULT_DEPTH)]
    pub max_depth: usize,
}

impl AnalysisArgs {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions::new()
            .with_include_private(!self.exclude_private)
            .with_max_depth(self.max_depth)
    }

    fn language(&self) -> SourceLanguage {
        self.language
            .map(SourceLanguage::from)
            .or_else(|| self.input.as_deref().and_then(SourceLanguage::from_path))
            .unwrap_or_default()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the structural model of a source file as JSON
    Analyze {
        #[command(flatten)]
        source: AnalysisArgs,

        /// Output file for the JSON model (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Generate Mermaid diagram text from a source file
    Generate {
        #[command(flatten)]
        source: AnalysisArgs,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram type to generate
        #[arg(long = "type", value_enum, default_value_t = DiagramChoice::Class)]
        diagram_type: DiagramChoice,

        /// Layout direction (TB|TD|BT|LR|RL)
        #[arg(long, value_parser = parse_direction)]
        direction: Option<Direction>,

        /// Accessible title emitted in the diagram
        #[arg(long)]
        title: Option<String>,
    },

    /// Show supported diagram types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Source languages selectable on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LanguageChoice {
    #[value(alias = "typescript")]
    Ts,
    #[value(alias = "jsx")]
    Tsx,
}

impl From<LanguageChoice> for SourceLanguage {
    fn from(value: LanguageChoice) -> Self {
        match value {
            LanguageChoice::Ts => SourceLanguage::TypeScript,
            LanguageChoice::Tsx => SourceLanguage::Tsx,
        }
    }
}

/// Diagram types selectable on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DiagramChoice {
    Class,
    Flowchart,
    Sequence,
    Er,
    State,
}

impl From<DiagramChoice> for DiagramType {
    fn from(value: DiagramChoice) -> Self {
        match value {
            DiagramChoice::Class => DiagramType::Class,
            DiagramChoice::Flowchart => DiagramType::Flowchart,
            DiagramChoice::Sequence => DiagramType::Sequence,
            DiagramChoice::Er => DiagramType::Er,
            DiagramChoice::State => DiagramType::State,
        }
    }
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    s.parse()
}

/// Main CLI application
pub struct ClassgraphApp {
    registry: EncoderRegistry,
}

impl ClassgraphApp {
    /// Create a new application instance with the default encoders
    pub fn new() -> Self {
        Self {
            registry: EncoderRegistry::with_default_encoders(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Classgraph v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Analyze {
                source,
                output,
                pretty,
            } => {
                let content = self.read_input(source.input.clone())?;
                if cli.verbose {
                    eprintln!("Read {} bytes of input", content.len());
                }
                let json = self.analyze_command(&content, &source, pretty)?;
                self.write_output(output, &json)
            }
            Commands::Generate {
                source,
                output,
                diagram_type,
                direction,
                title,
            } => {
                let content = self.read_input(source.input.clone())?;
                if cli.verbose {
                    eprintln!("Read {} bytes of input", content.len());
                }

                let mut options = EncodeOptions::new(diagram_type.into());
                if let Some(direction) = direction {
                    options = options.with_direction(direction);
                }
                if let Some(title) = title {
                    options = options.with_title(title);
                }

                let diagram = self.generate_command(&content, &source, &options)?;
                if cli.verbose {
                    eprintln!("Generated {} diagram", options.diagram_type);
                }
                self.write_output(output, &diagram)
            }
            Commands::Types { json } => {
                if cli.verbose {
                    eprintln!("Listing diagram types");
                }
                let listing = self.types_command(json)?;
                self.write_output(None, &listing)
            }
        }
    }

    fn analyze_source(&self, content: &str, args: &AnalysisArgs) -> Result<AnalysisResult> {
        let language = args.language();
        Analyzer::new(language)
            .with_options(args.options())
            .analyze(content)
            .with_context(|| format!("Failed to analyze {} source", language))
    }

    /// Handle the analyze command, returning the JSON model
    pub fn analyze_command(&self, content: &str, args: &AnalysisArgs, pretty: bool) -> Result<String> {
        let result = self.analyze_source(content, args)?;
        let json = if pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        Ok(json)
    }

    /// Handle the generate command, returning the diagram text
    pub fn generate_command(
        &self,
        content: &str,
        args: &AnalysisArgs,
        options: &EncodeOptions,
    ) -> Result<String> {
        let result = self.analyze_source(content, args)?;
        let diagram = self
            .registry
            .encode(&result, options)
            .with_context(|| format!("Failed to generate {} diagram", options.diagram_type))?;
        Ok(diagram.diagram_text)
    }

    /// Handle the types command
    pub fn types_command(&self, json: bool) -> Result<String> {
        let types = DiagramType::variants();
        let supported = self.registry.supported_types();

        if json {
            let entries: Vec<_> = types
                .iter()
                .map(|diagram_type| {
                    serde_json::json!({
                        "name": diagram_type.to_string(),
                        "keyword": diagram_type.keyword(),
                        "supported": supported.contains(diagram_type),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "types": entries,
                "supported": supported.len(),
            });
            return Ok(serde_json::to_string_pretty(&listing)?);
        }

        let mut listing = String::from("Diagram types:\n");
        for diagram_type in types {
            let status = if supported.contains(diagram_type) {
                "supported"
            } else {
                "no encoder"
            };
            listing.push_str(&format!(
                "  {:<10} - Mermaid {} ({})\n",
                diagram_type.to_string(),
                diagram_type.keyword(),
                status
            ));
        }
        listing.push_str(&format!("\nTotal: {} diagram types supported\n", supported.len()));
        Ok(listing)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if !is_stdio(&path) => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if !is_stdio(&path) => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for ClassgraphApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}
