//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;
use tower_lsp::lsp_types::DocumentSymbol;

use leafconf_lsp::config::{Settings, CONFIG_FILE};
use leafconf_lsp::SymbolAnalyzer;
use leafconf_validate::{ValidationEngine, ValidationReport};

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "leafconf")]
#[command(author, version, about = "Checks Leaf proxy configuration files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate configuration files
    Check {
        /// Files or glob patterns to check
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Settings file (defaults to leafconf.toml in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the sections and declarations of a file
    Outline {
        /// Configuration file
        input: PathBuf,
    },
}

/// Validation result of one file
#[derive(Debug, Clone, Serialize)]
pub struct CheckedFile {
    pub file: String,
    #[serde(flatten)]
    pub report: ValidationReport,
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            inputs,
            format,
            config,
        } => {
            check_command(&inputs, format, config.as_deref())?;
        }
        Commands::Outline { input } => {
            outline_command(&input)?;
        }
    }

    Ok(())
}

/// Execute the check command
pub fn check_command(inputs: &[String], format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let settings = load_settings(config)?;
    let files = check_files(inputs, &settings)?;
    println!("{}", render_report(&files, format)?);

    // Exit with error code if there are errors
    if files.iter().any(|f| f.report.errors > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Validate every file named by `inputs`
///
/// Each input is an existing path or a glob pattern that must match at
/// least one file.
pub fn check_files(inputs: &[String], settings: &Settings) -> Result<Vec<CheckedFile>> {
    let engine = ValidationEngine::with_defaults();
    let mut checked = Vec::new();

    for path in expand_inputs(inputs)? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let file = path.display().to_string();

        let doc = leafconf_core::ConfDocument::parse(&content);
        let diagnostics = settings
            .apply(engine.validate(&doc))
            .into_iter()
            .map(|d| d.with_file(file.clone()))
            .collect();

        checked.push(CheckedFile {
            file,
            report: ValidationReport::new(diagnostics),
        });
    }

    Ok(checked)
}

/// Format check results
pub fn render_report(files: &[CheckedFile], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(files).context("Failed to serialize diagnostics to JSON")
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for checked in files {
                if checked.report.is_clean() {
                    let _ = writeln!(out, "✓ No issues found in {}", checked.file);
                    continue;
                }
                for diag in &checked.report.diagnostics {
                    let _ = writeln!(out, "{}\n", diag);
                }
            }

            let errors: usize = files.iter().map(|f| f.report.errors).sum();
            let warnings: usize = files.iter().map(|f| f.report.warnings).sum();
            let _ = write!(
                out,
                "Checked {} file(s): {} error(s) and {} warning(s)",
                files.len(),
                errors,
                warnings
            );
            Ok(out)
        }
    }
}

/// Execute the outline command
pub fn outline_command(input: &Path) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    print!("{}", outline_text(&content));
    Ok(())
}

/// Indented symbol tree, one symbol per line with its 1-based line number
pub fn outline_text(text: &str) -> String {
    let mut out = String::new();
    for symbol in SymbolAnalyzer::extract_symbols(text) {
        write_symbol(&mut out, &symbol, 0);
    }
    out
}

fn write_symbol(out: &mut String, symbol: &DocumentSymbol, depth: usize) {
    let _ = writeln!(
        out,
        "{:indent$}{} ({}) :{}",
        "",
        symbol.name,
        symbol.detail.as_deref().unwrap_or_default(),
        symbol.selection_range.start.line + 1,
        indent = depth * 2
    );
    for child in symbol.children.iter().flatten() {
        write_symbol(out, child, depth + 1);
    }
}

/// Resolve paths and glob patterns to files, keeping input order
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            paths.push(path.to_path_buf());
            continue;
        }

        let before = paths.len();
        for entry in glob(input).with_context(|| format!("Invalid glob pattern: {}", input))? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => eprintln!("Warning: Could not read {}", e),
            }
        }
        if paths.len() == before {
            anyhow::bail!("Input file not found: {}", input);
        }
    }

    Ok(paths)
}

/// Load settings from a config file or the current directory
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Settings::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => Settings::load(Path::new("."))
            .with_context(|| format!("Failed to load {}", CONFIG_FILE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafconf_core::{Diagnostic, Position, Range};

    #[test]
    fn test_cli_parse_check() {
        let args = vec!["leafconf", "check", "leaf.conf"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check {
                inputs,
                format,
                config,
            } => {
                assert_eq!(inputs, vec!["leaf.conf".to_string()]);
                assert!(matches!(format, OutputFormat::Text));
                assert!(config.is_none());
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_check_globs_json() {
        let args = vec![
            "leafconf", "check", "a.conf", "conf.d/*.conf", "--format", "json", "--config",
            "ci.toml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check {
                inputs,
                format,
                config,
            } => {
                assert_eq!(inputs.len(), 2);
                assert!(matches!(format, OutputFormat::Json));
                assert_eq!(config, Some(PathBuf::from("ci.toml")));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_check_requires_input() {
        assert!(Cli::try_parse_from(vec!["leafconf", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_outline() {
        let cli = Cli::try_parse_from(vec!["leafconf", "outline", "leaf.conf"]).unwrap();
        match cli.command {
            Commands::Outline { input } => assert_eq!(input, PathBuf::from("leaf.conf")),
            _ => panic!("Expected Outline command"),
        }
    }

    #[test]
    fn test_render_text_report() {
        let diag = Diagnostic::error(Range::on_line(2, 8, 3), "Proxy or proxy group \"Foo\" is not defined.")
            .with_code("LC411")
            .with_file("leaf.conf");
        let files = vec![
            CheckedFile {
                file: "leaf.conf".to_string(),
                report: ValidationReport::new(vec![diag]),
            },
            CheckedFile {
                file: "clean.conf".to_string(),
                report: ValidationReport::new(Vec::new()),
            },
        ];

        let text = render_report(&files, OutputFormat::Text).unwrap();
        assert!(text.contains("error[LC411]: Proxy or proxy group \"Foo\" is not defined."));
        assert!(text.contains("--> leaf.conf:2:8"));
        assert!(text.contains("✓ No issues found in clean.conf"));
        assert!(text.ends_with("Checked 2 file(s): 1 error(s) and 0 warning(s)"));
    }

    #[test]
    fn test_render_json_report() {
        let diag = Diagnostic::warning(Range::point(Position::new(1, 1)), "A \"FINAL\" rule is missing.");
        let files = vec![CheckedFile {
            file: "leaf.conf".to_string(),
            report: ValidationReport::new(vec![diag]),
        }];

        let json = render_report(&files, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["file"], "leaf.conf");
        assert_eq!(value[0]["warnings"], 1);
        assert_eq!(value[0]["diagnostics"][0]["message"], "A \"FINAL\" rule is missing.");
    }

    #[test]
    fn test_outline_text() {
        let text = "[Proxy]\nDirect = direct\n\n[Rule]\nFINAL, Direct\n";
        assert_eq!(
            outline_text(text),
            "Proxy (section) :1\n  Direct (proxy) :2\nRule (section) :4\n  FINAL (rule) :5\n    Direct (outbound) :5\n"
        );
    }
}
