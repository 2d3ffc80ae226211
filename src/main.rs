use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use patternmap::analyzers::analyze_with_thresholds;
use patternmap::cli::{Cli, Commands};
use patternmap::config;
use patternmap::core::Language;
use patternmap::io::{create_writer, OutputFormat};

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            language,
        } => run_analyze(&path, format.into(), output.as_deref(), language.as_deref()),
        Commands::Init { force } => {
            init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_analyze(
    path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    language: Option<&str>,
) -> Result<ExitCode> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let language_name = resolve_language(path, language);

    let config = config::load_config();
    let result = analyze_with_thresholds(&source, &language_name, &config.thresholds);

    let mut writer = open_writer(output, format)?;
    match result {
        Ok(report) => {
            writer.write_report(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            writer.write_error(&error)?;
            log::error!("analysis of {} failed: {}", path.display(), error);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Explicit --language wins over extension detection. An unknown extension
/// falls through as a raw name so the analyzer reports it as unsupported.
fn resolve_language(path: &Path, language: Option<&str>) -> String {
    if let Some(name) = language {
        return name.to_string();
    }
    let extension = path.extension().and_then(|ext| ext.to_str());
    extension
        .and_then(Language::from_extension)
        .map(|lang| lang.display_name().to_string())
        .unwrap_or_else(|| extension.unwrap_or("unknown").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_language_wins_over_extension() {
        assert_eq!(resolve_language(Path::new("a.py"), Some("rust")), "rust");
    }

    #[test]
    fn extension_detection_maps_py_to_python() {
        assert_eq!(resolve_language(Path::new("a.py"), None), "Python");
        assert_eq!(resolve_language(Path::new("a.pyw"), None), "Python");
    }

    #[test]
    fn unknown_extension_passes_through_as_raw_name() {
        assert_eq!(resolve_language(Path::new("a.rs"), None), "rs");
        assert_eq!(resolve_language(Path::new("Makefile"), None), "unknown");
    }
}

fn open_writer(
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<Box<dyn patternmap::io::OutputWriter>> {
    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(create_writer(file, format))
        }
        None => Ok(create_writer(std::io::stdout(), format)),
    }
}

fn init_config(force: bool) -> Result<()> {
    let path = PathBuf::from(".patternmap.toml");
    if path.exists() && !force {
        anyhow::bail!(".patternmap.toml already exists (use --force to overwrite)");
    }
    let mut file = fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(config::default_config_toml().as_bytes())?;
    println!("Wrote {}", path.display());
    Ok(())
}
