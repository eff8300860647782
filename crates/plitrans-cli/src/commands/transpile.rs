//! Transpile command - PL/I source to C# or JavaScript.

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use plitrans::Target;

use crate::config::Config;
use crate::output::DiagnosticEntry;

/// Run the transpile command.
pub fn run(
    input: PathBuf,
    target: Option<Target>,
    output: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let source = super::read_source(&input)?;

    let target = target.unwrap_or(config.transpile.target);
    tracing::info!("Transpiling {} to {}", input.display(), target);

    let emitter = config.emitter(target);
    let result = plitrans::transpile_with(&source, emitter.as_ref());

    let file = input.display().to_string();
    for diag in &result.diagnostics {
        let entry = DiagnosticEntry::new(diag, &file, &source);
        if diag.is_error() {
            tracing::error!("{entry}");
        } else {
            tracing::warn!("{entry}");
        }
    }

    match output_path(&input, output, &config, target) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            std::fs::write(&path, &result.output)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write output file: {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", result.output),
    }

    Ok(())
}

/// Where to write the output: the explicit path, else `<directory>/<stem>.<ext>`
/// when an output directory is configured, else stdout (`None`).
fn output_path(
    input: &Path,
    explicit: Option<PathBuf>,
    config: &Config,
    target: Target,
) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    let dir = config.output.directory.as_ref()?;
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    Some(dir.join(format!("{}.{}", stem.to_string_lossy(), target.extension())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_defaults_to_stdout() {
        let config = Config::default();
        assert_eq!(output_path(Path::new("a.pli"), None, &config, Target::CSharp), None);
    }

    #[test]
    fn test_output_path_explicit_wins() {
        let mut config = Config::default();
        config.output.directory = Some(PathBuf::from("gen"));
        let out = output_path(
            Path::new("a.pli"),
            Some(PathBuf::from("x.txt")),
            &config,
            Target::CSharp,
        );
        assert_eq!(out, Some(PathBuf::from("x.txt")));
    }

    #[test]
    fn test_output_path_from_directory() {
        let mut config = Config::default();
        config.output.directory = Some(PathBuf::from("gen"));
        let out = output_path(Path::new("src/payroll.pli"), None, &config, Target::JavaScript);
        assert_eq!(out, Some(PathBuf::from("gen/payroll.js")));

        // Only the final extension is replaced.
        let v2 = output_path(Path::new("payroll.v2.pli"), None, &config, Target::JavaScript);
        let v3 = output_path(Path::new("payroll.v3.pli"), None, &config, Target::JavaScript);
        assert_eq!(v2, Some(PathBuf::from("gen/payroll.v2.js")));
        assert_eq!(v3, Some(PathBuf::from("gen/payroll.v3.js")));
    }
}
