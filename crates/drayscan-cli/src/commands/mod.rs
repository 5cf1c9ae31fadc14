pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod parse;

use std::path::{Path, PathBuf};

use tracing::debug;

use drayscan_core::DrayscanConfig;

/// Shown whenever a document could not be turned into load fields.
pub const MANUAL_ENTRY_HINT: &str =
    "Could not process the file. Please try again or enter the load details manually.";

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drayscan")
        .join("config.json")
}

/// Load the configuration named by `-c`, else the user file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DrayscanConfig> {
    if let Some(path) = config_path {
        return Ok(DrayscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(DrayscanConfig::from_file(&default_path)?)
    } else {
        Ok(DrayscanConfig::default())
    }
}

/// Apply a `--model-dir` override and make sure the models are on disk.
pub fn resolve_models(
    config: &mut DrayscanConfig,
    model_dir: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(dir) = model_dir {
        config.models.model_dir = dir.to_path_buf();
    }

    let missing = config.models.missing_files();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
        anyhow::bail!(
            "OCR models not found at {}.\n\n\
             Missing: {}. Pass --model-dir or set models.model_dir.",
            config.models.model_dir.display(),
            names.join(", ")
        );
    }

    Ok(())
}
