//! Config command - show or initialize configuration.

use std::path::Path;

use miette::Result;

use crate::config::{Config, PROJECT_CONFIG};

/// Run the config command.
pub fn run(init: bool, config_path: Option<&Path>) -> Result<()> {
    if init {
        let path = Path::new(PROJECT_CONFIG);
        if path.exists() {
            return Err(miette::miette!("{} already exists", path.display()));
        }
        Config::default().write_to_file(path)?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let config = Config::load(config_path)?;
    if let Some(user) = Config::user_config_path() {
        tracing::debug!("User config path: {}", user.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
