//! Show or initialize the configuration file.

use crate::config::{self, Config};

pub fn cmd_config(init: bool) -> anyhow::Result<()> {
    if init {
        if let Some(path) = config::config_path().filter(|p| p.exists()) {
            anyhow::bail!("{} already exists", path.display());
        }
        let path = config::save(&Config::default())?;
        println!("✓ Wrote default configuration to {}", path.display());
        return Ok(());
    }

    match config::config_path() {
        Some(path) if path.exists() => println!("# {}", path.display()),
        Some(path) => println!("# {} (not present, showing defaults)", path.display()),
        None => println!("# no config directory, showing defaults"),
    }
    print!("{}", toml::to_string_pretty(&config::load())?);
    Ok(())
}
