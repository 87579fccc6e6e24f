use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config;

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => config::config_path()?,
    };

    if config::create_default_config(&path)? {
        println!("{}", format!("  Created: {}", path.display()).green());
    } else {
        println!("  Config already exists: {}", path.display().dimmed());
    }

    Ok(())
}
