//
//  tonicpow
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Low-level configuration file I/O.
//!
//! Used by [`Config`](super::Config) to read and write `config.toml`.
//! Writes create any missing parent directories.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the configuration file at `path` into a string.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, or not UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// Existing files are overwritten.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    Ok(())
}

/// Returns `true` if a file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
