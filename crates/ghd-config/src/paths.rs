//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/ghd/`
//! - macOS: `~/Library/Application Support/ghd/`
//! - Windows: `%APPDATA%\ghd\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "ghd";

/// Get the application config directory
/// Returns ~/.config/ghd/ on Linux, ~/Library/Application Support/ghd/ on macOS
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
