mod config;
mod state;

pub use config::{BlockConfig, Config, HudConfig};
pub use state::SessionStore;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/focusblock[-dev]/`, creating it if needed.
///
/// `FOCUSBLOCK_DATA_DIR` overrides the location outright (used by tests
/// and sandboxed hosts). Set `FOCUSBLOCK_ENV=dev` to keep development data
/// separate.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FOCUSBLOCK_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSBLOCK_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("focusblock-dev")
    } else {
        base_dir.join("focusblock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
