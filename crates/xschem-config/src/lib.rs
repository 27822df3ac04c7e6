//! Configuration loading for the editing engine.
//!
//! Parses an optional `xschem.toml` for the few knobs the core actually
//! consults: snap granularity (and the spatial index bucket multiplier
//! derived from it), the zoom-to-fit shrink factor, the `unzoom_nodrift`
//! round-trip guarantee, and the number of user-visible layers. Unknown
//! fields are ignored so the file format can grow without breaking
//! existing configs, mirroring `core-config`'s tolerant TOML deserialization.

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Layers 0..=6 are reserved (wire, pin, text, ...); user layers start here.
pub const RESERVED_LAYERS: u8 = 7;

/// Fixed meanings for the reserved layer numbers (spec §3: "layers 0..6
/// are reserved (wire, pin, text, etc.)"). Kept as named constants rather
/// than a config knob since changing them would silently reinterpret
/// every existing sheet's geometry.
pub mod layers {
    pub const WIRE: u8 = 0;
    pub const PIN: u8 = 1;
    pub const TEXT: u8 = 2;
    pub const OUTLINE: u8 = 3;
    pub const GRID: u8 = 4;
    pub const SELECTION: u8 = 5;
    pub const HILIGHT: u8 = 6;
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridConfig {
    #[serde(default = "GridConfig::default_snap")]
    pub snap: f64,
    #[serde(default = "GridConfig::default_bucket_k")]
    pub bucket_k: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            snap: Self::default_snap(),
            bucket_k: Self::default_bucket_k(),
        }
    }
}

impl GridConfig {
    const fn default_snap() -> f64 {
        5.0
    }
    const fn default_bucket_k() -> f64 {
        4.0
    }

    /// Side length of one spatial-index bucket (spec §4.4: `BUCKET = k*snap`).
    pub fn bucket_side(&self) -> f64 {
        self.bucket_k * self.snap
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewportConfig {
    #[serde(default = "ViewportConfig::default_shrink")]
    pub shrink: f64,
    #[serde(default = "ViewportConfig::default_unzoom_nodrift")]
    pub unzoom_nodrift: bool,
    #[serde(default)]
    pub centered: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            shrink: Self::default_shrink(),
            unzoom_nodrift: Self::default_unzoom_nodrift(),
            centered: false,
        }
    }
}

impl ViewportConfig {
    const fn default_shrink() -> f64 {
        0.97
    }
    const fn default_unzoom_nodrift() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayerConfig {
    #[serde(default = "LayerConfig::default_count")]
    pub count: u8,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            count: Self::default_count(),
        }
    }
}

impl LayerConfig {
    const fn default_count() -> u8 {
        23
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub layers: LayerConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
}

/// Best-effort config path: local working directory first, then the
/// platform config dir, matching `core-config::discover`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("xschem.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("xschem").join("xschem.toml");
    }
    PathBuf::from("xschem.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = std::fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config { file }),
            Err(e) => {
                info!(target: "config", error = %e, path = %path.display(), "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}

/// Directory used to cache remote web symbol fetches, honoring
/// `XSCHEM_TMP_DIR` if set (spec §6 persisted-state).
pub fn web_symbol_cache_dir() -> PathBuf {
    let base = std::env::var_os("XSCHEM_TMP_DIR")
        .map(PathBuf::from)
        .or_else(|| dirs::cache_dir())
        .unwrap_or_else(std::env::temp_dir);
    base.join("xschem_web")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_xschem__.toml"))).unwrap();
        assert_eq!(cfg.file.grid.snap, 5.0);
        assert_eq!(cfg.file.viewport.shrink, 0.97);
    }

    #[test]
    fn bucket_side_derives_from_snap_and_k() {
        let grid = GridConfig {
            snap: 5.0,
            bucket_k: 4.0,
        };
        assert_eq!(grid.bucket_side(), 20.0);
    }

    #[test]
    fn parses_overridden_values() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[grid]\nsnap = 2.5\n[viewport]\nshrink = 1.0\ncentered = true\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.grid.snap, 2.5);
        assert_eq!(cfg.file.viewport.shrink, 1.0);
        assert!(cfg.file.viewport.centered);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not valid toml {{{").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.grid.snap, 5.0);
    }
}
