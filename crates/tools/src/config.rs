use std::path::{Path, PathBuf};

use cli_support::CanvasOpts;
use serde::Deserialize;
use vision_core::canvas::DEFAULT_BRUSH_RADIUS;

const DEFAULT_CONFIG_NAME: &str = "digitpad.toml";
const CONFIG_ENV: &str = "DIGITPAD_CONFIG";
const DEFAULT_MODEL_PATH: &str = "assets/models/digit_net.bin";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct PadConfig {
    pub model_path: PathBuf,
    pub canvas: CanvasOpts,
    pub brush_radius: u32,
    pub log_filter: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            canvas: CanvasOpts::default(),
            brush_radius: DEFAULT_BRUSH_RADIUS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct PadConfigFile {
    model_path: Option<String>,
    canvas: Option<CanvasSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Deserialize, Default)]
struct CanvasSection {
    width: Option<u32>,
    height: Option<u32>,
    brush_radius: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingSection {
    filter: Option<String>,
}

impl PadConfig {
    /// `$DIGITPAD_CONFIG` if set, else `digitpad.toml` in the working directory,
    /// else built-in defaults.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_NAME));
        let cfg = Self::from_path(&path).unwrap_or_default();
        cfg.warn_if_invalid();
        cfg
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let raw = std::fs::read_to_string(path).ok()?;
        match Self::from_toml(&raw) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                eprintln!("digitpad config: ignoring {}: {err}", path.display());
                None
            }
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let file: PadConfigFile = toml::from_str(raw)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: PadConfigFile) -> Self {
        let defaults = Self::default();
        let canvas = file.canvas.unwrap_or_default();
        PadConfig {
            model_path: file
                .model_path
                .map(|v| expand_path(&v))
                .unwrap_or(defaults.model_path),
            canvas: CanvasOpts {
                width: canvas.width.unwrap_or(defaults.canvas.width),
                height: canvas.height.unwrap_or(defaults.canvas.height),
            },
            brush_radius: canvas.brush_radius.unwrap_or(defaults.brush_radius),
            log_filter: file
                .logging
                .and_then(|l| l.filter)
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(defaults.log_filter),
        }
    }

    // Runs before logging is installed, hence stderr.
    fn warn_if_invalid(&self) {
        if self.model_path.as_os_str().is_empty() {
            eprintln!("digitpad config: model_path is empty; pass --model");
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            eprintln!("digitpad config: canvas size must be non-zero; it will be clamped to 1");
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    let mut out = raw.to_string();
    if let Some(stripped) = out.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME") {
            out = format!("{home}{stripped}");
        }
    }
    PathBuf::from(expand_env(&out))
}

fn expand_env(input: &str) -> String {
    let mut out = String::new();
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match std::env::var(key) {
                    Ok(val) => out.push_str(&val),
                    Err(_) => out.push_str(&rest[start..start + 3 + end]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
