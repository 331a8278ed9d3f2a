use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::theme::Theme;

pub const DEFAULT_FACT_URL: &str = "https://catfact.ninja/fact";
pub const DEFAULT_IMAGES_URL: &str = "https://api.thecatapi.com/v1/images/search";
pub const DEFAULT_BREEDS_URL: &str = "https://api.thecatapi.com/v1/breeds";

/// catbox - cat facts, cat pictures, and a place to keep the good ones
///
/// Configuration priority: CLI args > Environment variables > Config file > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "catbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cat facts and cat pictures in your terminal", long_about = None)]
pub struct CliArgs {
    /// Random fact endpoint
    #[arg(long, env = "FACT_URL")]
    pub fact_url: Option<String>,

    /// Image search endpoint (breed filter is sent as ?breed_ids=)
    #[arg(long, env = "IMAGES_URL")]
    pub images_url: Option<String>,

    /// Breed catalog endpoint
    #[arg(long, env = "BREEDS_URL")]
    pub breeds_url: Option<String>,

    /// TheCatAPI key, sent as x-api-key on image and breed requests
    #[arg(long, env = "CAT_API_KEY")]
    pub cat_api_key: Option<String>,

    /// Per-request timeout in milliseconds (1000-60000); unset = client default
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Path to the SQLite database holding favorites
    #[arg(long, env = "FAVORITES_DB_PATH")]
    pub favorites_db_path: Option<String>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Color theme: nord, dos-blue, amber-crt, green-phosphor
    #[arg(long, env = "THEME")]
    pub theme: Option<String>,

    /// Where log output goes (the terminal belongs to the UI)
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<String>,

    /// Optional TOML file with the same settings
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

/// On-disk configuration. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub fact_url: Option<String>,
    pub images_url: Option<String>,
    pub breeds_url: Option<String>,
    pub cat_api_key: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub favorites_db_path: Option<String>,
    pub render_fps: Option<u32>,
    pub theme: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub fact_url: String,
    pub images_url: String,
    pub breeds_url: String,
    pub cat_api_key: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub favorites_db_path: String,
    pub render_fps: u32,
    pub theme: Theme,
    pub log_file: String,
}

impl Config {
    /// Browser configuration: no CLI, no env, no files.
    pub fn web_defaults() -> Self {
        Self {
            fact_url: DEFAULT_FACT_URL.to_string(),
            images_url: DEFAULT_IMAGES_URL.to_string(),
            breeds_url: DEFAULT_BREEDS_URL.to_string(),
            cat_api_key: None,
            request_timeout_ms: None,
            favorites_db_path: String::new(),
            render_fps: 30,
            theme: Theme::default(),
            log_file: String::new(),
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

fn load_file(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}

/// Load configuration from CLI args and environment variables
pub fn load() -> Result<Config> {
    resolve(CliArgs::parse())
}

/// Merge parsed args with the optional config file and apply defaults.
pub fn resolve(args: CliArgs) -> Result<Config> {
    let file = match &args.config_file {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            load_file(path)?
        }
        None => ConfigFile::default(),
    };

    let fact_url = args
        .fact_url
        .or(file.fact_url)
        .unwrap_or_else(|| DEFAULT_FACT_URL.to_string());
    validate_url(&fact_url, "FACT_URL")?;

    let images_url = args
        .images_url
        .or(file.images_url)
        .unwrap_or_else(|| DEFAULT_IMAGES_URL.to_string());
    validate_url(&images_url, "IMAGES_URL")?;

    let breeds_url = args
        .breeds_url
        .or(file.breeds_url)
        .unwrap_or_else(|| DEFAULT_BREEDS_URL.to_string());
    validate_url(&breeds_url, "BREEDS_URL")?;

    let request_timeout_ms = args
        .request_timeout_ms
        .or(file.request_timeout_ms)
        .map(|ms| validate_in_range(ms, 1000, 60000, "REQUEST_TIMEOUT_MS"))
        .transpose()?;

    let render_fps = args.render_fps.or(file.render_fps).unwrap_or(30);
    let render_fps = validate_in_range(render_fps, 1, 120, "RENDER_FPS")?;

    let theme = match args.theme.or(file.theme) {
        Some(name) => Theme::from_str(&name).map_err(|e| anyhow!("THEME: {e}"))?,
        None => Theme::default(),
    };

    let cat_api_key = args
        .cat_api_key
        .or(file.cat_api_key)
        .filter(|key| !key.trim().is_empty());

    Ok(Config {
        fact_url,
        images_url,
        breeds_url,
        cat_api_key,
        request_timeout_ms,
        favorites_db_path: args
            .favorites_db_path
            .or(file.favorites_db_path)
            .unwrap_or_else(|| "./catbox_favorites.db".to_string()),
        render_fps,
        theme,
        log_file: args
            .log_file
            .or(file.log_file)
            .unwrap_or_else(|| "./catbox.log".to_string()),
    })
}

/// Print current configuration (useful for debugging)
impl Config {
    pub fn print_summary(&self) {
        log::info!("catbox configuration:");
        log::info!("  Fact URL: {}", self.fact_url);
        log::info!("  Images URL: {}", self.images_url);
        log::info!("  Breeds URL: {}", self.breeds_url);
        match self.request_timeout_ms {
            Some(ms) => log::info!("  Request timeout: {ms}ms"),
            None => log::info!("  Request timeout: client default"),
        }
        log::info!("  Favorites DB: {}", self.favorites_db_path);
        log::info!("  Render FPS: {}", self.render_fps);
        log::info!("  Theme: {}", self.theme);
        if self.cat_api_key.is_some() {
            log::info!("  Cat API key: configured");
        }
    }
}
