use std::time::Duration;

use serde::Deserialize;

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Root of the file server, e.g. `http://10.0.3.2:8080`. No default.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailConfig {
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FetchConfig {
    pub timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub filter: FilterConfig,
    pub thumbnails: ThumbnailConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { allowed_extensions: vec!["pdf".to_string(), "docx".to_string()] }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self { extension: "png".to_string() }
    }
}

impl AppConfig {
    /// Builds a configuration with the embedded defaults and the given server root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig { base_url: base_url.into() },
            filter: FilterConfig::default(),
            thumbnails: ThumbnailConfig::default(),
            fetch: FetchConfig::default(),
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch.timeout_ms.map(Duration::from_millis)
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    load_with(None)
}

/// Like [`load`], with `base_url` (e.g. from the command line) taking precedence
/// over every other source.
pub fn load_with(base_url: Option<&str>) -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: docbrowse.toml (in CWD)
        .add_source(::config::File::with_name("docbrowse").required(false));

    if let Ok(custom_path) = std::env::var("DOCBROWSE_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("DOCBROWSE").separator("__"));
    builder = builder.set_override_option("server.base_url", base_url)?;

    finish(builder.build()?)
}

/// Layers a TOML document over the embedded defaults, without consulting the
/// environment or the working directory.
pub fn from_toml_str(toml: &str) -> anyhow::Result<AppConfig> {
    let cfg = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
        .build()?;
    finish(cfg)
}

fn finish(cfg: ::config::Config) -> anyhow::Result<AppConfig> {
    let app_cfg: AppConfig = cfg
        .try_deserialize()
        .map_err(|e| anyhow::anyhow!("invalid configuration (is server.base_url set?): {}", e))?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    let base = cfg.server.base_url.trim();
    if base.is_empty() {
        return Err(anyhow::anyhow!("server.base_url must not be empty"));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(anyhow::anyhow!("invalid server.base_url: {} (expected http:// or https://)", base));
    }

    // Filter
    if cfg.filter.allowed_extensions.is_empty() {
        return Err(anyhow::anyhow!("filter.allowed_extensions must not be empty"));
    }
    for ext in &cfg.filter.allowed_extensions {
        if ext.is_empty() || ext.contains('.') {
            return Err(anyhow::anyhow!("invalid extension in filter.allowed_extensions: {:?}", ext));
        }
    }

    // Thumbnails
    if cfg.thumbnails.extension.is_empty() || cfg.thumbnails.extension.contains('.') {
        return Err(anyhow::anyhow!("invalid thumbnails.extension: {:?}", cfg.thumbnails.extension));
    }

    // Fetch
    if cfg.fetch.timeout_ms == Some(0) {
        return Err(anyhow::anyhow!("fetch.timeout_ms must be > 0 when set"));
    }
    if !base.starts_with("https://") {
        tracing::debug!("Using plain-text HTTP for {}", base);
    }

    Ok(())
}
