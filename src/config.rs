use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read from the working directory at startup.
pub const CONFIG_PATH: &str = "casefolio.toml";

/// Overrides `[data] source` when set.
pub const DATA_SOURCE_ENV: &str = "CASEFOLIO_DATA_SOURCE";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub data: DataSection,
    pub modal: ModalSection,
    pub fallback: FallbackConfig,
    pub ui: UiSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub owner: String,
    pub tagline: String,
    pub typing_phrases: Vec<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        SiteSection {
            title: "Portfolio".to_string(),
            owner: "Your Name".to_string(),
            tagline: "I build things for the web.".to_string(),
            typing_phrases: vec![
                "Developer".to_string(),
                "Designer".to_string(),
                "Problem Solver".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Filesystem path or `http(s)://` URL of `projects.json`.
    pub source: String,
    pub timeout_secs: u64,
}

impl Default for DataSection {
    fn default() -> Self {
        DataSection {
            source: "website/projects.json".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Where `projects.json` lives, decided from the configured string.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLocation {
    File(PathBuf),
    Http(url::Url),
}

impl DataSection {
    pub fn location(&self) -> SourceLocation {
        match url::Url::parse(&self.source) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => SourceLocation::Http(u),
            _ => SourceLocation::File(PathBuf::from(&self.source)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModalSection {
    pub open_delay_ms: u64,
    pub close_delay_ms: u64,
}

impl Default for ModalSection {
    fn default() -> Self {
        ModalSection {
            open_delay_ms: 10,
            close_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub notice: String,
    pub palette: Vec<String>,
    pub projects: Vec<PlaceholderProject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderProject {
    pub title: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        let placeholder = |title: &str, tech: &[&str]| PlaceholderProject {
            title: title.to_string(),
            tech: tech.iter().map(|t| t.to_string()).collect(),
        };
        FallbackConfig {
            notice: "Live projects could not be loaded. Showing highlights instead.".to_string(),
            palette: vec![
                "linear-gradient(135deg,#667eea,#764ba2)".to_string(),
                "linear-gradient(135deg,#f093fb,#f5576c)".to_string(),
                "linear-gradient(135deg,#4facfe,#00f2fe)".to_string(),
                "linear-gradient(135deg,#43e97b,#38f9d7)".to_string(),
            ],
            projects: vec![
                placeholder("E-Commerce Platform", &["React", "Node.js", "MongoDB"]),
                placeholder("Task Manager", &["Vue", "Firebase"]),
                placeholder("Weather Dashboard", &["JavaScript", "API", "CSS"]),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub navbar_scroll_threshold: u32,
    pub back_to_top_threshold: u32,
    pub anchor_offset: u32,
    /// Distance above the viewport bottom at which sections fade in.
    pub reveal_offset: u32,
}

impl Default for UiSection {
    fn default() -> Self {
        UiSection {
            navbar_scroll_threshold: 50,
            back_to_top_threshold: 300,
            anchor_offset: 80,
            reveal_offset: 100,
        }
    }
}

/// Parse a config document. Missing keys take their defaults.
pub fn parse(toml_str: &str) -> Result<SiteConfig, String> {
    toml::from_str(toml_str).map_err(|e| format!("Invalid config: {}", e))
}

/// Load the config file, falling back to defaults when it is missing or
/// malformed, then apply the environment override.
pub fn load(path: &Path) -> SiteConfig {
    let mut config = match std::fs::read_to_string(path) {
        Ok(s) => match parse(&s) {
            Ok(c) => c,
            Err(e) => {
                log::error!("[boot] {} in {}, using defaults", e, path.display());
                SiteConfig::default()
            }
        },
        Err(_) => {
            log::info!("[boot] {} not found, using defaults", path.display());
            SiteConfig::default()
        }
    };

    if let Ok(source) = std::env::var(DATA_SOURCE_ENV) {
        if !source.trim().is_empty() {
            config.data.source = source.trim().to_string();
        }
    }
    config
}
