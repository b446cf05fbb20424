use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{DataSection, SourceLocation};
use crate::models::project::{Project, RawProject};

/// Why the project list could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file could not be read.
    Io(String),
    /// The request never got a response.
    Transport(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The body is not valid JSON for the project schema.
    Parse(String),
    /// The body parsed but breaks a list invariant (ids).
    Schema(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "could not read projects file: {}", e),
            LoadError::Transport(e) => write!(f, "projects request failed: {}", e),
            LoadError::Status(code) => write!(f, "projects request returned status {}", code),
            LoadError::Parse(e) => write!(f, "projects JSON parse error: {}", e),
            LoadError::Schema(e) => write!(f, "invalid project list: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => LoadError::Status(status.as_u16()),
            None => LoadError::Transport(e.to_string()),
        }
    }
}

/// A place the project list is fetched from. One call is one fetch; no retries.
/// Implementations: `FileSource` (local `projects.json`) and `HttpSource` (remote URL).
pub trait ProjectSource: Send + Sync {
    fn load(&self) -> Result<Vec<Project>, LoadError>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl ProjectSource for FileSource {
    fn load(&self) -> Result<Vec<Project>, LoadError> {
        let body = std::fs::read_to_string(&self.path)?;
        parse_projects(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct HttpSource {
    url: url::Url,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: url::Url, timeout: Duration) -> Self {
        HttpSource { url, timeout }
    }
}

impl ProjectSource for HttpSource {
    /// Blocking fetch. Callers on an async runtime must run this off the executor.
    fn load(&self) -> Result<Vec<Project>, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoadError::Transport(format!("HTTP client error: {}", e)))?;

        let resp = client.get(self.url.as_str()).send()?;
        if !resp.status().is_success() {
            return Err(LoadError::Status(resp.status().as_u16()));
        }

        let body = resp.text()?;
        parse_projects(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Build the source named by the `[data]` config section.
pub fn from_config(data: &DataSection) -> Box<dyn ProjectSource> {
    match data.location() {
        SourceLocation::Http(url) => Box::new(HttpSource::new(
            url,
            Duration::from_secs(data.timeout_secs.max(1)),
        )),
        SourceLocation::File(path) => Box::new(FileSource::new(path)),
    }
}

/// Parse a `projects.json` body into normalized projects.
/// Ids must be non-empty and unique: they key both the tile and its modal.
pub fn parse_projects(body: &str) -> Result<Vec<Project>, LoadError> {
    let raw: Vec<RawProject> = serde_json::from_str(body)?;
    let projects: Vec<Project> = raw.into_iter().map(Project::from).collect();

    let mut seen = HashSet::new();
    for (i, p) in projects.iter().enumerate() {
        if p.id.is_empty() {
            return Err(LoadError::Schema(format!("project #{} has an empty id", i)));
        }
        if !seen.insert(p.id.as_str()) {
            return Err(LoadError::Schema(format!("duplicate project id `{}`", p.id)));
        }
    }

    Ok(projects)
}
