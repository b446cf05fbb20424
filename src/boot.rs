use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::{DataSection, SiteConfig, SourceLocation, CONFIG_PATH};

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &["website", "website/static", "website/static/css", "website/static/js"];

/// Static assets the page shell links to
const SHELL_ASSETS: &[&str] = &["website/static/css/style.css", "website/static/js/site.js"];

/// Outcome of the startup checks.
#[derive(Debug, Default, PartialEq)]
pub struct BootReport {
    pub errors: u32,
    pub warnings: u32,
}

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories and aborts if they cannot be created; a missing
/// data file is only a warning because the page falls back to placeholders.
pub fn run(config: &SiteConfig) {
    info!("[boot] casefolio boot check starting...");

    let report = check(config, Path::new("."));

    if report.errors > 0 {
        error!(
            "[boot] Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        process::exit(1);
    }

    if report.warnings > 0 {
        warn!(
            "[boot] Boot check passed with {} warning(s). The portfolio may show placeholders.",
            report.warnings
        );
    } else {
        info!("[boot] Boot check passed.");
    }
}

/// Where page loads will read projects from. Nothing is fetched at boot.
pub fn source_summary(data: &DataSection) -> String {
    match data.location() {
        SourceLocation::File(path) => format!("Project source: {} (file, read per page load)", path.display()),
        SourceLocation::Http(url) => format!("Project source: {} (HTTP, fetched per page load)", url),
    }
}

/// Checks relative to `root`, without exiting.
pub fn check(config: &SiteConfig, root: &Path) -> BootReport {
    let mut report = BootReport::default();

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            match fs::create_dir_all(&path) {
                Ok(_) => info!("[boot]   Created directory: {}", dir),
                Err(e) => {
                    error!("[boot]   FAILED to create directory {}: {}", dir, e);
                    report.errors += 1;
                }
            }
        }
    }

    // ── 2. Shell assets ────────────────────────────────
    for file in SHELL_ASSETS {
        if !root.join(file).exists() {
            warn!("[boot]   Missing static asset: {} (page will be unstyled or static)", file);
            report.warnings += 1;
        }
    }

    // ── 3. Project data ────────────────────────────────
    match config.data.location() {
        SourceLocation::File(path) => {
            let path = if path.is_absolute() { path } else { root.join(path) };
            if !path.exists() {
                warn!("[boot]   Project data not found: {} (fallback grid will be shown)", path.display());
                report.warnings += 1;
            }
        }
        SourceLocation::Http(url) => info!("[boot]   Projects fetched per page load from {}", url),
    }

    // ── 4. Config file ─────────────────────────────────
    if !root.join(CONFIG_PATH).exists() {
        warn!("[boot]   {} not found, using default config", CONFIG_PATH);
        report.warnings += 1;
    }

    report
}
