use super::node::{Element, Node};
use super::tech_summary;
use crate::config::FallbackConfig;

/// Used when the configured palette is empty.
const DEFAULT_SWATCH: &str = "#2d3748";

/// Placeholder grid shown when the project list could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackGrid {
    pub tiles: Vec<Node>,
    pub notice: String,
}

/// Placeholder tiles are decorative only: no image, no `data-modal`, no link.
pub fn build_fallback(config: &FallbackConfig) -> FallbackGrid {
    let tiles: Vec<Node> = config
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let swatch = if config.palette.is_empty() {
                DEFAULT_SWATCH
            } else {
                config.palette[i % config.palette.len()].as_str()
            };
            Element::new("div")
                .class("portfolio-item placeholder no-image")
                .attr("style", format!("background:{}", swatch))
                .child(
                    Element::new("div")
                        .class("portfolio-overlay")
                        .child(Element::new("h3").text(p.title.as_str()))
                        .child(Element::new("p").text(tech_summary(&p.tech))),
                )
                .into()
        })
        .collect();

    FallbackGrid {
        tiles,
        notice: config.notice.clone(),
    }
}
