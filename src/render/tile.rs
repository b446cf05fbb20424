use super::node::{Element, Node};
use super::{modal_href, tech_summary};
use crate::models::project::Project;

/// Gradient shown behind every tile. It is what remains visible when the
/// cover image is missing or fails to load.
const TILE_GRADIENTS: &[&str] = &[
    "linear-gradient(135deg,#1e3c72,#2a5298)",
    "linear-gradient(135deg,#42275a,#734b6d)",
    "linear-gradient(135deg,#134e5e,#71b280)",
    "linear-gradient(135deg,#373b44,#4286f4)",
    "linear-gradient(135deg,#8e2de2,#4a00e0)",
];

/// Swaps a broken cover for the gradient and pins the overlay open.
const IMG_ONERROR: &str = "this.parentElement.classList.add('no-image');this.remove();";

/// Grid tile descriptor for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct TileNode {
    /// Same value as the project id and the modal id.
    pub id: String,
    pub title: String,
    pub tech_summary: String,
    pub cover: Option<String>,
    pub gradient: &'static str,
}

pub fn build_tile(project: &Project, index: usize) -> TileNode {
    TileNode {
        id: project.id.clone(),
        title: project.title.clone(),
        tech_summary: tech_summary(&project.tech),
        cover: project.cover_image.clone(),
        gradient: TILE_GRADIENTS[index % TILE_GRADIENTS.len()],
    }
}

impl TileNode {
    pub fn to_node(&self) -> Node {
        let class = if self.cover.is_some() {
            "portfolio-item"
        } else {
            "portfolio-item no-image"
        };

        let img = self.cover.as_ref().map(|src| {
            Element::new("img")
                .attr("src", src.as_str())
                .attr("alt", self.title.as_str())
                .class("portfolio-img")
                .attr("loading", "lazy")
                .attr("onerror", IMG_ONERROR)
        });

        Element::new("a")
            .class(class)
            .attr("href", modal_href("open", &self.id, ""))
            .attr("data-modal", self.id.as_str())
            .attr("style", format!("background:{}", self.gradient))
            .child_opt(img)
            .child(
                Element::new("div")
                    .class("portfolio-overlay")
                    .child(Element::new("h3").text(self.title.as_str()))
                    .child(Element::new("p").text(self.tech_summary.as_str())),
            )
            .into()
    }
}
