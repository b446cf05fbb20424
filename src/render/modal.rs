use super::modal_href;
use super::node::{Element, Node};
use crate::modal::ModalState;
use crate::models::project::{Frame, Layout, MediaRef, Project};

/// Pick the one media reference a frame shows: video, else gif, else image.
pub fn select_media(frame: &Frame) -> Option<MediaRef> {
    if let Some(v) = &frame.video {
        Some(MediaRef::Video(v.clone()))
    } else if let Some(g) = &frame.gif {
        Some(MediaRef::Gif(g.clone()))
    } else {
        frame.image.as_ref().map(|i| MediaRef::Image(i.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBlock {
    pub heading: Option<String>,
    pub text: String,
    pub media: Option<MediaRef>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalBody {
    Summary {
        description: String,
        media: Option<MediaRef>,
    },
    CaseStudy(Vec<FrameBlock>),
}

/// Modal descriptor for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalNode {
    /// Same value as the project id and the tile's `data-modal`.
    pub id: String,
    pub title: String,
    pub body: ModalBody,
    pub tech: Vec<String>,
    pub demo_url: String,
    pub source_url: String,
}

pub fn build_modal(project: &Project) -> ModalNode {
    let body = match project.layout {
        Layout::Simple => ModalBody::Summary {
            description: project.description().to_string(),
            media: project.frames.first().and_then(select_media),
        },
        Layout::CaseStudy => ModalBody::CaseStudy(
            project
                .frames
                .iter()
                .map(|f| FrameBlock {
                    heading: f.section.clone(),
                    text: f.text.clone(),
                    media: select_media(f),
                    note: f.note.clone(),
                })
                .collect(),
        ),
    };

    ModalNode {
        id: project.id.clone(),
        title: project.title.clone(),
        body,
        tech: project.tech.clone(),
        demo_url: project.demo_url.clone(),
        source_url: project.source_url.clone(),
    }
}

impl ModalNode {
    /// Full tech list as shown in the modal footer.
    pub fn tech_line(&self) -> String {
        self.tech.join(", ")
    }

    /// Markup for the modal in the given lifecycle state.
    pub fn to_node(&self, state: ModalState) -> Node {
        let class = if state.is_shown() { "modal show" } else { "modal" };
        let display = if state.in_layout() {
            "display:block"
        } else {
            "display:none"
        };
        let title_id = format!("{}-title", self.id);

        // Dismiss controls are plain links; site.js intercepts them when it runs.
        let scrim = Element::new("a")
            .class("modal-scrim")
            .attr("href", modal_href("click", &self.id, "&on=scrim#portfolio"))
            .attr("aria-hidden", "true")
            .attr("tabindex", "-1")
            .attr("data-scrim", self.id.as_str());
        let close = Element::new("a")
            .class("close")
            .attr("href", modal_href("close", &self.id, "#portfolio"))
            .attr("aria-label", "Close")
            .attr("data-close", self.id.as_str())
            .text("\u{d7}");
        let title = Element::new("h3")
            .class("modal-title")
            .attr("id", title_id.as_str())
            .text(self.title.as_str());

        let content = match &self.body {
            ModalBody::Summary { description, media } => Element::new("div")
                .class("modal-content")
                .child(close)
                .child(title)
                .child_opt(media.as_ref().map(|m| media_node(m, &self.title)))
                .child(
                    Element::new("p")
                        .class("modal-description")
                        .text(description.as_str()),
                )
                .child(
                    Element::new("p")
                        .class("modal-tech")
                        .child(Element::new("strong").text("Tech:"))
                        .text(format!(" {}", self.tech_line())),
                )
                .child(self.links()),
            ModalBody::CaseStudy(frames) => Element::new("div")
                .class("modal-content case-study")
                .child(close)
                .child(title)
                .child(
                    Element::new("div")
                        .class("modal-frames")
                        .children(frames.iter().map(frame_node)),
                )
                .child(
                    Element::new("div")
                        .class("modal-tech-footer")
                        .child(Element::new("strong").text("Tech:"))
                        .text(format!(" {}", self.tech_line()))
                        .child(self.links()),
                ),
        };

        Element::new("div")
            .attr("id", self.id.as_str())
            .class(class)
            .attr("style", display)
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr("aria-labelledby", title_id)
            .child(scrim)
            .child(content)
            .into()
    }

    fn links(&self) -> Element {
        Element::new("div")
            .class("modal-links")
            .child(
                Element::new("a")
                    .attr("href", self.demo_url.as_str())
                    .class("btn btn-outline")
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .text("Live Demo"),
            )
            .child(
                Element::new("a")
                    .attr("href", self.source_url.as_str())
                    .class("btn btn-primary")
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .text("Source Code"),
            )
    }
}

fn frame_node(frame: &FrameBlock) -> Node {
    let alt = frame.heading.as_deref().unwrap_or("");
    Element::new("div")
        .class("modal-frame")
        .child_opt(frame.heading.as_ref().map(|h| Element::new("h4").text(h.as_str())))
        .child(Element::new("p").text(frame.text.as_str()))
        .child_opt(frame.media.as_ref().map(|m| media_node(m, alt)))
        .child_opt(
            frame
                .note
                .as_ref()
                .map(|n| Element::new("small").class("frame-note").text(n.as_str())),
        )
        .into()
}

fn media_node(media: &MediaRef, alt: &str) -> Node {
    match media {
        MediaRef::Video(src) => Element::new("video")
            .attr("controls", "")
            .class("frame-video")
            .attr("preload", "metadata")
            .child(
                Element::new("source")
                    .attr("src", src.as_str())
                    .attr("type", "video/mp4"),
            )
            .text("Your browser does not support the video tag.")
            .into(),
        MediaRef::Gif(src) => Element::new("img")
            .attr("src", src.as_str())
            .attr("alt", alt)
            .class("frame-gif")
            .attr("loading", "lazy")
            .into(),
        MediaRef::Image(src) => Element::new("img")
            .attr("src", src.as_str())
            .attr("alt", alt)
            .class("frame-image")
            .attr("loading", "lazy")
            .into(),
    }
}
