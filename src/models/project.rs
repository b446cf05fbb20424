use serde::{Deserialize, Serialize};

/// How a project's modal lays out its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Flat record: one description, full tech list, action links.
    Simple,
    /// Ordered frames followed by a tech footer.
    CaseStudy,
}

/// The single media reference a frame renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "snake_case")]
pub enum MediaRef {
    Video(String),
    Gif(String),
    Image(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub gif: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Frame {
    /// Empty strings count as absent, the same way the page treats them.
    fn tidy(mut self) -> Self {
        self.section = non_empty(self.section);
        self.video = non_empty(self.video);
        self.gif = non_empty(self.gif);
        self.image = non_empty(self.image);
        self.note = non_empty(self.note);
        self
    }
}

/// One portfolio entry, normalized from either JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub cover_image: Option<String>,
    pub tech: Vec<String>,
    pub layout: Layout,
    pub frames: Vec<Frame>,
    pub demo_url: String,
    pub source_url: String,
}

impl Project {
    /// Body text of a simple project (its implicit frame).
    pub fn description(&self) -> &str {
        self.frames.first().map(|f| f.text.as_str()).unwrap_or("")
    }
}

/// Wire shape of `projects.json`. Accepts both the flat
/// (`image` + `description`) and the case-study (`coverImage` + `frames`) records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frames: Option<Vec<Frame>>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        let cover_image = non_empty(raw.cover_image).or_else(|| non_empty(raw.image));

        let (layout, frames) = match raw.frames {
            Some(frames) => (
                Layout::CaseStudy,
                frames.into_iter().map(Frame::tidy).collect(),
            ),
            None => (
                Layout::Simple,
                vec![Frame {
                    section: None,
                    text: raw.description.unwrap_or_default(),
                    video: None,
                    gif: None,
                    image: cover_image.clone(),
                    note: None,
                }],
            ),
        };

        Project {
            id: raw.id.trim().to_string(),
            title: raw.title,
            cover_image,
            tech: raw.tech,
            layout,
            frames,
            demo_url: raw.demo_url.unwrap_or_else(|| "#".to_string()),
            source_url: raw.source_url.unwrap_or_else(|| "#".to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
