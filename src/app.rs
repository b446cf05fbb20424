use crate::config::{FallbackConfig, SiteConfig};
use crate::modal::{Millis, ModalController, ModalState, ModalTiming, PointerTarget};
use crate::models::project::Project;
use crate::render::fallback::{build_fallback, FallbackGrid};
use crate::render::modal::{build_modal, ModalNode};
use crate::render::node::{self, Node};
use crate::render::tile::{build_tile, TileNode};
use crate::source::{self, LoadError, ProjectSource};

/// What the grid region currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    Empty,
    Live(Vec<TileNode>),
    Fallback(FallbackGrid),
}

/// A modal interaction carried by a page request. Without scripting, every
/// tile, close control and scrim is a link back to the page, so the request
/// replays that interaction against freshly wired modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalRequest {
    /// Tile activation.
    Open(String),
    /// Close control inside an open modal.
    Close(String),
    /// Pointer action inside an open modal.
    Click(String, PointerTarget),
}

impl ModalRequest {
    pub fn id(&self) -> &str {
        match self {
            ModalRequest::Open(id) | ModalRequest::Close(id) | ModalRequest::Click(id, _) => id,
        }
    }
}

/// One page session: owns the data source, the grid and modal regions, and
/// the modal controller wired to whatever was last rendered.
pub struct PortfolioApp {
    source: Box<dyn ProjectSource>,
    fallback: FallbackConfig,
    grid: Grid,
    modals: Vec<ModalNode>,
    controller: ModalController,
}

impl PortfolioApp {
    pub fn new(
        source: Box<dyn ProjectSource>,
        timing: ModalTiming,
        fallback: FallbackConfig,
    ) -> Self {
        PortfolioApp {
            source,
            fallback,
            grid: Grid::Empty,
            modals: Vec::new(),
            controller: ModalController::new(timing),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        PortfolioApp::new(
            source::from_config(&config.data),
            ModalTiming {
                open_delay: config.modal.open_delay_ms,
                close_delay: config.modal.close_delay_ms,
            },
            config.fallback.clone(),
        )
    }

    /// Fetch the project list. Leaves the page untouched.
    pub fn load(&self) -> Result<Vec<Project>, LoadError> {
        self.source.load()
    }

    /// Replace the grid and modal regions with one tile and one modal per
    /// project, then wire the controller to the new modals.
    pub fn render(&mut self, projects: &[Project]) {
        let tiles: Vec<TileNode> = projects
            .iter()
            .enumerate()
            .map(|(i, p)| build_tile(p, i))
            .collect();
        let modals: Vec<ModalNode> = projects.iter().map(build_modal).collect();

        self.grid = Grid::Live(tiles);
        self.modals = modals;
        self.controller.wire(self.modals.iter().map(|m| m.id.clone()));
        log::debug!("[render] {} project(s) rendered", projects.len());
    }

    /// Replace the grid with placeholders. No modals exist afterwards.
    pub fn render_fallback(&mut self) {
        self.grid = Grid::Fallback(build_fallback(&self.fallback));
        self.modals.clear();
        self.controller.wire(Vec::<String>::new());
    }

    /// Page-ready sequence: one load, then render or fall back.
    /// Returns the load error when the fallback was used.
    pub fn start(&mut self) -> Option<LoadError> {
        match self.load() {
            Ok(projects) => {
                self.render(&projects);
                None
            }
            Err(e) => {
                log::error!(
                    "[source] Error loading projects from {}: {}",
                    self.source.describe(),
                    e
                );
                self.render_fallback();
                Some(e)
            }
        }
    }

    /// Tile activation for the project `id`.
    pub fn open(&mut self, id: &str, now: Millis) -> bool {
        self.controller.open(id, now)
    }

    /// Close control of the modal `id`.
    pub fn close(&mut self, id: &str, now: Millis) -> bool {
        self.controller.close(id, now)
    }

    /// Pointer action inside the modal `id`.
    pub fn click(&mut self, id: &str, target: PointerTarget, now: Millis) -> bool {
        self.controller.pointer(id, target, now)
    }

    /// Advance scheduled modal transitions.
    pub fn tick(&mut self, now: Millis) -> usize {
        self.controller.tick(now)
    }

    /// Fire pending transitions in deadline order until none remain.
    /// Returns the clock reading after the last one.
    pub fn settle(&mut self, mut now: Millis) -> Millis {
        while let Some(due) = self.controller.next_deadline() {
            now = now.max(due);
            self.tick(now);
        }
        now
    }

    /// Replay a request's interaction and let its transitions finish.
    /// Close and click requests come from a page where the modal was open,
    /// so the modal is opened first. Returns the modal's resulting state, or
    /// `None` when no modal is wired under the id.
    pub fn replay(&mut self, request: &ModalRequest) -> Option<ModalState> {
        let id = request.id();
        if !self.open(id, 0) {
            return None;
        }
        let now = self.settle(0);

        match request {
            ModalRequest::Open(_) => {}
            ModalRequest::Close(_) => {
                self.close(id, now);
            }
            ModalRequest::Click(_, target) => {
                self.click(id, *target, now);
            }
        }
        self.settle(now);
        self.modal_state(id)
    }

    pub fn modal_state(&self, id: &str) -> Option<ModalState> {
        self.controller.state(id)
    }

    pub fn scroll_locked(&self) -> bool {
        self.controller.scroll_locked()
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn modals(&self) -> &[ModalNode] {
        &self.modals
    }

    /// Notice shown above the grid, if any.
    pub fn notice(&self) -> Option<&str> {
        match &self.grid {
            Grid::Fallback(f) => Some(f.notice.as_str()),
            _ => None,
        }
    }

    pub fn grid_nodes(&self) -> Vec<Node> {
        match &self.grid {
            Grid::Empty => Vec::new(),
            Grid::Live(tiles) => tiles.iter().map(TileNode::to_node).collect(),
            Grid::Fallback(f) => f.tiles.clone(),
        }
    }

    pub fn modal_nodes(&self) -> Vec<Node> {
        self.modals
            .iter()
            .map(|m| {
                let state = self.controller.state(&m.id).unwrap_or(ModalState::Closed);
                m.to_node(state)
            })
            .collect()
    }

    pub fn grid_html(&self) -> String {
        node::to_html(&self.grid_nodes())
    }

    pub fn modals_html(&self) -> String {
        node::to_html(&self.modal_nodes())
    }
}
