#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::app::{Grid, ModalRequest, PortfolioApp};
use crate::config::{FallbackConfig, SiteConfig};
use crate::contact::{self, ContactForm, ContactView, FlashKind};
use crate::modal::{ModalState, ModalTiming, PointerTarget};
use crate::models::project::Project;
use crate::render::node::Node;
use crate::routes::public::build_page;
use crate::source::{parse_projects, LoadError, ProjectSource};

/// Source returning a fixed result and counting fetches.
struct CannedSource {
    result: Result<Vec<Project>, LoadError>,
    calls: Arc<AtomicUsize>,
}

impl ProjectSource for CannedSource {
    fn load(&self) -> Result<Vec<Project>, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn describe(&self) -> String {
        "canned".to_string()
    }
}

fn app_with(result: Result<Vec<Project>, LoadError>) -> (PortfolioApp, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = CannedSource {
        result,
        calls: calls.clone(),
    };
    let app = PortfolioApp::new(Box::new(source), ModalTiming::default(), FallbackConfig::default());
    (app, calls)
}

const DEMO_JSON: &str = r##"[{
    "id": "p1",
    "title": "Demo",
    "tech": ["A", "B", "C"],
    "coverImage": "x.png",
    "frames": [{"section": "Intro", "text": "hi", "image": "y.png"}],
    "demoUrl": "#",
    "sourceUrl": "#"
}]"##;

fn demo_projects() -> Vec<Project> {
    parse_projects(DEMO_JSON).unwrap()
}

fn many_projects(n: usize) -> Vec<Project> {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id":"p{i}","title":"Project {i}","tech":["T{i}"],"frames":[{{"section":"S","text":"t"}}]}}"#,
                i = i
            )
        })
        .collect();
    parse_projects(&format!("[{}]", items.join(","))).unwrap()
}

fn live_tiles(app: &PortfolioApp) -> usize {
    match app.grid() {
        Grid::Live(tiles) => tiles.len(),
        _ => panic!("expected live grid"),
    }
}

// ═══════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════

#[test]
fn demo_scenario_tile_and_modal() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    assert!(app.start().is_none());

    let grid = app.grid_nodes();
    assert_eq!(grid.len(), 1);
    let tile = &grid[0];
    assert_eq!(tile.as_element().unwrap().get_attr("data-modal"), Some("p1"));
    assert_eq!(Node::Element(tile.find_by_tag("h3")[0].clone()).text_content(), "Demo");
    assert_eq!(Node::Element(tile.find_by_tag("p")[0].clone()).text_content(), "A + B");

    let modals = app.modal_nodes();
    assert_eq!(modals.len(), 1);
    let modal = &modals[0];
    assert_eq!(modal.as_element().unwrap().get_attr("id"), Some("p1"));

    let frames = modal.find_by_class("modal-frame");
    assert_eq!(frames.len(), 1);
    let frame = Node::Element(frames[0].clone());
    assert_eq!(Node::Element(frame.find_by_tag("h4")[0].clone()).text_content(), "Intro");
    assert_eq!(Node::Element(frame.find_by_tag("p")[0].clone()).text_content(), "hi");
    let imgs = frame.find_by_tag("img");
    assert_eq!(imgs.len(), 1);
    assert_eq!(imgs[0].get_attr("src"), Some("y.png"));

    let footer = Node::Element(modal.find_by_class("modal-tech-footer")[0].clone());
    assert!(footer.text_content().contains("A, B, C"));
}

#[test]
fn one_tile_and_one_modal_per_project_with_matching_ids() {
    let projects = many_projects(7);
    let (mut app, _) = app_with(Ok(projects.clone()));
    app.start();

    let tiles = app.grid_nodes();
    let modals = app.modal_nodes();
    assert_eq!(tiles.len(), projects.len());
    assert_eq!(modals.len(), projects.len());

    for ((p, t), m) in projects.iter().zip(&tiles).zip(&modals) {
        assert_eq!(t.as_element().unwrap().get_attr("data-modal"), Some(p.id.as_str()));
        assert_eq!(m.as_element().unwrap().get_attr("id"), Some(p.id.as_str()));
    }
}

#[test]
fn render_twice_replaces_content() {
    let (mut app, _) = app_with(Ok(vec![]));
    let projects = many_projects(3);
    app.render(&projects);
    app.render(&projects);
    assert_eq!(live_tiles(&app), 3);
    assert_eq!(app.modals().len(), 3);
    assert_eq!(app.grid_html().matches("data-modal=").count(), 3);
    assert_eq!(app.modals_html().matches("role=\"dialog\"").count(), 3);

    app.render(&projects[..1]);
    assert_eq!(live_tiles(&app), 1);
    assert_eq!(app.modals().len(), 1);
    assert_eq!(app.modal_state("p2"), None);
}

#[test]
fn empty_project_list_renders_empty_regions() {
    let (mut app, _) = app_with(Ok(vec![]));
    assert!(app.start().is_none());
    assert_eq!(live_tiles(&app), 0);
    assert!(app.modals().is_empty());
    assert_eq!(app.notice(), None);
}

#[test]
fn flat_schema_renders_simple_modal() {
    let projects = parse_projects(
        r#"[{"id":"flat","title":"Flat","image":"f.png","tech":["Go"],"description":"plain"}]"#,
    )
    .unwrap();
    let (mut app, _) = app_with(Ok(projects));
    app.start();
    let modals = app.modal_nodes();
    let modal = &modals[0];
    assert!(modal.find_by_class("modal-frame").is_empty());
    let desc = Node::Element(modal.find_by_class("modal-description")[0].clone());
    assert_eq!(desc.text_content(), "plain");
    assert_eq!(modal.find_by_class("frame-image")[0].get_attr("src"), Some("f.png"));
}

// ═══════════════════════════════════════════════════════════
// Fallback
// ═══════════════════════════════════════════════════════════

#[test]
fn failed_load_shows_fallback() {
    let (mut app, calls) = app_with(Err(LoadError::Status(404)));
    let err = app.start();
    assert_eq!(err, Some(LoadError::Status(404)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    match app.grid() {
        Grid::Fallback(f) => assert_eq!(f.tiles.len(), FallbackConfig::default().projects.len()),
        other => panic!("expected fallback grid, got {:?}", other),
    }
    assert!(app.notice().is_some());
    assert!(app.modals().is_empty());
    assert!(!app.grid_html().contains("data-modal"));
}

#[test]
fn fallback_tiles_cannot_open_modals() {
    let (mut app, _) = app_with(Err(LoadError::Parse("bad".into())));
    app.start();
    assert!(!app.open("E-Commerce Platform", 0));
    assert!(!app.scroll_locked());
}

#[test]
fn successful_render_after_fallback_clears_notice() {
    let (mut app, _) = app_with(Err(LoadError::Transport("down".into())));
    app.start();
    app.render(&demo_projects());
    assert_eq!(app.notice(), None);
    assert_eq!(live_tiles(&app), 1);
}

// ═══════════════════════════════════════════════════════════
// Modal lifecycle through the app
// ═══════════════════════════════════════════════════════════

#[test]
fn modal_open_close_cycle() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    app.start();

    assert!(app.open("p1", 1_000));
    assert!(app.scroll_locked());
    app.tick(1_010);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Open));
    assert!(app.modals_html().contains("class=\"modal show\""));

    assert!(!app.click("p1", PointerTarget::Content, 1_100));
    app.tick(2_000);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Open));

    assert!(app.close("p1", 2_000));
    assert!(!app.modals_html().contains("modal show"));
    assert!(app.scroll_locked());
    app.tick(2_300);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Closed));
    assert!(!app.scroll_locked());
    assert!(app.modals_html().contains("display:none"));
}

#[test]
fn scrim_click_closes_modal() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    app.start();
    app.open("p1", 0);
    app.tick(10);
    assert!(app.click("p1", PointerTarget::Scrim, 50));
    app.tick(350);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Closed));
}

#[test]
fn replay_runs_dismissals_through_closing() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    app.start();
    assert_eq!(app.replay(&open("p1")), Some(ModalState::Open));
    assert!(app.scroll_locked());

    let scrim = ModalRequest::Click("p1".to_string(), PointerTarget::Scrim);
    assert_eq!(app.replay(&scrim), Some(ModalState::Closed));
    assert!(!app.scroll_locked());

    assert_eq!(app.replay(&ModalRequest::Close("p1".to_string())), Some(ModalState::Closed));
    assert_eq!(app.replay(&open("missing")), None);
}

#[test]
fn settle_fires_pending_deadlines_in_order() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    app.start();
    app.open("p1", 100);
    assert_eq!(app.settle(100), 110);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Open));
    app.close("p1", 200);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Closing));
    assert_eq!(app.settle(200), 500);
    assert_eq!(app.modal_state("p1"), Some(ModalState::Closed));
    assert_eq!(app.settle(500), 500);
}

#[test]
fn open_before_render_is_rejected() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    assert!(!app.open("p1", 0));
    app.start();
    assert!(app.open("p1", 0));
}

#[test]
fn rerender_closes_open_modal_and_releases_scroll() {
    let (mut app, _) = app_with(Ok(demo_projects()));
    app.start();
    app.open("p1", 0);
    app.tick(10);
    app.render(&demo_projects());
    assert_eq!(app.modal_state("p1"), Some(ModalState::Closed));
    assert!(!app.scroll_locked());
}

// ═══════════════════════════════════════════════════════════
// Page
// ═══════════════════════════════════════════════════════════

fn config_with_data(name: &str, body: Option<&str>) -> SiteConfig {
    let path = std::env::temp_dir().join(format!(
        "casefolio_page_{}_{}.json",
        name,
        std::process::id()
    ));
    match body {
        Some(b) => std::fs::write(&path, b).unwrap(),
        None => {
            let _ = std::fs::remove_file(&path);
        }
    }
    let mut config = SiteConfig::default();
    config.data.source = path.display().to_string();
    config
}

#[test]
fn page_renders_grid_modals_and_year() {
    let config = config_with_data("ok", Some(DEMO_JSON));
    let html = build_page(&config, None, &ContactView::default(), 2031);
    assert!(html.contains(r#"id="portfolioGrid""#));
    assert!(html.contains(r#"data-modal="p1""#));
    assert!(html.contains(r#"id="p1""#));
    assert!(html.contains(r#"<span id="year">2031</span>"#));
    assert!(html.contains(r#"id="backToTop""#));
    assert!(html.contains(r#"class="hamburger""#));
    assert!(!html.contains("overflow:hidden"));
}

#[test]
fn page_with_missing_data_falls_back() {
    let config = config_with_data("missing", None);
    let html = build_page(&config, None, &ContactView::default(), 2031);
    assert!(html.contains("portfolio-notice"));
    assert!(html.contains(&config.fallback.notice));
    assert!(html.contains("portfolio-item placeholder"));
    assert!(!html.contains("data-modal"));
    assert!(html.contains(r#"id="contactForm""#));
}

#[test]
fn deep_link_opens_modal_and_locks_scroll() {
    let config = config_with_data("deeplink", Some(DEMO_JSON));
    let html = build_page(&config, Some(&open("p1")), &ContactView::default(), 2031);
    assert!(html.contains(r#"<body style="overflow:hidden">"#));
    assert!(html.contains(r#"class="modal show""#));
    assert!(html.contains("display:block"));

    let html = build_page(&config, Some(&open("nope")), &ContactView::default(), 2031);
    assert!(!html.contains("overflow:hidden"));
    assert!(!html.contains("modal show"));
}

#[test]
fn page_hooks_are_handled_by_shipped_script() {
    let script = include_str!("../website/static/js/site.js");
    let config = config_with_data("hooks", Some(DEMO_JSON));
    let html = build_page(&config, None, &ContactView::default(), 2031);

    for hook in [
        "data-scroll-threshold",
        "data-anchor-offset",
        "data-reveal-offset",
        "data-phrases",
        "data-threshold",
        "data-open-delay",
        "data-close-delay",
        "data-modal",
        "data-close",
        "data-scrim",
        "hamburger",
        "nav-links",
        "typing-text",
        "backToTop",
        "section-title",
    ] {
        assert!(html.contains(hook), "page lacks {}", hook);
        assert!(script.contains(hook), "site.js ignores {}", hook);
    }
    assert!(script.contains("fade-in"));
    assert!(html.contains(r#"<script src="/static/js/site.js" defer></script>"#));
}

fn open(id: &str) -> ModalRequest {
    ModalRequest::Open(id.to_string())
}

fn modal_tag(html: &str, id: &str) -> String {
    let start = html.find(&format!(r#"<div id="{}""#, id)).unwrap();
    let end = start + html[start..].find('>').unwrap();
    html[start..=end].to_string()
}

#[test]
fn open_modal_page_links_both_dismiss_controls() {
    let config = config_with_data("dismiss_links", Some(DEMO_JSON));
    let html = build_page(&config, Some(&open("p1")), &ContactView::default(), 2031);
    assert!(html.contains(r#"class="modal-scrim" href="/?click=p1&amp;on=scrim#portfolio""#));
    assert!(html.contains(r#"href="/?close=p1#portfolio""#));
}

#[test]
fn scrim_link_closes_modal_and_releases_scroll() {
    let config = config_with_data("scrim_link", Some(DEMO_JSON));
    let request = ModalRequest::Click("p1".to_string(), PointerTarget::Scrim);
    let html = build_page(&config, Some(&request), &ContactView::default(), 2031);
    let tag = modal_tag(&html, "p1");
    assert!(tag.contains(r#"class="modal""#), "{}", tag);
    assert!(tag.contains("display:none"));
    assert!(!html.contains("overflow:hidden"));
}

#[test]
fn close_link_closes_modal() {
    let config = config_with_data("close_link", Some(DEMO_JSON));
    let request = ModalRequest::Close("p1".to_string());
    let html = build_page(&config, Some(&request), &ContactView::default(), 2031);
    assert!(modal_tag(&html, "p1").contains("display:none"));
    assert!(!html.contains("overflow:hidden"));
}

#[test]
fn content_click_leaves_modal_open() {
    let config = config_with_data("content_click", Some(DEMO_JSON));
    let request = ModalRequest::Click("p1".to_string(), PointerTarget::Content);
    let html = build_page(&config, Some(&request), &ContactView::default(), 2031);
    assert!(modal_tag(&html, "p1").contains(r#"class="modal show""#));
    assert!(html.contains(r#"<body style="overflow:hidden">"#));
}

// ═══════════════════════════════════════════════════════════
// Contact
// ═══════════════════════════════════════════════════════════

#[test]
fn empty_message_keeps_name_and_email() {
    let form = ContactForm {
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        message: String::new(),
    };
    let result = contact::validate(&form);
    let view = ContactView::from_result(form, &result);
    let config = config_with_data("contact_empty", Some(DEMO_JSON));
    let html = build_page(&config, None, &view, 2031);

    assert!(html.contains("Please fill in all fields."));
    assert!(html.contains(r#"value="Ann""#));
    assert!(html.contains(r#"value="ann@example.com""#));
    assert!(!html.contains(contact::SUCCESS_NOTICE));
}

#[test]
fn invalid_email_gets_notice_and_no_success() {
    let form = ContactForm {
        name: "Ann".to_string(),
        email: "not-an-email".to_string(),
        message: "hello".to_string(),
    };
    let result = contact::validate(&form);
    let view = ContactView::from_result(form, &result);
    assert_eq!(
        view.flash,
        Some((FlashKind::Error, "Please enter a valid email address.".to_string()))
    );
    let config = config_with_data("contact_email", Some(DEMO_JSON));
    let html = build_page(&config, None, &view, 2031);
    assert!(html.contains("valid email"));
    assert!(!html.contains(contact::SUCCESS_NOTICE));
}
