//! Markup for the portfolio page.
//! Tiles and modals are built as typed descriptors first (`TileNode`, `ModalNode`)
//! and only turned into `Node` trees, then HTML, when the page is serialized.

pub mod fallback;
pub mod modal;
pub mod node;
pub mod page;
pub mod tile;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Page link carrying a modal interaction in its query, e.g. `/?open=p1`.
/// The id is form-encoded; `extra` is appended verbatim.
pub fn modal_href(action: &str, id: &str, extra: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("/?{}={}{}", action, encoded, extra)
}

/// First two tech entries joined for the tile subtitle. The full list is
/// only shown in the modal.
pub fn tech_summary(tech: &[String]) -> String {
    tech.iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" + ")
}
