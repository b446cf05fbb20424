use chrono::Datelike;
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::tokio::task::JoinError;
use rocket::State;

use crate::app::{ModalRequest, PortfolioApp};
use crate::config::SiteConfig;
use crate::contact::{self, ContactForm, ContactView};
use crate::modal::PointerTarget;
use crate::render;

// ── Page ───────────────────────────────────────────────

/// One page load: fetch projects, render, then replay the modal interaction
/// carried by the query (`open`, `close`, or `click` with `on`).
#[get("/?<open>&<close>&<click>&<on>")]
pub async fn index(
    config: &State<SiteConfig>,
    open: Option<String>,
    close: Option<String>,
    click: Option<String>,
    on: Option<PointerTarget>,
) -> Result<RawHtml<String>, Status> {
    let request = modal_request(open, close, click, on);
    let config = config.inner().clone();
    render_off_executor(config, request, ContactView::default())
        .await
        .map(RawHtml)
}

/// A dismiss wins over an open; a click without a target landed on content.
fn modal_request(
    open: Option<String>,
    close: Option<String>,
    click: Option<String>,
    on: Option<PointerTarget>,
) -> Option<ModalRequest> {
    if let Some(id) = close {
        return Some(ModalRequest::Close(id));
    }
    if let Some(id) = click {
        return Some(ModalRequest::Click(id, on.unwrap_or(PointerTarget::Content)));
    }
    open.map(ModalRequest::Open)
}

// ── Contact form ───────────────────────────────────────

#[post("/contact", data = "<form>")]
pub async fn contact_submit(
    config: &State<SiteConfig>,
    form: Form<ContactForm>,
) -> Result<RawHtml<String>, Status> {
    let form = form.into_inner();
    let result = contact::validate(&form);
    match &result {
        Ok(msg) => log::info!(
            "[contact] Message from {} <{}> ({} chars)",
            msg.name,
            msg.email,
            msg.message.chars().count()
        ),
        Err(e) => log::info!("[contact] Rejected submission: {}", e),
    }

    let view = ContactView::from_result(form, &result);
    let config = config.inner().clone();
    render_off_executor(config, None, view).await.map(RawHtml)
}

/// The data source may block (file or HTTP), so the page is built on the
/// blocking pool. A failed task falls through to the 500 catcher.
async fn render_off_executor(
    config: SiteConfig,
    request: Option<ModalRequest>,
    contact: ContactView,
) -> Result<String, Status> {
    let task = rocket::tokio::task::spawn_blocking(move || {
        build_page(&config, request.as_ref(), &contact, chrono::Local::now().year())
    });
    page_or_status(task.await)
}

fn page_or_status(task: Result<String, JoinError>) -> Result<String, Status> {
    task.map_err(|e| {
        log::error!("[render] Page task failed: {}", e);
        Status::InternalServerError
    })
}

/// Build the page for one request. A failed load renders the fallback grid;
/// a request naming an unknown id renders with every modal closed.
pub(crate) fn build_page(
    config: &SiteConfig,
    request: Option<&ModalRequest>,
    contact: &ContactView,
    year: i32,
) -> String {
    let mut app = PortfolioApp::from_config(config);
    app.start();

    if let Some(request) = request {
        match app.replay(request) {
            Some(state) => log::debug!("[modal] `{}` is {:?} after {:?}", request.id(), state, request),
            None => log::info!("[modal] Ignoring request for unknown project `{}`", request.id()),
        }
    }

    render::page::render_page(config, &app, contact, year)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index, contact_submit]
}
