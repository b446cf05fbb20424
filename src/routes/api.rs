use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::contact::{self, ContactForm, SUCCESS_NOTICE};
use crate::source;

// ── Projects ───────────────────────────────────────────

/// Normalized project list, or 503 when the source fails.
#[get("/projects")]
pub async fn projects(config: &State<SiteConfig>) -> (Status, Json<Value>) {
    let data = config.data.clone();
    let task = rocket::tokio::task::spawn_blocking(move || {
        let source = source::from_config(&data);
        source.load().map_err(|e| {
            log::error!("[source] Error loading projects from {}: {}", source.describe(), e);
            e
        })
    });

    match task.await {
        Ok(Ok(projects)) => (Status::Ok, Json(json!({ "projects": projects }))),
        Ok(Err(e)) => (
            Status::ServiceUnavailable,
            Json(json!({ "error": e.to_string() })),
        ),
        Err(e) => {
            log::error!("[source] Load task failed: {}", e);
            (
                Status::InternalServerError,
                Json(json!({ "error": "Internal server error" })),
            )
        }
    }
}

// ── Contact ────────────────────────────────────────────

#[post("/contact", format = "json", data = "<form>")]
pub fn contact_submit(form: Json<ContactForm>) -> Json<Value> {
    match contact::validate(&form) {
        Ok(msg) => {
            log::info!("[contact] Message from {} <{}>", msg.name, msg.email);
            Json(json!({ "success": true, "message": SUCCESS_NOTICE }))
        }
        Err(e) => Json(json!({ "success": false, "error": e.notice() })),
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![projects, contact_submit]
}
