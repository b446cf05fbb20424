use crate::app::PortfolioApp;
use crate::config::SiteConfig;
use crate::contact::{ContactView, FlashKind};

use super::html_escape;

/// Render the full single-page site.
/// Grid and modal regions come from the app. Every control also works as a
/// plain link; `/static/js/site.js` layers the animated behavior on top and
/// reads its thresholds and delays from the `data-*` attributes set here.
pub fn render_page(config: &SiteConfig, app: &PortfolioApp, contact: &ContactView, year: i32) -> String {
    let site = &config.site;
    let ui = &config.ui;

    let body_style = if app.scroll_locked() {
        " style=\"overflow:hidden\""
    } else {
        ""
    };

    let notice_html = match app.notice() {
        Some(n) => format!(
            "<p class=\"portfolio-notice\" style=\"color:#ccc;grid-column:1/-1;text-align:center\">{}</p>",
            html_escape(n)
        ),
        None => String::new(),
    };

    let phrases = serde_json::to_string(&site.typing_phrases).unwrap_or_else(|_| "[]".to_string());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/css/style.css">
</head>
<body{body_style}>
<nav id="navbar" class="navbar" data-scroll-threshold="{nav_threshold}" data-anchor-offset="{anchor_offset}" data-reveal-offset="{reveal_offset}">
<a href="#home" class="logo">{owner}</a>
<ul class="nav-links">
<li><a href="#about" class="nav-link">About</a></li>
<li><a href="#portfolio" class="nav-link">Portfolio</a></li>
<li><a href="#contact" class="nav-link">Contact</a></li>
</ul>
<button class="hamburger" aria-label="Menu"><span></span><span></span><span></span></button>
</nav>
<header id="home" class="hero">
<h1>{owner}</h1>
<p class="hero-role"><span class="typing-text" data-phrases="{phrases}"></span></p>
<p class="hero-tagline">{tagline}</p>
</header>
<section id="about" class="about"><h2 class="section-title">About</h2></section>
<section id="portfolio" class="portfolio">
<h2 class="section-title">Portfolio</h2>
{notice_html}<div id="portfolioGrid" class="portfolio-grid">{grid}</div>
</section>
<div id="modalsContainer" data-open-delay="{open_delay}" data-close-delay="{close_delay}">{modals}</div>
<section id="contact" class="contact">
<h2 class="section-title">Contact</h2>
{contact}
</section>
<footer><p>&copy; <span id="year">{year}</span> {owner}</p></footer>
<a id="backToTop" href="#home" class="back-to-top" data-threshold="{top_threshold}" aria-label="Back to top">&uarr;</a>
<script src="/static/js/site.js" defer></script>
</body>
</html>"##,
        title = html_escape(&site.title),
        owner = html_escape(&site.owner),
        tagline = html_escape(&site.tagline),
        phrases = html_escape(&phrases),
        body_style = body_style,
        nav_threshold = ui.navbar_scroll_threshold,
        anchor_offset = ui.anchor_offset,
        reveal_offset = ui.reveal_offset,
        open_delay = config.modal.open_delay_ms,
        close_delay = config.modal.close_delay_ms,
        top_threshold = ui.back_to_top_threshold,
        notice_html = notice_html,
        grid = app.grid_html(),
        modals = app.modals_html(),
        contact = render_contact(contact),
        year = year,
    )
}

fn render_contact(view: &ContactView) -> String {
    let flash_html = match &view.flash {
        Some((FlashKind::Success, msg)) => format!(
            "<div class=\"contact-flash contact-flash-success\" role=\"status\">{}</div>",
            html_escape(msg)
        ),
        Some((FlashKind::Error, msg)) => format!(
            "<div class=\"contact-flash contact-flash-error\" role=\"alert\">{}</div>",
            html_escape(msg)
        ),
        None => String::new(),
    };

    format!(
        r#"{flash_html}<form id="contactForm" method="post" action="/contact#contact" class="contact-form" novalidate>
<input type="text" id="name" name="name" placeholder="Your name" value="{name}">
<input type="email" id="email" name="email" placeholder="your@email.com" value="{email}">
<textarea id="message" name="message" rows="6" placeholder="Your message">{message}</textarea>
<button type="submit" class="btn btn-primary">Send Message</button>
</form>"#,
        flash_html = flash_html,
        name = html_escape(&view.values.name),
        email = html_escape(&view.values.email),
        message = html_escape(&view.values.message),
    )
}
