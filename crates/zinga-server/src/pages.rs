//! Server-rendered storefront pages.

use axum::response::Html;

/// Navigation hooks a page is rendered against, supplied by the
/// router shell.
pub trait PageNavigation {
    /// Target of the page's "back" control.
    fn back_href(&self) -> String;
    /// Link to another named page.
    fn href_for(&self, page: &str) -> String;
}

/// Site-root navigation: back goes home, pages live at `/<page>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteNavigation;

impl PageNavigation for SiteNavigation {
    fn back_href(&self) -> String {
        "/".into()
    }

    fn href_for(&self, page: &str) -> String {
        format!("/{}", page.trim_start_matches('/'))
    }
}

/// Terms of Service page. Static content only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermsPage;

impl TermsPage {
    pub const TITLE: &'static str = "Terms of Service";

    pub fn render(&self, nav: &impl PageNavigation) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Zinga Linga</title>
</head>
<body class="min-h-screen bg-white">
<main class="max-w-4xl mx-auto px-4 py-8">
<a href="{back}" class="back-link">&larr; Back to Home</a>
<header class="hero">
<h1>{title}</h1>
<p>Terms and conditions for using Zinga Linga services.</p>
</header>
<section class="card">
<h2>{title}</h2>
<p>Terms of service content coming soon...</p>
</section>
</main>
</body>
</html>
"#,
            title = Self::TITLE,
            back = escape_attr(&nav.back_href()),
        )
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub async fn terms_handler() -> Html<String> {
    Html(TermsPage.render(&SiteNavigation))
}

pub async fn home_handler() -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\"><body><h1>Welcome to Zinga Linga!</h1>\
         <a href=\"{}\">{}</a></body></html>",
        escape_attr(&SiteNavigation.href_for("terms")),
        TermsPage::TITLE,
    ))
}
