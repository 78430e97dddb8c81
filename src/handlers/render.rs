//! HTML rendering helpers.
//!
//! Pages are assembled by string formatting into one shared layout. Header
//! values and anything else derived from the request go through [`esc`]
//! before interpolation.

use axum::response::Html;

use crate::http::RequestContext;

/// HTML-escape a request-derived value.
pub fn esc(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

/// Wrap page content in the shared site layout.
pub fn page(site_title: &str, title: &str, ctx: &RequestContext, content: &str) -> Html<String> {
    let nav = [
        ("/", "Home"),
        ("/debug", "Debug"),
        ("/redirect-lab", "Redirects"),
        ("/geo-redirect", "Geo"),
        ("/host-lab", "Host"),
        ("/cache-lab", "Cache"),
    ]
    .iter()
    .map(|(href, label)| format!(r#"<a href="{href}">{label}</a>"#))
    .collect::<Vec<_>>()
    .join("\n      ");

    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} · {site}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header>
    <h1>{site}</h1>
    <nav>
      {nav}
    </nav>
  </header>
  <main>
    <h2>{title}</h2>
{content}
  </main>
  <footer>
    <p>request <code>{request_id}</code> · {timestamp} · ip {client_ip} · ray {cf_ray}</p>
  </footer>
</body>
</html>
"#,
        site = esc(site_title),
        title = esc(title),
        nav = nav,
        content = content,
        request_id = esc(&ctx.request_id),
        timestamp = esc(&ctx.timestamp),
        client_ip = esc(&ctx.client_ip),
        cf_ray = esc(&ctx.cf_ray),
    ))
}

/// Render a key/value table row with an escaped value.
pub fn row(key: &str, value: &str) -> String {
    format!(
        "      <tr><th>{}</th><td>{}</td></tr>\n",
        esc(key),
        esc(value)
    )
}
