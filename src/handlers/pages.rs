//! HTML page handlers.
//!
//! Each page receives the sanitized [`RequestContext`] and renders it into
//! the shared layout. Pages exist to be looked at while an edge rule is
//! being exercised; none of them has behavior beyond display.

use axum::{extract::State, response::Html};

use crate::handlers::cache::CACHE_VARIANTS;
use crate::handlers::render::{esc, page, row};
use crate::http::server::AppState;
use crate::http::RequestContext;

/// `GET /`: lab home page with links to all labs.
pub async fn index(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let content = r#"    <p>This site exists to exercise CDN/edge configuration: redirect
    rules, geo routing, cache policies, and origin behaviors. Point your
    edge at it and watch what comes back.</p>
    <ul>
      <li><a href="/debug">Request &amp; geo debug</a>: sanitized view of what the edge forwards</li>
      <li><a href="/redirect-lab">Redirect lab</a>: 301/302/307/308 side by side</li>
      <li><a href="/geo-redirect">Geo lab</a>: target page for edge redirect rules</li>
      <li><a href="/host-lab">Host lab</a>: effective host and scheme</li>
      <li><a href="/cache-lab">Cache lab</a>: cache-control variants with ETags</li>
    </ul>
    <h3>Origin utilities</h3>
    <ul>
      <li><code><a href="/delay/1000">/delay/{ms}</a></code>: slow origin simulation</li>
      <li><code><a href="/status/418">/status/{code}</a></code>: status code passthrough</li>
      <li><code><a href="/bytes/1024">/bytes/{n}</a></code>: byte-exact payloads</li>
    </ul>
"#;
    page(&state.config.site.title, "Welcome", &ctx, content)
}

/// `GET /debug`: request and geo debug page, allow-listed headers only.
pub async fn debug(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let mut content = String::from("    <h3>Request</h3>\n    <table>\n");
    content.push_str(&row("method", &ctx.method));
    content.push_str(&row("scheme", &ctx.scheme));
    content.push_str(&row("host", &ctx.host));
    content.push_str(&row("path", &ctx.path));
    content.push_str(&row("query", ctx.query.as_deref().unwrap_or("N/A")));
    content.push_str(&row("client ip", &ctx.client_ip));
    content.push_str(&row("country", &ctx.country));
    content.push_str(&row("city", &ctx.city));
    content.push_str(&row("region", &ctx.region));
    content.push_str(&row("cf-ray", &ctx.cf_ray));
    content.push_str("    </table>\n    <h3>Headers (allow-listed)</h3>\n    <table>\n");
    for (name, value) in &ctx.headers {
        content.push_str(&row(name, value));
    }
    content.push_str("    </table>\n");
    page(&state.config.site.title, "Debug", &ctx, &content)
}

/// `GET /robots.txt`: disallow all indexing for the demo site.
pub async fn robots() -> &'static str {
    "User-agent: *\nDisallow: /"
}

/// `GET /redirect-lab`: menu of the fixed-code redirect endpoints.
pub async fn redirect_lab(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let final_path = esc(&state.config.site.final_path);
    let content = format!(
        r#"    <p>Each link below answers with its documented status code and
    <code>Location: {final_path}</code>. Follow them with redirects disabled
    to inspect the raw responses.</p>
    <ul>
      <li><a href="/r/301">301 Moved Permanently</a></li>
      <li><a href="/r/302">302 Found</a></li>
      <li><a href="/r/307">307 Temporary Redirect</a></li>
      <li><a href="/r/308">308 Permanent Redirect</a></li>
    </ul>
"#
    );
    page(&state.config.site.title, "Redirect Lab", &ctx, &content)
}

/// `GET /final`: landing page after redirects.
pub async fn final_landing(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let content = r#"    <p>You made it. Whatever redirect chain brought you here has
    resolved; the footer shows how this request arrived.</p>
    <p><a href="/redirect-lab">Back to the redirect lab</a></p>
"#;
    page(&state.config.site.title, "Final Landing", &ctx, content)
}

/// `GET /geo-redirect`: entry point targeted by edge redirect rules.
///
/// The actual geo-based redirects happen at the edge; this page only
/// documents the expectation and shows where the request really came from.
pub async fn geo_redirect(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let content = format!(
        r#"    <p>This page is meant to be the target of edge redirect rules
    keyed on the visitor's country. If the rules are active you should have
    been sent to a region page instead of reading this.</p>
    <p>The edge reports your country as <strong>{}</strong>.</p>
    <ul>
      <li><a href="/us">United States</a></li>
      <li><a href="/ca">Canada</a></li>
      <li><a href="/fi">Finland</a></li>
      <li><a href="/row">Rest of World</a></li>
    </ul>
"#,
        esc(&ctx.country)
    );
    page(&state.config.site.title, "Geo Redirect", &ctx, &content)
}

fn region(
    state: &AppState,
    ctx: &RequestContext,
    code: &str,
    name: &str,
    emoji: &str,
) -> Html<String> {
    let content = format!(
        r#"    <p class="region">{emoji}</p>
    <p>This is the <strong>{name}</strong> ({code}) landing page. The edge
    reports your country as <strong>{country}</strong>; if the two disagree,
    your geo rules need another look.</p>
    <p><a href="/geo-redirect">Back to the geo lab</a></p>
"#,
        country = esc(&ctx.country),
    );
    page(&state.config.site.title, name, ctx, &content)
}

/// `GET /us`: US region landing page.
pub async fn region_us(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    region(&state, &ctx, "US", "United States", "🇺🇸")
}

/// `GET /ca`: Canada region landing page.
pub async fn region_ca(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    region(&state, &ctx, "CA", "Canada", "🇨🇦")
}

/// `GET /fi`: Finland region landing page.
pub async fn region_fi(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    region(&state, &ctx, "FI", "Finland", "🇫🇮")
}

/// `GET /row`: Rest of World region landing page.
pub async fn region_row(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    region(&state, &ctx, "ROW", "Rest of World", "🌍")
}

/// `GET /host-lab`: effective host and scheme as seen by the origin.
pub async fn host_lab(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let content = format!(
        r#"    <p>The origin sees this request as
    <code>{scheme}://{host}{path}</code>. Host-rewrite and scheme-upgrade
    rules at the edge show up here.</p>
    <table>
{scheme_row}{host_row}
    </table>
"#,
        scheme = esc(&ctx.scheme),
        host = esc(&ctx.host),
        path = esc(&ctx.path),
        scheme_row = row("scheme", &ctx.scheme),
        host_row = row("host", &ctx.host),
    );
    page(&state.config.site.title, "Host Lab", &ctx, &content)
}

/// `GET /cache-lab`: menu of the cache-control variant endpoints.
pub async fn cache_lab(State(state): State<AppState>, ctx: RequestContext) -> Html<String> {
    let mut rows = String::new();
    for variant in &CACHE_VARIANTS {
        rows.push_str(&format!(
            "      <tr><td><a href=\"/cache/{name}\">{name}</a></td><td><code>{cc}</code></td><td>{desc}</td></tr>\n",
            name = variant.name,
            cc = variant.cache_control,
            desc = variant.description,
        ));
    }
    let content = format!(
        r#"    <p>Each endpoint returns a small JSON body with the listed
    <code>Cache-Control</code> header, a content ETag, and an
    <code>x-cache-lab</code> marker. Request one twice through the edge and
    compare what the cache did.</p>
    <table>
      <tr><th>variant</th><th>cache-control</th><th>description</th></tr>
{rows}    </table>
"#
    );
    page(&state.config.site.title, "Cache Lab", &ctx, &content)
}
