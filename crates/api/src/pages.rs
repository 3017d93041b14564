//! Page surface served by the `ipgate` binary.
//!
//! The presentation layer is a client-side application; the gateway only
//! serves its HTML shell on every non-API path (after the route guard).

use axum::{Router, response::Html};

const SHELL: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>IP Management</title>
    <script type="module" src="/assets/app.js"></script>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

/// Serve the application shell for any page path.
pub fn shell_router() -> Router {
    Router::new().fallback(shell)
}

async fn shell() -> Html<&'static str> {
    Html(SHELL)
}
