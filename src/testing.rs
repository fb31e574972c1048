//! Loopback HTTP server for exercising the real clients in unit tests.

use axum::Router;
use tokio::net::TcpListener;

/// Serves the router built by `build` on an ephemeral port and returns its
/// base URL (`http://127.0.0.1:<port>`). The router builder receives that
/// base URL so responses can link back to the same server.
pub async fn serve<F>(build: F) -> String
where
    F: FnOnce(&str) -> Router,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
    let base_url = format!("http://{}", listener.local_addr().expect("test listener address"));
    let router = build(&base_url);

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    base_url
}
