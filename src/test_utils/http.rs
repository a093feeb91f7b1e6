use axum::{Router, http::StatusCode, routing::get};
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let addr = listener.local_addr().expect("Could not get local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{addr}/snapshot.json")
}

/// Serve `body` as JSON on a random local port and return its URL.
pub(crate) async fn serve_json(body: &'static str) -> String {
    let router = Router::new().route(
        "/snapshot.json",
        get(move || async move { ([("content-type", "application/json")], body) }),
    );

    serve(router).await
}

/// Serve an empty response with `status` on a random local port and return
/// its URL.
pub(crate) async fn serve_status(status: StatusCode) -> String {
    let router = Router::new().route("/snapshot.json", get(move || async move { status }));

    serve(router).await
}
