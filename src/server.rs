use std::thread;
use axum::Router;
use axum::routing::get;
use log::{error, info};

/// Starts the process liveness endpoint on its own thread.
///
/// GET / answers 200 for external liveness probing; there is no business
/// logic behind it. The endpoint runs on a single threaded runtime so the
/// worker threads keep the rest of the process to themselves.
///
/// # Arguments
///
/// * 'port' - the port to bind to
pub fn spawn(port: u16) -> std::io::Result<()> {
    thread::Builder::new()
        .name("liveness".to_string())
        .spawn(move || {
            if let Err(e) = serve(port) {
                error!("liveness endpoint failed: {}", e);
            }
        })?;

    Ok(())
}

fn serve(port: u16) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;

    runtime.block_on(async move {
        let app = Router::new().route("/", get(|| async { "OK" }));
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("liveness endpoint listening on port {}", port);
        axum::serve(listener, app).await
    })
}
