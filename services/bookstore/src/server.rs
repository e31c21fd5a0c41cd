//! HTTP server lifecycle: serve until a shutdown signal, then drain

use axum::Router;
use std::{
    future::{Future, IntoFuture},
    io,
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

#[cfg(unix)]
const SIGABRT: i32 = 6;

/// Wait for SIGINT, SIGTERM, SIGHUP, SIGQUIT or SIGABRT
#[cfg(unix)]
pub async fn shutdown_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;
    let mut quit = signal(SignalKind::quit())?;
    let mut abort = signal(SignalKind::from_raw(SIGABRT))?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = hangup.recv() => "SIGHUP",
        _ = quit.recv() => "SIGQUIT",
        _ = abort.recv() => "SIGABRT",
    };
    Ok(name)
}

#[cfg(not(unix))]
pub async fn shutdown_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}

/// Serve `app` until a process shutdown signal arrives
pub async fn run(listener: TcpListener, app: Router, drain: Duration) -> io::Result<()> {
    serve(listener, app, shutdown_signal(), drain).await
}

/// Serve `app` until `shutdown` resolves
///
/// The listener stops accepting as soon as `shutdown` resolves; in-flight
/// requests then get at most `drain` to complete before they are dropped.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F, drain: Duration) -> io::Result<()>
where
    F: Future<Output = io::Result<&'static str>>,
{
    let stop = Arc::new(Notify::new());
    let graceful = {
        let stop = stop.clone();
        async move { stop.notified().await }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        signal = shutdown => info!("received {}, shutting down", signal?),
    }

    stop.notify_one();
    match tokio::time::timeout(drain, server).await {
        Ok(result) => {
            info!("server stopped");
            result
        }
        Err(_) => {
            warn!("in-flight requests did not finish within {:?}", drain);
            Ok(())
        }
    }
}
