//! Lifecycle tests against a real socket
//!
//! Each test binds an ephemeral port, serves a small router and drives the
//! stop signal through a oneshot channel instead of a process signal.

use axum::{Router, routing::get};
use axum_helpers::{SHUTDOWN_TIMEOUT, Server, ServerState, ShutdownOutcome};
use core_config::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Notify, oneshot};
use tokio::task::JoinHandle;

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    state: tokio::sync::watch::Receiver<ServerState>,
    handle: JoinHandle<Result<ShutdownOutcome, axum_helpers::ServerError>>,
}

async fn start(router: Router) -> Running {
    let server = Server::bind(&ServerConfig::new("127.0.0.1".to_string(), 0))
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    let mut state = server.state();
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(server.run(router, async move {
        let _ = stopped.await;
    }));

    state
        .wait_for(|s| *s == ServerState::Listening)
        .await
        .unwrap();

    Running {
        addr,
        stop,
        state,
        handle,
    }
}

/// Router whose `/slow` handler signals `entered` and then sleeps `delay`
fn slow_router(entered: Arc<Notify>, delay: Duration) -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route(
            "/slow",
            get(move || {
                let entered = entered.clone();
                async move {
                    entered.notify_one();
                    tokio::time::sleep(delay).await;
                    "done"
                }
            }),
        )
}

#[tokio::test]
async fn test_serves_requests_while_listening() {
    let running = start(slow_router(Arc::new(Notify::new()), Duration::ZERO)).await;

    let body = reqwest::get(format!("http://{}/ping", running.addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "pong");

    running.stop.send(()).unwrap();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_quick_exit_when_idle() {
    let mut running = start(slow_router(Arc::new(Notify::new()), Duration::ZERO)).await;

    let started = Instant::now();
    running.stop.send(()).unwrap();
    let outcome = running.handle.await.unwrap().unwrap();

    assert_eq!(outcome, ShutdownOutcome::Graceful);
    assert!(started.elapsed() < Duration::from_secs(1));

    running
        .state
        .wait_for(|s| *s == ServerState::Stopped)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_in_flight_request_completes_before_exit() {
    let entered = Arc::new(Notify::new());
    let running = start(slow_router(entered.clone(), Duration::from_secs(1))).await;

    let url = format!("http://{}/slow", running.addr);
    let request = tokio::spawn(async move { reqwest::get(url).await?.text().await });
    entered.notified().await;

    let started = Instant::now();
    running.stop.send(()).unwrap();
    let outcome = running.handle.await.unwrap().unwrap();

    assert_eq!(outcome, ShutdownOutcome::Graceful);
    assert!(started.elapsed() < SHUTDOWN_TIMEOUT);
    assert_eq!(request.await.unwrap().unwrap(), "done");
}

#[tokio::test]
async fn test_new_connections_refused_after_shutdown() {
    let running = start(slow_router(Arc::new(Notify::new()), Duration::ZERO)).await;
    let addr = running.addr;

    running.stop.send(()).unwrap();
    running.handle.await.unwrap().unwrap();

    assert!(reqwest::get(format!("http://{}/ping", addr)).await.is_err());
}

#[tokio::test]
async fn test_long_request_is_cut_off_at_deadline() {
    let entered = Arc::new(Notify::new());
    let running = start(slow_router(entered.clone(), Duration::from_secs(30))).await;
    let mut state = running.state.clone();

    let url = format!("http://{}/slow", running.addr);
    let request = tokio::spawn(async move { reqwest::get(url).await?.text().await });
    entered.notified().await;

    let started = Instant::now();
    running.stop.send(()).unwrap();

    state
        .wait_for(|s| *s == ServerState::ShuttingDown)
        .await
        .unwrap();

    let outcome = running.handle.await.unwrap().unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome, ShutdownOutcome::TimedOut);
    assert!(elapsed >= SHUTDOWN_TIMEOUT);
    assert!(elapsed < SHUTDOWN_TIMEOUT + Duration::from_secs(2));
    assert_eq!(*state.borrow(), ServerState::Stopped);

    // The handler would sleep for 30s; the aborted connection ends it early.
    let response = tokio::time::timeout(Duration::from_secs(2), request)
        .await
        .expect("aborted request should resolve promptly")
        .unwrap();
    assert!(response.is_err());
}
