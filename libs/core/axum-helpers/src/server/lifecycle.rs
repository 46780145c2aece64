use axum::Router;
use core_config::ServerConfig;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as AutoBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::ShutdownCoordinator;

/// Upper bound on draining in-flight requests after a stop signal
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Listener lifecycle, observable through [`Server::state`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerState {
    NotStarted,
    Listening,
    ShuttingDown,
    Stopped,
}

/// How the listener finished after the stop signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request completed within [`SHUTDOWN_TIMEOUT`]
    Graceful,
    /// The deadline passed and the open connections were aborted
    TimedOut,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("http server failed: {0}")]
    Serve(#[source] io::Error),
}

/// A bound listener waiting to serve a router.
///
/// Binding happens on the caller's task so that a port conflict is an error
/// before anything is reported as ready.
pub struct Server {
    listener: TcpListener,
    coordinator: ShutdownCoordinator,
    state: watch::Sender<ServerState>,
}

impl Server {
    /// Bind the listener described by `config`.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let address = config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })?;

        Ok(Self::from_listener(listener))
    }

    /// Serve on an already bound listener.
    pub fn from_listener(listener: TcpListener) -> Self {
        let (state, _) = watch::channel(ServerState::NotStarted);
        Self {
            listener,
            coordinator: ShutdownCoordinator::new(),
            state,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Watch the lifecycle state; the receiver outlives the server.
    pub fn state(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Serve `router` until `shutdown` completes, then drain.
    ///
    /// The accept loop runs on its own task and every connection gets a task
    /// of its own. Once `shutdown` resolves, the listener is closed and
    /// in-flight requests get up to [`SHUTDOWN_TIMEOUT`] to finish; after
    /// that every remaining connection is aborted and
    /// [`ShutdownOutcome::TimedOut`] is returned.
    ///
    /// If the accept loop dies before `shutdown` resolves, the error is
    /// returned as [`ServerError::Serve`].
    pub async fn run<F>(self, router: Router, shutdown: F) -> Result<ShutdownOutcome, ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let Server {
            listener,
            coordinator,
            state,
        } = self;

        let address = listener.local_addr().map_err(ServerError::Serve)?;
        let stop = coordinator.subscribe();

        let mut accept_task = tokio::spawn(accept_loop(listener, router, stop));

        state.send_replace(ServerState::Listening);
        info!(%address, "http server listening");

        tokio::select! {
            _ = shutdown => {}
            joined = &mut accept_task => {
                state.send_replace(ServerState::Stopped);
                let err = match joined {
                    Ok(_) => io::Error::other("listener exited without a stop signal"),
                    Err(e) => io::Error::other(e),
                };
                error!(error = %err, "http server stopped unexpectedly");
                return Err(ServerError::Serve(err));
            }
        }

        state.send_replace(ServerState::ShuttingDown);
        info!(timeout_secs = SHUTDOWN_TIMEOUT.as_secs(), "shutting down http server");
        coordinator.shutdown();

        let Connections {
            mut tasks,
            graceful,
        } = match accept_task.await {
            Ok(connections) => connections,
            Err(e) => {
                state.send_replace(ServerState::Stopped);
                error!(error = %e, "http server task failed while draining");
                return Err(ServerError::Serve(io::Error::other(e)));
            }
        };

        let drained = tokio::time::timeout(SHUTDOWN_TIMEOUT, async {
            graceful.shutdown().await;
            while tasks.join_next().await.is_some() {}
        })
        .await;

        let outcome = match drained {
            Ok(()) => {
                info!("http server exited gracefully");
                ShutdownOutcome::Graceful
            }
            Err(_) => {
                warn!(
                    timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
                    open_connections = tasks.len(),
                    "http server shutdown timed out, dropping in-flight requests"
                );
                tasks.shutdown().await;
                ShutdownOutcome::TimedOut
            }
        };

        state.send_replace(ServerState::Stopped);
        Ok(outcome)
    }
}

/// Connections still open when the accept loop stopped.
struct Connections {
    tasks: JoinSet<()>,
    graceful: GracefulShutdown,
}

/// Accept connections until `stop` fires, then close the listener.
async fn accept_loop(
    listener: TcpListener,
    router: Router,
    mut stop: broadcast::Receiver<()>,
) -> Connections {
    let builder = AutoBuilder::new(TokioExecutor::new());
    let graceful = GracefulShutdown::new();
    let mut tasks = JoinSet::new();

    loop {
        let (socket, remote) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            },
            _ = stop.recv() => break,
        };

        if let Err(e) = socket.set_nodelay(true) {
            debug!(%remote, error = %e, "failed to set TCP_NODELAY");
        }

        let service = TowerToHyperService::new(router.clone());
        let conn = builder.serve_connection_with_upgrades(TokioIo::new(socket), service);
        let conn = graceful.watch(conn.into_owned());

        tasks.spawn(async move {
            if let Err(e) = conn.await {
                debug!(%remote, error = %e, "connection closed with error");
            }
        });

        // Reap finished connections so the set only holds open ones.
        while tasks.try_join_next().is_some() {}
    }

    drop(listener);
    Connections { tasks, graceful }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_reports_address() {
        let server = Server::bind(&ServerConfig::new("127.0.0.1".to_string(), 0))
            .await
            .unwrap();
        let addr = server.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
        assert_eq!(*server.state().borrow(), ServerState::NotStarted);
    }

    #[tokio::test]
    async fn test_bind_conflict() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = Server::bind(&ServerConfig::new("127.0.0.1".to_string(), port))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, ServerError::Bind { ref address, .. } if address.ends_with(&port.to_string())));
    }

    #[tokio::test]
    async fn test_bind_invalid_address() {
        let result = Server::bind(&ServerConfig::new("not an address".to_string(), 80)).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
