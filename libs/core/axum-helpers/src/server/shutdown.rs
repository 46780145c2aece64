use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Shutdown coordinator that fans a single stop request out to every
/// interested task.
///
/// This handles:
/// - Broadcasting shutdown to all subscribers
/// - Shutdown state tracking
/// - Firing at most once, however many times it is asked
#[derive(Clone)]
pub struct ShutdownCoordinator {
    /// Broadcast channel to notify all tasks of shutdown
    tx: broadcast::Sender<()>,
    /// Flag indicating if shutdown has been initiated
    shutdown_initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to shutdown notifications.
    ///
    /// Subscribe before calling [`shutdown`](Self::shutdown); a receiver
    /// created afterwards never sees the notification.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Check if shutdown has been initiated.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Relaxed)
    }

    /// Initiate shutdown and notify all subscribers.
    ///
    /// Returns `false` when shutdown had already been initiated.
    pub fn shutdown(&self) -> bool {
        if self
            .shutdown_initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.tx.send(());
            true
        } else {
            false
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a future that completes when the process receives SIGINT,
/// SIGTERM or SIGQUIT (Ctrl+C only on non-unix targets).
///
/// The handlers are installed when this function is called, not when the
/// future is first polled, so a signal that arrives in between is not lost
/// to the default action. A handler that cannot be installed is logged and
/// never fires; the remaining signals still work.
pub fn shutdown_signal() -> impl Future<Output = ()> + Send {
    #[cfg(unix)]
    let interrupt = unix_signal(signal::unix::SignalKind::interrupt(), "SIGINT");

    #[cfg(unix)]
    let terminate = unix_signal(signal::unix::SignalKind::terminate(), "SIGTERM");

    #[cfg(unix)]
    let quit = unix_signal(signal::unix::SignalKind::quit(), "SIGQUIT");

    #[cfg(not(unix))]
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    #[cfg(not(unix))]
    let quit = std::future::pending::<()>();

    async move {
        tokio::select! {
            _ = interrupt => {
                info!("Received SIGINT (Ctrl+C), shutting down gracefully");
            },
            _ = terminate => {
                info!("Received SIGTERM, shutting down gracefully");
            },
            _ = quit => {
                info!("Received SIGQUIT, shutting down gracefully");
            },
        }
    }
}

#[cfg(unix)]
fn unix_signal(
    kind: signal::unix::SignalKind,
    name: &'static str,
) -> impl Future<Output = ()> + Send {
    let installed = signal::unix::signal(kind);
    async move {
        match installed {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(signal = name, error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    }
}
