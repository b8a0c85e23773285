use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancels `cancelation` once the process receives Ctrl-C.
///
/// On Windows detached processes can't detect signals sent to them, there the daemon is stopped
/// by `bootcamp stop` killing the process.
pub async fn detect_shutdown(cancelation: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received shutdown signal");
            cancelation.cancel();
        }
        Err(e) => {
            error!("Can't listen for shutdown signal {e:?}");
            std::future::pending::<()>().await;
        }
    }
}
