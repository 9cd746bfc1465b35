use std::future::IntoFuture;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;

/// Resolves on Ctrl+C or SIGTERM and flips `fired` to `true`.
pub async fn shutdown_signal(fired: watch::Sender<bool>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        }
    }

    fired.send_replace(true);
}

/// Drives `server` to completion, but once `fired` turns `true` gives open
/// connections at most `timeout` to drain before returning.
pub async fn serve_with_deadline<S, E>(
    server: S,
    mut fired: watch::Receiver<bool>,
    timeout: Duration,
) -> Result<(), E>
where
    S: IntoFuture<Output = Result<(), E>>,
{
    let server = server.into_future();
    tokio::pin!(server);

    let wait_signal = async { fired.wait_for(|fired| *fired).await.is_ok() };
    tokio::select! {
        result = &mut server => return result,
        signalled = wait_signal => {
            if !signalled {
                return server.await;
            }
        }
    }

    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "allowing connections to drain"
    );
    match tokio::time::timeout(timeout, server).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "connections still open after shutdown timeout, exiting"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARD: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn stuck_server_is_abandoned_after_timeout() {
        let (tx, rx) = watch::channel(false);
        tx.send_replace(true);

        let server = std::future::pending::<Result<(), String>>();
        let result = tokio::time::timeout(
            GUARD,
            serve_with_deadline(server, rx, Duration::from_millis(50)),
        )
        .await;

        assert_eq!(result, Ok(Ok(())));
    }

    #[tokio::test]
    async fn server_result_is_returned_before_any_signal() {
        let (_tx, rx) = watch::channel(false);

        let server = async { Err::<(), _>("boom".to_string()) };
        let result = serve_with_deadline(server, rx, Duration::from_millis(50)).await;

        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn drain_that_finishes_in_time_keeps_its_result() {
        let (tx, rx) = watch::channel(false);
        tx.send_replace(true);

        let server = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Err::<(), _>("drained with error".to_string())
        };
        let result = serve_with_deadline(server, rx, Duration::from_secs(2)).await;

        assert_eq!(result, Err("drained with error".to_string()));
    }

    #[tokio::test]
    async fn dropped_trigger_waits_for_the_server() {
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let server = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<(), String>(())
        };
        let result = serve_with_deadline(server, rx, Duration::from_millis(1)).await;

        assert_eq!(result, Ok(()));
    }
}
