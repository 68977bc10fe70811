//! Signal handling.
//!
//! # Responsibilities
//! - Resolve when the operator interrupts the run (SIGINT / Ctrl-C)
//! - Abandon in-flight work when that happens

use std::future::Future;

/// Exit code used when a run is interrupted.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Wait for Ctrl-C. If the handler cannot be installed, never resolves.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for interrupt signal");
        std::future::pending::<()>().await;
    }
}

/// Drive `work` to completion unless `interrupt` resolves first.
///
/// Returns `None` on interrupt; `work` is dropped unfinished. An interrupt
/// that is ready at the same time as the work wins.
pub async fn unless_interrupted<F, I>(work: F, interrupt: I) -> Option<F::Output>
where
    F: Future,
    I: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = interrupt => None,
        output = work => Some(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_work_completes_without_interrupt() {
        let result = unless_interrupted(async { 7 }, std::future::pending()).await;
        assert_eq!(result, Some(7));
    }

    #[tokio::test]
    async fn test_interrupt_abandons_work() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let work = async move {
            let _guard = tx;
            tokio::time::sleep(Duration::from_secs(30)).await;
        };

        let result = unless_interrupted(work, async {}).await;
        assert!(result.is_none());
        // The dropped work future released its sender.
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_interrupt_wins_a_tie() {
        assert_eq!(unless_interrupted(async { 1 }, async {}).await, None);
    }
}
