//! # Readiness Waiter
//!
//! Waits for a provider to come online, bounded by a timeout.
//!
//! Two activities race each other:
//!
//! ```text
//!   poller task                 timer
//!   ───────────                 ─────
//!   is_online? ──yes──► Online  sleep(timeout) ──► expired
//!       │no                     (pending forever when timeout == 0)
//!   should_retry? ──no──► NotOnline
//!       │yes
//!   sleep(backoff) or stop ──► (stopped)
//!       └──────► loop
//! ```
//!
//! The arbiter takes the first of {Online, NotOnline, expired}. When the
//! deadline and a backoff end in the same instant, the poller still gets its
//! check in before it honours the stop, and an Online result from that check
//! wins over the timeout. Before returning the arbiter signals the poller to
//! stop and awaits it, so no provider call happens after this function
//! returns. Dropping the returned future also stops the poller at its next
//! backoff.

use crate::{KindleError, Provider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Terminal states of the polling task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Online,
    NotOnline,
    Stopped,
}

/// Wait until `provider` is online.
///
/// Fails with [`KindleError::NotOnline`] when the provider stops asking to be
/// retried, and with [`KindleError::TimedOut`] once `timeout` elapses. A zero
/// timeout waits forever.
pub async fn wait_for_provider(
    provider: Arc<dyn Provider>,
    timeout: Duration,
) -> Result<(), KindleError> {
    let (stop_tx, stop_rx) = oneshot::channel();
    let mut poller = tokio::spawn(poll_until_settled(provider, stop_rx));

    let expired = async {
        if timeout.is_zero() {
            std::future::pending::<()>().await;
        } else {
            tokio::time::sleep(timeout).await;
        }
    };

    let settled = tokio::select! {
        biased;
        polled = &mut poller => Some(polled),
        () = expired => None,
    };

    // Send fails only if the poller already returned.
    let _ = stop_tx.send(());

    match settled {
        Some(Ok(Readiness::Online)) => Ok(()),
        Some(Ok(Readiness::NotOnline)) => Err(KindleError::NotOnline),
        Some(Ok(Readiness::Stopped)) => Err(KindleError::PollerFailed(
            "poller stopped before the provider settled".to_string(),
        )),
        Some(Err(e)) => Err(KindleError::PollerFailed(e.to_string())),
        // Join so the poller is gone before we return. A check that raced
        // the deadline still counts.
        None => match poller.await {
            Ok(Readiness::Online) => Ok(()),
            Ok(Readiness::NotOnline) => Err(KindleError::NotOnline),
            Ok(Readiness::Stopped) => Err(KindleError::TimedOut),
            Err(e) => {
                tracing::debug!("provider poller ended abnormally after timeout: {}", e);
                Err(KindleError::TimedOut)
            }
        },
    }
}

async fn poll_until_settled(
    provider: Arc<dyn Provider>,
    mut stop: oneshot::Receiver<()>,
) -> Readiness {
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        if provider.is_online() {
            tracing::debug!(provider = provider.name(), attempt, "provider is online");
            return Readiness::Online;
        }
        if !provider.should_retry() {
            tracing::debug!(provider = provider.name(), attempt, "provider will not come online");
            return Readiness::NotOnline;
        }

        let backoff = provider.backoff_duration();
        tracing::debug!(
            provider = provider.name(),
            attempt,
            backoff_ms = backoff.as_millis() as u64,
            "provider offline, backing off"
        );

        tokio::select! {
            biased;
            // An elapsed backoff beats a stop that arrived in the same instant.
            () = tokio::time::sleep(backoff) => {}
            // Either a stop request or a dropped sender ends polling.
            _ = &mut stop => return Readiness::Stopped,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
