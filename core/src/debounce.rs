use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio::time::sleep_until;

/// Default quiescence window for search input.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(350);

/// Trailing-edge debouncer for rapidly changing text input.
///
/// Every [`observe`](Debouncer::observe) call resets the quiescence timer;
/// only the value present when the timer fires reaches the receiver, so a
/// burst of N calls produces exactly one downstream emission. Dropping the
/// handle mid-window discards the pending value and ends the worker.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(window, in_rx, out_tx));
        (Self { tx: in_tx }, out_rx)
    }

    /// Feed the latest input value, restarting the quiescence timer.
    pub fn observe(&self, value: impl Into<String>) {
        // Send only fails once the worker is gone, at which point there is
        // nobody left to debounce for.
        let _ = self.tx.send(value.into());
    }
}

async fn run(
    window: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
) {
    while let Some(mut latest) = input.recv().await {
        let mut deadline = Instant::now() + window;
        loop {
            select! {
                next = input.recv() => match next {
                    Some(value) => {
                        latest = value;
                        deadline = Instant::now() + window;
                    }
                    None => return,
                },
                _ = sleep_until(deadline) => {
                    if output.send(latest).is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
