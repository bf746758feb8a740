//! Test doubles shared by the handler and server tests.

use std::time::Duration;

use desknotify_notifier::{Backend, Notification, Notifier, NotifyError};
use tokio::sync::mpsc;

/// Records every shown notification on a channel.
pub struct RecordingBackend {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Backend for RecordingBackend {
    fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        let _ = self.tx.send(notification.clone());
        Ok(())
    }
}

/// Returns a notifier backed by [`RecordingBackend`] and its receiving end.
pub fn recording_notifier() -> (Notifier, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier::new(RecordingBackend { tx }), rx)
}

/// Waits for the next dispatched notification.
pub async fn next_dispatch(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Notification {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a dispatch")
        .expect("notifier dropped")
}

/// Asserts that nothing was dispatched within a short grace period.
pub async fn assert_no_dispatch(rx: &mut mpsc::UnboundedReceiver<Notification>) {
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err(), "unexpected notification dispatch");
}
