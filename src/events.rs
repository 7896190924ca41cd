//! Ordered input queue between the host and the editor.
//!
//! The host pushes [`InputEvent`]s through an [`InputSender`] from its DOM
//! listeners; the editor drains them in arrival order on its own turn (e.g.
//! once per animation frame). Closing the receiver is the teardown: after
//! [`InputReceiver::close`] every send fails with [`SendError`].

use futures::FutureExt;
use futures::StreamExt;
use futures::channel::mpsc;

use crate::error::SendError;
use crate::input::InputEvent;

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

/// Create a connected sender/receiver pair.
#[must_use]
pub fn channel() -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::unbounded();
    (InputSender { tx }, InputReceiver { rx })
}

/// Cloneable handle the host uses to feed events to an editor.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl InputSender {
    /// Queue `event` for the editor.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] once the editor has been destroyed.
    pub fn send(&self, event: InputEvent) -> Result<(), SendError> {
        self.tx.unbounded_send(event).map_err(|_| SendError)
    }

    /// Whether the receiving editor is gone.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the editor.
#[derive(Debug)]
pub struct InputReceiver {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl InputReceiver {
    /// The next queued event, or `None` when the queue is empty or closed.
    pub fn try_next(&mut self) -> Option<InputEvent> {
        self.rx.next().now_or_never().flatten()
    }

    /// Every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Stop accepting events. Already queued events can still be drained.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
