use tokio::sync::watch;

/// Single-slot error banner. Each write replaces whatever was shown before;
/// there is no queue and no history.
#[derive(Debug)]
pub struct ErrorSlot {
    tx: watch::Sender<Option<String>>,
}

impl Default for ErrorSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorSlot {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub fn set(&self, message: impl Into<String>) {
        self.tx.send_replace(Some(message.into()));
    }

    pub fn current(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}
