use kernel::store::{Change, WriteOp};
use tokio::sync::broadcast;

const FEED_CAPACITY: usize = 256;

/// In-process change notifications, shared by every subscriber of a store.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Change>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.tx.subscribe()
    }

    // 購読者がいなければ送信エラーになるが、それは無視してよい
    pub fn publish_committed(&self, ops: &[WriteOp]) {
        for op in ops {
            let _ = self.tx.send(Change {
                path: op.path().clone(),
            });
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
