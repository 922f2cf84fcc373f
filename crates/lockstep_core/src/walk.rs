//! Tree traversal worker threads.
//!
//! A [`TreeWalker`] runs one tree's pre-order traversal on its own thread,
//! handing `(node, parent)` pairs to the orchestrator under a one-credit
//! handshake: the worker blocks until it receives a credit, sends exactly
//! one emission, then blocks again. The credit channel has capacity 1 and
//! the emission channel is a rendezvous, so the worker can never run more
//! than one node ahead of the consumer.
//!
//! Exhaustion has no sentinel value: the worker simply drops its channel
//! ends, and the disconnect is observed synchronously by the next
//! [`TreeWalker::next_emission`] call. This replaces heartbeat-style
//! polling with an end-of-sequence marker that cannot race.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::{debug, trace};

use lockstep_ast::{NodeId, PreOrder, Tree};

/// One `(node, parent)` pair produced by a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    /// The visited node.
    pub node: NodeId,
    /// Its parent in the traversal, `None` for the root.
    pub parent: Option<NodeId>,
}

/// A worker thread traversing one tree in pre-order.
///
/// Not restartable: once the traversal is exhausted, construct a new
/// walker to traverse again. Dropping the handle disconnects both channels
/// and joins the thread, so a walker abandoned mid-traversal does not
/// outlive its orchestrator.
pub struct TreeWalker {
    credit_tx: Option<Sender<()>>,
    emission_rx: Option<Receiver<Emission>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl TreeWalker {
    /// Spawns the traversal thread for the given tree.
    ///
    /// `name` labels the worker thread and its log lines.
    pub fn spawn(tree: Arc<Tree>, name: &str) -> Self {
        let (credit_tx, credit_rx) = bounded::<()>(1);
        let (emission_tx, emission_rx) = bounded::<Emission>(0);

        let thread_name = format!("walker-{name}");
        let label = thread_name.clone();
        let handle = thread::Builder::new()
            .name(thread_name)
            .spawn(move || {
                let mut emitted = 0usize;
                for (node, parent) in PreOrder::new(&tree) {
                    // Credit first, then exactly one emission.
                    if credit_rx.recv().is_err() {
                        debug!("{label}: orchestrator gone, stopping");
                        return;
                    }
                    if emission_tx.send(Emission { node, parent }).is_err() {
                        debug!("{label}: orchestrator gone, stopping");
                        return;
                    }
                    emitted += 1;
                    trace!("{label}: emitted node {emitted}");
                }
                debug!("{label}: traversal exhausted after {emitted} nodes");
                // Channel ends drop here; the disconnect is the end marker.
            })
            .expect("failed to spawn walker thread");

        Self {
            credit_tx: Some(credit_tx),
            emission_rx: Some(emission_rx),
            handle: Some(handle),
        }
    }

    /// Grants one credit and receives the next emission.
    ///
    /// Returns `None` once the traversal is exhausted. The disconnect may
    /// surface on either the credit send or the emission receive depending
    /// on where the worker was when it finished; both mean the same thing.
    pub fn next_emission(&self) -> Option<Emission> {
        let credit_tx = self.credit_tx.as_ref()?;
        let emission_rx = self.emission_rx.as_ref()?;
        if credit_tx.send(()).is_err() {
            return None;
        }
        emission_rx.recv().ok()
    }
}

impl Drop for TreeWalker {
    fn drop(&mut self) {
        // Disconnect first so a worker blocked on the credit channel wakes
        // up, then join it.
        self.credit_tx.take();
        self.emission_rx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
