//! Settlement of the device stylesheet.
//!
//! Three sources can report: the link's `load` event, its `error` event, and
//! a direct check for a sheet the browser applied before anyone listened.
//! All of them go through one [`OnceGate`], so the loader sees exactly one
//! outcome whichever fires first, or several at once.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::debug;

use crate::readiness::{AssetOutcome, OnceGate};

/// A stylesheet link, as far as settlement cares.
pub trait StylesheetLink {
    /// Whether the sheet has already been parsed and applied.
    fn is_applied(&self) -> bool;
}

/// Reporting half; cheap to clone into each event listener.
#[derive(Clone)]
pub struct StylesheetReporter {
    gate: OnceGate,
    sender: Rc<RefCell<Option<oneshot::Sender<AssetOutcome>>>>,
}

impl StylesheetReporter {
    /// Returns whether this call decided the outcome.
    pub fn report(&self, outcome: AssetOutcome) -> bool {
        self.gate.run_once(|| {
            if let Some(sender) = self.sender.borrow_mut().take() {
                let _ = sender.send(outcome);
            }
        })
    }

    /// The direct readiness check. Safe to call from a poll and from event
    /// handlers alike.
    pub fn check_applied<L: StylesheetLink + ?Sized>(&self, link: &L) -> bool {
        if !link.is_applied() {
            return false;
        }
        debug!("stylesheet already applied");
        self.report(AssetOutcome::Loaded)
    }
}

/// Creates a reporter and the future that resolves with the first outcome
/// reported. If every reporter is dropped without reporting, the future
/// resolves as failed rather than hanging.
pub fn stylesheet_settlement() -> (StylesheetReporter, LocalBoxFuture<'static, AssetOutcome>) {
    let (sender, receiver) = oneshot::channel();
    let reporter = StylesheetReporter {
        gate: OnceGate::new(),
        sender: Rc::new(RefCell::new(Some(sender))),
    };
    let settled = async move { receiver.await.unwrap_or(AssetOutcome::Failed) }.boxed_local();
    (reporter, settled)
}
