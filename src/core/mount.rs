use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::error::StageError;

type Cleanup = Box<dyn FnOnce()>;

#[derive(Default)]
struct TicketState {
    cancelled: Cell<bool>,
    finished: Cell<bool>,
    cleanups: RefCell<Vec<Cleanup>>,
}

/// One mount attempt. Loads register cleanups on it; cancelling runs them
/// right away so partial assets are gone before anything else starts.
#[derive(Clone, Default)]
pub struct MountTicket {
    state: Rc<TicketState>,
}

impl MountTicket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Err(Superseded) once cancelled.
    pub fn check(&self) -> Result<(), StageError> {
        if self.is_cancelled() {
            Err(StageError::Superseded)
        } else {
            Ok(())
        }
    }

    /// Run `f` on cancel. Runs it immediately if already cancelled; dropped
    /// unrun once the mount finished.
    pub fn on_cancel(&self, f: impl FnOnce() + 'static) {
        if self.is_cancelled() {
            f();
        } else if !self.state.finished.get() {
            self.state.cleanups.borrow_mut().push(Box::new(f));
        }
    }

    /// Idempotent. Cleanups run in registration order.
    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) || self.state.finished.get() {
            return;
        }
        let cleanups = std::mem::take(&mut *self.state.cleanups.borrow_mut());
        for f in cleanups {
            f();
        }
    }

    /// The mount handed its resources to an owner; later cancels do nothing.
    fn finish(&self) {
        self.state.finished.set(true);
        self.state.cleanups.borrow_mut().clear();
    }

    fn same(&self, other: &MountTicket) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// At most one mount in flight. Beginning a new one cancels the previous
/// attempt first.
#[derive(Default)]
pub struct MountSlot {
    in_flight: Option<MountTicket>,
}

impl MountSlot {
    pub fn begin(&mut self) -> MountTicket {
        if let Some(old) = self.in_flight.take() {
            old.cancel();
        }
        let ticket = MountTicket::new();
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Close out `ticket`. False when it was superseded meanwhile, in which
    /// case whatever it produced must be torn down by the caller.
    pub fn finish(&mut self, ticket: &MountTicket) -> bool {
        if self.in_flight.as_ref().is_some_and(|t| t.same(ticket)) {
            self.in_flight = None;
        }
        if ticket.is_cancelled() {
            return false;
        }
        ticket.finish();
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}
