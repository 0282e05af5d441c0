//! One request at a time per action site.
//!
//! A control that starts a request takes an [`ActionTicket`] from its
//! [`InFlight`] slot. While the ticket is alive the slot reports busy and a
//! second start is refused. Dropping the ticket frees the slot on every
//! path, success or error.

use std::sync::Arc;

use parking_lot::Mutex;

/// A single action site, e.g. "save profile" or "search".
#[derive(Debug, Clone)]
pub struct InFlight {
    busy_label: &'static str,
    active: Arc<Mutex<bool>>,
}

impl InFlight {
    /// A free slot whose busy control reads `busy_label` (e.g. "Saving...").
    pub fn new(busy_label: &'static str) -> Self {
        Self {
            busy_label,
            active: Arc::new(Mutex::new(false)),
        }
    }

    /// Take the slot, or `None` if a request is already outstanding.
    pub fn try_begin(&self) -> Option<ActionTicket> {
        let mut active = self.active.lock();
        if *active {
            return None;
        }
        *active = true;
        Some(ActionTicket {
            active: Arc::clone(&self.active),
        })
    }

    /// Whether a request is outstanding.
    pub fn is_busy(&self) -> bool {
        *self.active.lock()
    }

    /// Label for the control while busy.
    pub fn busy_label(&self) -> &'static str {
        self.busy_label
    }
}

/// Proof that the holder owns its action slot.
#[derive(Debug)]
pub struct ActionTicket {
    active: Arc<Mutex<bool>>,
}

impl Drop for ActionTicket {
    fn drop(&mut self) {
        *self.active.lock() = false;
    }
}
