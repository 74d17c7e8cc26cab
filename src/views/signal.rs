//! Change notification between the add-member flow and the member table.

use std::cell::{Cell, RefCell};
use std::fmt;

use serde::Serialize;

/// Monotonic counter of store mutations seen by a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DataVersion(u64);

impl DataVersion {
    pub const INITIAL: Self = Self(0);

    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

type Listener = Box<dyn Fn(DataVersion)>;

/// Single-threaded observer. Listeners must not subscribe while being notified.
#[derive(Default)]
pub struct ChangeSignal {
    version: Cell<DataVersion>,
    listeners: RefCell<Vec<Listener>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> DataVersion {
        self.version.get()
    }

    pub fn on_changed(&self, listener: impl Fn(DataVersion) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Advances the version and notifies every listener with the new value.
    pub fn bump(&self) -> DataVersion {
        let next = self.version.get().next();
        self.version.set(next);
        for listener in self.listeners.borrow().iter() {
            listener(next);
        }
        next
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("version", &self.version.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
