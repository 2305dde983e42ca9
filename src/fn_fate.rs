use crate::{guard::Guard, invoke::invoke_discarding};
use std::{cell::Cell, fmt, ptr};

/// [`Fate`](crate::Fate) for a plain function pointer. No captured state, so
/// the whole guard is one nullable pointer.
pub struct FnFate<R = ()> {
    func: Cell<Option<fn() -> R>>,
}

impl<R> FnFate<R> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            func: Cell::new(None),
        }
    }

    #[must_use]
    pub const fn new(func: fn() -> R) -> Self {
        Self {
            func: Cell::new(Some(func)),
        }
    }

    #[must_use]
    pub fn transfer(&self) -> Self {
        Self {
            func: Cell::new(self.func.take()),
        }
    }

    pub fn assign_from(&self, other: &Self) {
        if ptr::eq(self, other) {
            return;
        }
        while self.is_occupied() {
            self.trigger();
        }
        self.func.set(other.func.take());
    }

    pub fn replace(&self, func: fn() -> R) {
        self.assign_from(&Self::new(func));
    }

    #[must_use]
    pub fn into_inner(self) -> Option<fn() -> R> {
        self.func.take()
    }
}

impl<R> Guard for FnFate<R> {
    fn trigger(&self) {
        if let Some(func) = self.func.take() {
            tracing::trace!("triggering fn fate");
            invoke_discarding(func);
        }
    }

    fn release(&self) {
        if self.func.take().is_some() {
            tracing::trace!("releasing fn fate");
        }
    }

    fn is_occupied(&self) -> bool {
        self.func.get().is_some()
    }
}

impl<R> Drop for FnFate<R> {
    fn drop(&mut self) {
        self.trigger();
    }
}

impl<R> Default for FnFate<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<fn() -> R> for FnFate<R> {
    fn from(func: fn() -> R) -> Self {
        Self::new(func)
    }
}

impl<R> fmt::Debug for FnFate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFate")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}
