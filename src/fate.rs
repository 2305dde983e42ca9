use crate::{
    guard::Guard,
    invoke::{Invoke, drop_discarding, invoke_discarding},
};
use std::{cell::Cell, fmt, ptr};

/// Runs a callable exactly once: when [`trigger`](Guard::trigger)ed, or when
/// dropped if nobody triggered or released it first.
///
/// The callable lives inline; `Fate<F>` is the size of `Option<F>`. Moving a
/// `Fate` can't fail, so there is no weaker guarantee to fall back on when
/// handing the callable to another guard: [`transfer`](Fate::transfer) and
/// [`assign_from`](Fate::assign_from) always leave the source empty and the
/// destination holding the callable.
pub struct Fate<F: Invoke> {
    slot: Cell<Option<F>>,
}

impl<F: Invoke> Fate<F> {
    /// A fate with nothing to run. `F` is never constructed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slot: Cell::new(None),
        }
    }

    #[must_use]
    pub const fn new(f: F) -> Self {
        Self {
            slot: Cell::new(Some(f)),
        }
    }

    /// Builds the callable from `value`.
    ///
    /// # Errors
    ///
    /// Returns the conversion error if `F` can't be built from `value`. No
    /// fate is created in that case.
    pub fn try_new<J>(value: J) -> Result<Self, <F as TryFrom<J>>::Error>
    where
        F: TryFrom<J>,
    {
        F::try_from(value).map(Self::new)
    }

    /// Moves the callable into a new fate, leaving `self` empty.
    #[must_use]
    pub fn transfer(&self) -> Self {
        Self {
            slot: Cell::new(self.slot.take()),
        }
    }

    /// Triggers `self`, then takes over the callable held by `other`.
    /// Assigning a fate from itself does nothing.
    ///
    /// A callable that binds a new one into `self` while it runs gets that
    /// one triggered too, until `self` stays empty.
    pub fn assign_from(&self, other: &Self) {
        if ptr::eq(self, other) {
            return;
        }
        while self.is_occupied() {
            self.trigger();
        }
        self.slot.set(other.slot.take());
    }

    /// Triggers `self`, then binds `f`.
    pub fn replace(&self, f: F) {
        self.assign_from(&Self::new(f));
    }

    /// Hands the callable back without running it.
    #[must_use]
    pub fn into_inner(self) -> Option<F> {
        self.slot.take()
    }
}

impl<F: Invoke> Guard for Fate<F> {
    fn trigger(&self) {
        // Empty before the call, so a re-entrant trigger finds nothing to run.
        if let Some(f) = self.slot.take() {
            tracing::trace!("triggering fate");
            invoke_discarding(f);
        }
    }

    fn release(&self) {
        if let Some(f) = self.slot.take() {
            tracing::trace!("releasing fate");
            drop_discarding(f);
        }
    }

    fn is_occupied(&self) -> bool {
        let f = self.slot.take();
        let occupied = f.is_some();
        self.slot.set(f);
        occupied
    }
}

impl<F: Invoke> Drop for Fate<F> {
    fn drop(&mut self) {
        self.trigger();
    }
}

impl<F: Invoke> Default for Fate<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Invoke> From<F> for Fate<F> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<F: Invoke> fmt::Debug for Fate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fate")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}
