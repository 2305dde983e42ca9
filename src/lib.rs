//! Guards that run a callable exactly once, at the latest when they go out of
//! scope.
//!
//! ```
//! use fate::{Guard as _, make_fate};
//! use std::cell::Cell;
//!
//! let unlocked = Cell::new(false);
//! {
//!     let _unlocker = make_fate(|| unlocked.set(true));
//! }
//! assert!(unlocked.get());
//!
//! let fate = make_fate(|| unreachable!());
//! fate.release();
//! ```

mod fate;
mod fn_fate;
mod guard;
mod invoke;

pub use crate::{fate::Fate, fn_fate::FnFate, guard::Guard, invoke::Invoke};

/// Binds `f` to a new [`Fate`], inferring its type.
#[must_use]
pub fn make_fate<F: Invoke>(f: F) -> Fate<F> {
    Fate::new(f)
}

/// Runs the given statements when the enclosing scope ends.
///
/// ```
/// use std::cell::Cell;
///
/// let count = Cell::new(0);
/// {
///     fate::defer! { count.set(count.get() + 1) }
///     assert_eq!(count.get(), 0);
/// }
/// assert_eq!(count.get(), 1);
/// ```
#[macro_export]
macro_rules! defer {
    ($($body:tt)*) => {
        let _fate = $crate::make_fate(|| {
            $($body)*
        });
    };
}
