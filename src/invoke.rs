use std::panic::{self, AssertUnwindSafe};

/// Anything that can be called once with no arguments. Whatever it returns is
/// thrown away.
pub trait Invoke {
    fn invoke(self);
}

impl<F, R> Invoke for F
where
    F: FnOnce() -> R,
{
    fn invoke(self) {
        let _ = self();
    }
}

/// Runs `f`, discarding its result and any panic it raises. Consuming `f`
/// also drops it, so this is the last thing that happens to a callable.
pub(crate) fn invoke_discarding<F: Invoke>(f: F) {
    if panic::catch_unwind(AssertUnwindSafe(|| f.invoke())).is_err() {
        tracing::warn!("deferred call panicked, discarding");
    }
}

/// Drops `f` without calling it, discarding any panic from its destructor.
pub(crate) fn drop_discarding<F>(f: F) {
    if panic::catch_unwind(AssertUnwindSafe(|| drop(f))).is_err() {
        tracing::warn!("deferred call panicked while being dropped, discarding");
    }
}
