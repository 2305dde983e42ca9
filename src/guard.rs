/// The contract shared by [`Fate`](crate::Fate) and [`FnFate`](crate::FnFate).
///
/// A guard holds at most one pending call. Every method takes `&self`, so a
/// callable that keeps a handle to its own guard may trigger or release it
/// while it is running. Those nested calls see an empty guard and do nothing.
pub trait Guard {
    /// Runs the pending call, if any, and leaves the guard empty.
    ///
    /// The guard is marked empty before the call starts. Panics from the call
    /// are caught and discarded.
    fn trigger(&self);

    /// Drops the pending call, if any, without running it. A panic from the
    /// callable's destructor is caught and discarded.
    fn release(&self);

    fn is_occupied(&self) -> bool;

    fn is_empty(&self) -> bool {
        !self.is_occupied()
    }
}
