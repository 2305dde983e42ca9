use anyhow::{bail, ensure};
use std::cell::Cell;

/// Stand-in for something behind a lock: it must be locked before it is
/// mutated, and unlocked afterwards.
#[derive(Default)]
pub struct Resource {
    locked: Cell<bool>,
    mutations: Cell<u32>,
}

impl Resource {
    pub fn lock(&self) -> anyhow::Result<()> {
        if self.locked.get() {
            bail!("resource is already locked");
        }
        self.locked.set(true);
        Ok(())
    }

    pub fn unlock(&self) {
        self.locked.set(false);
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    #[must_use]
    pub fn mutations(&self) -> u32 {
        self.mutations.get()
    }

    pub fn mutate_something(&self) -> anyhow::Result<()> {
        ensure!(self.locked.get(), "resource must be locked before mutating");
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }
}
