//! Scoped listener registrations.
//!
//! A drag acquires document-wide move/up listeners for its lifetime. The
//! registration is a guard: dropping it releases the listener, so a drag
//! that ends abnormally never leaks one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

type Registry = RefCell<HashMap<ListenerKind, usize>>;

/// Shared registry of active listeners for one owner.
#[derive(Debug, Clone, Default)]
pub struct Listeners {
    inner: Rc<Registry>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, kind: ListenerKind) -> ListenerGuard {
        *self.inner.borrow_mut().entry(kind).or_insert(0) += 1;
        log::trace!("[listener] acquired {kind:?}");
        ListenerGuard {
            kind,
            registry: Rc::downgrade(&self.inner),
        }
    }

    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.inner.borrow().get(&kind).is_some_and(|n| *n > 0)
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().values().sum()
    }
}

/// Releases its listener registration on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    kind: ListenerKind,
    registry: Weak<Registry>,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && let Some(count) = registry.borrow_mut().get_mut(&self.kind)
        {
            *count = count.saturating_sub(1);
            log::trace!("[listener] released {:?}", self.kind);
        }
    }
}
