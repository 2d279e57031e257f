//! Host rendering-surface substrate.
//!
//! Element builder trees are mounted into a [`Document`] arena and addressed
//! by [`NodeId`] handles. Style rules live in a [`StyleSheet`] that is pushed
//! to a [`Surface`] as a whole. [`MemorySurface`] is a deterministic surface
//! that measures text with `unicode-width`.

pub mod document;
pub mod element;
pub mod event;
pub mod listener;
pub mod markup;
pub mod selector;
pub mod surface;
pub mod types;

pub use document::{Document, Node, NodeContent, NodeId};
pub use element::{Content, Element};
pub use event::{Event, Modifiers, PointerButton};
pub use listener::{ListenerGuard, ListenerKind, Listeners};
pub use selector::Selector;
pub use surface::{MemorySurface, ScrollOffset, Surface, TextMetrics};
pub use types::*;
