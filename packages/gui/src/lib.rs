//! Retained-mode GUI element core.
//!
//! An element is a rectangle in its owner's integer coordinate space plus
//! three independent state flags and an optional link to the next element
//! in the keyboard focus chain. Everything else, rendering, layout, and
//! routing of input events to elements, lives above this crate.
//!
//! Everything here is synchronous and single-threaded. Nothing locks, so a
//! host that shares elements across threads wraps them in its own
//! synchronization.

#[macro_use]
extern crate tracing;

pub mod event;
pub mod element;
pub mod set;
pub mod button;
pub mod panel;

pub use crate::{
    event::{
        MouseButton,
        KeyCode,
    },
    element::{
        ElementCommon,
        GuiElement,
        AsElement,
    },
    set::{
        ElementId,
        ElementSet,
    },
    button::Button,
    panel::Panel,
};
