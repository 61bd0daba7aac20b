//! Types which may exist transiently to convey GUI events.


/// Mouse button identity as delivered to element event hooks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Additional button, by hardware number.
    Other(u16),
}

/// Key identity as delivered to element event hooks. Raw numeric code in
/// whatever keyboard namespace the host's input layer uses.
pub type KeyCode = u32;
