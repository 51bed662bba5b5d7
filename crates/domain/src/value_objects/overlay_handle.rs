//! Map overlay handle

use std::fmt;

/// Ownership token for one overlay (marker, line, route) attached to a map.
///
/// Neither `Clone` nor `Copy`: whoever holds the handle owns
/// the overlay, and detaching it consumes the handle.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    /// Wrap a surface-assigned overlay identifier
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Surface-assigned identifier
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}
