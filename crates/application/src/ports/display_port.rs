//! Display surface port

/// A designated region of the display surface (result panel, status panel)
///
/// The content handed over is a complete HTML fragment in which every piece
/// of backend- or user-sourced text is already escaped.
pub trait DisplayRegion: Send + Sync {
    /// Replace the region's entire content
    fn replace(&self, html: &str);
}
