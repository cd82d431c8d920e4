/// Rendering layer: one renderer per panel plus the shared styling every
/// chart panel is passed through.
pub mod panels;
pub mod style;
