//! User interface rendering.

mod theme;

pub use theme::{Theme, ThemeColors};
