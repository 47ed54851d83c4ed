//! Rendering of editor panels onto a surface

pub mod gutter;
pub mod split_rendering;

pub use gutter::GutterLayout;
pub use split_rendering::{PanelRenderInput, PanelRenderOutput, SplitRenderer};
