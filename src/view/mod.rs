//! View layer: panels, layout, surfaces and the message bar

pub mod messages;
pub mod panel;
pub mod surface;
pub mod ui;

pub use messages::{MessageSink, PresentationContext, StatusMessages};
pub use panel::{Panel, PanelId, PanelSettings};
pub use surface::{CellGrid, CellLog, FrameSurface, RenderedCell, Surface};
