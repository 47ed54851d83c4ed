pub mod view_pipeline;

pub use view_pipeline::{classify_rows, LayoutEngine, LayoutRequest, RowTag, WrappingLayout};
