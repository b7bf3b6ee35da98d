pub mod donut;
pub mod model;
pub mod renderer;
pub mod spec;
#[cfg(test)]
pub(crate) mod testing;

pub use donut::{CanvasBackend, CanvasSurface};
pub use model::InteractionConfig;
pub use renderer::{ChartBackend, ChartRenderer, SurfaceId, SurfaceSlots};
pub use spec::build_chart_spec;
