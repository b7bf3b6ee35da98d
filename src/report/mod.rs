pub mod cache;
pub mod host;
pub mod model;
pub mod state;
pub mod storage;

pub use cache::ReportCache;
pub use host::{ActionDispatcher, ReportHost, RenderTicket, WindowAction, RENDER_DELAY};
pub use model::{ReportContext, ReportType};
pub use state::epoch_millis;
pub use storage::{FileStorage, MemoryStorage};
