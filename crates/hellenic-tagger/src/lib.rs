pub mod export;
pub mod handlers;
pub mod logging;

pub use export::write_sentences;
pub use handlers::{ApiError, AppState, router};
pub use logging::init_tracing;
