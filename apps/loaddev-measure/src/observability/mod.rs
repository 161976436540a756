//! Observability: structured logging.

mod logging;

pub use logging::{LoggingError, build_filter, init_logging};
