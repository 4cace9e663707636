//! Progress events module.
//!
//! Provides progress event types and the sink trait the report pipeline emits
//! through. Runtime adapters (desktop/web front-ends) implement the sink to
//! translate pipeline progress into platform-specific feedback; the engine
//! itself never writes to stdout.

mod progress_event;
mod sink;

pub use progress_event::*;
pub use sink::*;
