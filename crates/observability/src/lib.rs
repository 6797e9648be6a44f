//! Process-wide logging setup for the catalog service.

/// Install the JSON log subscriber. Later calls are no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_DIRECTIVES);
}

pub mod tracing;
