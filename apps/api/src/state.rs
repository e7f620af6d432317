use crate::factlog::FactLogStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Append-only log of quality-defect fact records.
    pub quality_log: FactLogStore,
    /// Append-only log of safety-incident fact records.
    pub safety_log: FactLogStore,
}
