use extraction::Extractor;

/// Shared application state
///
/// Built once at startup. The extractor holds the only model client, so every
/// request reuses the same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Extractor,
}

impl AppState {
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor }
    }
}
