use std::sync::Arc;

use crate::{
    config::Config,
    services::generation_service::{GeminiGenerator, QuizGenerator},
};

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn QuizGenerator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let generator = Arc::new(GeminiGenerator::new(Arc::clone(&config)));

        Self { generator, config }
    }

    /// Wires an alternative generator, used by handler tests to avoid the
    /// live upstream.
    pub fn with_generator(config: Arc<Config>, generator: Arc<dyn QuizGenerator>) -> Self {
        Self { generator, config }
    }
}
