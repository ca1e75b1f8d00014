use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrEngine;
use crate::services::ScanService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: ScanService,
}

impl AppState {
    pub fn new(config: Config, engine: Arc<dyn OcrEngine>) -> Self {
        let scanner = ScanService::new(engine, config.ocr.temp_dir.clone());

        Self {
            config: Arc::new(config),
            scanner,
        }
    }
}
