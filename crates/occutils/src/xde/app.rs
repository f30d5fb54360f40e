//! Process-wide document application

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Doc;
use crate::config::StepSettings;

/// Storage format name of documents created by [`App`]
pub const DOCUMENT_FORMAT: &str = "BinXCAF";

/// Creates documents and keeps count of them
#[derive(Debug, Default)]
pub struct App {
    documents: AtomicUsize,
}

impl App {
    /// The shared application
    pub fn instance() -> &'static App {
        static APP: OnceLock<App> = OnceLock::new();
        APP.get_or_init(App::default)
    }

    pub fn format(&self) -> &'static str {
        DOCUMENT_FORMAT
    }

    /// New empty document with default STEP settings
    pub fn new_document(&self) -> Doc {
        self.new_document_with(StepSettings::default())
    }

    pub fn new_document_with(&self, settings: StepSettings) -> Doc {
        let count = self.documents.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!("Creating {} document #{}", DOCUMENT_FORMAT, count);
        Doc::with_settings(settings)
    }

    /// Number of documents created so far
    pub fn document_count(&self) -> usize {
        self.documents.load(Ordering::Relaxed)
    }
}
