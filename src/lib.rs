// EEG chart store
// Loads signals and annotations for a recording and shapes them for the chart view

pub mod client;
pub mod core;
pub mod routes;
pub mod state;

// Re-export main types
pub use client::config::ClientConfig;
pub use client::http_source::HttpSource;
pub use client::source::DataSource;
pub use crate::core::converter::to_overlays;
pub use crate::core::error::{Result, StoreError};
pub use crate::core::format::{
    AnnotationCategory, AnnotationOverlay, AnnotationOverlays, AnnotationRange, AnnotationResource,
    SignalsPayload,
};
pub use state::app_state::{AppStore, ChartData, SharedStore};
