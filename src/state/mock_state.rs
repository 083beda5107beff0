use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::format::{AnnotationResource, SignalsPayload};
use crate::core::mock::{mock_annotations, mock_signals};

#[derive(Clone)]
pub struct MockRecording {
    pub signals: SignalsPayload,
    pub annotations: AnnotationResource,
}

/// Recordings served by the development server, keyed by file key.
#[derive(Clone)]
pub struct MockState {
    pub recordings: Arc<RwLock<HashMap<String, MockRecording>>>,
}

impl MockState {
    pub fn new() -> Self {
        Self {
            recordings: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// One recording per key, each with its own noise seed and the fixture
    /// annotations.
    pub fn seeded(file_keys: &[String], sample_count: usize, seed: u64) -> Self {
        let recordings = file_keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let recording = MockRecording {
                    signals: mock_signals(sample_count, seed.wrapping_add(i as u64)),
                    annotations: mock_annotations(),
                };
                (key.clone(), recording)
            })
            .collect();

        Self {
            recordings: Arc::new(RwLock::new(recordings)),
        }
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}
