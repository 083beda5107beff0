use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::client::source::DataSource;
use crate::core::constants::{LEFT_FORCE_OFFSET, RIGHT_FORCE_OFFSET};
use crate::core::converter::to_overlays;
use crate::core::error::Result;
use crate::core::format::{AnnotationOverlays, AnnotationResource, UpdateResponse};

/// Everything the chart view reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    /// Shared x axis, `0..len(frl)`.
    pub labels: Vec<usize>,
    /// Left force, shifted by +6.
    pub frl: Vec<f64>,
    /// Right force, shifted by +3.
    pub frr: Vec<f64>,
    /// Occlusion, as received.
    pub ocr: Vec<f64>,
    pub channel_names: Vec<String>,
    pub annotations: AnnotationResource,
}

/// A store behind a lock, for views that share one instance. Loads through
/// the write guard run one at a time and the last one wins.
pub type SharedStore<S> = Arc<RwLock<AppStore<S>>>;

pub struct AppStore<S> {
    source: S,
    data: ChartData,
}

impl<S: DataSource> AppStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            data: ChartData::default(),
        }
    }

    pub fn into_shared(self) -> SharedStore<S> {
        Arc::new(RwLock::new(self))
    }

    /// Fetches signals and annotations for `file_key` and replaces the whole
    /// chart state. On any error the previous state is left as it was.
    pub async fn load(&mut self, file_key: &str) -> Result<()> {
        info!("Loading recording {}", file_key);

        let (signals, annotations) = tokio::try_join!(
            self.source.fetch_signals(file_key),
            self.source.fetch_annotations(file_key),
        )?;

        let channel_names = signals.labels.clone();
        let [left, right, occlusion] = signals.into_channels()?;

        for (name, ranges) in annotations.iter() {
            for range in ranges.iter().filter(|r| r.is_inverted()) {
                warn!(
                    "Annotation {} in {} ends before it starts ({} > {})",
                    name, file_key, range.start, range.end
                );
            }
        }

        self.data = ChartData {
            labels: (0..left.len()).collect(),
            frl: left.iter().map(|s| s + LEFT_FORCE_OFFSET).collect(),
            frr: right.iter().map(|s| s + RIGHT_FORCE_OFFSET).collect(),
            ocr: occlusion,
            channel_names,
            annotations,
        };

        info!(
            "Recording {} loaded: {} samples, {} annotations",
            file_key,
            self.data.labels.len(),
            self.data.annotations.range_count()
        );
        Ok(())
    }

    /// Posts the current annotations back to the backend.
    pub async fn save_annotations(&self, file_key: &str) -> Result<UpdateResponse> {
        info!("Saving annotations for {}", file_key);
        let response = self
            .source
            .update_annotations(file_key, &self.data.annotations)
            .await?;
        info!("Annotations saved for {}: {}", file_key, response.message);
        Ok(response)
    }

    pub fn overlays(&self) -> AnnotationOverlays {
        to_overlays(&self.data.annotations)
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn labels(&self) -> &[usize] {
        &self.data.labels
    }

    pub fn left_force(&self) -> &[f64] {
        &self.data.frl
    }

    pub fn right_force(&self) -> &[f64] {
        &self.data.frr
    }

    pub fn occlusion(&self) -> &[f64] {
        &self.data.ocr
    }

    pub fn channel_names(&self) -> &[String] {
        &self.data.channel_names
    }

    pub fn annotations(&self) -> &AnnotationResource {
        &self.data.annotations
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StoreError;
    use crate::core::format::{AnnotationRange, SignalsPayload};
    use crate::core::mock::mock_annotations;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSource {
        signals: Option<SignalsPayload>,
        annotations: Option<AnnotationResource>,
        saved: Mutex<Vec<(String, AnnotationResource)>>,
    }

    impl DataSource for FakeSource {
        async fn fetch_signals(&self, _file_key: &str) -> Result<SignalsPayload> {
            self.signals
                .clone()
                .ok_or_else(|| StoreError::Payload("signals unavailable".to_string()))
        }

        async fn fetch_annotations(&self, _file_key: &str) -> Result<AnnotationResource> {
            self.annotations
                .clone()
                .ok_or_else(|| StoreError::Payload("annotations unavailable".to_string()))
        }

        async fn update_annotations(
            &self,
            file_key: &str,
            annotations: &AnnotationResource,
        ) -> Result<UpdateResponse> {
            self.saved
                .lock()
                .unwrap()
                .push((file_key.to_string(), annotations.clone()));
            Ok(UpdateResponse {
                message: "ok".to_string(),
            })
        }
    }

    fn payload(channels: &[(&str, Vec<f64>)]) -> SignalsPayload {
        SignalsPayload {
            signals: channels
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
            labels: vec![],
        }
    }

    fn sample_source() -> FakeSource {
        FakeSource {
            signals: Some(payload(&[
                ("0", vec![1.0, 2.0]),
                ("1", vec![3.0, 4.0]),
                ("2", vec![5.0, 6.0]),
            ])),
            annotations: Some(mock_annotations()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = AppStore::new(FakeSource::default());

        assert_eq!(store.data(), &ChartData::default());
        assert!(store.overlays().is_empty());
    }

    #[tokio::test]
    async fn test_load_applies_offsets_and_labels() {
        let mut store = AppStore::new(sample_source());
        store.load("abc").await.unwrap();

        assert_eq!(store.left_force(), &[7.0, 8.0]);
        assert_eq!(store.right_force(), &[6.0, 7.0]);
        assert_eq!(store.occlusion(), &[5.0, 6.0]);
        assert_eq!(store.labels(), &[0, 1]);
        assert_eq!(store.annotations(), &mock_annotations());
        assert_eq!(store.overlays().len(), 8);
    }

    #[tokio::test]
    async fn test_labels_follow_left_channel_length() {
        let mut source = sample_source();
        source.signals = Some(payload(&[
            ("0", vec![0.0; 5]),
            ("1", vec![0.0; 3]),
            ("2", vec![]),
        ]));
        let mut store = AppStore::new(source);
        store.load("abc").await.unwrap();

        assert_eq!(store.labels(), &[0, 1, 2, 3, 4]);
        assert_eq!(store.right_force().len(), 3);
    }

    #[tokio::test]
    async fn test_load_twice_is_idempotent() {
        let mut store = AppStore::new(sample_source());
        store.load("abc").await.unwrap();
        let first = store.data().clone();
        store.load("abc").await.unwrap();

        assert_eq!(store.data(), &first);
    }

    #[tokio::test]
    async fn test_failed_signals_keep_previous_state() {
        let mut store = AppStore::new(sample_source());
        store.load("abc").await.unwrap();
        let before = store.data().clone();

        store.source.signals = None;
        store.source.annotations = Some(AnnotationResource::new());
        let result = store.load("abc").await;

        assert!(matches!(result, Err(StoreError::Payload(_))));
        assert_eq!(store.data(), &before);
    }

    #[tokio::test]
    async fn test_failed_annotations_keep_previous_state() {
        let mut store = AppStore::new(sample_source());
        store.source.annotations = None;

        assert!(store.load("abc").await.is_err());
        assert_eq!(store.data(), &ChartData::default());
    }

    #[tokio::test]
    async fn test_missing_channel_rejected() {
        let mut source = sample_source();
        source.signals = Some(payload(&[("0", vec![1.0]), ("1", vec![2.0])]));
        let mut store = AppStore::new(source);

        let result = store.load("abc").await;

        assert!(matches!(result, Err(StoreError::MissingChannel(2))));
        assert!(store.labels().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_ranges_are_kept() {
        let mut annotations = AnnotationResource::new();
        annotations.insert("is", vec![AnnotationRange::new(10.0, 2.0)]);
        let mut source = sample_source();
        source.annotations = Some(annotations.clone());

        let mut store = AppStore::new(source);
        store.load("abc").await.unwrap();

        assert_eq!(store.annotations(), &annotations);
        assert_eq!(store.overlays().len(), 2);
    }

    #[tokio::test]
    async fn test_save_posts_current_annotations() {
        let mut store = AppStore::new(sample_source());
        store.load("abc").await.unwrap();

        let response = store.save_annotations("abc").await.unwrap();

        assert_eq!(response.message, "ok");
        let saved = store.source().saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "abc");
        assert_eq!(saved[0].1, mock_annotations());
    }

    #[tokio::test]
    async fn test_shared_store_serializes_loads() {
        let shared = AppStore::new(sample_source()).into_shared();

        shared.write().await.load("abc").await.unwrap();

        let store = shared.read().await;
        assert_eq!(store.labels(), &[0, 1]);
    }
}
