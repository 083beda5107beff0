use std::future::Future;

use crate::core::error::Result;
use crate::core::format::{AnnotationResource, SignalsPayload, UpdateResponse};

/// Where the store gets its recordings from.
pub trait DataSource {
    fn fetch_signals(&self, file_key: &str) -> impl Future<Output = Result<SignalsPayload>> + Send;

    fn fetch_annotations(
        &self,
        file_key: &str,
    ) -> impl Future<Output = Result<AnnotationResource>> + Send;

    fn update_annotations(
        &self,
        file_key: &str,
        annotations: &AnnotationResource,
    ) -> impl Future<Output = Result<UpdateResponse>> + Send;
}
