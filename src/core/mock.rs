// Fixture data for development and tests

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::core::format::{AnnotationRange, AnnotationResource, SignalsPayload};

pub const MOCK_CHANNEL_NAMES: [&str; 3] = ["FrL", "FrR", "OcR"];

pub fn mock_annotations() -> AnnotationResource {
    let mut resource = AnnotationResource::new();
    resource.insert(
        "swd",
        vec![
            AnnotationRange::new(123.0, 355.0),
            AnnotationRange::new(523.0, 555.0),
        ],
    );
    resource.insert("ds", vec![AnnotationRange::new(423.0, 455.0)]);
    resource.insert("is", vec![AnnotationRange::new(623.0, 655.0)]);
    resource
}

/// Three channels of noise in `[0, 4)`, reproducible for a given seed.
pub fn mock_signals(sample_count: usize, seed: u64) -> SignalsPayload {
    let mut rng = StdRng::seed_from_u64(seed);

    let signals: HashMap<String, Vec<f64>> = (0..MOCK_CHANNEL_NAMES.len())
        .map(|channel| {
            let values = (0..sample_count).map(|_| rng.gen_range(0.0..4.0)).collect();
            (channel.to_string(), values)
        })
        .collect();

    SignalsPayload {
        signals,
        labels: MOCK_CHANNEL_NAMES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_annotations_shape() {
        let resource = mock_annotations();

        assert_eq!(resource.get("swd").map(|r| r.len()), Some(2));
        assert_eq!(resource.get("ds").map(|r| r.len()), Some(1));
        assert_eq!(resource.get("is").map(|r| r.len()), Some(1));
        assert!(resource.iter().flat_map(|(_, r)| r).all(|r| !r.is_inverted()));
    }

    #[test]
    fn test_mock_signals_deterministic() {
        let a = mock_signals(32, 7);
        let b = mock_signals(32, 7);

        for channel in 0..3 {
            let values = a.channel(channel).unwrap();
            assert_eq!(values.len(), 32);
            assert_eq!(values, b.channel(channel).unwrap());
            assert!(values.iter().all(|v| (0.0..4.0).contains(v)));
        }
        assert_eq!(a.labels, vec!["FrL", "FrR", "OcR"]);
    }
}
