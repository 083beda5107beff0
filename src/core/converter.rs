// Annotation ranges -> chart overlay lines

use crate::core::constants::*;
use crate::core::format::{
    AnnotationCategory, AnnotationOverlay, AnnotationOverlays, AnnotationRange, AnnotationResource,
    OverlayLabel,
};

/// Builds the overlay lines for every range of every recognized category.
///
/// Each range yields a start marker (`<category>1`) followed by an end
/// marker (`<category>2`). Categories the chart does not know are skipped.
pub fn to_overlays(resource: &AnnotationResource) -> AnnotationOverlays {
    let mut lines = Vec::with_capacity(resource.range_count() * 2);

    for (name, ranges) in resource.iter() {
        let Some(category) = AnnotationCategory::from_name(name) else {
            continue;
        };

        for range in ranges {
            lines.extend(overlays_for_range(category, range));
        }
    }

    AnnotationOverlays::from(lines)
}

fn overlays_for_range(category: AnnotationCategory, range: &AnnotationRange) -> [AnnotationOverlay; 2] {
    let (start_color, end_color) = category.colors();
    [
        marker(format!("{}1", category), range.start, start_color),
        marker(format!("{}2", category), range.end, end_color),
    ]
}

fn marker(name: String, position: f64, color: &str) -> AnnotationOverlay {
    let x = position * SAMPLE_RATE_HZ;
    AnnotationOverlay {
        kind: "line".to_string(),
        x_min: x,
        x_max: x,
        border_dash: OVERLAY_BORDER_DASH.to_vec(),
        border_dash_offset: OVERLAY_BORDER_DASH_OFFSET,
        label: OverlayLabel {
            display: true,
            content: name,
            position: OVERLAY_LABEL_POSITION.to_string(),
        },
        border_color: color.to_string(),
        border_width: OVERLAY_BORDER_WIDTH,
    }
}
