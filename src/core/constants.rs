// Constants shared by the store, the converter and the mock server

/// Recording sample rate. Annotation positions arrive in seconds and are
/// drawn at sample index, so this is also the overlay scale factor.
pub const SAMPLE_RATE_HZ: f64 = 400.0;

// Channel slots in the signals payload
pub const LEFT_FORCE_CHANNEL: usize = 0;
pub const RIGHT_FORCE_CHANNEL: usize = 1;
pub const OCCLUSION_CHANNEL: usize = 2;

// Display offsets applied on load so the traces do not overlap
pub const LEFT_FORCE_OFFSET: f64 = 6.0;
pub const RIGHT_FORCE_OFFSET: f64 = 3.0;

// Overlay line styling
pub const OVERLAY_BORDER_DASH: [u32; 1] = [12];
pub const OVERLAY_BORDER_DASH_OFFSET: u32 = 4;
pub const OVERLAY_BORDER_WIDTH: u32 = 2;
pub const OVERLAY_LABEL_POSITION: &str = "start";

// Endpoint path segments, the file key is appended as one more segment
pub const SIGNALS_SEGMENT: &str = "get-signals";
pub const ANNOTATIONS_SEGMENT: &str = "get-annotations";
pub const UPDATE_ANNOTATIONS_SEGMENT: &str = "update-annotations";

// The analysis backend never serves more than 30 minutes per channel
pub const MAX_SERVED_SAMPLES: usize = 30 * 60 * 400;
