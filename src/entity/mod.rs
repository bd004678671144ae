mod priority;
mod todo;

pub use priority::Priority;
pub use todo::TodoItem;
pub(crate) use todo::generate_id;

use chrono::{DateTime, Utc};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Seconds since the Unix epoch, fractional part included.
pub fn to_epoch_seconds(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / NANOS_PER_SEC
}

/// Inverse of [`to_epoch_seconds`]. Returns `None` for NaN, infinities and
/// values chrono cannot represent.
pub fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }

    let whole = secs.floor();
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }

    let mut whole_secs = whole as i64;
    let mut nanos = ((secs - whole) * NANOS_PER_SEC).round() as u32;
    if nanos >= 1_000_000_000 {
        whole_secs = whole_secs.checked_add(1)?;
        nanos = 0;
    }

    DateTime::<Utc>::from_timestamp(whole_secs, nanos)
}

/// Render epoch seconds with an explicit fractional part (`1234.0`).
pub fn format_epoch_seconds(secs: f64) -> String {
    // Debug keeps the trailing ".0" that Display drops for integral values
    format!("{:?}", secs)
}
