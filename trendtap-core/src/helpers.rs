use chrono::{DateTime, Utc};

/// Start of the trailing window that ends at `now`. Saturates at the
/// earliest representable instant when the window exceeds chrono's range.
pub fn window_start(now: DateTime<Utc>, window: std::time::Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
