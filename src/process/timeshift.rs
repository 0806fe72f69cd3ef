use chrono::{Duration, Timelike};
use tracing::warn;

use crate::process::frame::Frame;

/// The portal renders a delivery day one hour early: the first slot shows
/// up at 23:00 instead of midnight. Realign the whole day (hour 23 back to
/// midnight, every other hour forward one) and drop the boundary row the
/// shift duplicates. Apply once per daily frame; a second pass would shift
/// a clean day off again.
pub fn fix_timeshift(mut frame: Frame) -> Frame {
    if let Some(first) = frame.rows.first() {
        if first.date.hour() == 23 {
            warn!(first = %first.date, "first slot rendered at 23:00, realigning day");
        }
    }

    for row in &mut frame.rows {
        row.date = if row.date.hour() == 23 {
            row.date - Duration::hours(23)
        } else {
            row.date + Duration::hours(1)
        };
    }

    let drop_last = match (frame.rows.first(), frame.rows.last()) {
        (Some(first), Some(last)) => first.date == last.date || last.date.hour() != 23,
        _ => false,
    };
    if drop_last {
        if let Some(row) = frame.rows.pop() {
            warn!(dropped = %row.date, "dropping duplicate boundary row");
        }
    }

    frame
}
