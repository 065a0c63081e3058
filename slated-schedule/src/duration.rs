/// Total minutes an appointment occupies on the provider's calendar.
///
/// Travel time extends the end of the window when the travel toggle is on;
/// when it is off, travel contributes nothing (and is not persisted for the
/// appointment either). Total function over non-negative minute values.
pub fn occupied_minutes(duration_minutes: i64, travel_minutes: i64, include_travel: bool) -> i64 {
    debug_assert!(duration_minutes >= 0 && travel_minutes >= 0);
    if include_travel {
        duration_minutes + travel_minutes
    } else {
        duration_minutes
    }
}
