// ---------------------------------------------------------------------------
// Roll rate limiting (single axis)
// ---------------------------------------------------------------------------

/// Move `current` toward `target` by at most `max_step`, snapping onto the
/// target when it is within one step.
pub fn slew(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = target - current;
    if diff.abs() > max_step {
        current + max_step.copysign(diff)
    } else {
        target
    }
}
