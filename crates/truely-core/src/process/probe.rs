//! Two-phase "probe size, then fill" helper for OS table queries.
//!
//! The process table can grow or shrink between the probe and the fill. The
//! fill always receives a slice it cannot overrun, reported counts are clamped
//! to that slice, and a buffer that comes back completely full is treated as
//! possibly truncated and refilled with a larger allocation.

use tracing::{debug, warn};

use crate::process::errors::ProcessError;

/// Fill attempts before accepting a possibly truncated snapshot
pub const MAX_FILL_ATTEMPTS: usize = 3;

/// Minimum spare entries allocated on top of the probed size
const MIN_HEADROOM: usize = 16;

fn with_headroom(required: usize) -> usize {
    required.saturating_add((required / 8).max(MIN_HEADROOM))
}

fn allocate<T: Copy + Default>(capacity: usize) -> Result<Vec<T>, ProcessError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| ProcessError::AllocationFailed {
            requested: capacity,
        })?;
    buffer.resize(capacity, T::default());
    Ok(buffer)
}

/// Run a two-phase table query.
///
/// `probe` returns the number of entries currently required. `fill` writes
/// into the given slice and returns how many entries the OS reported, which
/// may exceed the slice length when the table grew in between.
pub fn fetch_two_phase<T, P, F>(mut probe: P, mut fill: F) -> Result<Vec<T>, ProcessError>
where
    T: Copy + Default,
    P: FnMut() -> Result<usize, ProcessError>,
    F: FnMut(&mut [T]) -> Result<usize, ProcessError>,
{
    let required = probe()?;
    if required == 0 {
        return Err(ProcessError::EmptyTable);
    }

    let mut capacity = with_headroom(required);
    let mut attempt = 1;

    loop {
        let mut buffer = allocate::<T>(capacity)?;
        let reported = fill(&mut buffer)?;

        if reported < capacity || attempt == MAX_FILL_ATTEMPTS {
            if reported > capacity {
                warn!(
                    event = "core.process.probe_truncated",
                    capacity = capacity,
                    reported = reported,
                    attempts = attempt
                );
            }

            let written = reported.min(capacity);
            if written == 0 {
                return Err(ProcessError::EmptyTable);
            }
            buffer.truncate(written);

            debug!(
                event = "core.process.probe_completed",
                probed = required,
                written = written,
                attempts = attempt
            );
            return Ok(buffer);
        }

        debug!(
            event = "core.process.probe_buffer_full",
            capacity = capacity,
            reported = reported,
            attempt = attempt
        );
        // Growth is capped so a bogus count cannot trigger a huge allocation
        capacity = with_headroom(reported.min(capacity.saturating_mul(4)).max(capacity));
        attempt += 1;
    }
}
