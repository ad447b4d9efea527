//! Linear vesting math over scaled time-units.
//! - cliff_span = cliff_units * time_unit, total_span = duration_units * time_unit
//! - elapsed < cliff_span => nothing vested
//! - otherwise vested = floor(total_amount * min(elapsed, total_span) / total_span)
//! - total_span == 0 collapses to full immediate vesting
//! Floor division is contractual: the ledger underpays by truncation, never overpays.

use crate::error::LedgerError;

/// Seconds elapsed since `start_ts`, clamped at zero.
pub fn elapsed_since(now_ts: i64, start_ts: i64) -> u64 {
    if now_ts <= start_ts {
        0
    } else {
        (now_ts - start_ts) as u64
    }
}

/// Cliff span in seconds.
pub fn cliff_span(cliff_units: u64, time_unit: u64) -> Result<u64, LedgerError> {
    cliff_units
        .checked_mul(time_unit)
        .ok_or(LedgerError::MathOverflow)
}

/// Total vesting span in seconds.
pub fn total_span(duration_units: u64, time_unit: u64) -> Result<u64, LedgerError> {
    duration_units
        .checked_mul(time_unit)
        .ok_or(LedgerError::MathOverflow)
}

/// Amount vested at `now_ts` for a schedule anchored at `start_ts`.
///
/// Pure integer arithmetic; the proportional step runs in u128 so
/// `total_amount * elapsed` cannot wrap before the floor division.
pub fn vested_amount(
    total_amount: u64,
    cliff_units: u64,
    duration_units: u64,
    time_unit: u64,
    start_ts: i64,
    now_ts: i64,
) -> Result<u64, LedgerError> {
    let elapsed = elapsed_since(now_ts, start_ts);
    if elapsed < cliff_span(cliff_units, time_unit)? {
        return Ok(0);
    }

    let span = total_span(duration_units, time_unit)?;
    if span == 0 {
        // Zero-length schedule: fully vested the moment the (zero) cliff is met.
        return Ok(total_amount);
    }

    let capped = elapsed.min(span);
    let vested = (total_amount as u128)
        .checked_mul(capped as u128)
        .ok_or(LedgerError::MathOverflow)?
        .checked_div(span as u128)
        .ok_or(LedgerError::MathOverflow)?;
    u64::try_from(vested).map_err(|_| LedgerError::MathOverflow)
}
