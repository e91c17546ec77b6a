// utils/calculations.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ColonyError;
use crate::state::LandData;

/// Earning speed (tokens/day) for a level, `None` outside 1..=MAX_LEVEL
pub fn earning_speed(level: u8) -> Option<u64> {
    if level == 0 || level > MAX_LEVEL {
        return None;
    }
    Some(EARNING_SPEEDS[(level - 1) as usize])
}

/// Cost of leaving `level` for `level + 1`, `None` at MAX_LEVEL
pub fn upgrade_cost(level: u8) -> Option<u64> {
    if level == 0 || level >= MAX_LEVEL {
        return None;
    }
    Some(UPGRADE_COSTS[(level - 1) as usize])
}

/// floor(speed * seconds / SECONDS_PER_DAY)
pub fn accrued_for_period(speed: u64, seconds: u64) -> Option<u64> {
    let earned = (speed as u128).checked_mul(seconds as u128)? / SECONDS_PER_DAY as u128;
    u64::try_from(earned).ok()
}

/// Pending earnings of a land at `current_time`.
///
/// Before `mining_start` nothing accrues and the banked `fixed_earnings`
/// are returned unchanged.
pub fn calculate_earnings(land: &LandData, current_time: i64, mining_start: i64) -> Result<u64> {
    if current_time < mining_start {
        return Ok(land.fixed_earnings);
    }

    let time_passed = u64::try_from(current_time.saturating_sub(land.last_checkout)).unwrap_or(0);
    let speed = earning_speed(land.level).ok_or(ColonyError::Overflow)?;

    let earned = accrued_for_period(speed, time_passed)
        .ok_or(ColonyError::Overflow)?
        .checked_add(land.fixed_earnings)
        .ok_or(ColonyError::Overflow)?;

    Ok(earned)
}
