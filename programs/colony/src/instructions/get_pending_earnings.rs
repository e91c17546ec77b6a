// instructions/get_pending_earnings.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

/// Get pending earnings for a land (view function via simulate)
pub fn handler(ctx: Context<GetPendingEarnings>, _land_id: u16) -> Result<u64> {
    let clock = Clock::get()?;
    let earnings = ctx.accounts.land_data.pending_earnings(clock.unix_timestamp)?;
    msg!("Pending earnings: {}", earnings);
    Ok(earnings)
}

#[derive(Accounts)]
#[instruction(land_id: u16)]
pub struct GetPendingEarnings<'info> {
    #[account(
        seeds = [LAND_DATA_SEED, land_id.to_le_bytes().as_ref()],
        bump = land_data.bump
    )]
    pub land_data: Account<'info, LandData>,
}
