// instructions/admin_close.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::events::LandClosed;
use crate::state::*;

/// Close a land account and return rent to authority (admin only).
/// Unclaimed earnings on the land are forfeited.
pub fn close_land(ctx: Context<AdminCloseLand>, land_id: u16) -> Result<()> {
    let clock = Clock::get()?;
    ctx.accounts.game_state.ensure_authority(&ctx.accounts.authority.key())?;

    let land_data = &ctx.accounts.land_data;
    let forfeited = land_data.pending_earnings(clock.unix_timestamp)?;
    let owner = land_data.owner;

    ctx.accounts.user_profile.release_land()?;
    ctx.accounts.game_state.record_land_closed()?;

    emit!(LandClosed {
        owner,
        land_id,
        forfeited_earnings: forfeited,
    });

    msg!("Land #{} closed by admin", land_id);
    Ok(())
    // land_data account is closed by Anchor's `close = authority` constraint
}

/// Close a user profile account and return rent to authority (admin only)
pub fn close_user_profile(ctx: Context<AdminCloseUserProfile>) -> Result<()> {
    ctx.accounts.game_state.ensure_authority(&ctx.accounts.authority.key())?;
    ctx.accounts.user_profile.ensure_empty()?;

    msg!("User profile closed for {}", ctx.accounts.user_profile.owner);
    Ok(())
    // user_profile account is closed by Anchor's `close = authority` constraint
}

#[derive(Accounts)]
#[instruction(land_id: u16)]
pub struct AdminCloseLand<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump
    )]
    pub game_state: Account<'info, GameState>,

    #[account(
        mut,
        seeds = [LAND_DATA_SEED, land_id.to_le_bytes().as_ref()],
        bump = land_data.bump,
        close = authority
    )]
    pub land_data: Account<'info, LandData>,

    #[account(
        mut,
        seeds = [USER_PROFILE_SEED, land_data.owner.as_ref()],
        bump = user_profile.bump
    )]
    pub user_profile: Account<'info, UserProfile>,
}

#[derive(Accounts)]
pub struct AdminCloseUserProfile<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump
    )]
    pub game_state: Account<'info, GameState>,

    #[account(
        mut,
        seeds = [USER_PROFILE_SEED, user_profile.owner.as_ref()],
        bump = user_profile.bump,
        close = authority
    )]
    pub user_profile: Account<'info, UserProfile>,
}
