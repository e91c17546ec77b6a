// instructions/upgrade_land.rs
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::events::LandUpgraded;
use crate::instructions::token::burn_from_user;
use crate::state::*;
use crate::utils::*;

/// Upgrade a land to the next level (owner burns the upgrade cost)
pub fn handler(ctx: Context<UpgradeLand>, land_id: u16) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let receipt = ctx.accounts.land_data.apply_upgrade(
        &user,
        clock.unix_timestamp,
        ctx.accounts.user_token_account.amount,
    )?;

    burn_from_user(
        &ctx.accounts.token_program,
        &ctx.accounts.token_mint,
        &ctx.accounts.user_token_account,
        &ctx.accounts.user,
        receipt.cost,
    )?;

    emit!(LandUpgraded {
        owner: user,
        land_id,
        new_level: receipt.new_level,
        cost: receipt.cost,
        banked_earnings: receipt.banked,
    });

    msg!("Land #{} upgraded to level {}", land_id, receipt.new_level);
    Ok(())
}

#[derive(Accounts)]
#[instruction(land_id: u16)]
pub struct UpgradeLand<'info> {
    pub user: Signer<'info>,

    #[account(
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump,
        constraint = is_valid_land_id(land_id) @ ColonyError::InvalidLandId,
    )]
    pub game_state: Account<'info, GameState>,

    #[account(
        mut,
        seeds = [LAND_DATA_SEED, land_id.to_le_bytes().as_ref()],
        bump = land_data.bump
    )]
    pub land_data: Account<'info, LandData>,

    #[account(
        mut,
        constraint = token_mint.key() == game_state.token_mint @ ColonyError::InvalidTokenMint
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}
