// instructions/claim_earnings.rs
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::events::EarningsClaimed;
use crate::instructions::token::transfer_from_vault;
use crate::state::*;
use crate::utils::*;

/// Claim earnings from one land (vault → owner)
pub fn handler(ctx: Context<ClaimEarnings>, land_id: u16) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let earnings = ctx.accounts.land_data.settle_claim(
        &user,
        clock.unix_timestamp,
        ctx.accounts.token_vault.amount,
    )?;

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.token_mint,
        &ctx.accounts.token_vault,
        &ctx.accounts.user_token_account,
        ctx.accounts.game_state.to_account_info(),
        ctx.accounts.game_state.bump,
        earnings,
    )?;

    emit!(EarningsClaimed {
        owner: user,
        land_id,
        amount: earnings,
        claimed_at: clock.unix_timestamp,
    });

    msg!("Claimed {} tokens from land #{}", earnings, land_id);
    Ok(())
}

#[derive(Accounts)]
#[instruction(land_id: u16)]
pub struct ClaimEarnings<'info> {
    #[account(mut)]
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
        constraint = token_mint.key() == game_state.token_mint @ ColonyError::InvalidTokenMint
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        token::mint = token_mint,
        token::authority = game_state,
        seeds = [TOKEN_VAULT_SEED],
        bump = game_state.token_vault_bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = token_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
