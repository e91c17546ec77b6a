// instructions/buy_land.rs
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::events::LandPurchased;
use crate::instructions::token::burn_from_user;
use crate::state::*;
use crate::utils::*;

/// Buy a land plot: burns the land price and creates a level-1 LandData
pub fn handler(ctx: Context<BuyLand>, land_id: u16) -> Result<()> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let user_profile = &mut ctx.accounts.user_profile;
    user_profile.register_land(user, ctx.bumps.user_profile)?;

    validate_balance(ctx.accounts.user_token_account.amount, LAND_PRICE_TOKENS)?;
    burn_from_user(
        &ctx.accounts.token_program,
        &ctx.accounts.token_mint,
        &ctx.accounts.user_token_account,
        &ctx.accounts.user,
        LAND_PRICE_TOKENS,
    )?;

    ctx.accounts.user_token_account.reload()?;
    ctx.accounts.user_profile.token_balance = ctx.accounts.user_token_account.amount;

    let land_data = &mut ctx.accounts.land_data;
    **land_data = LandData::new(land_id, user, clock.unix_timestamp, ctx.bumps.land_data)?;

    ctx.accounts.game_state.record_land_sold()?;

    emit!(LandPurchased {
        owner: user,
        land_id,
        price: LAND_PRICE_TOKENS,
        purchased_at: clock.unix_timestamp,
    });

    msg!("User {} bought land #{}", user, land_id);
    Ok(())
}

#[derive(Accounts)]
#[instruction(land_id: u16)]
pub struct BuyLand<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump,
        constraint = is_valid_land_id(land_id) @ ColonyError::InvalidLandId,
        constraint = game_state.is_active @ ColonyError::GameNotActive,
    )]
    pub game_state: Account<'info, GameState>,

    #[account(
        init,
        payer = user,
        space = 8 + LandData::INIT_SPACE,
        seeds = [LAND_DATA_SEED, land_id.to_le_bytes().as_ref()],
        bump
    )]
    pub land_data: Account<'info, LandData>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserProfile::INIT_SPACE,
        seeds = [USER_PROFILE_SEED, user.key().as_ref()],
        bump
    )]
    pub user_profile: Account<'info, UserProfile>,

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
    pub system_program: Program<'info, System>,
}
