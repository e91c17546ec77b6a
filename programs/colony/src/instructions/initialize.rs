// instructions/initialize.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

/// Initialize the game state singleton (call once)
pub fn handler(ctx: Context<InitializeGame>) -> Result<()> {
    let game_state = &mut ctx.accounts.game_state;
    **game_state = GameState::new(
        ctx.accounts.authority.key(),
        ctx.bumps.game_state,
        ctx.bumps.vault,
    );

    msg!("Colony initialized!");
    msg!("Authority: {}", game_state.authority);
    msg!("Token mint: {}", game_state.token_mint);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeGame<'info> {
    /// Authority (admin) who can manage the game
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + GameState::INIT_SPACE,
        seeds = [GAME_STATE_SEED],
        bump
    )]
    pub game_state: Account<'info, GameState>,

    /// SOL vault PDA
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED],
        bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
