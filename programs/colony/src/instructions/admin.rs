// instructions/admin.rs
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{close_account, CloseAccount, Mint, TokenAccount, TokenInterface};
use crate::constants::*;
use crate::error::*;
use crate::events::{GameActiveChanged, TokensWithdrawn};
use crate::instructions::token::transfer_from_vault;
use crate::state::*;

/// Pause/unpause the game (owner only)
pub fn set_game_active(ctx: Context<AdminAction>, is_active: bool) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts.game_state.set_active(&authority, is_active)?;

    emit!(GameActiveChanged { is_active });
    msg!("Game active status: {}", is_active);
    Ok(())
}

/// Set the token mint address (owner only)
pub fn set_token_mint(ctx: Context<AdminAction>, new_mint: Pubkey) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts.game_state.set_token_mint(&authority, new_mint)?;

    msg!("Token mint updated to: {}", new_mint);
    Ok(())
}

/// Initialize the token vault PDA (owner only, call after set_token_mint)
pub fn init_token_vault(ctx: Context<InitTokenVault>) -> Result<()> {
    let game_state = &mut ctx.accounts.game_state;
    game_state.ensure_authority(&ctx.accounts.authority.key())?;
    game_state.token_vault_bump = ctx.bumps.token_vault;

    msg!("Token vault initialized for mint: {}", game_state.token_mint);
    Ok(())
}

/// Close the token vault account (owner only, for re-initialization with new mint)
pub fn close_token_vault(ctx: Context<AdminCloseTokenVault>) -> Result<()> {
    ctx.accounts.game_state.ensure_authority(&ctx.accounts.authority.key())?;

    let bump = [ctx.accounts.game_state.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[GAME_STATE_SEED, &bump]];

    close_account(CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        CloseAccount {
            account: ctx.accounts.token_vault.to_account_info(),
            destination: ctx.accounts.authority.to_account_info(),
            authority: ctx.accounts.game_state.to_account_info(),
        },
        signer_seeds,
    ))?;

    ctx.accounts.game_state.token_vault_bump = 0;
    msg!("Token vault closed");
    Ok(())
}

/// Withdraw all SPL tokens from the token vault to the authority (owner only).
/// Pending claims fail with InsufficientTreasury until the vault is refilled.
pub fn withdraw_tokens(ctx: Context<WithdrawTokens>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts.game_state.ensure_authority(&authority)?;

    let amount = ctx.accounts.token_vault.amount;
    require!(amount > 0, ColonyError::InsufficientBalance);

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.token_mint,
        &ctx.accounts.token_vault,
        &ctx.accounts.authority_token_account,
        ctx.accounts.game_state.to_account_info(),
        ctx.accounts.game_state.bump,
        amount,
    )?;

    emit!(TokensWithdrawn { authority, amount });
    msg!("Withdrawn {} tokens to authority", amount);
    Ok(())
}

/// Withdraw all SOL from the vault (owner only)
pub fn withdraw_sol(ctx: Context<WithdrawSol>) -> Result<()> {
    ctx.accounts.game_state.ensure_authority(&ctx.accounts.authority.key())?;

    let amount = ctx.accounts.vault.lamports();
    require!(amount > 0, ColonyError::InsufficientBalance);

    let bump = [ctx.accounts.game_state.vault_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[SOL_VAULT_SEED, &bump]];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    msg!("Withdrawn {} lamports to authority", amount);
    Ok(())
}

#[derive(Accounts)]
pub struct AdminAction<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump
    )]
    pub game_state: Account<'info, GameState>,
}

#[derive(Accounts)]
pub struct InitTokenVault<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump,
        constraint = game_state.token_mint != Pubkey::default() @ ColonyError::TokenMintNotSet
    )]
    pub game_state: Account<'info, GameState>,

    #[account(
        constraint = token_mint.key() == game_state.token_mint @ ColonyError::InvalidTokenMint
    )]
    pub token_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        token::mint = token_mint,
        token::authority = game_state,
        token::token_program = token_program,
        seeds = [TOKEN_VAULT_SEED],
        bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AdminCloseTokenVault<'info> {
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
        token::authority = game_state,
        seeds = [TOKEN_VAULT_SEED],
        bump = game_state.token_vault_bump
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

#[derive(Accounts)]
pub struct WithdrawTokens<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump
    )]
    pub game_state: Account<'info, GameState>,

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
        payer = authority,
        associated_token::mint = token_mint,
        associated_token::authority = authority,
        associated_token::token_program = token_program,
    )]
    pub authority_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawSol<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GAME_STATE_SEED],
        bump = game_state.bump
    )]
    pub game_state: Account<'info, GameState>,

    /// SOL vault PDA
    #[account(
        mut,
        seeds = [SOL_VAULT_SEED],
        bump = game_state.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
