// instructions/token.rs
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn_checked, transfer_checked, BurnChecked, Mint, TokenAccount, TokenInterface, TransferChecked,
};
use crate::constants::*;

/// Burn `amount` game tokens from a user-owned token account
pub fn burn_from_user<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    user: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    burn_checked(
        CpiContext::new(
            token_program.to_account_info(),
            BurnChecked {
                mint: mint.to_account_info(),
                from: from.to_account_info(),
                authority: user.to_account_info(),
            },
        ),
        amount,
        TOKEN_DECIMALS,
    )
}

/// Pay `amount` out of the token vault, signed by the game state PDA
pub fn transfer_from_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    vault: &InterfaceAccount<'info, TokenAccount>,
    to: &InterfaceAccount<'info, TokenAccount>,
    vault_authority: AccountInfo<'info>,
    game_state_bump: u8,
    amount: u64,
) -> Result<()> {
    let bump = [game_state_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[GAME_STATE_SEED, &bump]];

    transfer_checked(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            TransferChecked {
                from: vault.to_account_info(),
                mint: mint.to_account_info(),
                to: to.to_account_info(),
                authority: vault_authority,
            },
            signer_seeds,
        ),
        amount,
        TOKEN_DECIMALS,
    )
}
