use anchor_lang::prelude::*;

// Import modules
pub mod constants;
pub mod error;
pub mod events;
pub mod state;
pub mod utils;
pub mod instructions;

// Re-export for convenience
pub use constants::*;
pub use error::*;
pub use events::*;
pub use state::*;
pub use utils::*;
#[allow(ambiguous_glob_reexports)]
pub use instructions::*;

declare_id!("BCVGJ5YoKMftBrt5fgDYhtvY7HVBccFofFiGqJtoRjqE");

#[program]
pub mod colony {
    use super::*;

    /// Initialize the game state (call once)
    pub fn initialize_game(ctx: Context<InitializeGame>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Buy a land plot
    pub fn buy_land(ctx: Context<BuyLand>, land_id: u16) -> Result<()> {
        instructions::buy_land::handler(ctx, land_id)
    }

    /// Claim earnings from a specific land
    pub fn claim_earnings(ctx: Context<ClaimEarnings>, land_id: u16) -> Result<()> {
        instructions::claim_earnings::handler(ctx, land_id)
    }

    /// Upgrade a land to the next level
    pub fn upgrade_land(ctx: Context<UpgradeLand>, land_id: u16) -> Result<()> {
        instructions::upgrade_land::handler(ctx, land_id)
    }

    /// Initialize the token vault PDA (owner only)
    pub fn init_token_vault(ctx: Context<InitTokenVault>) -> Result<()> {
        instructions::admin::init_token_vault(ctx)
    }

    /// Close the token vault (owner only)
    pub fn admin_close_token_vault(ctx: Context<AdminCloseTokenVault>) -> Result<()> {
        instructions::admin::close_token_vault(ctx)
    }

    /// Withdraw all SOL from vault (owner only)
    pub fn withdraw_sol(ctx: Context<WithdrawSol>) -> Result<()> {
        instructions::admin::withdraw_sol(ctx)
    }

    /// Withdraw all SPL tokens from token vault (owner only)
    pub fn withdraw_tokens(ctx: Context<WithdrawTokens>) -> Result<()> {
        instructions::admin::withdraw_tokens(ctx)
    }

    /// Pause/unpause the game (owner only)
    pub fn set_game_active(ctx: Context<AdminAction>, is_active: bool) -> Result<()> {
        instructions::admin::set_game_active(ctx, is_active)
    }

    /// Set the token mint address (owner only)
    pub fn set_token_mint(ctx: Context<AdminAction>, new_mint: Pubkey) -> Result<()> {
        instructions::admin::set_token_mint(ctx, new_mint)
    }

    /// Close a land account (owner only)
    pub fn admin_close_land(ctx: Context<AdminCloseLand>, land_id: u16) -> Result<()> {
        instructions::admin_close::close_land(ctx, land_id)
    }

    /// Close an empty user profile (owner only)
    pub fn admin_close_user_profile(ctx: Context<AdminCloseUserProfile>) -> Result<()> {
        instructions::admin_close::close_user_profile(ctx)
    }

    /// Get pending earnings for a land (view function via simulate)
    pub fn get_pending_earnings(ctx: Context<GetPendingEarnings>, land_id: u16) -> Result<u64> {
        instructions::get_pending_earnings::handler(ctx, land_id)
    }
}
