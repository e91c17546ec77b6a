// error.rs
use anchor_lang::prelude::*;

#[error_code]
pub enum ColonyError {
    // 🧮 MATH
    #[msg("Arithmetic overflow")]
    Overflow,

    // 🚫 ADMIN
    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Game is not active")]
    GameNotActive,

    // 🪐 LAND
    #[msg("Invalid land ID (must be 1-21000)")]
    InvalidLandId,

    #[msg("Land is already at maximum level")]
    MaxLevelReached,

    #[msg("You don't own this land")]
    NotLandOwner,

    #[msg("Maximum lands per user reached")]
    MaxLandsReached,

    #[msg("User still has lands owned")]
    UserHasLands,

    // 💰 EARNINGS / TREASURY
    #[msg("No earnings to claim")]
    NoEarnings,

    #[msg("Insufficient tokens in treasury")]
    InsufficientTreasury,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    // 🪙 TOKEN
    #[msg("Token mint not set")]
    TokenMintNotSet,

    #[msg("Invalid token mint")]
    InvalidTokenMint,
}
