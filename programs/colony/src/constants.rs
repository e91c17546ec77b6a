// constants.rs
use anchor_lang::prelude::*;

// ============================================================================
// TOKEN
// ============================================================================

/// Game token mint ($OLO)
pub const GAME_TOKEN_MINT: Pubkey = pubkey!("2pXjxbdHnYWtH2gtDN495Ve1jm8bs1zoUL6XsUi3pump");

/// Token decimals
pub const TOKEN_DECIMALS: u8 = 6;

/// Multiplier for token amounts (10^6)
pub const TOKEN_MULTIPLIER: u64 = 1_000_000;

// ============================================================================
// LAND CONFIGURATION
// ============================================================================

/// Land price in tokens (10,000 tokens, burned on purchase)
pub const LAND_PRICE_TOKENS: u64 = 10_000 * TOKEN_MULTIPLIER;

/// Lowest valid land ID
pub const MIN_LAND_ID: u16 = 1;

/// Maximum land ID (21000 lands total, matching the globe grid)
pub const MAX_LAND_ID: u16 = 21000;

/// Maximum lands per wallet
pub const MAX_LANDS_PER_USER: u8 = 10;

/// Maximum land level
pub const MAX_LEVEL: u8 = 10;

/// Upgrade costs in tokens, indexed by the level being left (1 → 2 ... 9 → 10)
pub const UPGRADE_COSTS: [u64; 9] = [
    1_000 * TOKEN_MULTIPLIER,   // 1 → 2
    2_000 * TOKEN_MULTIPLIER,   // 2 → 3
    4_000 * TOKEN_MULTIPLIER,   // 3 → 4
    8_000 * TOKEN_MULTIPLIER,   // 4 → 5
    16_000 * TOKEN_MULTIPLIER,  // 5 → 6
    32_000 * TOKEN_MULTIPLIER,  // 6 → 7
    64_000 * TOKEN_MULTIPLIER,  // 7 → 8
    128_000 * TOKEN_MULTIPLIER, // 8 → 9
    152_000 * TOKEN_MULTIPLIER, // 9 → 10
];

/// Earning speeds in tokens per day (level 1-10)
pub const EARNING_SPEEDS: [u64; 10] = [
    1_000 * TOKEN_MULTIPLIER,  // Level 1
    2_000 * TOKEN_MULTIPLIER,  // Level 2
    3_000 * TOKEN_MULTIPLIER,  // Level 3
    5_000 * TOKEN_MULTIPLIER,  // Level 4
    8_000 * TOKEN_MULTIPLIER,  // Level 5
    13_000 * TOKEN_MULTIPLIER, // Level 6
    21_000 * TOKEN_MULTIPLIER, // Level 7
    34_000 * TOKEN_MULTIPLIER, // Level 8
    45_000 * TOKEN_MULTIPLIER, // Level 9
    79_000 * TOKEN_MULTIPLIER, // Level 10
];

// ============================================================================
// TIME
// ============================================================================

/// Seconds per day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Mining launch time: 2026-02-17 16:00 CET
pub const MINING_START_TIME: i64 = 1_771_340_400;

// ============================================================================
// PDA SEEDS
// ============================================================================

pub const GAME_STATE_SEED: &[u8] = b"game_state";
pub const SOL_VAULT_SEED: &[u8] = b"vault";
pub const TOKEN_VAULT_SEED: &[u8] = b"token_vault";
pub const LAND_DATA_SEED: &[u8] = b"land_data";
pub const USER_PROFILE_SEED: &[u8] = b"user_profile";
