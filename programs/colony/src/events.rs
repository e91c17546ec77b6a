// events.rs
use anchor_lang::prelude::*;

#[event]
pub struct LandPurchased {
    pub owner: Pubkey,
    pub land_id: u16,
    pub price: u64,
    pub purchased_at: i64,
}

#[event]
pub struct EarningsClaimed {
    pub owner: Pubkey,
    pub land_id: u16,
    pub amount: u64,
    pub claimed_at: i64,
}

#[event]
pub struct LandUpgraded {
    pub owner: Pubkey,
    pub land_id: u16,
    pub new_level: u8,
    pub cost: u64,
    pub banked_earnings: u64,
}

#[event]
pub struct LandClosed {
    pub owner: Pubkey,
    pub land_id: u16,
    pub forfeited_earnings: u64,
}

#[event]
pub struct GameActiveChanged {
    pub is_active: bool,
}

#[event]
pub struct TokensWithdrawn {
    pub authority: Pubkey,
    pub amount: u64,
}
