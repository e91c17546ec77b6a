//! Read-only views for dashboards.

use anchor_lang::prelude::Pubkey;
use colony::{earning_speed, GameState, LandData, UserProfile};
use serde::Serialize;

use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameStatus {
    pub authority: String,
    pub token_mint: String,
    pub is_active: bool,
    pub total_lands_sold: u64,
}

impl From<&GameState> for GameStatus {
    fn from(game: &GameState) -> Self {
        Self {
            authority: game.authority.to_string(),
            token_mint: game.token_mint.to_string(),
            is_active: game.is_active,
            total_lands_sold: game.total_lands_sold,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LandStatus {
    pub land_id: u16,
    pub owner: String,
    pub level: u8,
    /// Advisory; the program recomputes at claim time.
    pub pending_earnings: u64,
    pub earning_speed: u64,
    pub next_upgrade_cost: Option<u64>,
}

impl LandStatus {
    pub fn at(land: &LandData, now: i64) -> Result<Self> {
        Ok(Self {
            land_id: land.land_id,
            owner: land.owner.to_string(),
            level: land.level,
            pending_earnings: land.pending_earnings(now)?,
            earning_speed: earning_speed(land.level).unwrap_or(0),
            next_upgrade_cost: land.next_upgrade_cost(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserStatus {
    pub owner: String,
    pub lands_owned: u8,
    pub land_ids: Vec<u16>,
    pub total_pending: u64,
}

impl UserStatus {
    /// Build from the owner's profile (if any) and a scan of land records.
    pub fn collect<'a>(
        owner: &Pubkey,
        profile: Option<&UserProfile>,
        lands: impl IntoIterator<Item = &'a LandData>,
        now: i64,
    ) -> Result<Self> {
        let owned: Vec<&LandData> = lands.into_iter().filter(|land| land.owner == *owner).collect();
        let mut total_pending = 0u64;
        for land in &owned {
            total_pending = total_pending.saturating_add(land.pending_earnings(now)?);
        }

        Ok(Self {
            owner: owner.to_string(),
            lands_owned: profile.map(|p| p.lands_owned).unwrap_or(0),
            land_ids: owned_land_ids(owned, owner),
            total_pending,
        })
    }
}

/// Ids of the lands held by `owner`, ascending.
pub fn owned_land_ids<'a>(lands: impl IntoIterator<Item = &'a LandData>, owner: &Pubkey) -> Vec<u16> {
    let mut ids: Vec<u16> = lands
        .into_iter()
        .filter(|land| land.owner == *owner)
        .map(|land| land.land_id)
        .collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony::{EARNING_SPEEDS, MINING_START_TIME, UPGRADE_COSTS};

    fn land(land_id: u16, owner: Pubkey, bought_at: i64) -> LandData {
        LandData::new(land_id, owner, bought_at, 255).unwrap()
    }

    #[test]
    fn test_land_status() {
        let owner = Pubkey::new_unique();
        let now = MINING_START_TIME + 86_400;
        let status = LandStatus::at(&land(9, owner, MINING_START_TIME), now).unwrap();
        assert_eq!(status.pending_earnings, EARNING_SPEEDS[0]);
        assert_eq!(status.earning_speed, EARNING_SPEEDS[0]);
        assert_eq!(status.next_upgrade_cost, Some(UPGRADE_COSTS[0]));
        assert_eq!(status.owner, owner.to_string());
    }

    #[test]
    fn test_user_status_filters_by_owner() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let lands = vec![land(30, alice, MINING_START_TIME), land(4, bob, MINING_START_TIME), land(7, alice, MINING_START_TIME)];

        assert_eq!(owned_land_ids(&lands, &alice), vec![7, 30]);
        assert_eq!(owned_land_ids(&lands, &bob), vec![4]);

        let profile = UserProfile { owner: alice, lands_owned: 2, token_balance: 0, bump: 1 };
        let status = UserStatus::collect(&alice, Some(&profile), &lands, MINING_START_TIME + 86_400).unwrap();
        assert_eq!(status.lands_owned, 2);
        assert_eq!(status.land_ids, vec![7, 30]);
        assert_eq!(status.total_pending, 2 * EARNING_SPEEDS[0]);
    }

    #[test]
    fn test_statuses_serialize() {
        let game = GameState::new(Pubkey::new_unique(), 1, 2);
        let json = serde_json::to_value(GameStatus::from(&game)).unwrap();
        assert_eq!(json["is_active"], true);
        assert_eq!(json["total_lands_sold"], 0);
    }
}
