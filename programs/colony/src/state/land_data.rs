// state/land_data.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ColonyError;
use crate::utils::*;

/// One land plot. Lives at PDA `[LAND_DATA_SEED, land_id.to_le_bytes()]`,
/// so at most one record exists per id.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct LandData {
    pub land_id: u16,         // 2 bytes
    pub owner: Pubkey,        // 32 bytes - land owner wallet
    pub level: u8,            // 1 byte (1-10)
    pub fixed_earnings: u64,  // 8 bytes - banked earnings not yet claimed
    pub last_checkout: i64,   // 8 bytes - start of the current accrual window
    pub bump: u8,             // 1 byte
}

/// Result of a successful upgrade
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeReceipt {
    pub cost: u64,
    pub banked: u64,
    pub new_level: u8,
}

impl LandData {
    /// Fresh level-1 land. Accrual starts at `max(now, MINING_START_TIME)`.
    pub fn new(land_id: u16, owner: Pubkey, current_time: i64, bump: u8) -> Result<Self> {
        validate_land_id(land_id)?;
        Ok(Self {
            land_id,
            owner,
            level: 1,
            fixed_earnings: 0,
            last_checkout: current_time.max(MINING_START_TIME),
            bump,
        })
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, ColonyError::NotLandOwner);
        Ok(())
    }

    pub fn pending_earnings(&self, current_time: i64) -> Result<u64> {
        calculate_earnings(self, current_time, MINING_START_TIME)
    }

    /// Cost of the next upgrade, `None` at max level
    pub fn next_upgrade_cost(&self) -> Option<u64> {
        upgrade_cost(self.level)
    }

    /// Settle a claim against the vault and reset the accrual window.
    /// Returns the amount the vault must pay out.
    pub fn settle_claim(&mut self, caller: &Pubkey, current_time: i64, vault_balance: u64) -> Result<u64> {
        self.ensure_owner(caller)?;

        let earnings = self.pending_earnings(current_time)?;
        require!(earnings > 0, ColonyError::NoEarnings);
        require!(vault_balance >= earnings, ColonyError::InsufficientTreasury);

        self.fixed_earnings = 0;
        self.last_checkout = current_time;
        Ok(earnings)
    }

    /// Bank pending earnings at the current level, then level up.
    /// Returns the token amount the caller must burn.
    pub fn apply_upgrade(&mut self, caller: &Pubkey, current_time: i64, balance: u64) -> Result<UpgradeReceipt> {
        self.ensure_owner(caller)?;
        require!(self.level < MAX_LEVEL, ColonyError::MaxLevelReached);

        let cost = self.next_upgrade_cost().ok_or(ColonyError::MaxLevelReached)?;
        validate_balance(balance, cost)?;

        let banked = self.pending_earnings(current_time)?;
        self.fixed_earnings = banked;
        self.last_checkout = current_time.max(MINING_START_TIME);
        self.level += 1;

        Ok(UpgradeReceipt {
            cost,
            banked,
            new_level: self.level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = MINING_START_TIME + 30 * 86_400;

    fn owned_land(owner: Pubkey, bought_at: i64) -> LandData {
        LandData::new(42, owner, bought_at, 250).unwrap()
    }

    #[test]
    fn test_new_land_defaults() {
        let owner = Pubkey::new_unique();
        let land = owned_land(owner, NOW);
        assert_eq!(land.level, 1);
        assert_eq!(land.fixed_earnings, 0);
        assert_eq!(land.last_checkout, NOW);
        assert_eq!(land.owner, owner);
    }

    #[test]
    fn test_land_bought_before_mining_starts_at_mining_start() {
        let land = owned_land(Pubkey::new_unique(), MINING_START_TIME - 500);
        assert_eq!(land.last_checkout, MINING_START_TIME);
        assert_eq!(land.pending_earnings(MINING_START_TIME - 1).unwrap(), 0);
    }

    #[test]
    fn test_new_rejects_out_of_range_ids() {
        let owner = Pubkey::new_unique();
        assert_eq!(
            LandData::new(0, owner, NOW, 1).unwrap_err(),
            ColonyError::InvalidLandId.into()
        );
        assert!(LandData::new(21_001, owner, NOW, 1).is_err());
        assert!(LandData::new(1, owner, NOW, 1).is_ok());
        assert!(LandData::new(21_000, owner, NOW, 1).is_ok());
    }

    #[test]
    fn test_claim_resets_window() {
        let owner = Pubkey::new_unique();
        let mut land = owned_land(owner, NOW - 3_600);
        let expected = EARNING_SPEEDS[0] * 3_600 / SECONDS_PER_DAY;

        let paid = land.settle_claim(&owner, NOW, u64::MAX).unwrap();
        assert_eq!(paid, expected);
        assert_eq!(land.last_checkout, NOW);
        assert_eq!(land.fixed_earnings, 0);

        // Same instant again: nothing left
        assert_eq!(
            land.settle_claim(&owner, NOW, u64::MAX).unwrap_err(),
            ColonyError::NoEarnings.into()
        );
    }

    #[test]
    fn test_claim_checks_owner_and_treasury() {
        let owner = Pubkey::new_unique();
        let mut land = owned_land(owner, NOW - 86_400);
        let before = land.clone();

        assert_eq!(
            land.settle_claim(&Pubkey::new_unique(), NOW, u64::MAX).unwrap_err(),
            ColonyError::NotLandOwner.into()
        );
        assert_eq!(
            land.settle_claim(&owner, NOW, EARNING_SPEEDS[0] - 1).unwrap_err(),
            ColonyError::InsufficientTreasury.into()
        );
        assert_eq!(land, before);
    }

    #[test]
    fn test_upgrade_banks_pending_before_level_change() {
        let owner = Pubkey::new_unique();
        let mut land = owned_land(owner, NOW - 7_200);
        let pending = land.pending_earnings(NOW).unwrap();
        assert!(pending > 0);

        let receipt = land.apply_upgrade(&owner, NOW, UPGRADE_COSTS[0]).unwrap();
        assert_eq!(receipt.cost, UPGRADE_COSTS[0]);
        assert_eq!(receipt.banked, pending);
        assert_eq!(land.level, 2);
        assert_eq!(land.fixed_earnings, pending);
        assert_eq!(land.last_checkout, NOW);

        // New speed applies only from the upgrade onwards
        let later = NOW + 3_600;
        let expected = pending + EARNING_SPEEDS[1] * 3_600 / SECONDS_PER_DAY;
        assert_eq!(land.pending_earnings(later).unwrap(), expected);
    }

    #[test]
    fn test_upgrade_before_mining_accrues_from_mining_start() {
        let owner = Pubkey::new_unique();
        let early = MINING_START_TIME - 10 * 86_400;
        let mut land = owned_land(owner, early);

        let receipt = land.apply_upgrade(&owner, early, u64::MAX).unwrap();
        assert_eq!(receipt.banked, 0);
        assert_eq!(land.last_checkout, MINING_START_TIME);
        assert_eq!(
            land.settle_claim(&owner, MINING_START_TIME, u64::MAX).unwrap_err(),
            ColonyError::NoEarnings.into()
        );

        let expected = EARNING_SPEEDS[1] * 3_600 / SECONDS_PER_DAY;
        assert_eq!(land.pending_earnings(MINING_START_TIME + 3_600).unwrap(), expected);
    }

    #[test]
    fn test_upgrade_failures_leave_land_untouched() {
        let owner = Pubkey::new_unique();
        let mut land = owned_land(owner, NOW - 100);
        let before = land.clone();

        assert_eq!(
            land.apply_upgrade(&Pubkey::new_unique(), NOW, u64::MAX).unwrap_err(),
            ColonyError::NotLandOwner.into()
        );
        assert_eq!(
            land.apply_upgrade(&owner, NOW, UPGRADE_COSTS[0] - 1).unwrap_err(),
            ColonyError::InsufficientBalance.into()
        );
        assert_eq!(land, before);
    }

    #[test]
    fn test_upgrade_stops_at_max_level() {
        let owner = Pubkey::new_unique();
        let mut land = owned_land(owner, NOW);
        for expected_level in 2..=MAX_LEVEL {
            let receipt = land.apply_upgrade(&owner, NOW, u64::MAX).unwrap();
            assert_eq!(receipt.new_level, expected_level);
        }
        assert_eq!(land.next_upgrade_cost(), None);
        assert_eq!(
            land.apply_upgrade(&owner, NOW, u64::MAX).unwrap_err(),
            ColonyError::MaxLevelReached.into()
        );
        assert_eq!(land.level, MAX_LEVEL);
    }
}
