// state/user_profile.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ColonyError;

#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct UserProfile {
    pub owner: Pubkey,        // 32 bytes
    pub lands_owned: u8,      // 1 byte (0-10)
    pub token_balance: u64,   // 8 bytes - balance seen at last purchase (informational)
    pub bump: u8,             // 1 byte
}

impl UserProfile {
    pub fn can_buy_land(&self) -> bool {
        self.lands_owned < MAX_LANDS_PER_USER
    }

    /// Count one more land. A zeroed (freshly created) profile is bound to `owner`.
    pub fn register_land(&mut self, owner: Pubkey, bump: u8) -> Result<()> {
        require!(self.can_buy_land(), ColonyError::MaxLandsReached);

        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
        self.lands_owned = self
            .lands_owned
            .checked_add(1)
            .ok_or(ColonyError::Overflow)?;
        Ok(())
    }

    pub fn release_land(&mut self) -> Result<()> {
        self.lands_owned = self
            .lands_owned
            .checked_sub(1)
            .ok_or(ColonyError::Overflow)?;
        Ok(())
    }

    pub fn ensure_empty(&self) -> Result<()> {
        require!(self.lands_owned == 0, ColonyError::UserHasLands);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_binds_owner() {
        let owner = Pubkey::new_unique();
        let mut profile = UserProfile::default();
        profile.register_land(owner, 200).unwrap();
        assert_eq!(profile.owner, owner);
        assert_eq!(profile.bump, 200);
        assert_eq!(profile.lands_owned, 1);
    }

    #[test]
    fn test_cap_and_release() {
        let owner = Pubkey::new_unique();
        let mut profile = UserProfile::default();
        for _ in 0..MAX_LANDS_PER_USER {
            profile.register_land(owner, 1).unwrap();
        }
        assert_eq!(
            profile.register_land(owner, 1).unwrap_err(),
            ColonyError::MaxLandsReached.into()
        );
        assert_eq!(profile.lands_owned, MAX_LANDS_PER_USER);

        profile.release_land().unwrap();
        assert!(profile.can_buy_land());
        profile.register_land(owner, 1).unwrap();
        assert_eq!(profile.lands_owned, MAX_LANDS_PER_USER);
    }

    #[test]
    fn test_close_requires_no_lands() {
        let mut profile = UserProfile::default();
        profile.register_land(Pubkey::new_unique(), 1).unwrap();
        assert_eq!(profile.ensure_empty().unwrap_err(), ColonyError::UserHasLands.into());
        profile.release_land().unwrap();
        assert!(profile.ensure_empty().is_ok());
        assert_eq!(profile.release_land().unwrap_err(), ColonyError::Overflow.into());
    }
}
