// state/game_state.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::ColonyError;

#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct GameState {
    pub authority: Pubkey,      // 32 bytes
    pub total_lands_sold: u64,  // 8 bytes - number of live LandData accounts
    pub is_active: bool,        // 1 byte
    pub bump: u8,               // 1 byte
    pub vault_bump: u8,         // 1 byte - SOL vault PDA bump
    pub token_mint: Pubkey,     // 32 bytes - associated SPL token mint
    pub token_vault_bump: u8,   // 1 byte - token vault PDA bump (0 = not initialized)
}

impl GameState {
    /// Create new game state
    pub fn new(authority: Pubkey, bump: u8, vault_bump: u8) -> Self {
        Self {
            authority,
            total_lands_sold: 0,
            is_active: true,
            bump,
            vault_bump,
            token_mint: GAME_TOKEN_MINT,
            token_vault_bump: 0,
        }
    }

    /// Only the game authority may run admin instructions
    pub fn ensure_authority(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.authority, ColonyError::Unauthorized);
        Ok(())
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.is_active, ColonyError::GameNotActive);
        Ok(())
    }

    pub fn ensure_mint(&self, mint: &Pubkey) -> Result<()> {
        require_keys_eq!(*mint, self.token_mint, ColonyError::InvalidTokenMint);
        Ok(())
    }

    pub fn record_land_sold(&mut self) -> Result<()> {
        self.total_lands_sold = self
            .total_lands_sold
            .checked_add(1)
            .ok_or(ColonyError::Overflow)?;
        Ok(())
    }

    pub fn record_land_closed(&mut self) -> Result<()> {
        self.total_lands_sold = self
            .total_lands_sold
            .checked_sub(1)
            .ok_or(ColonyError::Overflow)?;
        Ok(())
    }

    /// Pause/unpause (authority only)
    pub fn set_active(&mut self, caller: &Pubkey, is_active: bool) -> Result<()> {
        self.ensure_authority(caller)?;
        self.is_active = is_active;
        Ok(())
    }

    /// Rotate the token mint (authority only)
    pub fn set_token_mint(&mut self, caller: &Pubkey, new_mint: Pubkey) -> Result<()> {
        self.ensure_authority(caller)?;
        self.token_mint = new_mint;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_is_active() {
        let authority = Pubkey::new_unique();
        let game = GameState::new(authority, 254, 253);
        assert!(game.is_active);
        assert_eq!(game.total_lands_sold, 0);
        assert_eq!(game.token_mint, GAME_TOKEN_MINT);
        assert_eq!(game.token_vault_bump, 0);
    }

    #[test]
    fn test_admin_actions_require_authority() {
        let authority = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut game = GameState::new(authority, 254, 253);

        assert_eq!(
            game.set_active(&stranger, false).unwrap_err(),
            ColonyError::Unauthorized.into()
        );
        assert!(game.is_active);

        game.set_active(&authority, false).unwrap();
        assert_eq!(game.ensure_active().unwrap_err(), ColonyError::GameNotActive.into());

        let mint = Pubkey::new_unique();
        assert!(game.set_token_mint(&stranger, mint).is_err());
        game.set_token_mint(&authority, mint).unwrap();
        assert!(game.ensure_mint(&mint).is_ok());
        assert_eq!(
            game.ensure_mint(&GAME_TOKEN_MINT).unwrap_err(),
            ColonyError::InvalidTokenMint.into()
        );
    }

    #[test]
    fn test_land_counter() {
        let mut game = GameState::new(Pubkey::new_unique(), 1, 1);
        assert_eq!(game.record_land_closed().unwrap_err(), ColonyError::Overflow.into());
        game.record_land_sold().unwrap();
        game.record_land_sold().unwrap();
        game.record_land_closed().unwrap();
        assert_eq!(game.total_lands_sold, 1);
    }
}
