//! PDA derivation for the colony program.
//!
//! Seeds mirror the `seeds = [...]` constraints of the on-chain accounts:
//! a fixed tag, plus the little-endian land id or the owner key.

use anchor_lang::prelude::Pubkey;
use colony::{GAME_STATE_SEED, LAND_DATA_SEED, SOL_VAULT_SEED, TOKEN_VAULT_SEED, USER_PROFILE_SEED};

pub fn game_state(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GAME_STATE_SEED], program_id)
}

pub fn sol_vault(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SOL_VAULT_SEED], program_id)
}

pub fn token_vault(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TOKEN_VAULT_SEED], program_id)
}

pub fn land_data(program_id: &Pubkey, land_id: u16) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LAND_DATA_SEED, &land_id.to_le_bytes()], program_id)
}

pub fn user_profile(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_PROFILE_SEED, owner.as_ref()], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_derivation_is_deterministic() {
        assert_eq!(land_data(&colony::ID, 42), land_data(&colony::ID, 42));
        let owner = Pubkey::new_unique();
        assert_eq!(user_profile(&colony::ID, &owner), user_profile(&colony::ID, &owner));
    }

    #[test]
    fn test_land_addresses_do_not_collide() {
        let ids = [1u16, 2, 255, 256, 257, 10_000, 20_999, 21_000];
        let addresses: HashSet<Pubkey> = ids.iter().map(|id| land_data(&colony::ID, *id).0).collect();
        assert_eq!(addresses.len(), ids.len());
    }

    #[test]
    fn test_singletons_are_distinct() {
        let singletons: HashSet<Pubkey> = [
            game_state(&colony::ID).0,
            sol_vault(&colony::ID).0,
            token_vault(&colony::ID).0,
        ]
        .into_iter()
        .collect();
        assert_eq!(singletons.len(), 3);
    }

    #[test]
    fn test_program_id_scopes_addresses() {
        let other = Pubkey::new_unique();
        assert_ne!(game_state(&colony::ID).0, game_state(&other).0);
    }
}
