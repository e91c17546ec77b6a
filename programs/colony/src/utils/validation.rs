use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::*;

/// True when `land_id` is inside the tradable range
pub fn is_valid_land_id(land_id: u16) -> bool {
    (MIN_LAND_ID..=MAX_LAND_ID).contains(&land_id)
}

/// Validate land id range
pub fn validate_land_id(land_id: u16) -> Result<()> {
    if !is_valid_land_id(land_id) {
        return Err(ColonyError::InvalidLandId.into());
    }
    Ok(())
}

/// Validate the caller holds at least `amount` tokens
pub fn validate_balance(balance: u64, amount: u64) -> Result<()> {
    if balance < amount {
        return Err(ColonyError::InsufficientBalance.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_land_id_bounds() {
        assert!(!is_valid_land_id(0));
        assert!(is_valid_land_id(1));
        assert!(is_valid_land_id(21_000));
        assert!(!is_valid_land_id(21_001));
        assert_eq!(validate_land_id(0).unwrap_err(), ColonyError::InvalidLandId.into());
    }

    #[test]
    fn test_balance() {
        assert!(validate_balance(10, 10).is_ok());
        assert_eq!(
            validate_balance(9, 10).unwrap_err(),
            ColonyError::InsufficientBalance.into()
        );
    }
}
