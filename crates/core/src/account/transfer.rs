//! Transfer validation rules.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors rejecting an account-to-account transfer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    /// Origin and destination are the same account.
    #[error("origin and destination accounts must differ")]
    SameAccount,

    /// Amount is zero or negative.
    #[error("transfer amount must be greater than zero")]
    NonPositiveAmount,

    /// Origin account does not hold enough funds.
    #[error("insufficient balance: {available} available")]
    InsufficientBalance {
        /// Derived balance of the origin account.
        available: Decimal,
    },
}

/// Validates a transfer between two accounts owned by the same user.
///
/// Ownership of both accounts is checked by the caller against storage;
/// this function covers the pure rules.
///
/// # Errors
///
/// Returns the first violated rule: same account, non-positive amount, or
/// insufficient derived balance in the origin account.
pub fn validate_transfer(
    from_account: Uuid,
    to_account: Uuid,
    amount: Decimal,
    available: Decimal,
) -> Result<(), TransferError> {
    if from_account == to_account {
        return Err(TransferError::SameAccount);
    }
    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount);
    }
    if available < amount {
        return Err(TransferError::InsufficientBalance { available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_same_account_rejected() {
        let id = Uuid::new_v4();
        assert_eq!(
            validate_transfer(id, id, dec!(10), dec!(100)),
            Err(TransferError::SameAccount)
        );
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let result = validate_transfer(Uuid::new_v4(), Uuid::new_v4(), dec!(0), dec!(100));
        assert_eq!(result, Err(TransferError::NonPositiveAmount));

        let result = validate_transfer(Uuid::new_v4(), Uuid::new_v4(), dec!(-5), dec!(100));
        assert_eq!(result, Err(TransferError::NonPositiveAmount));
    }

    #[test]
    fn test_insufficient_balance_rejected() {
        let result = validate_transfer(Uuid::new_v4(), Uuid::new_v4(), dec!(150), dec!(100));
        assert_eq!(
            result,
            Err(TransferError::InsufficientBalance {
                available: dec!(100)
            })
        );
    }

    #[test]
    fn test_valid_transfer_accepted() {
        assert!(validate_transfer(Uuid::new_v4(), Uuid::new_v4(), dec!(100), dec!(100)).is_ok());
    }
}
