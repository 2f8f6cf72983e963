//! Account balance derivation.
//!
//! Stored balances are treated as a cache; the authoritative balance is
//! derived from the account's opening balance and its transaction history.

use rust_decimal::Decimal;

/// Aggregated inputs for deriving an account balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceComponents {
    /// Opening balance recorded when the account was created.
    pub opening_balance: Decimal,
    /// Balance column as currently stored.
    pub stored_balance: Decimal,
    /// Sum of incomes credited to the account.
    pub incomes: Decimal,
    /// Sum of expenses debited from the account.
    pub expenses: Decimal,
    /// Sum of transfers received by the account.
    pub transfers_in: Decimal,
    /// Sum of transfers sent from the account.
    pub transfers_out: Decimal,
}

/// Opening balance to use for derivation.
///
/// Accounts created before the opening-balance column existed have a zero
/// opening balance; for those the stored balance stands in.
#[must_use]
pub fn effective_opening(opening_balance: Decimal, stored_balance: Decimal) -> Decimal {
    if opening_balance.is_zero() {
        stored_balance
    } else {
        opening_balance
    }
}

/// Derives the authoritative balance from the account's history:
/// opening + incomes + transfers in - expenses - transfers out.
#[must_use]
pub fn derived_balance(components: &BalanceComponents) -> Decimal {
    let opening = effective_opening(components.opening_balance, components.stored_balance);
    (opening + components.incomes + components.transfers_in)
        - (components.expenses + components.transfers_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_effective_opening_prefers_opening() {
        assert_eq!(effective_opening(dec!(500), dec!(900)), dec!(500));
    }

    #[test]
    fn test_effective_opening_falls_back_to_stored() {
        assert_eq!(effective_opening(dec!(0), dec!(900)), dec!(900));
    }

    #[test]
    fn test_derived_balance() {
        let components = BalanceComponents {
            opening_balance: dec!(1000),
            stored_balance: dec!(0),
            incomes: dec!(3000),
            expenses: dec!(1200),
            transfers_in: dec!(250),
            transfers_out: dec!(400),
        };
        assert_eq!(derived_balance(&components), dec!(2650));
    }

    #[test]
    fn test_derived_balance_can_go_negative() {
        let components = BalanceComponents {
            opening_balance: dec!(100),
            expenses: dec!(350),
            ..Default::default()
        };
        assert_eq!(derived_balance(&components), dec!(-250));
    }
}
