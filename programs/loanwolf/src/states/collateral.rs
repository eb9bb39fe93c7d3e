// states/collateral.rs
use anchor_lang::prelude::*;
use crate::errors::LoanError;
use crate::states::loan::{Loan, LoanStatus};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum CollateralState {
    Locked,
    Released,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Collateral {
    pub loan_id: u64,
    pub mint: Pubkey,
    pub amount: u64,              // still held in escrow
    pub deposited: u64,           // total ever deposited
    pub state: CollateralState,
    pub bump: u8,
}

impl Collateral {
    pub fn is_released(&self) -> bool {
        self.state == CollateralState::Released
    }

    /// Escrows `amount` more of `mint`. Only allowed before bonds exist, so buyers
    /// always see the final collateral. Returns the new escrow total.
    pub fn deposit(&mut self, loan: &Loan, mint: Pubkey, amount: u64, bump: u8) -> Result<u64> {
        require!(amount > 0, LoanError::InvalidAmount);
        require!(
            loan.status == LoanStatus::Configured,
            LoanError::AlreadyMinted
        );

        if self.deposited == 0 {
            self.loan_id = loan.loan_id;
            self.mint = mint;
            self.state = CollateralState::Locked;
            self.bump = bump;
        } else {
            require!(self.loan_id == loan.loan_id, LoanError::LoanMismatch);
            require_keys_eq!(self.mint, mint, LoanError::CollateralAssetMismatch);
        }

        let total = self.amount
            .checked_add(amount)
            .ok_or(LoanError::MathOverflow)?;
        let deposited = self.deposited
            .checked_add(amount)
            .ok_or(LoanError::MathOverflow)?;

        self.amount = total;
        self.deposited = deposited;
        Ok(total)
    }

    /// Lender claim on a delinquent loan: face value, capped at the bonds' pro-rata
    /// share of what is left in escrow.
    pub fn claim(&mut self, bond_amount: u64, bonds_outstanding: u64) -> Result<u64> {
        require!(!self.is_released(), LoanError::AlreadyReleased);

        let pro_rata = (bond_amount as u128)
            .checked_mul(self.amount as u128)
            .ok_or(LoanError::MathOverflow)?
            .checked_div(bonds_outstanding as u128)
            .ok_or(LoanError::MathOverflow)?;
        let payout = pro_rata.min(bond_amount as u128) as u64;
        require!(payout > 0, LoanError::ClaimTooSmall);

        self.amount -= payout;
        if self.amount == 0 {
            self.state = CollateralState::Released;
        }
        Ok(payout)
    }

    /// Hands whatever is left in escrow back to the borrower of a completed loan.
    pub fn release_to_borrower(&mut self, loan: &Loan, caller: Pubkey) -> Result<u64> {
        require_keys_eq!(caller, loan.borrower, LoanError::Unauthorized);
        require!(self.loan_id == loan.loan_id, LoanError::LoanMismatch);
        require!(loan.is_complete(), LoanError::NotComplete);
        require!(!self.is_released(), LoanError::AlreadyReleased);

        let amount = self.amount;
        self.amount = 0;
        self.state = CollateralState::Released;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::loan::tests::{configured_loan, UNIT};

    fn empty() -> Collateral {
        Collateral {
            loan_id: 0,
            mint: Pubkey::default(),
            amount: 0,
            deposited: 0,
            state: CollateralState::Locked,
            bump: 0,
        }
    }

    fn err(code: LoanError) -> anchor_lang::error::Error {
        code.into()
    }

    #[test]
    fn deposits_top_up_until_mint() {
        let borrower = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut loan = configured_loan(borrower);
        let mut collateral = empty();

        assert_eq!(collateral.deposit(&loan, mint, 60 * UNIT, 7).unwrap(), 60 * UNIT);
        assert_eq!(collateral.deposit(&loan, mint, 40 * UNIT, 7).unwrap(), 100 * UNIT);
        assert_eq!(collateral.loan_id, loan.loan_id);
        assert_eq!(collateral.bump, 7);

        assert_eq!(
            collateral.deposit(&loan, Pubkey::new_unique(), UNIT, 7).unwrap_err(),
            err(LoanError::CollateralAssetMismatch)
        );

        loan.mark_minted(borrower, 1).unwrap();
        assert_eq!(
            collateral.deposit(&loan, mint, UNIT, 7).unwrap_err(),
            err(LoanError::AlreadyMinted)
        );
        assert_eq!(collateral.amount, 100 * UNIT);
    }

    #[test]
    fn zero_deposit_is_rejected() {
        let loan = configured_loan(Pubkey::new_unique());
        let mut collateral = empty();
        assert_eq!(
            collateral.deposit(&loan, Pubkey::new_unique(), 0, 1).unwrap_err(),
            err(LoanError::InvalidAmount)
        );
    }

    #[test]
    fn claims_are_capped_by_pro_rata_share() {
        let mut collateral = empty();
        collateral.amount = 30 * UNIT;
        collateral.deposited = 30 * UNIT;

        // 25 of 50 outstanding bonds own half of the 30 left in escrow
        assert_eq!(collateral.claim(25 * UNIT, 50 * UNIT).unwrap(), 15 * UNIT);
        assert_eq!(collateral.claim(25 * UNIT, 25 * UNIT).unwrap(), 15 * UNIT);
        assert!(collateral.is_released());

        assert_eq!(
            collateral.claim(UNIT, UNIT).unwrap_err(),
            err(LoanError::AlreadyReleased)
        );
    }

    #[test]
    fn claim_rounding_to_zero_is_rejected() {
        let mut collateral = empty();
        collateral.amount = 10;

        // 1 of 50 outstanding bonds owns 10/50 of a unit
        assert_eq!(collateral.claim(1, 50).unwrap_err(), err(LoanError::ClaimTooSmall));
        assert_eq!(collateral.amount, 10);
        assert_eq!(collateral.claim(5, 50).unwrap(), 1);
    }

    #[test]
    fn over_collateralized_claims_pay_face_value() {
        let mut collateral = empty();
        collateral.amount = 100 * UNIT;

        assert_eq!(collateral.claim(25 * UNIT, 50 * UNIT).unwrap(), 25 * UNIT);
        assert_eq!(collateral.amount, 75 * UNIT);
        assert!(!collateral.is_released());
    }

    #[test]
    fn release_requires_borrower_completion_and_runs_once() {
        let borrower = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut loan = configured_loan(borrower);
        let mut collateral = empty();
        collateral.deposit(&loan, mint, 100 * UNIT, 1).unwrap();
        loan.mark_minted(borrower, 0).unwrap();

        assert_eq!(
            collateral.release_to_borrower(&loan, borrower).unwrap_err(),
            err(LoanError::NotComplete)
        );

        let total = loan.total_payments_value;
        loan.record_payment(borrower, total, 1).unwrap();

        assert_eq!(
            collateral.release_to_borrower(&loan, Pubkey::new_unique()).unwrap_err(),
            err(LoanError::Unauthorized)
        );
        assert_eq!(collateral.release_to_borrower(&loan, borrower).unwrap(), 100 * UNIT);
        assert_eq!(collateral.amount, 0);
        assert_eq!(
            collateral.release_to_borrower(&loan, borrower).unwrap_err(),
            err(LoanError::AlreadyReleased)
        );
    }
}
