// states/loan.rs
use anchor_lang::prelude::*;
use crate::errors::LoanError;
use crate::states::collateral::Collateral;

/// Asset the borrower repays in and lenders are paid out in.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PaymentAsset {
    /// Lamports attached directly to the payment instruction
    Native,
    /// SPL token pulled through the token program
    Token { mint: Pubkey },
}

impl PaymentAsset {
    pub fn mint(&self) -> Option<Pubkey> {
        match self {
            PaymentAsset::Native => None,
            PaymentAsset::Token { mint } => Some(*mint),
        }
    }
}

/// Lifecycle of a loan record. An unconfigured loan has no account at all.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum LoanStatus {
    Configured,
    Minted,
    Repaying,
    Complete,
}

/// Terms supplied by the borrower when a loan is configured.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoanTerms {
    pub min_payment: u64,
    pub payment_period: i64,
    pub principal: u64,
    pub interest_rate_inverse: u64,
    pub accrual_period: i64,
}

impl LoanTerms {
    pub fn validate(&self) -> Result<()> {
        require!(self.principal > 0, LoanError::InvalidTerms);
        require!(self.min_payment > 0, LoanError::InvalidTerms);
        require!(self.interest_rate_inverse > 0, LoanError::InvalidTerms);
        require!(
            self.payment_period > 0 && self.accrual_period > 0,
            LoanError::InvalidTerms
        );
        Ok(())
    }
}

/// Where a redemption was paid from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payout {
    Payment(u64),
    Collateral(u64),
}

impl Payout {
    pub fn amount(&self) -> u64 {
        match self {
            Payout::Payment(amount) | Payout::Collateral(amount) => *amount,
        }
    }

    pub fn is_collateral(&self) -> bool {
        matches!(self, Payout::Collateral(_))
    }
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Loan {
    // Identity
    pub loan_id: u64,
    pub borrower: Pubkey,
    pub asset: PaymentAsset,
    pub status: LoanStatus,

    // Terms, fixed at configuration
    pub min_payment: u64,
    pub payment_period: i64,              // seconds between scheduled payments
    pub principal: u64,
    pub interest_rate_inverse: u64,       // 1 / rate, e.g. 8 for 12%
    pub accrual_period: i64,              // seconds per staking interest period

    // Payment tracking
    pub total_payments_value: u64,        // principal + scheduled interest, fixed at mint
    pub payment_complete: u64,            // cumulative amount paid in
    pub paid_out: u64,                    // payments already handed to redeeming lenders
    pub schedule_start: i64,              // mint timestamp
    pub last_payment_timestamp: i64,

    // Bond supply
    pub bonds_outstanding: u64,           // minted + interest issued - burned
    pub interest_minted: u64,
    pub bonds_burned: u64,

    pub has_collateral: bool,
    pub configured_at: i64,
    pub bump: u8,
}

impl Loan {
    pub fn new(
        loan_id: u64,
        borrower: Pubkey,
        asset: PaymentAsset,
        terms: LoanTerms,
        now: i64,
        bump: u8,
    ) -> Result<Self> {
        terms.validate()?;

        Ok(Self {
            loan_id,
            borrower,
            asset,
            status: LoanStatus::Configured,
            min_payment: terms.min_payment,
            payment_period: terms.payment_period,
            principal: terms.principal,
            interest_rate_inverse: terms.interest_rate_inverse,
            accrual_period: terms.accrual_period,
            total_payments_value: 0,
            payment_complete: 0,
            paid_out: 0,
            schedule_start: 0,
            last_payment_timestamp: now,
            bonds_outstanding: 0,
            interest_minted: 0,
            bonds_burned: 0,
            has_collateral: false,
            configured_at: now,
            bump,
        })
    }

    pub fn is_minted(&self) -> bool {
        self.status != LoanStatus::Configured
    }

    pub fn is_complete(&self) -> bool {
        self.is_minted() && self.payment_complete >= self.total_payments_value
    }

    /// Configured -> Minted. Only the borrower may issue the bonds, and only once.
    /// Returns the number of bonds to credit to the borrower.
    pub fn mark_minted(&mut self, caller: Pubkey, now: i64) -> Result<u64> {
        require_keys_eq!(caller, self.borrower, LoanError::Unauthorized);
        require!(
            self.status == LoanStatus::Configured,
            LoanError::AlreadyMinted
        );

        let scheduled_interest = self.principal
            .checked_div(self.interest_rate_inverse)
            .ok_or(LoanError::MathOverflow)?;
        let total_payments_value = self.principal
            .checked_add(scheduled_interest)
            .ok_or(LoanError::MathOverflow)?;

        self.total_payments_value = total_payments_value;
        self.bonds_outstanding = self.principal;
        self.schedule_start = now;
        self.last_payment_timestamp = now;
        self.status = LoanStatus::Minted;

        Ok(self.principal)
    }

    /// Cumulative amount the schedule expects to have been paid by `now`.
    /// One `min_payment` falls due at every full payment period since mint.
    pub fn expected_paid(&self, now: i64) -> u64 {
        if !self.is_minted() {
            return 0;
        }
        let elapsed = now.saturating_sub(self.schedule_start).max(0) as u64;
        let deadlines = elapsed / self.payment_period as u64;

        self.min_payment
            .saturating_mul(deadlines)
            .min(self.total_payments_value)
    }

    pub fn is_delinquent(&self, now: i64) -> bool {
        if !self.is_minted() || self.is_complete() {
            return false;
        }
        let grace_ends = self.last_payment_timestamp.saturating_add(self.payment_period);

        now > grace_ends && self.payment_complete < self.expected_paid(now)
    }

    /// Records a payment from `payer`. Returns true when it completes the loan.
    pub fn record_payment(&mut self, payer: Pubkey, amount: u64, now: i64) -> Result<bool> {
        require_keys_eq!(payer, self.borrower, LoanError::Unauthorized);
        require!(amount > 0, LoanError::InvalidAmount);
        require!(self.is_minted(), LoanError::NotMinted);

        let payment_complete = self.payment_complete
            .checked_add(amount)
            .ok_or(LoanError::MathOverflow)?;
        require!(
            payment_complete <= self.total_payments_value,
            LoanError::OverPayment
        );

        self.payment_complete = payment_complete;
        self.last_payment_timestamp = now.max(self.last_payment_timestamp);
        self.status = if payment_complete == self.total_payments_value {
            LoanStatus::Complete
        } else {
            LoanStatus::Repaying
        };

        Ok(self.status == LoanStatus::Complete)
    }

    /// Interest earned by `amount` bonds staked since `stake_start_time`.
    ///
    /// `amount * elapsed / (accrual_period * interest_rate_inverse)` in u128 with a
    /// single truncating division.
    pub fn accrued_interest(&self, amount: u64, stake_start_time: i64, now: i64) -> Result<u64> {
        let elapsed = now.saturating_sub(stake_start_time).max(0) as u128;

        let divisor = (self.accrual_period as u128)
            .checked_mul(self.interest_rate_inverse as u128)
            .ok_or(LoanError::MathOverflow)?;

        let interest = (amount as u128)
            .checked_mul(elapsed)
            .ok_or(LoanError::MathOverflow)?
            .checked_div(divisor)
            .ok_or(LoanError::MathOverflow)?;

        u64::try_from(interest).map_err(|_| error!(LoanError::MathOverflow))
    }

    /// Tracks bonds issued as staking interest.
    pub fn issue_interest(&mut self, amount: u64) -> Result<()> {
        let interest_minted = self.interest_minted
            .checked_add(amount)
            .ok_or(LoanError::MathOverflow)?;
        let bonds_outstanding = self.bonds_outstanding
            .checked_add(amount)
            .ok_or(LoanError::MathOverflow)?;

        self.interest_minted = interest_minted;
        self.bonds_outstanding = bonds_outstanding;
        Ok(())
    }

    /// Burns `bond_amount` redeemed bonds and decides what they are paid with.
    ///
    /// A delinquent loan with posted collateral pays out of the collateral escrow,
    /// pro-rata over the bonds still outstanding. Otherwise bonds are redeemed at
    /// face value against payments collected and not yet paid out.
    pub fn redeem(
        &mut self,
        bond_amount: u64,
        now: i64,
        collateral: Option<&mut Collateral>,
    ) -> Result<Payout> {
        require!(bond_amount > 0, LoanError::InvalidAmount);
        require!(self.is_minted(), LoanError::NotMinted);

        let bonds_outstanding = self.bonds_outstanding
            .checked_sub(bond_amount)
            .ok_or(LoanError::InsufficientBalance)?;
        let bonds_burned = self.bonds_burned
            .checked_add(bond_amount)
            .ok_or(LoanError::MathOverflow)?;

        let payout = if self.has_collateral && self.is_delinquent(now) {
            let collateral = collateral.ok_or(LoanError::MissingCollateral)?;
            require!(
                collateral.loan_id == self.loan_id,
                LoanError::LoanMismatch
            );
            Payout::Collateral(collateral.claim(bond_amount, self.bonds_outstanding)?)
        } else {
            let available = self.payment_complete
                .checked_sub(self.paid_out)
                .ok_or(LoanError::MathOverflow)?;
            require!(bond_amount <= available, LoanError::InsufficientFunds);

            self.paid_out = self.paid_out
                .checked_add(bond_amount)
                .ok_or(LoanError::MathOverflow)?;
            Payout::Payment(bond_amount)
        };

        self.bonds_outstanding = bonds_outstanding;
        self.bonds_burned = bonds_burned;

        Ok(payout)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::states::collateral::CollateralState;

    pub const UNIT: u64 = 1_000_000;

    pub fn scenario_terms() -> LoanTerms {
        LoanTerms {
            min_payment: 20 * UNIT,
            payment_period: 5,
            principal: 50 * UNIT,
            interest_rate_inverse: 8, // floor(100 / 12)
            accrual_period: 10,
        }
    }

    pub fn configured_loan(borrower: Pubkey) -> Loan {
        Loan::new(1, borrower, PaymentAsset::Native, scenario_terms(), 0, 255).unwrap()
    }

    pub fn minted_loan(borrower: Pubkey, now: i64) -> Loan {
        let mut loan = configured_loan(borrower);
        loan.mark_minted(borrower, now).unwrap();
        loan
    }

    fn err(code: LoanError) -> anchor_lang::error::Error {
        code.into()
    }

    #[test]
    fn rejects_degenerate_terms() {
        let borrower = Pubkey::new_unique();
        let cases = [
            LoanTerms { principal: 0, ..scenario_terms() },
            LoanTerms { min_payment: 0, ..scenario_terms() },
            LoanTerms { interest_rate_inverse: 0, ..scenario_terms() },
            LoanTerms { payment_period: 0, ..scenario_terms() },
            LoanTerms { accrual_period: -10, ..scenario_terms() },
        ];

        for terms in cases {
            let result = Loan::new(1, borrower, PaymentAsset::Native, terms, 0, 255);
            assert_eq!(result.unwrap_err(), err(LoanError::InvalidTerms));
        }
    }

    #[test]
    fn only_borrower_mints_and_only_once() {
        let borrower = Pubkey::new_unique();
        let hacker = Pubkey::new_unique();
        let mut loan = configured_loan(borrower);

        assert_eq!(
            loan.mark_minted(hacker, 10).unwrap_err(),
            err(LoanError::Unauthorized)
        );
        assert_eq!(loan.status, LoanStatus::Configured);

        assert_eq!(loan.mark_minted(borrower, 10).unwrap(), 50 * UNIT);
        assert_eq!(loan.status, LoanStatus::Minted);
        assert_eq!(loan.total_payments_value, 50 * UNIT + 50 * UNIT / 8);
        assert_eq!(loan.bonds_outstanding, 50 * UNIT);
        assert_eq!(loan.schedule_start, 10);

        assert_eq!(
            loan.mark_minted(borrower, 11).unwrap_err(),
            err(LoanError::AlreadyMinted)
        );
        assert_eq!(loan.schedule_start, 10);
    }

    #[test]
    fn payments_accumulate_and_complete() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);
        let total = loan.total_payments_value;

        assert!(!loan.record_payment(borrower, 20 * UNIT, 3).unwrap());
        assert_eq!(loan.status, LoanStatus::Repaying);
        assert_eq!(loan.last_payment_timestamp, 3);

        assert_eq!(
            loan.record_payment(borrower, total, 4).unwrap_err(),
            err(LoanError::OverPayment)
        );
        assert_eq!(loan.payment_complete, 20 * UNIT);
        assert_eq!(loan.last_payment_timestamp, 3);

        assert!(loan.record_payment(borrower, total - 20 * UNIT, 4).unwrap());
        assert!(loan.is_complete());
        assert_eq!(loan.status, LoanStatus::Complete);

        assert_eq!(
            loan.record_payment(borrower, 1, 5).unwrap_err(),
            err(LoanError::OverPayment)
        );
    }

    #[test]
    fn payment_checks_caller_amount_and_mint() {
        let borrower = Pubkey::new_unique();
        let mut loan = configured_loan(borrower);

        assert_eq!(
            loan.record_payment(borrower, UNIT, 1).unwrap_err(),
            err(LoanError::NotMinted)
        );

        loan.mark_minted(borrower, 1).unwrap();
        assert_eq!(
            loan.record_payment(Pubkey::new_unique(), UNIT, 2).unwrap_err(),
            err(LoanError::Unauthorized)
        );
        assert_eq!(
            loan.record_payment(borrower, 0, 2).unwrap_err(),
            err(LoanError::InvalidAmount)
        );
    }

    #[test]
    fn delinquency_follows_schedule() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 100);

        assert!(!loan.is_delinquent(100));
        assert!(!loan.is_delinquent(105));
        assert!(loan.is_delinquent(106));

        loan.record_payment(borrower, 20 * UNIT, 103).unwrap();
        assert!(!loan.is_delinquent(106));
        assert!(!loan.is_delinquent(109));
        // second deadline at 110 with only one installment paid
        assert!(loan.is_delinquent(110));

        loan.record_payment(borrower, 20 * UNIT, 110).unwrap();
        assert!(!loan.is_delinquent(110));
        assert!(!loan.is_delinquent(115));
    }

    #[test]
    fn delinquency_handles_repeated_and_stale_timestamps() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 50);

        loan.record_payment(borrower, 20 * UNIT, 50).unwrap();
        loan.record_payment(borrower, 20 * UNIT, 50).unwrap();
        assert!(!loan.is_delinquent(50));
        assert!(!loan.is_delinquent(40));
        assert_eq!(loan.expected_paid(40), 0);
        assert_eq!(loan.last_payment_timestamp, 50);
    }

    #[test]
    fn unminted_and_complete_loans_are_never_delinquent() {
        let borrower = Pubkey::new_unique();
        let loan = configured_loan(borrower);
        assert!(!loan.is_delinquent(1_000));

        let mut loan = minted_loan(borrower, 0);
        let total = loan.total_payments_value;
        loan.record_payment(borrower, total, 1).unwrap();
        assert!(!loan.is_delinquent(1_000_000));
    }

    #[test]
    fn expected_paid_is_capped_by_total() {
        let borrower = Pubkey::new_unique();
        let loan = minted_loan(borrower, 0);
        assert_eq!(loan.expected_paid(4), 0);
        assert_eq!(loan.expected_paid(5), 20 * UNIT);
        assert_eq!(loan.expected_paid(10_000), loan.total_payments_value);
    }

    #[test]
    fn accrual_truncates_once() {
        let borrower = Pubkey::new_unique();
        let loan = minted_loan(borrower, 0);

        assert_eq!(loan.accrued_interest(25 * UNIT, 0, 0).unwrap(), 0);
        assert_eq!(loan.accrued_interest(25 * UNIT, 0, 9).unwrap(), 2_812_500);
        assert_eq!(loan.accrued_interest(25 * UNIT, 0, 10).unwrap(), 3_125_000);
        // 25 * 10 / 80 = 3.125
        assert_eq!(loan.accrued_interest(25, 0, 10).unwrap(), 3);
        // clock reading behind the stake time accrues nothing
        assert_eq!(loan.accrued_interest(25 * UNIT, 20, 10).unwrap(), 0);
    }

    #[test]
    fn accrual_overflow_is_reported() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);
        loan.accrual_period = 1;
        loan.interest_rate_inverse = 1;

        assert_eq!(
            loan.accrued_interest(u64::MAX, 0, 2).unwrap_err(),
            err(LoanError::MathOverflow)
        );
    }

    #[test]
    fn redeem_pays_collected_payments_at_face_value() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);

        assert_eq!(
            loan.redeem(20 * UNIT, 1, None).unwrap_err(),
            err(LoanError::InsufficientFunds)
        );

        loan.record_payment(borrower, 20 * UNIT, 2).unwrap();
        assert_eq!(loan.redeem(20 * UNIT, 3, None).unwrap(), Payout::Payment(20 * UNIT));
        assert_eq!(loan.paid_out, 20 * UNIT);
        assert_eq!(loan.bonds_outstanding, 30 * UNIT);
        assert_eq!(loan.bonds_burned, 20 * UNIT);

        assert_eq!(
            loan.redeem(1, 3, None).unwrap_err(),
            err(LoanError::InsufficientFunds)
        );
        assert_eq!(loan.bonds_outstanding, 30 * UNIT);
    }

    #[test]
    fn delinquent_redeem_claims_collateral_instead_of_payments() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);
        loan.has_collateral = true;
        let mut collateral = Collateral {
            loan_id: loan.loan_id,
            mint: Pubkey::new_unique(),
            amount: 100 * UNIT,
            deposited: 100 * UNIT,
            state: CollateralState::Locked,
            bump: 254,
        };

        assert!(loan.is_delinquent(6));
        assert_eq!(
            loan.redeem(25 * UNIT, 6, None).unwrap_err(),
            err(LoanError::MissingCollateral)
        );

        let payout = loan.redeem(25 * UNIT, 6, Some(&mut collateral)).unwrap();
        assert_eq!(payout, Payout::Collateral(25 * UNIT));
        assert_eq!(collateral.amount, 75 * UNIT);
        assert_eq!(loan.paid_out, 0);
        assert_eq!(loan.bonds_outstanding, 25 * UNIT);
    }

    #[test]
    fn redeem_cannot_burn_more_than_outstanding() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);
        let total = loan.total_payments_value;
        loan.record_payment(borrower, total, 1).unwrap();

        assert_eq!(
            loan.redeem(50 * UNIT + 1, 2, None).unwrap_err(),
            err(LoanError::InsufficientBalance)
        );
        assert_eq!(loan.paid_out, 0);
    }

    #[test]
    fn any_payment_restarts_the_grace_window() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);

        loan.record_payment(borrower, 1, 10).unwrap();
        assert!(loan.payment_complete < loan.expected_paid(14));
        assert!(!loan.is_delinquent(14));
        assert!(loan.is_delinquent(16));
    }

    #[test]
    fn interest_issuance_grows_supply() {
        let borrower = Pubkey::new_unique();
        let mut loan = minted_loan(borrower, 0);
        loan.issue_interest(3_125_000).unwrap();
        assert_eq!(loan.interest_minted, 3_125_000);
        assert_eq!(loan.bonds_outstanding, 50 * UNIT + 3_125_000);
    }
}
