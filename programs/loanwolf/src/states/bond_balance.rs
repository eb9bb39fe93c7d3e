// states/bond_balance.rs
use anchor_lang::prelude::*;
use crate::errors::LoanError;

/// Spendable bonds of one owner for one loan. Staked bonds are not counted here.
#[account]
#[derive(InitSpace, Debug)]
pub struct BondBalance {
    pub owner: Pubkey,
    pub loan_id: u64,
    pub amount: u64,
    pub bound: bool,
    pub bump: u8,
}

impl BondBalance {
    /// Binds a freshly created balance account to its owner and loan.
    /// A no-op for accounts that are already bound.
    pub fn open(&mut self, owner: Pubkey, loan_id: u64, bump: u8) {
        if !self.bound {
            self.owner = owner;
            self.loan_id = loan_id;
            self.amount = 0;
            self.bound = true;
            self.bump = bump;
        }
    }

    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.amount = self.amount
            .checked_add(amount)
            .ok_or(LoanError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<()> {
        require!(self.amount >= amount, LoanError::InsufficientBalance);
        self.amount -= amount;
        Ok(())
    }

    /// Moves `amount` bonds between two holders of the same loan.
    pub fn transfer(from: &mut BondBalance, to: &mut BondBalance, amount: u64) -> Result<()> {
        require!(amount > 0, LoanError::InvalidAmount);
        require!(from.loan_id == to.loan_id, LoanError::LoanMismatch);
        require_keys_neq!(from.owner, to.owner, LoanError::SelfTransfer);

        from.debit(amount)?;
        to.credit(amount)
    }
}

/// `set_approval_for_all` record: lets `operator` move any of `owner`'s bonds.
#[account]
#[derive(InitSpace, Debug)]
pub struct OperatorApproval {
    pub owner: Pubkey,
    pub operator: Pubkey,
    pub approved: bool,
    pub bump: u8,
}

impl OperatorApproval {
    pub fn authorize(&self, owner: Pubkey, operator: Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, owner, LoanError::Unauthorized);
        require_keys_eq!(self.operator, operator, LoanError::Unauthorized);
        require!(self.approved, LoanError::Unauthorized);
        Ok(())
    }
}
