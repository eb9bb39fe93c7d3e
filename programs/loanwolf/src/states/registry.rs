// states/registry.rs
use anchor_lang::prelude::*;
use crate::constants::*;
use crate::errors::LoanError;

#[account]
#[derive(InitSpace, Debug)]
pub struct RegistryConfig {
    pub admin: Pubkey,
    #[max_len(128)]
    pub uri: String,                     // bond metadata template, `{id}` is replaced per loan
    pub next_loan_id: u64,               // loan ids start at 1
    pub loan_count: u64,
    pub created_at: i64,
    pub bump: u8,
    pub reserved: [u8; 32],
}

impl RegistryConfig {
    pub fn validate_uri(uri: &str) -> Result<()> {
        require!(
            !uri.is_empty() && uri.len() <= MAX_URI_LEN,
            LoanError::InvalidUri
        );
        Ok(())
    }

    /// Hands out the id of the next loan. Its account address is derived from
    /// `next_loan_id` before this is called.
    pub fn assign_loan_id(&mut self) -> Result<u64> {
        let loan_id = self.next_loan_id;
        self.next_loan_id = loan_id
            .checked_add(1)
            .ok_or(LoanError::MathOverflow)?;
        self.loan_count = self.loan_count
            .checked_add(1)
            .ok_or(LoanError::MathOverflow)?;
        Ok(loan_id)
    }

    /// Metadata URI for one loan's bonds: the id as 64 lowercase hex digits.
    /// Id 0 never names a loan and returns the raw template.
    pub fn bond_uri(&self, loan_id: u64) -> String {
        if loan_id == 0 {
            return self.uri.clone();
        }
        let id = format!("{:0width$x}", loan_id, width = URI_ID_HEX_WIDTH);
        self.uri.replace(URI_ID_PLACEHOLDER, &id)
    }
}

/// Per-borrower sequence of loan ids, `loan_ids[n]` is the borrower's n-th loan.
#[account]
#[derive(InitSpace, Debug)]
pub struct BorrowerLoans {
    pub borrower: Pubkey,
    #[max_len(32)]
    pub loan_ids: Vec<u64>,
    pub bump: u8,
}

impl BorrowerLoans {
    /// Appends `loan_id`. Returns its position in the borrower's sequence.
    pub fn record(&mut self, borrower: Pubkey, loan_id: u64, bump: u8) -> Result<u64> {
        if self.loan_ids.is_empty() {
            self.borrower = borrower;
            self.bump = bump;
        }
        require_keys_eq!(self.borrower, borrower, LoanError::Unauthorized);
        require!(
            self.loan_ids.len() < MAX_LOANS_PER_BORROWER,
            LoanError::TooManyLoans
        );

        self.loan_ids.push(loan_id);
        Ok((self.loan_ids.len() - 1) as u64)
    }

    pub fn loan_id_at(&self, n: u64) -> Result<u64> {
        usize::try_from(n)
            .ok()
            .and_then(|n| self.loan_ids.get(n).copied())
            .ok_or_else(|| error!(LoanError::InvalidIndex))
    }
}
