// gateway.rs
//! Moves payment and collateral assets in and out of the program.
//!
//! Every handler updates its accounts first and calls one of these as its last step.

use anchor_lang::{prelude::*, system_program};
use anchor_spl::token::{self, Token, TokenAccount};
use crate::constants::LOAN_SEED;
use crate::errors::LoanError;
use crate::states::Loan;

/// Pulls `amount` tokens from an account the signer controls.
pub fn pull_tokens<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            token::Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority: authority.to_account_info(),
            }
        ),
        amount
    )
}

/// Pays `amount` tokens out of a vault owned by the loan PDA.
pub fn push_tokens<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    loan: &Account<'info, Loan>,
    amount: u64,
) -> Result<()> {
    let loan_id = loan.loan_id.to_le_bytes();
    let bump = [loan.bump];

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            token::Transfer {
                from: vault.to_account_info(),
                to: to.to_account_info(),
                authority: loan.to_account_info(),
            },
            &[&[LOAN_SEED, loan_id.as_ref(), bump.as_ref()]]
        ),
        amount
    )
}

/// Pulls lamports from the payer into the loan account.
pub fn pull_lamports<'info>(
    system_program: &Program<'info, System>,
    from: &Signer<'info>,
    loan: &Account<'info, Loan>,
    amount: u64,
) -> Result<()> {
    system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            system_program::Transfer {
                from: from.to_account_info(),
                to: loan.to_account_info(),
            }
        ),
        amount
    )
}

/// Pays lamports held by the (program owned) loan account.
pub fn push_lamports<'info>(
    loan: &Account<'info, Loan>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let loan_info = loan.to_account_info();

    let remaining = loan_info.lamports()
        .checked_sub(amount)
        .ok_or(LoanError::InsufficientFunds)?;
    let credited = to.lamports()
        .checked_add(amount)
        .ok_or(LoanError::MathOverflow)?;

    **loan_info.try_borrow_mut_lamports()? = remaining;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}
