// payment.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::states::loan::{Loan, PaymentAsset};
use crate::errors::LoanError;
use crate::events::*;
use crate::constants::*;
use crate::gateway;

#[derive(Accounts)]
pub struct Payment<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
        constraint = loan.asset != PaymentAsset::Native @ LoanError::AssetMismatch
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [PAYMENT_VAULT_SEED, loan.key().as_ref()],
        bump,
    )]
    pub payment_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = borrower_token_account.owner == borrower.key() @ LoanError::NotOwner,
        constraint = Some(borrower_token_account.mint) == loan.asset.mint() @ LoanError::AssetMismatch
    )]
    pub borrower_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct NativePayment<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
        constraint = loan.asset == PaymentAsset::Native @ LoanError::AssetMismatch
    )]
    pub loan: Box<Account<'info, Loan>>,

    pub system_program: Program<'info, System>,
}

/// Books the payment on the loan and emits the matching events.
fn book_payment(loan: &mut Loan, payer: Pubkey, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let completed = loan.record_payment(payer, amount, now)?;

    msg!(
        "Loan {} paid {} of {}",
        loan.loan_id,
        loan.payment_complete,
        loan.total_payments_value
    );

    emit!(PaymentReceived {
        loan_id: loan.loan_id,
        payer,
        amount,
        payment_complete: loan.payment_complete,
        total_payments_value: loan.total_payments_value,
        timestamp: now,
    });

    if completed {
        emit!(LoanCompleted {
            loan_id: loan.loan_id,
            borrower: loan.borrower,
            timestamp: now,
        });
    }

    Ok(())
}

pub fn payment(ctx: Context<Payment>, amount: u64) -> Result<()> {
    let payer = ctx.accounts.borrower.key();
    book_payment(&mut ctx.accounts.loan, payer, amount)?;

    gateway::pull_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.borrower_token_account,
        &ctx.accounts.payment_vault,
        &ctx.accounts.borrower,
        amount,
    )
}

pub fn native_payment(ctx: Context<NativePayment>, amount: u64) -> Result<()> {
    let payer = ctx.accounts.borrower.key();
    book_payment(&mut ctx.accounts.loan, payer, amount)?;

    gateway::pull_lamports(
        &ctx.accounts.system_program,
        &ctx.accounts.borrower,
        &ctx.accounts.loan,
        amount,
    )
}
