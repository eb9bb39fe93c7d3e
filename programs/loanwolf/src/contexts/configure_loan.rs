// configure_loan.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::states::{
    registry::{BorrowerLoans, RegistryConfig},
    loan::{Loan, LoanTerms, PaymentAsset},
};
use crate::events::LoanConfigured;
use crate::constants::*;

/// ConfigureLoan opens a token-denominated loan. Payments and payouts go
/// through a vault owned by the loan PDA.
#[derive(Accounts)]
pub struct ConfigureLoan<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, RegistryConfig>>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + BorrowerLoans::INIT_SPACE,
        seeds = [BORROWER_SEED, borrower.key().as_ref()],
        bump
    )]
    pub borrower_loans: Box<Account<'info, BorrowerLoans>>,

    /// Seeds: ["loan", next loan id]
    #[account(
        init,
        payer = borrower,
        space = 8 + Loan::INIT_SPACE,
        seeds = [LOAN_SEED, registry.next_loan_id.to_le_bytes().as_ref()],
        bump
    )]
    pub loan: Box<Account<'info, Loan>>,

    pub payment_mint: Box<Account<'info, Mint>>,

    /// Holds payments until lenders redeem their bonds
    #[account(
        init,
        payer = borrower,
        seeds = [PAYMENT_VAULT_SEED, loan.key().as_ref()],
        bump,
        token::mint = payment_mint,
        token::authority = loan,
    )]
    pub payment_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// ConfigureNativeLoan opens a lamport-denominated loan. The loan account itself
/// holds the payments; there is no collateral phase.
#[derive(Accounts)]
pub struct ConfigureNativeLoan<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, RegistryConfig>>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + BorrowerLoans::INIT_SPACE,
        seeds = [BORROWER_SEED, borrower.key().as_ref()],
        bump
    )]
    pub borrower_loans: Box<Account<'info, BorrowerLoans>>,

    #[account(
        init,
        payer = borrower,
        space = 8 + Loan::INIT_SPACE,
        seeds = [LOAN_SEED, registry.next_loan_id.to_le_bytes().as_ref()],
        bump
    )]
    pub loan: Box<Account<'info, Loan>>,

    pub system_program: Program<'info, System>,
}

/// Assigns the id, records it in the borrower's sequence and writes the loan.
fn open_loan(
    registry: &mut RegistryConfig,
    borrower_loans: &mut BorrowerLoans,
    loan: &mut Account<Loan>,
    borrower: Pubkey,
    asset: PaymentAsset,
    terms: LoanTerms,
    bumps: (u8, u8),
) -> Result<(u64, u64)> {
    let now = Clock::get()?.unix_timestamp;
    let (loan_bump, borrower_loans_bump) = bumps;

    let loan_id = registry.assign_loan_id()?;
    loan.set_inner(Loan::new(loan_id, borrower, asset, terms, now, loan_bump)?);
    let sequence = borrower_loans.record(borrower, loan_id, borrower_loans_bump)?;

    msg!("Loan {} configured as borrower loan #{}", loan_id, sequence);

    emit!(LoanConfigured {
        loan_id,
        borrower,
        payment_mint: asset.mint(),
        principal: terms.principal,
        min_payment: terms.min_payment,
        payment_period: terms.payment_period,
        interest_rate_inverse: terms.interest_rate_inverse,
        accrual_period: terms.accrual_period,
        timestamp: now,
    });

    Ok((loan_id, sequence))
}

pub fn configure_loan(ctx: Context<ConfigureLoan>, terms: LoanTerms) -> Result<()> {
    msg!("Configuring token loan for {}", ctx.accounts.borrower.key());

    let asset = PaymentAsset::Token { mint: ctx.accounts.payment_mint.key() };
    let accounts = &mut *ctx.accounts;

    open_loan(
        &mut accounts.registry,
        &mut accounts.borrower_loans,
        &mut accounts.loan,
        accounts.borrower.key(),
        asset,
        terms,
        (ctx.bumps.loan, ctx.bumps.borrower_loans),
    )?;

    Ok(())
}

pub fn configure_native_loan(ctx: Context<ConfigureNativeLoan>, terms: LoanTerms) -> Result<()> {
    msg!("Configuring native loan for {}", ctx.accounts.borrower.key());

    let accounts = &mut *ctx.accounts;

    open_loan(
        &mut accounts.registry,
        &mut accounts.borrower_loans,
        &mut accounts.loan,
        accounts.borrower.key(),
        PaymentAsset::Native,
        terms,
        (ctx.bumps.loan, ctx.bumps.borrower_loans),
    )?;

    Ok(())
}
