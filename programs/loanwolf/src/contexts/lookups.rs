// lookups.rs
use anchor_lang::prelude::*;
use crate::states::{
    collateral::Collateral,
    loan::Loan,
    registry::{BorrowerLoans, RegistryConfig},
};
use crate::constants::*;

#[derive(Accounts)]
pub struct LoanLookup<'info> {
    #[account(
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,
}

#[derive(Accounts)]
pub struct CollateralLookup<'info> {
    #[account(
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        seeds = [COLLATERAL_SEED, loan.key().as_ref()],
        bump = collateral.bump,
    )]
    pub collateral: Box<Account<'info, Collateral>>,
}

#[derive(Accounts)]
pub struct LoanIdAt<'info> {
    #[account(
        seeds = [BORROWER_SEED, borrower_loans.borrower.as_ref()],
        bump = borrower_loans.bump,
    )]
    pub borrower_loans: Box<Account<'info, BorrowerLoans>>,
}

#[derive(Accounts)]
pub struct BondUri<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Box<Account<'info, RegistryConfig>>,
}

pub fn loan_lookup(ctx: Context<LoanLookup>) -> Result<Loan> {
    Ok(Loan::clone(&ctx.accounts.loan))
}

pub fn collateral_lookup(ctx: Context<CollateralLookup>) -> Result<Collateral> {
    Ok(Collateral::clone(&ctx.accounts.collateral))
}

pub fn loan_id_at(ctx: Context<LoanIdAt>, n: u64) -> Result<u64> {
    ctx.accounts.borrower_loans.loan_id_at(n)
}

pub fn is_delinquent(ctx: Context<LoanLookup>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.loan.is_delinquent(now))
}

pub fn is_complete(ctx: Context<LoanLookup>) -> Result<bool> {
    Ok(ctx.accounts.loan.is_complete())
}

pub fn bond_uri(ctx: Context<BondUri>, loan_id: u64) -> Result<String> {
    Ok(ctx.accounts.registry.bond_uri(loan_id))
}
