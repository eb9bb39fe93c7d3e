// add_collateral.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::states::{collateral::Collateral, loan::{Loan, PaymentAsset}};
use crate::errors::LoanError;
use crate::events::CollateralAdded;
use crate::constants::*;
use crate::gateway;

#[derive(Accounts)]
pub struct AddCollateral<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
        constraint = loan.borrower == borrower.key() @ LoanError::Unauthorized,
        constraint = loan.asset != PaymentAsset::Native @ LoanError::AssetMismatch
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        init_if_needed,
        payer = borrower,
        space = 8 + Collateral::INIT_SPACE,
        seeds = [COLLATERAL_SEED, loan.key().as_ref()],
        bump
    )]
    pub collateral: Box<Account<'info, Collateral>>,

    pub collateral_mint: Box<Account<'info, Mint>>,

    /// Escrow for the collateral, owned by the loan PDA
    #[account(
        init_if_needed,
        payer = borrower,
        seeds = [COLLATERAL_VAULT_SEED, loan.key().as_ref()],
        bump,
        token::mint = collateral_mint,
        token::authority = loan,
    )]
    pub collateral_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = borrower_token_account.owner == borrower.key() @ LoanError::NotOwner,
        constraint = borrower_token_account.mint == collateral_mint.key() @ LoanError::CollateralAssetMismatch
    )]
    pub borrower_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn add_collateral(ctx: Context<AddCollateral>, amount: u64) -> Result<()> {
    msg!("Adding {} collateral to loan {}", amount, ctx.accounts.loan.loan_id);

    let now = Clock::get()?.unix_timestamp;
    let mint = ctx.accounts.collateral_mint.key();

    let total = ctx.accounts.collateral.deposit(
        &ctx.accounts.loan,
        mint,
        amount,
        ctx.bumps.collateral,
    )?;
    ctx.accounts.loan.has_collateral = true;

    emit!(CollateralAdded {
        loan_id: ctx.accounts.loan.loan_id,
        mint,
        amount,
        total,
        timestamp: now,
    });

    gateway::pull_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.borrower_token_account,
        &ctx.accounts.collateral_vault,
        &ctx.accounts.borrower,
        amount,
    )
}
