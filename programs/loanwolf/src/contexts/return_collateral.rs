// return_collateral.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::states::{collateral::Collateral, loan::Loan};
use crate::errors::LoanError;
use crate::events::CollateralReturned;
use crate::constants::*;
use crate::gateway;

#[derive(Accounts)]
pub struct ReturnCollateral<'info> {
    #[account(mut)]
    pub borrower: Signer<'info>,

    #[account(
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [COLLATERAL_SEED, loan.key().as_ref()],
        bump = collateral.bump,
    )]
    pub collateral: Box<Account<'info, Collateral>>,

    #[account(
        mut,
        seeds = [COLLATERAL_VAULT_SEED, loan.key().as_ref()],
        bump,
    )]
    pub collateral_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = borrower_token_account.owner == borrower.key() @ LoanError::NotOwner,
        constraint = borrower_token_account.mint == collateral.mint @ LoanError::CollateralAssetMismatch
    )]
    pub borrower_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn return_collateral(ctx: Context<ReturnCollateral>) -> Result<()> {
    msg!("Returning collateral of loan {}", ctx.accounts.loan.loan_id);

    let borrower = ctx.accounts.borrower.key();
    let amount = ctx.accounts.collateral.release_to_borrower(&ctx.accounts.loan, borrower)?;

    emit!(CollateralReturned {
        loan_id: ctx.accounts.loan.loan_id,
        borrower,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    gateway::push_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.collateral_vault,
        &ctx.accounts.borrower_token_account,
        &ctx.accounts.loan,
        amount,
    )
}
