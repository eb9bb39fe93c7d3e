// withdrawl.rs
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::states::{
    bond_balance::BondBalance,
    collateral::Collateral,
    loan::{Loan, PaymentAsset, Payout},
};
use crate::errors::LoanError;
use crate::events::BondsRedeemed;
use crate::constants::*;
use crate::gateway;

/// Redeems bonds of a token loan. The collateral accounts are only needed once
/// the loan is delinquent.
#[derive(Accounts)]
pub struct Withdrawl<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
        constraint = loan.asset != PaymentAsset::Native @ LoanError::AssetMismatch
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [
            BOND_BALANCE_SEED,
            loan.loan_id.to_le_bytes().as_ref(),
            holder.key().as_ref()
        ],
        bump = holder_balance.bump,
        constraint = holder_balance.owner == holder.key() @ LoanError::NotOwner
    )]
    pub holder_balance: Box<Account<'info, BondBalance>>,

    #[account(
        mut,
        seeds = [PAYMENT_VAULT_SEED, loan.key().as_ref()],
        bump,
    )]
    pub payment_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = Some(holder_payment_account.mint) == loan.asset.mint() @ LoanError::AssetMismatch
    )]
    pub holder_payment_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [COLLATERAL_SEED, loan.key().as_ref()],
        bump = collateral.bump,
    )]
    pub collateral: Option<Box<Account<'info, Collateral>>>,

    #[account(
        mut,
        seeds = [COLLATERAL_VAULT_SEED, loan.key().as_ref()],
        bump,
    )]
    pub collateral_vault: Option<Box<Account<'info, TokenAccount>>>,

    #[account(mut)]
    pub holder_collateral_account: Option<Box<Account<'info, TokenAccount>>>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct NativeWithdrawl<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
        constraint = loan.asset == PaymentAsset::Native @ LoanError::AssetMismatch
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [
            BOND_BALANCE_SEED,
            loan.loan_id.to_le_bytes().as_ref(),
            holder.key().as_ref()
        ],
        bump = holder_balance.bump,
        constraint = holder_balance.owner == holder.key() @ LoanError::NotOwner
    )]
    pub holder_balance: Box<Account<'info, BondBalance>>,
}

fn emit_redeemed(loan_id: u64, holder: Pubkey, bond_amount: u64, payout: Payout, now: i64) {
    msg!("Redeemed {} bonds for {} (collateral: {})", bond_amount, payout.amount(), payout.is_collateral());

    emit!(BondsRedeemed {
        loan_id,
        holder,
        bond_amount,
        payout: payout.amount(),
        from_collateral: payout.is_collateral(),
        timestamp: now,
    });
}

pub fn withdrawl(ctx: Context<Withdrawl>, bond_amount: u64) -> Result<()> {
    msg!("Redeeming {} bonds of loan {}", bond_amount, ctx.accounts.loan.loan_id);

    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    accounts.holder_balance.debit(bond_amount)?;

    let collateral = accounts.collateral.as_mut().map(|c| &mut ***c);
    let payout = accounts.loan.redeem(bond_amount, now, collateral)?;

    emit_redeemed(accounts.loan.loan_id, accounts.holder.key(), bond_amount, payout, now);

    match payout {
        Payout::Payment(amount) => gateway::push_tokens(
            &accounts.token_program,
            &accounts.payment_vault,
            &accounts.holder_payment_account,
            &accounts.loan,
            amount,
        ),
        Payout::Collateral(amount) => {
            let vault = accounts.collateral_vault
                .as_ref()
                .ok_or(LoanError::MissingCollateral)?;
            let destination = accounts.holder_collateral_account
                .as_ref()
                .ok_or(LoanError::MissingCollateral)?;
            require!(
                destination.mint == vault.mint,
                LoanError::CollateralAssetMismatch
            );

            gateway::push_tokens(
                &accounts.token_program,
                vault,
                destination,
                &accounts.loan,
                amount,
            )
        }
    }
}

pub fn native_withdrawl(ctx: Context<NativeWithdrawl>, bond_amount: u64) -> Result<()> {
    msg!("Redeeming {} bonds of native loan {}", bond_amount, ctx.accounts.loan.loan_id);

    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    accounts.holder_balance.debit(bond_amount)?;
    let payout = accounts.loan.redeem(bond_amount, now, None)?;

    emit_redeemed(accounts.loan.loan_id, accounts.holder.key(), bond_amount, payout, now);

    gateway::push_lamports(
        &accounts.loan,
        &accounts.holder.to_account_info(),
        payout.amount(),
    )
}
