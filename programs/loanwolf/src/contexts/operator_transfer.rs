// operator_transfer.rs
use anchor_lang::prelude::*;
use crate::states::{bond_balance::{BondBalance, OperatorApproval}, loan::Loan};
use crate::errors::LoanError;
use crate::events::BondsTransferred;
use crate::constants::*;

/// Moves bonds on the owner's behalf. Requires a live `set_approval_for_all`.
#[derive(Accounts)]
pub struct OperatorTransfer<'info> {
    #[account(mut)]
    pub operator: Signer<'info>,

    /// CHECK: identity is pinned by the approval and balance seeds
    pub owner: UncheckedAccount<'info>,

    #[account(
        seeds = [APPROVAL_SEED, owner.key().as_ref(), operator.key().as_ref()],
        bump = approval.bump,
    )]
    pub approval: Box<Account<'info, OperatorApproval>>,

    #[account(
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [
            BOND_BALANCE_SEED,
            loan.loan_id.to_le_bytes().as_ref(),
            owner.key().as_ref()
        ],
        bump = from_balance.bump,
    )]
    pub from_balance: Box<Account<'info, BondBalance>>,

    /// CHECK: any account may hold bonds
    #[account(
        constraint = recipient.key() != owner.key() @ LoanError::SelfTransfer
    )]
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + BondBalance::INIT_SPACE,
        seeds = [
            BOND_BALANCE_SEED,
            loan.loan_id.to_le_bytes().as_ref(),
            recipient.key().as_ref()
        ],
        bump
    )]
    pub to_balance: Box<Account<'info, BondBalance>>,

    pub system_program: Program<'info, System>,
}

pub fn operator_transfer(ctx: Context<OperatorTransfer>, amount: u64) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let owner = ctx.accounts.owner.key();
    let loan_id = ctx.accounts.loan.loan_id;

    msg!("Operator {} moving {} bonds of loan {}", operator, amount, loan_id);

    ctx.accounts.approval.authorize(owner, operator)?;

    let accounts = &mut *ctx.accounts;
    accounts.to_balance.open(accounts.recipient.key(), loan_id, ctx.bumps.to_balance);
    BondBalance::transfer(&mut accounts.from_balance, &mut accounts.to_balance, amount)?;

    emit!(BondsTransferred {
        loan_id,
        operator,
        from: owner,
        to: accounts.recipient.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
