// transfer_bonds.rs
use anchor_lang::prelude::*;
use crate::states::{bond_balance::BondBalance, loan::Loan};
use crate::errors::LoanError;
use crate::events::BondsTransferred;
use crate::constants::*;

#[derive(Accounts)]
pub struct TransferBonds<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

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
        payer = owner,
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

pub fn transfer_bonds(ctx: Context<TransferBonds>, amount: u64) -> Result<()> {
    msg!("Transferring {} bonds of loan {}", amount, ctx.accounts.loan.loan_id);

    let loan_id = ctx.accounts.loan.loan_id;
    let accounts = &mut *ctx.accounts;

    accounts.to_balance.open(accounts.recipient.key(), loan_id, ctx.bumps.to_balance);
    BondBalance::transfer(&mut accounts.from_balance, &mut accounts.to_balance, amount)?;

    emit!(BondsTransferred {
        loan_id,
        operator: accounts.owner.key(),
        from: accounts.owner.key(),
        to: accounts.recipient.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
