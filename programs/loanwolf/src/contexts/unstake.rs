// unstake.rs
use anchor_lang::prelude::*;
use crate::states::{bond_balance::BondBalance, loan::Loan, stake_list::StakeList};
use crate::errors::LoanError;
use crate::events::BondsUnstaked;
use crate::constants::*;

/// Unstakes the entry at `index` (0 = most recent). The loan and balance
/// accounts must be the ones of the entry's loan, as reported by `get_staking_at`.
#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
    )]
    pub loan: Box<Account<'info, Loan>>,

    #[account(
        mut,
        seeds = [
            BOND_BALANCE_SEED,
            loan.loan_id.to_le_bytes().as_ref(),
            staker.key().as_ref()
        ],
        bump = staker_balance.bump,
    )]
    pub staker_balance: Box<Account<'info, BondBalance>>,

    #[account(
        mut,
        seeds = [STAKE_LIST_SEED, staker.key().as_ref()],
        bump = stake_list.bump,
    )]
    pub stake_list: Box<Account<'info, StakeList>>,
}

pub fn unstake(ctx: Context<Unstake>, index: u64) -> Result<()> {
    msg!("Unstaking entry {}", index);

    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let entry = *accounts.stake_list.entry_at(index)?;
    require!(
        entry.loan_id == accounts.loan.loan_id,
        LoanError::LoanMismatch
    );

    let interest = accounts.loan.accrued_interest(entry.amount, entry.stake_start_time, now)?;
    let returned = entry.amount
        .checked_add(interest)
        .ok_or(LoanError::MathOverflow)?;

    accounts.loan.issue_interest(interest)?;
    accounts.staker_balance.credit(returned)?;
    accounts.stake_list.remove(index)?;

    msg!("Returned {} bonds ({} interest)", returned, interest);

    emit!(BondsUnstaked {
        owner: accounts.staker.key(),
        loan_id: entry.loan_id,
        amount: entry.amount,
        interest,
        timestamp: now,
    });

    Ok(())
}
