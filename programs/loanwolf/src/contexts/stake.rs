// stake.rs
use anchor_lang::prelude::*;
use crate::states::{bond_balance::BondBalance, loan::Loan, stake_list::StakeList};
use crate::errors::LoanError;
use crate::events::BondsStaked;
use crate::constants::*;

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        seeds = [LOAN_SEED, loan.loan_id.to_le_bytes().as_ref()],
        bump = loan.bump,
        constraint = loan.is_minted() @ LoanError::NotMinted
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

    /// Reallocated to fit one more slot unless a freed one is available
    #[account(
        mut,
        seeds = [STAKE_LIST_SEED, staker.key().as_ref()],
        bump = stake_list.bump,
        realloc = 8 + StakeList::space(stake_list.slots_after_push()),
        realloc::payer = staker,
        realloc::zero = false,
    )]
    pub stake_list: Box<Account<'info, StakeList>>,

    pub system_program: Program<'info, System>,
}

pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    msg!("Staking {} bonds of loan {}", amount, ctx.accounts.loan.loan_id);

    let now = Clock::get()?.unix_timestamp;
    let loan_id = ctx.accounts.loan.loan_id;

    ctx.accounts.staker_balance.debit(amount)?;
    let slot = ctx.accounts.stake_list.push(loan_id, amount, now)?;

    emit!(BondsStaked {
        owner: ctx.accounts.staker.key(),
        loan_id,
        amount,
        slot,
        timestamp: now,
    });

    Ok(())
}
