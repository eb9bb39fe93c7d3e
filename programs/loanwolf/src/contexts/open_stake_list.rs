// open_stake_list.rs
use anchor_lang::prelude::*;
use crate::states::stake_list::StakeList;
use crate::constants::*;

#[derive(Accounts)]
pub struct OpenStakeList<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Grows one slot at a time in `stake`
    #[account(
        init,
        payer = owner,
        space = 8 + StakeList::space(0),
        seeds = [STAKE_LIST_SEED, owner.key().as_ref()],
        bump
    )]
    pub stake_list: Box<Account<'info, StakeList>>,

    pub system_program: Program<'info, System>,
}

pub fn open_stake_list(ctx: Context<OpenStakeList>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    ctx.accounts.stake_list.init(owner, ctx.bumps.stake_list);
    msg!("Stake list opened for {}", owner);
    Ok(())
}
