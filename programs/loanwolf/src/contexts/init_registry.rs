// init_registry.rs
use anchor_lang::prelude::*;
use crate::states::registry::RegistryConfig;
use crate::events::RegistryInitialized;
use crate::constants::*;

/// InitializeRegistry creates the program-wide registry.
/// It must run once before any loan can be configured.
#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// The registry PDA holding the loan id counter and the bond metadata URI
    /// Seeds: ["registry"]
    #[account(
        init,
        payer = admin,
        space = 8 + RegistryConfig::INIT_SPACE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Box<Account<'info, RegistryConfig>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_registry(ctx: Context<InitializeRegistry>, uri: String) -> Result<()> {
    RegistryConfig::validate_uri(&uri)?;

    let now = Clock::get()?.unix_timestamp;
    let registry = &mut ctx.accounts.registry;

    registry.admin = ctx.accounts.admin.key();
    registry.uri = uri.clone();
    registry.next_loan_id = 1;
    registry.loan_count = 0;
    registry.created_at = now;
    registry.bump = ctx.bumps.registry;
    registry.reserved = [0; RESERVE_SPACE];

    emit!(RegistryInitialized {
        admin: ctx.accounts.admin.key(),
        uri,
        timestamp: now,
    });

    Ok(())
}
