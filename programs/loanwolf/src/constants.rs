// constants.rs

// PDA seeds
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const LOAN_SEED: &[u8] = b"loan";
pub const BORROWER_SEED: &[u8] = b"borrower";
pub const COLLATERAL_SEED: &[u8] = b"collateral";
pub const PAYMENT_VAULT_SEED: &[u8] = b"payment_vault";
pub const COLLATERAL_VAULT_SEED: &[u8] = b"collateral_vault";
pub const BOND_BALANCE_SEED: &[u8] = b"bond_balance";
pub const APPROVAL_SEED: &[u8] = b"approval";
pub const STAKE_LIST_SEED: &[u8] = b"stake_list";

// Terminal link of a stake list (and of its free list)
pub const NIL: u32 = u32::MAX;

// Live entries one stake list can hold. The list is read onto the 32 KiB program
// heap in full, so this stays well below what the account size would allow.
pub const MAX_STAKE_SLOTS: usize = 128;

// Loans a single borrower can open (size of the borrower index account)
pub const MAX_LOANS_PER_BORROWER: usize = 32;

// Metadata URI template
pub const MAX_URI_LEN: usize = 128;
pub const URI_ID_PLACEHOLDER: &str = "{id}";
pub const URI_ID_HEX_WIDTH: usize = 64;

pub const RESERVE_SPACE: usize = 32;               // Reserved space for future upgrades
