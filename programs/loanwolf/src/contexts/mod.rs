pub mod init_registry;
pub use init_registry::*;

pub mod configure_loan;
pub use configure_loan::*;

pub mod add_collateral;
pub use add_collateral::*;

pub mod mint_bonds;
pub use mint_bonds::*;

pub mod transfer_bonds;
pub use transfer_bonds::*;

pub mod set_approval;
pub use set_approval::*;

pub mod operator_transfer;
pub use operator_transfer::*;

pub mod open_stake_list;
pub use open_stake_list::*;

pub mod stake;
pub use stake::*;

pub mod unstake;
pub use unstake::*;

pub mod staking_view;
pub use staking_view::*;

pub mod payment;
pub use payment::*;

pub mod withdrawl;
pub use withdrawl::*;

pub mod return_collateral;
pub use return_collateral::*;

pub mod lookups;
pub use lookups::*;
