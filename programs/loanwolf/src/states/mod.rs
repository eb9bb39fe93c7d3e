pub mod registry;
pub use registry::*;

pub mod loan;
pub use loan::*;

pub mod collateral;
pub use collateral::*;

pub mod bond_balance;
pub use bond_balance::*;

pub mod stake_list;
pub use stake_list::*;
