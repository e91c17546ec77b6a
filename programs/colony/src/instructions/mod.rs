// Instructions module exports
#![allow(ambiguous_glob_reexports)]

pub mod initialize;
pub mod buy_land;
pub mod claim_earnings;
pub mod upgrade_land;
pub mod admin;
pub mod admin_close;
pub mod get_pending_earnings;
pub mod token;

pub use initialize::*;
pub use buy_land::*;
pub use claim_earnings::*;
pub use upgrade_land::*;
pub use admin::*;
pub use admin_close::*;
pub use get_pending_earnings::*;
