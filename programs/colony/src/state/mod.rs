// programs/colony/src/state/mod.rs
pub mod game_state;
pub mod land_data;
pub mod user_profile;

pub use game_state::*;
pub use land_data::*;
pub use user_profile::*;
