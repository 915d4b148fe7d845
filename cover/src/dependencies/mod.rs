mod asset;
mod pool;
mod staking;
mod token_controller;

pub use asset::*;
pub use pool::*;
pub use staking::*;
pub use token_controller::*;
