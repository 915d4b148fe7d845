#![no_std]

mod staking_pool;
mod traits;
mod test;

pub use staking_pool::*;
pub use traits::*;
