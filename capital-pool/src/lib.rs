#![no_std]

mod capital_pool;
mod dependencies;
mod traits;

pub use capital_pool::*;
pub use dependencies::*;
pub use traits::*;
