#![no_std]

mod legacy_mcr;
mod traits;

pub use legacy_mcr::*;
pub use traits::*;
