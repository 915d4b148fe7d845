#![no_std]

mod mcr;
mod traits;

pub use mcr::*;
pub use traits::*;
