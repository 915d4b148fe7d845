#![no_std]

mod claims;
mod dependencies;
mod traits;

pub use claims::*;
pub use dependencies::*;
pub use traits::*;
