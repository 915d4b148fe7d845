#![no_std]

mod cover;
mod dependencies;
mod traits;

pub use cover::*;
pub use dependencies::*;
pub use traits::*;
