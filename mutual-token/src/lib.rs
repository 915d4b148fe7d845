#![no_std]

mod mutual_token;
mod traits;
mod test;

pub use mutual_token::*;
pub use traits::*;
