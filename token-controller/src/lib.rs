#![no_std]

mod dependencies;
mod token_controller;
mod traits;

pub use token_controller::*;
pub use traits::*;
