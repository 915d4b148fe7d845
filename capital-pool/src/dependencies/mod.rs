mod asset;
mod pricing;
mod token_controller;

pub use asset::*;
pub use pricing::*;
pub use token_controller::*;
