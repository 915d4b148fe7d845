mod asset;
mod cover;
mod pool;
mod token;

pub use asset::*;
pub use cover::*;
pub use pool::*;
pub use token::*;
