mod mutual_token;

pub use mutual_token::*;
