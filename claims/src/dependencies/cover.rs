use soroban_sdk::{contractclient, contracttype, Address, Env, String};

/// Cover record mirrored from the cover contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoverData {
    pub owner: Address,
    pub product_id: u32,
    pub payout_asset: Address,
    pub amount: i128,
    pub start: u64,
    pub period: u64,
    pub price_ratio: i128,
    pub metadata: String,
}

// Client interface for the cover contract
#[contractclient(name = "CoverClient")]
pub trait CoverInterface {
    fn cover_data(env: Env, cover_id: u32) -> CoverData;
}
