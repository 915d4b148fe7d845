use soroban_sdk::{contractclient, contracttype, Env};

/// Product record mirrored from the staking pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    pub capacity: i128,
    pub target_price_ratio: i128,
    pub active_cover: i128,
}

// Client interface for the staking pool backing cover capacity
#[contractclient(name = "StakingClient")]
pub trait StakingInterface {
    fn allocate(env: Env, product_id: u32, amount: i128);
    fn product(env: Env, product_id: u32) -> Product;
}
