use soroban_sdk::{contractclient, Address, Env};

// Client interface for the capital pool
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    fn receive_premium(env: Env, from: Address, asset: Address, amount: i128);
    fn spot_token_price(env: Env) -> i128;
    fn is_asset_supported(env: Env, asset: Address) -> bool;
}
