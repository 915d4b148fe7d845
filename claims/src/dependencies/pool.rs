use soroban_sdk::{contractclient, Address, Env};

// Client interface for the capital pool
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    fn send_payout(env: Env, asset: Address, to: Address, amount: i128);
}
