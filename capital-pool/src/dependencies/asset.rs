use soroban_sdk::{contractclient, Address, Env};

// Client interface for pool assets, matching the standard token interface
// implemented by Stellar Asset Contracts
#[contractclient(name = "AssetClient")]
pub trait AssetInterface {
    fn balance(env: Env, id: Address) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
}
