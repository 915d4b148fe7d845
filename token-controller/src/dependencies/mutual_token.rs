use soroban_sdk::{contractclient, Address, Env};

// Define client interface for inter-contract communication
#[contractclient(name = "TokenClient")]
pub trait MutualTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn balance_of(env: Env, account: Address) -> i128;
}
