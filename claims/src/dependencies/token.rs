use soroban_sdk::{contractclient, Address, Env};

// Client interface for the mutual token used as assessment stake
#[contractclient(name = "TokenClient")]
pub trait TokenInterface {
    fn balance_of(env: Env, account: Address) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
}
