use soroban_sdk::{contractclient, Address, Env};

// Client interface for the token controller
#[contractclient(name = "ControllerClient")]
pub trait ControllerInterface {
    fn mint(env: Env, operator: Address, to: Address, amount: i128);
    fn burn(env: Env, operator: Address, from: Address, amount: i128);
}
