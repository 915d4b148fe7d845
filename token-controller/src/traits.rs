use soroban_sdk::{Address, Env, Vec};

// ==================== Trait Definitions ====================

/// Admin management trait
pub trait AdminTrait {
    fn admin(env: Env) -> Address;
    fn transfer_admin(env: Env, new_admin: Address);
}

/// Operator management trait
pub trait OperatorManagementTrait {
    fn add_operator(env: Env, operator: Address);
    fn remove_operator(env: Env, operator: Address);
    fn get_operators(env: Env) -> Vec<Address>;
    fn is_operator(env: Env, address: Address) -> bool;
}

/// Token operations trait
pub trait TokenOperationsTrait {
    /// Mint mutual tokens to a recipient
    ///
    /// # Parameters
    /// - `operator`: Registered operator contract requesting the mint
    /// - `to`: Recipient of the minted tokens
    /// - `amount`: Token amount, must be positive
    fn mint(env: Env, operator: Address, to: Address, amount: i128);

    /// Burn mutual tokens from a holder
    ///
    /// # Parameters
    /// - `operator`: Registered operator contract requesting the burn
    /// - `from`: Holder whose tokens are burned
    /// - `amount`: Token amount, must be positive
    fn burn(env: Env, operator: Address, from: Address, amount: i128);
}

/// Query trait
pub trait QueryTrait {
    fn token_contract(env: Env) -> Address;
}
