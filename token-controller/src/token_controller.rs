use crate::dependencies::TokenClient;
use crate::traits::{AdminTrait, OperatorManagementTrait, QueryTrait, TokenOperationsTrait};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, Address, Env, Map,
    Symbol, Vec,
};

const MAX_OPERATORS: u32 = 10;

// ==================== Error Definitions ====================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ControllerError {
    // Insufficient permissions
    Unauthorized = 1,
    // Invalid argument
    InvalidArgument = 2,
    // Maximum number of operators reached
    TooManyOperators = 3,
    // Operator not found
    OperatorNotFound = 4,
    // Operator already exists
    OperatorAlreadyExists = 5,
}

// ==================== Storage Key Definitions ====================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // Contract admin
    Admin,
    // Operator contracts allowed to move supply
    Operators,
    // Mutual token contract address
    TokenContract,
}

// ==================== Contract Implementation ====================

#[contract]
pub struct TokenController;

// ==================== Constructor ====================

#[contractimpl]
impl TokenController {
    pub fn __constructor(env: Env, admin: Address, token_contract: Address) {
        // Set admin
        env.storage().instance().set(&DataKey::Admin, &admin);

        // Set token contract address
        env.storage()
            .instance()
            .set(&DataKey::TokenContract, &token_contract);

        // Initialize operators mapping
        let operators: Map<Address, bool> = Map::new(&env);
        env.storage().instance().set(&DataKey::Operators, &operators);

        // Publish initialization event
        env.events()
            .publish((Symbol::new(&env, "initialize"),), (admin, token_contract));
    }
}

// ==================== Admin Function Implementation ====================

#[contractimpl]
impl AdminTrait for TokenController {
    fn admin(env: Env) -> Address {
        Self::get_admin(&env)
    }

    fn transfer_admin(env: Env, new_admin: Address) {
        let current_admin = Self::require_admin(&env);

        // Set new admin
        env.storage().instance().set(&DataKey::Admin, &new_admin);

        // Publish admin transfer event
        env.events().publish(
            (Symbol::new(&env, "admin_transferred"),),
            (current_admin, new_admin),
        );
    }
}

// ==================== Operator Management Function Implementation ====================

#[contractimpl]
impl OperatorManagementTrait for TokenController {
    fn add_operator(env: Env, operator: Address) {
        let admin = Self::require_admin(&env);

        // Get current operators mapping
        let mut operators: Map<Address, bool> =
            env.storage().instance().get(&DataKey::Operators).unwrap();

        // Check operator count limit (max 10)
        if operators.len() >= MAX_OPERATORS {
            panic_with_error!(&env, ControllerError::TooManyOperators);
        }

        // Check if operator already exists
        if operators.contains_key(operator.clone()) {
            panic_with_error!(&env, ControllerError::OperatorAlreadyExists);
        }

        // Register new operator
        operators.set(operator.clone(), true);
        env.storage().instance().set(&DataKey::Operators, &operators);

        // Publish add operator event
        env.events()
            .publish((Symbol::new(&env, "operator_added"),), (admin, operator));
    }

    fn remove_operator(env: Env, operator: Address) {
        let admin = Self::require_admin(&env);

        // Get current operators mapping
        let mut operators: Map<Address, bool> =
            env.storage().instance().get(&DataKey::Operators).unwrap();

        // Check if operator exists
        if !operators.contains_key(operator.clone()) {
            panic_with_error!(&env, ControllerError::OperatorNotFound);
        }

        // Remove operator
        operators.remove(operator.clone());
        env.storage().instance().set(&DataKey::Operators, &operators);

        // Publish remove operator event
        env.events()
            .publish((Symbol::new(&env, "operator_removed"),), (admin, operator));
    }

    fn get_operators(env: Env) -> Vec<Address> {
        let operators: Map<Address, bool> =
            env.storage().instance().get(&DataKey::Operators).unwrap();
        let mut result: Vec<Address> = Vec::new(&env);

        // Iterate through Map to get all addresses
        for (address, _) in operators.iter() {
            result.push_back(address);
        }

        result
    }

    fn is_operator(env: Env, address: Address) -> bool {
        let operators: Map<Address, bool> =
            env.storage().instance().get(&DataKey::Operators).unwrap();
        operators.contains_key(address)
    }
}

// ==================== Token Operations Function Implementation ====================

#[contractimpl]
impl TokenOperationsTrait for TokenController {
    fn mint(env: Env, operator: Address, to: Address, amount: i128) {
        operator.require_auth();
        // Validate parameters
        if amount <= 0 {
            panic_with_error!(&env, ControllerError::InvalidArgument);
        }

        // Validate if caller is a registered operator
        Self::require_operator(&env, &operator);

        // Get token contract address
        let token_contract = Self::get_token_contract(&env);

        // Call token contract's mint function
        let token_client = TokenClient::new(&env, &token_contract);
        token_client.mint(&to, &amount);

        // Publish mint event
        env.events()
            .publish((Symbol::new(&env, "mint"),), (operator, to, amount));
    }

    fn burn(env: Env, operator: Address, from: Address, amount: i128) {
        operator.require_auth();
        // Validate parameters
        if amount <= 0 {
            panic_with_error!(&env, ControllerError::InvalidArgument);
        }

        // Validate if caller is a registered operator
        Self::require_operator(&env, &operator);

        // Get token contract address
        let token_contract = Self::get_token_contract(&env);

        // Call token contract's burn function
        let token_client = TokenClient::new(&env, &token_contract);
        token_client.burn(&from, &amount);

        // Publish burn event
        env.events()
            .publish((Symbol::new(&env, "burn"),), (operator, from, amount));
    }
}

// ==================== Query Function Implementation ====================

#[contractimpl]
impl QueryTrait for TokenController {
    fn token_contract(env: Env) -> Address {
        Self::get_token_contract(&env)
    }
}

// ==================== Internal Helper Functions ====================

impl TokenController {
    /// Get admin address
    fn get_admin(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::Admin).unwrap()
    }

    /// Get token contract address
    fn get_token_contract(env: &Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::TokenContract)
            .unwrap()
    }

    /// Validate admin permissions
    fn require_admin(env: &Env) -> Address {
        let admin = Self::get_admin(env);
        admin.require_auth();
        admin
    }

    /// Validate operator permissions
    fn require_operator(env: &Env, address: &Address) {
        let operators: Map<Address, bool> =
            env.storage().instance().get(&DataKey::Operators).unwrap();
        if !operators.contains_key(address.clone()) {
            panic_with_error!(env, ControllerError::Unauthorized);
        }
    }
}
