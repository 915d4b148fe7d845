use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, panic_with_error,
    symbol_short, Address, Env,
};

pub use crate::traits::{AdminManagement, CapacityAllocation, ProductManagement, ProductQuery};

// Contract metadata
contractmeta!(
    key = "Description",
    val = "Staking pool backing cover capacity per product"
);

// ==================== Error Type Definition ====================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StakingError {
    // Insufficient permissions
    Unauthorized = 401,
    // Invalid argument
    InvalidArgument = 402,
    // Product not registered
    ProductNotFound = 403,
    // Product id already taken
    ProductAlreadyExists = 404,
    // Allocation would exceed product capacity
    CapacityExceeded = 405,
    // Cover contract not set
    CoverContractNotSet = 406,
}

// ==================== Data Key Definition ====================

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // Contract admin (the pool manager)
    Admin,
    // Cover contract allowed to allocate capacity
    CoverContract,
    // Product record keyed by product id
    Product(u32),
}

/// Product capacity record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    /// Maximum cover amount this pool backs for the product
    pub capacity: i128,
    /// Price ratio quoted to cover buyers (1/10000 units)
    pub target_price_ratio: i128,
    /// Cover amount currently allocated against the capacity
    pub active_cover: i128,
}

// ==================== Contract Definition ====================

#[contract]
pub struct StakingPool;

// ==================== Constructor ====================

#[contractimpl]
impl StakingPool {
    pub fn __constructor(env: Env, admin: Address) {
        env.storage().instance().set(&DataKey::Admin, &admin);

        // Publish initialization event
        env.events().publish((symbol_short!("init"),), admin);
    }
}

// ==================== Product Management Implementation ====================

#[contractimpl]
impl ProductManagement for StakingPool {
    /// Register a product (admin only)
    fn add_product_by_admin(env: Env, product_id: u32, capacity: i128, target_price_ratio: i128) {
        let admin = Self::require_admin(&env);

        // Validate parameters
        if capacity <= 0 || target_price_ratio <= 0 {
            panic_with_error!(&env, StakingError::InvalidArgument);
        }

        let key = DataKey::Product(product_id);
        if env.storage().persistent().has(&key) {
            panic_with_error!(&env, StakingError::ProductAlreadyExists);
        }

        let product = Product {
            capacity,
            target_price_ratio,
            active_cover: 0,
        };
        env.storage().persistent().set(&key, &product);

        // Publish event
        env.events().publish(
            (symbol_short!("prd_add"),),
            (admin, product_id, capacity, target_price_ratio),
        );
    }

    /// Update an existing product (admin only)
    fn update_product_by_admin(
        env: Env,
        product_id: u32,
        capacity: i128,
        target_price_ratio: i128,
    ) {
        let admin = Self::require_admin(&env);

        // Validate parameters
        if capacity <= 0 || target_price_ratio <= 0 {
            panic_with_error!(&env, StakingError::InvalidArgument);
        }

        let key = DataKey::Product(product_id);
        let mut product: Product = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| panic_with_error!(&env, StakingError::ProductNotFound));

        // Active cover is preserved across updates
        product.capacity = capacity;
        product.target_price_ratio = target_price_ratio;
        env.storage().persistent().set(&key, &product);

        // Publish event
        env.events().publish(
            (symbol_short!("prd_upd"),),
            (admin, product_id, capacity, target_price_ratio),
        );
    }
}

// ==================== Capacity Allocation Implementation ====================

#[contractimpl]
impl CapacityAllocation for StakingPool {
    /// Reserve capacity for a cover (cover contract only)
    fn allocate(env: Env, product_id: u32, amount: i128) {
        let cover_contract = Self::require_cover_contract(&env);
        cover_contract.require_auth();

        // Validate parameters
        if amount <= 0 {
            panic_with_error!(&env, StakingError::InvalidArgument);
        }

        let key = DataKey::Product(product_id);
        let mut product: Product = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or_else(|| panic_with_error!(&env, StakingError::ProductNotFound));

        let allocated = product
            .active_cover
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, StakingError::InvalidArgument));
        if allocated > product.capacity {
            panic_with_error!(&env, StakingError::CapacityExceeded);
        }

        product.active_cover = allocated;
        env.storage().persistent().set(&key, &product);

        // Publish event
        env.events().publish(
            (symbol_short!("allocate"),),
            (cover_contract, product_id, amount, allocated),
        );
    }
}

// ==================== Query Implementation ====================

#[contractimpl]
impl ProductQuery for StakingPool {
    /// Get a product record
    fn product(env: Env, product_id: u32) -> Product {
        env.storage()
            .persistent()
            .get(&DataKey::Product(product_id))
            .unwrap_or_else(|| panic_with_error!(&env, StakingError::ProductNotFound))
    }

    /// Check whether a product is registered
    fn has_product(env: Env, product_id: u32) -> bool {
        env.storage().persistent().has(&DataKey::Product(product_id))
    }
}

// ==================== Admin Management Implementation ====================

#[contractimpl]
impl AdminManagement for StakingPool {
    /// Get admin address
    fn admin(env: Env) -> Address {
        Self::get_admin(&env)
    }

    /// Set the cover contract (admin only)
    fn set_cover_contract_by_admin(env: Env, cover_contract: Address) {
        let admin = Self::require_admin(&env);

        env.storage()
            .instance()
            .set(&DataKey::CoverContract, &cover_contract);

        // Publish event
        env.events()
            .publish((symbol_short!("cover_set"),), (admin, cover_contract));
    }

    /// Get the cover contract address
    fn cover_contract(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::CoverContract)
    }
}

// ==================== Internal Helper Functions ====================

impl StakingPool {
    /// Get admin address
    fn get_admin(env: &Env) -> Address {
        env.storage().instance().get(&DataKey::Admin).unwrap()
    }

    /// Verify admin permission
    fn require_admin(env: &Env) -> Address {
        let admin = Self::get_admin(env);
        admin.require_auth();
        admin
    }

    /// Get cover contract, panics when not wired yet
    fn require_cover_contract(env: &Env) -> Address {
        let cover_opt: Option<Address> = env.storage().instance().get(&DataKey::CoverContract);
        match cover_opt {
            Some(cover_contract) => cover_contract,
            None => {
                panic_with_error!(env, StakingError::CoverContractNotSet);
            }
        }
    }
}
