use soroban_sdk::{Address, Env};

use crate::staking_pool::Product;

/// Product management trait (pool manager only)
pub trait ProductManagement {
    /// Register a product with its capacity and target price ratio
    fn add_product_by_admin(env: Env, product_id: u32, capacity: i128, target_price_ratio: i128);

    /// Update capacity and target price ratio of an existing product
    fn update_product_by_admin(env: Env, product_id: u32, capacity: i128, target_price_ratio: i128);
}

/// Capacity allocation trait (cover contract only)
pub trait CapacityAllocation {
    /// Reserve capacity on a product for a newly written cover
    fn allocate(env: Env, product_id: u32, amount: i128);
}

/// Product query trait
pub trait ProductQuery {
    /// Get a product record
    fn product(env: Env, product_id: u32) -> Product;

    /// Check whether a product is registered
    fn has_product(env: Env, product_id: u32) -> bool;
}

/// Admin management trait
pub trait AdminManagement {
    /// Get admin address
    fn admin(env: Env) -> Address;

    /// Set the cover contract allowed to allocate capacity (admin only)
    fn set_cover_contract_by_admin(env: Env, cover_contract: Address);

    /// Get the cover contract address
    fn cover_contract(env: Env) -> Option<Address>;
}
