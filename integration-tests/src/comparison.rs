use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::fixtures::{MutualTestEnv, ONE_TOKEN};

/// Pacing and tolerance of a comparison run
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Asset value spent on each purchase step
    pub buy_value: i128,
    /// Pool balance growth per step, purchases plus top-up
    pub pool_balance_step: i128,
    /// Simulated seconds between steps
    pub step_interval: u64,
    /// Run ends once the current engine reports at least this ratio (1/10000 units)
    pub stop_ratio: i128,
    /// Hard cap on driver iterations
    pub max_iterations: u32,
    /// Largest tolerated relative error, in parts per million
    pub max_relative_error_ppm: i128,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            buy_value: 100 * ONE_TOKEN,
            pool_balance_step: 30_000 * ONE_TOKEN,
            step_interval: 3_600,
            stop_ratio: 40_000,
            max_iterations: 64,
            max_relative_error_ppm: 1_000,
        }
    }
}

/// Observed state of a seeded environment
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeededState {
    pub total_asset_value: i128,
    pub mcr_ratio: i128,
    pub spot_token_price: i128,
}

/// One driver iteration's outputs and divergence
#[derive(Clone, Debug)]
pub struct ComparisonSample {
    pub iteration: u32,
    pub legacy_tokens: i128,
    pub current_tokens: i128,
    pub error_ppm: i128,
    pub mcr_ratio: i128,
}

/// Fund the pool up to the target value and report the resulting state
///
/// The caller must read the observed values from the returned state, a
/// pool already above the target is left as it is.
pub fn seed_pool(test_env: &MutualTestEnv, target_asset_value: i128) -> SeededState {
    let pool = test_env.get_pool_client();
    let current_value = pool.total_asset_value();
    if target_asset_value > current_value {
        test_env.fund_pool(target_asset_value - current_value);
    }
    SeededState {
        total_asset_value: pool.total_asset_value(),
        mcr_ratio: pool.capital_state().mcr_ratio,
        spot_token_price: pool.spot_token_price(),
    }
}

/// Relative error between two engine outputs, in parts per million
pub fn relative_error_ppm(reference: i128, candidate: i128) -> i128 {
    assert!(reference > 0, "reference output must be positive");
    (candidate - reference).abs() * 1_000_000 / reference
}

/// Panics when the two outputs diverge by the tolerance or more
pub fn assert_within_tolerance(reference: i128, candidate: i128, max_ppm: i128) {
    let error_ppm = relative_error_ppm(reference, candidate);
    assert!(
        error_ppm < max_ppm,
        "pricing divergence: reference {} vs candidate {} is {} ppm, limit {} ppm",
        reference,
        candidate,
        error_ppm,
        max_ppm
    );
}

/// Drive both environments through identical purchases until the stop ratio
///
/// Each step buys `buy_value` of tokens from both pools, checks the two
/// token outputs against the tolerance, tops both pools up by the
/// remainder of `pool_balance_step` and advances the shared clock. The
/// ratio is re-sampled from the current environment after each step.
/// Exceeding `max_iterations` fails the run.
pub fn run_comparison(
    legacy: &MutualTestEnv,
    current: &MutualTestEnv,
    config: &DriverConfig,
) -> Vec<ComparisonSample> {
    // One buyer per environment, funded for the whole run
    let budget = config.buy_value * config.max_iterations as i128;
    let legacy_buyer = Address::generate(&legacy.env);
    legacy.fund_address(&legacy_buyer, budget);
    legacy.approve_pool(&legacy_buyer, budget);
    let current_buyer = Address::generate(&current.env);
    current.fund_address(&current_buyer, budget);
    current.approve_pool(&current_buyer, budget);

    let mut samples = Vec::new();
    let mut iteration: u32 = 0;
    loop {
        assert!(
            iteration < config.max_iterations,
            "comparison did not reach the stop ratio {} within {} iterations",
            config.stop_ratio,
            config.max_iterations
        );

        // The same purchase against both environments
        let legacy_tokens = legacy.buy_tokens(&legacy_buyer, config.buy_value);
        let current_tokens = current.buy_tokens(&current_buyer, config.buy_value);

        let error_ppm = relative_error_ppm(legacy_tokens, current_tokens);
        assert_within_tolerance(legacy_tokens, current_tokens, config.max_relative_error_ppm);

        // Top both pools up by the shortfall so the curves stay comparable
        let shortfall = config.pool_balance_step - config.buy_value;
        if shortfall > 0 {
            legacy.fund_pool(shortfall);
            current.fund_pool(shortfall);
        }

        // One shared ledger clock moves both environments
        legacy.advance_time(config.step_interval);

        let mcr_ratio = current.get_pool_client().capital_state().mcr_ratio;
        println!(
            "step {}: legacy {} vs current {} tokens, error {} ppm, ratio {}",
            iteration, legacy_tokens, current_tokens, error_ppm, mcr_ratio
        );
        samples.push(ComparisonSample {
            iteration,
            legacy_tokens,
            current_tokens,
            error_ppm,
            mcr_ratio,
        });

        iteration += 1;
        if mcr_ratio >= config.stop_ratio {
            break;
        }
    }
    samples
}
