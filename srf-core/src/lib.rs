// srf-core/src/lib.rs
pub mod chain;
pub mod orchestrator;
pub mod resolver;

pub use chain::{ChainOutcome, StrategyChain, STRATEGY_BACKOFF};
pub use orchestrator::Orchestrator;
pub use resolver::Resolver;
