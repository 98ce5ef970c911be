// =============================================================================
// Polaris Analytics Engine
// =============================================================================
//
// Batch computation core for crypto asset analytics: technical indicators
// (SMA, EMA, Wilder RSI, MACD, Bollinger Bands) and portfolio risk metrics
// (VaR, Sharpe, Sortino, max drawdown, volatility, 1-5 risk level) over
// caller-supplied price histories.
//
// Everything here is a deterministic pure function over its inputs: no I/O,
// no shared state, no caching. Insufficient or degenerate data yields absent
// results (`None` slots, omitted profiles), never errors — so batches stay
// robust when individual assets can't be computed.

pub mod assemble;
pub mod batch;
pub mod config;
pub mod indicators;
pub mod risk;
pub mod series;
pub mod types;

pub use assemble::{IndicatorReport, RiskProfile};
pub use batch::{compute_indicator_batch, compute_risk_batch, BatchReport};
pub use config::{EngineConfig, RiskParams};
pub use indicators::IndicatorSet;
pub use risk::RiskMetrics;
pub use series::PriceSeries;
pub use types::{AssetHistory, AssetMeta, RawPricePoint};
