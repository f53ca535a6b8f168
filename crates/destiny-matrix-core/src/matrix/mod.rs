//! Matrix engine: per-domain fusion scoring and summary aggregation.

mod engine;
pub mod signals;

pub use engine::calculate_destiny_matrix;
pub use signals::{collect_astro_signals, collect_saju_signals, signals_for_domain, DriverSignal};
