pub mod aggregator;
pub mod fee;

pub use aggregator::{DailyTax, ExemptReason, PassageCharge, TaxAggregator};
pub use fee::{fee_at, is_toll_free_time};
