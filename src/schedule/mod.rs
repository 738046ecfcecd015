//! Amortization schedule generation

mod generator;
mod row;

pub use generator::amortization_schedule;
pub use row::{AmortizationRow, AmortizationSchedule};
