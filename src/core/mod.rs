mod engine;
mod error;
mod types;

pub use engine::{MAX_SIMULATED_YEARS, PERIODS_PER_YEAR, simulate, simulate_with_year_limit};
pub use error::ScheduleError;
pub use types::{ChartSeries, MortgageParameters, Schedule, YearRecord};
