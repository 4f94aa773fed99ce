#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error(
        "Loan does not amortize: balance is still {balance:.2} after {years_simulated} simulated years"
    )]
    NonAmortizing { years_simulated: u32, balance: f64 },
}
