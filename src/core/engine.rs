use tracing::{debug, warn};

use super::error::ScheduleError;
use super::types::{MortgageParameters, Schedule, YearRecord};

pub const PERIODS_PER_YEAR: u32 = 26;
pub const MAX_SIMULATED_YEARS: u32 = 1000;

#[derive(Debug, Clone, Copy, Default)]
struct YearTotals {
    interest: f64,
    principal: f64,
}

pub fn simulate(params: &MortgageParameters) -> Result<Schedule, ScheduleError> {
    simulate_with_year_limit(params, MAX_SIMULATED_YEARS)
}

/// Runs the schedule, giving up with [`ScheduleError::NonAmortizing`] once
/// `max_years` years have been simulated and a balance is still owed.
pub fn simulate_with_year_limit(
    params: &MortgageParameters,
    max_years: u32,
) -> Result<Schedule, ScheduleError> {
    validate_parameters(params, max_years)?;

    let period_rate = params.annual_interest_rate_percent / 100.0 / f64::from(PERIODS_PER_YEAR);
    let mut balance = params.principal;
    let mut records = Vec::new();
    let mut year_index = 0u32;

    while balance > 0.0 {
        if year_index >= max_years {
            warn!(
                years_simulated = year_index,
                balance, "year limit reached before the loan was repaid"
            );
            return Err(ScheduleError::NonAmortizing {
                years_simulated: year_index,
                balance,
            });
        }

        let opening_balance = balance;
        let totals = run_year(params, period_rate, &mut balance);
        year_index += 1;

        // The year-end balance is non-decreasing in the opening balance, so a
        // year that fails to reduce it will repeat forever.
        if balance > 0.0 && balance >= opening_balance {
            warn!(
                years_simulated = year_index,
                opening_balance, balance, "payments do not cover accruing interest"
            );
            return Err(ScheduleError::NonAmortizing {
                years_simulated: year_index,
                balance,
            });
        }

        records.push(YearRecord {
            year_index,
            calendar_year: params.start_year + year_index as i32,
            interest_paid: totals.interest.round(),
            principal_paid: totals.principal.round(),
            ending_balance: balance.max(0.0).round(),
        });
    }

    let schedule = Schedule::new(records);
    debug!(
        years = schedule.len(),
        total_interest = schedule.total_interest(),
        payoff_year = ?schedule.payoff_year(),
        "simulated mortgage schedule"
    );
    Ok(schedule)
}

fn run_year(params: &MortgageParameters, period_rate: f64, balance: &mut f64) -> YearTotals {
    let mut totals = YearTotals::default();

    for _ in 0..PERIODS_PER_YEAR {
        let interest = *balance * period_rate;
        let principal = (params.fortnightly_payment - interest).min(*balance);
        *balance -= principal;
        totals.interest += interest;
        totals.principal += principal;
        if *balance <= 0.0 {
            break;
        }
    }

    if *balance > 0.0 {
        let lump_sum = params.annual_lump_sum.min(*balance);
        *balance -= lump_sum;
        totals.principal += lump_sum;
    }

    totals
}

fn validate_parameters(params: &MortgageParameters, max_years: u32) -> Result<(), ScheduleError> {
    let invalid = |field: &'static str, reason: &str| ScheduleError::InvalidParameter {
        field,
        reason: reason.to_string(),
    };

    for (field, value) in [
        ("principal", params.principal),
        ("fortnightly payment", params.fortnightly_payment),
        ("annual lump sum", params.annual_lump_sum),
        ("interest rate", params.annual_interest_rate_percent),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, "must be a finite number"));
        }
    }

    if params.principal < 0.0 {
        return Err(invalid("principal", "must be >= 0"));
    }
    if params.fortnightly_payment <= 0.0 {
        return Err(invalid("fortnightly payment", "must be > 0"));
    }
    if params.annual_lump_sum < 0.0 {
        return Err(invalid("annual lump sum", "must be >= 0"));
    }
    if params.annual_interest_rate_percent < 0.0 {
        return Err(invalid("interest rate", "must be >= 0"));
    }
    let last_year = i32::try_from(max_years)
        .ok()
        .and_then(|years| params.start_year.checked_add(years));
    if last_year.is_none() {
        return Err(invalid("start year", "is too large to simulate from"));
    }

    Ok(())
}
