use comfy_table::{CellAlignment, Table, presets::UTF8_FULL};

use crate::core::Schedule;

pub const COLUMNS: [&str; 5] = [
    "Year",
    "Actual Year",
    "Interest Paid",
    "Principal Paid",
    "Mortgage Balance",
];

pub fn render_table(schedule: &Schedule) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(COLUMNS);

    for record in schedule {
        table.add_row(vec![
            record.year_index.to_string(),
            record.calendar_year.to_string(),
            whole_units(record.interest_paid),
            whole_units(record.principal_paid),
            whole_units(record.ending_balance),
        ]);
    }

    for index in 2..COLUMNS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

pub fn render_summary(schedule: &Schedule) -> String {
    match schedule.payoff_year() {
        Some(payoff_year) => format!(
            "Paid off in {payoff_year} after {} years: interest {}, principal {}",
            schedule.len(),
            whole_units(schedule.total_interest()),
            whole_units(schedule.total_principal()),
        ),
        None => "Nothing owed: the mortgage is already paid off".to_string(),
    }
}

fn whole_units(amount: f64) -> String {
    format!("{amount:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MortgageParameters, simulate};

    fn zero_rate_schedule() -> Schedule {
        simulate(&MortgageParameters {
            start_year: 2024,
            principal: 60_000.0,
            fortnightly_payment: 1_000.0,
            annual_lump_sum: 0.0,
            annual_interest_rate_percent: 0.0,
        })
        .expect("loan amortizes")
    }

    #[test]
    fn table_has_header_and_one_row_per_year() {
        let rendered = render_table(&zero_rate_schedule());

        for column in COLUMNS {
            assert!(rendered.contains(column), "missing column {column}");
        }
        assert!(rendered.contains("2025"));
        assert!(rendered.contains("2026"));
        assert!(rendered.contains("2027"));
        assert!(!rendered.contains("2028"));
        assert!(rendered.contains("34000"));
        assert!(rendered.contains("8000"));
    }

    #[test]
    fn summary_reports_payoff_year_and_totals() {
        let summary = render_summary(&zero_rate_schedule());
        assert_eq!(
            summary,
            "Paid off in 2027 after 3 years: interest 0, principal 60000"
        );
    }

    #[test]
    fn summary_for_empty_schedule() {
        let summary = render_summary(&Schedule::default());
        assert!(summary.contains("already paid off"));
    }
}
