use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageParameters {
    pub start_year: i32,
    pub principal: f64,
    pub fortnightly_payment: f64,
    pub annual_lump_sum: f64,
    pub annual_interest_rate_percent: f64,
}

/// One simulated year. Monetary fields are rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub year_index: u32,
    pub calendar_year: i32,
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub ending_balance: f64,
}

/// The per-year data series a balance/payments chart is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub years: Vec<u32>,
    pub balance: Vec<f64>,
    pub principal_paid: Vec<f64>,
    pub interest_paid: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schedule {
    records: Vec<YearRecord>,
}

impl Schedule {
    pub(crate) fn new(records: Vec<YearRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    /// Calendar year of the final payment, `None` when nothing was owed.
    pub fn payoff_year(&self) -> Option<i32> {
        self.last().map(|record| record.calendar_year)
    }

    pub fn total_interest(&self) -> f64 {
        self.records.iter().map(|r| r.interest_paid).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.records.iter().map(|r| r.principal_paid).sum()
    }

    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries {
            years: self.records.iter().map(|r| r.year_index).collect(),
            balance: self.records.iter().map(|r| r.ending_balance).collect(),
            principal_paid: self.records.iter().map(|r| r.principal_paid).collect(),
            interest_paid: self.records.iter().map(|r| r.interest_paid).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a YearRecord;
    type IntoIter = std::slice::Iter<'a, YearRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
