use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Stored;
use crate::domain::WeekKey;

/// One driver's settlement for one working day. Keyed on (user, work date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub user_id: String,
    pub display_name: String,
    pub work_date: NaiveDate,
    pub mileage: f64,
    pub toll_fee: i64,
    pub hour_adjustment: f64,
    /// Base rate at submission time; later rate edits do not rewrite history.
    pub base_rate: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPaymentInput {
    pub mileage: f64,
    pub toll_fee: i64,
    #[serde(default)]
    pub hour_adjustment: f64,
    /// Defaults to today in business time.
    pub work_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub record_count: usize,
    pub mileage: f64,
    pub toll_fee: i64,
    pub hour_adjustment: f64,
    pub amount: i64,
}

impl PaymentTotals {
    /// Money columns saturate instead of wrapping.
    pub fn add(&mut self, record: &PaymentRecord) {
        self.record_count += 1;
        self.mileage += record.mileage;
        self.toll_fee = self.toll_fee.saturating_add(record.toll_fee);
        self.hour_adjustment += record.hour_adjustment;
        self.amount = self.amount.saturating_add(record.amount);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentSummary {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub records: Vec<Stored<PaymentRecord>>,
    pub totals: PaymentTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPayment {
    pub date: NaiveDate,
    pub record: Option<Stored<PaymentRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPaymentSummary {
    pub user_id: String,
    pub week: WeekKey,
    pub days: Vec<DailyPayment>,
    pub totals: PaymentTotals,
}

/// A driver known from payment records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverInfo {
    pub user_id: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(toll_fee: i64, amount: i64) -> PaymentRecord {
        PaymentRecord {
            user_id: "U1".to_string(),
            display_name: "Taro".to_string(),
            work_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            mileage: 7.0,
            toll_fee,
            hour_adjustment: 0.0,
            base_rate: 8000,
            amount,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn totals_saturate_on_oversized_records() {
        let mut totals = PaymentTotals::default();
        totals.add(&record(9_000_000_000_000_000_000, 9_000_000_000_000_000_000));
        totals.add(&record(9_000_000_000_000_000_000, 9_000_000_000_000_000_000));

        assert_eq!(totals.record_count, 2);
        assert_eq!(totals.toll_fee, i64::MAX);
        assert_eq!(totals.amount, i64::MAX);
    }
}
