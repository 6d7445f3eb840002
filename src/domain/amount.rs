use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};

use super::DomainError;

/// Each completed block of this many kilometres...
const KM_PER_MILEAGE_BLOCK: i64 = 7;
/// ...and pays this much.
const MILEAGE_BLOCK_FEE: i64 = 100;
/// An hour of adjustment is worth base rate / 5.
const HOURS_PER_BASE_RATE: i64 = 5;

/// Upper bounds on a single day's inputs and result.
pub const MAX_MILEAGE_KM: f64 = 5_000.0;
pub const MAX_TOLL_FEE: i64 = 1_000_000;
pub const MAX_HOUR_ADJUSTMENT: f64 = 24.0;
pub const MAX_BASE_RATE: i64 = 1_000_000;
pub const MAX_AMOUNT: i64 = 10_000_000;

/// Settlement amount for one working day, in whole currency units.
///
/// `floor(mileage / 7) * 100 + toll_fee + base_rate + hour_adjustment * (base_rate / 5)`
///
/// The arithmetic is exact; only the final total is rounded (half up), so a
/// fractional hour adjustment never accumulates float error.
pub fn compute_amount(
    mileage_km: f64,
    toll_fee: i64,
    hour_adjustment: f64,
    base_rate: i64,
) -> Result<i64, DomainError> {
    if !mileage_km.is_finite() || !(0.0..=MAX_MILEAGE_KM).contains(&mileage_km) {
        return Err(DomainError::InvalidInput(format!(
            "mileage must be between 0 and {}, got {}",
            MAX_MILEAGE_KM, mileage_km
        )));
    }
    if !hour_adjustment.is_finite() || hour_adjustment.abs() > MAX_HOUR_ADJUSTMENT {
        return Err(DomainError::InvalidInput(format!(
            "hour adjustment must be within +/-{} hours, got {}",
            MAX_HOUR_ADJUSTMENT, hour_adjustment
        )));
    }
    if !(0..=MAX_TOLL_FEE).contains(&toll_fee) {
        return Err(DomainError::InvalidInput(format!(
            "toll fee must be between 0 and {}, got {}",
            MAX_TOLL_FEE, toll_fee
        )));
    }
    check_base_rate(base_rate)?;

    let mileage = decimal(mileage_km)?;
    let hours = decimal(hour_adjustment)?;
    let base = BigDecimal::from(base_rate);

    let mileage_fee = (mileage / BigDecimal::from(KM_PER_MILEAGE_BLOCK))
        .with_scale_round(0, RoundingMode::Floor)
        * BigDecimal::from(MILEAGE_BLOCK_FEE);
    let hour_fee = hours * &base / BigDecimal::from(HOURS_PER_BASE_RATE);

    let total = mileage_fee + BigDecimal::from(toll_fee) + base + hour_fee;

    total
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_i64()
        .filter(|amount| (-MAX_AMOUNT..=MAX_AMOUNT).contains(amount))
        .ok_or_else(|| DomainError::InvalidInput("amount is out of range".to_string()))
}

pub fn check_base_rate(base_rate: i64) -> Result<i64, DomainError> {
    if (0..=MAX_BASE_RATE).contains(&base_rate) {
        Ok(base_rate)
    } else {
        Err(DomainError::InvalidInput(format!(
            "base rate must be between 0 and {}, got {}",
            MAX_BASE_RATE, base_rate
        )))
    }
}

// Goes through the shortest decimal rendering so 0.1 stays 0.1.
fn decimal(value: f64) -> Result<BigDecimal, DomainError> {
    BigDecimal::from_str(&value.to_string())
        .map_err(|e| DomainError::InvalidInput(format!("{}: {}", value, e)))
}
