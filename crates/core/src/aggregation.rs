//! Income and population arithmetic over already-selected records.
//!
//! Nothing here touches the store. Each reporting operation selects the relevant visits
//! through the repository layer and reduces them with one of these functions. Sums are
//! exact decimal additions of each visit's fee. A sum that leaves the decimal range is an
//! error, never a wrapped or rounded value.

use crate::constants::PERCENTAGE_SCALE;
use crate::models::Visit;
use crate::{ClinicError, ClinicResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

fn add_fee(sum: Decimal, visit: &Visit) -> ClinicResult<Decimal> {
    sum.checked_add(visit.fee().amount())
        .ok_or(ClinicError::IncomeOverflow)
}

/// Sum of the fees of `visits`; zero when there are none.
///
/// # Errors
///
/// [`ClinicError::IncomeOverflow`] when the sum does not fit a decimal.
pub fn total_income<'a>(visits: impl IntoIterator<Item = &'a Visit>) -> ClinicResult<Decimal> {
    visits.into_iter().try_fold(Decimal::ZERO, add_fee)
}

/// Per-doctor income. Doctors without visits do not appear.
pub fn doctor_incomes<'a>(
    visits: impl IntoIterator<Item = &'a Visit>,
) -> ClinicResult<BTreeMap<i64, Decimal>> {
    let mut incomes = BTreeMap::new();
    for visit in visits {
        let income = incomes.entry(visit.doctor_id).or_insert(Decimal::ZERO);
        *income = add_fee(*income, visit)?;
    }
    Ok(incomes)
}

/// Number of doctors whose income is strictly greater than `threshold`.
pub fn count_doctors_above<'a>(
    visits: impl IntoIterator<Item = &'a Visit>,
    threshold: Decimal,
) -> ClinicResult<u64> {
    let count = doctor_incomes(visits)?
        .into_values()
        .filter(|income| *income > threshold)
        .count();
    Ok(count as u64)
}

/// `uninsured / total * 100`, rounded half away from zero to two places.
///
/// Returns `None` for an empty population.
pub fn uninsured_percentage(total: u64, uninsured: u64) -> Option<Decimal> {
    if total == 0 {
        return None;
    }
    let ratio = Decimal::from(uninsured) / Decimal::from(total);
    let mut percentage = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENTAGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    percentage.rescale(PERCENTAGE_SCALE);
    Some(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diagnosis, HealthSystem};
    use crate::{Fee, NonEmptyText};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn visit(id: i64, doctor_id: i64, fee: Decimal, insured: bool) -> Visit {
        Visit {
            id,
            patient_id: 1,
            patient_has_insurance: insured,
            doctor_id,
            health_system: HealthSystem {
                id: 1,
                no_insurance_fee: Fee::new(fee).unwrap(),
            },
            diagnoses: vec![Diagnosis {
                id: 1,
                name: NonEmptyText::new("Flu").unwrap(),
            }],
            visit_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_total_income_is_exact_sum() {
        assert_eq!(total_income(&Vec::<Visit>::new()).unwrap(), Decimal::ZERO);

        let visits = [
            visit(1, 1, dec!(0.10), true),
            visit(2, 2, dec!(0.20), false),
            visit(3, 1, dec!(99.99), false),
        ];
        assert_eq!(total_income(&visits).unwrap(), dec!(100.29));
        assert_eq!(
            total_income(visits.iter().filter(|v| !v.patient_has_insurance)).unwrap(),
            dec!(100.19)
        );
    }

    #[test]
    fn test_doctor_incomes_groups_by_doctor() {
        let visits = [
            visit(1, 7, dec!(10), true),
            visit(2, 3, dec!(5), true),
            visit(3, 7, dec!(10), false),
        ];
        let incomes = doctor_incomes(&visits).unwrap();
        assert_eq!(incomes.len(), 2);
        assert_eq!(incomes[&7], dec!(20));
        assert_eq!(incomes[&3], dec!(5));
    }

    #[test]
    fn test_count_doctors_above_is_strict() {
        let visits = [visit(1, 1, dec!(10), true), visit(2, 1, dec!(10), true)];

        assert_eq!(count_doctors_above(&visits, dec!(15)).unwrap(), 1);
        assert_eq!(count_doctors_above(&visits, dec!(20)).unwrap(), 0);
        assert_eq!(count_doctors_above(&visits, dec!(25)).unwrap(), 0);
        assert_eq!(count_doctors_above(&Vec::<Visit>::new(), dec!(0)).unwrap(), 0);
    }

    #[test]
    fn test_sums_past_decimal_range_are_errors() {
        let visits = [
            visit(1, 1, Decimal::MAX, true),
            visit(2, 1, Decimal::MAX, false),
        ];
        assert!(matches!(
            total_income(&visits),
            Err(ClinicError::IncomeOverflow)
        ));
        assert!(matches!(
            doctor_incomes(&visits),
            Err(ClinicError::IncomeOverflow)
        ));
        assert!(matches!(
            count_doctors_above(&visits, Decimal::ZERO),
            Err(ClinicError::IncomeOverflow)
        ));

        let separate = [
            visit(1, 1, Decimal::MAX, true),
            visit(2, 2, Decimal::MAX, false),
        ];
        assert_eq!(count_doctors_above(&separate, dec!(1)).unwrap(), 2);
    }

    #[test]
    fn test_uninsured_percentage_rounds_half_up() {
        assert_eq!(uninsured_percentage(0, 0), None);
        assert_eq!(uninsured_percentage(4, 1), Some(dec!(25.00)));
        assert_eq!(uninsured_percentage(3, 1), Some(dec!(33.33)));
        assert_eq!(uninsured_percentage(3, 2), Some(dec!(66.67)));
        assert_eq!(uninsured_percentage(8, 1), Some(dec!(12.50)));
        assert_eq!(uninsured_percentage(5, 0), Some(dec!(0.00)));
        // 0.125 and 0.625 sit exactly on a midpoint and round away from zero.
        assert_eq!(uninsured_percentage(800, 1), Some(dec!(0.13)));
        assert_eq!(uninsured_percentage(800, 5), Some(dec!(0.63)));
        assert_eq!(uninsured_percentage(400, 1), Some(dec!(0.25)));
        assert_eq!(
            uninsured_percentage(2, 2).map(|p| p.to_string()),
            Some("100.00".to_string())
        );
    }
}
