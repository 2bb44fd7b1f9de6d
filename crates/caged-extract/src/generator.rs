//! Deterministic generator of raw movement records.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use caged_model::record::{OCCUPATION_CODES, WAGE_RANGE, reporting_periods};
use caged_model::{MovementType, RawRecord, Region};

/// Produces the same record sequence for the same seed.
pub struct RecordGenerator {
    rng: StdRng,
    periods: Vec<NaiveDate>,
}

impl RecordGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            periods: reporting_periods(),
        }
    }

    pub fn next_record(&mut self) -> RawRecord {
        let period = self.periods[self.rng.gen_range(0..self.periods.len())];
        let region_code = Region::ALL[self.rng.gen_range(0..Region::ALL.len())];
        let occupation_code = OCCUPATION_CODES[self.rng.gen_range(0..OCCUPATION_CODES.len())];
        let wage = self.rng.gen_range(WAGE_RANGE.0..WAGE_RANGE.1);
        let movement_type = MovementType::ALL[self.rng.gen_range(0..MovementType::ALL.len())];
        RawRecord {
            period,
            region_code,
            occupation_code,
            wage,
            movement_type,
        }
    }

    /// Lazily yields exactly `count` records.
    pub fn records(&mut self, count: usize) -> impl Iterator<Item = RawRecord> + '_ {
        (0..count).map(move |_| self.next_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caged_model::record::is_reporting_period;

    #[test]
    fn same_seed_same_records() {
        let first: Vec<RawRecord> = RecordGenerator::new(42).records(200).collect();
        let second: Vec<RawRecord> = RecordGenerator::new(42).records(200).collect();
        assert_eq!(first, second);

        let other: Vec<RawRecord> = RecordGenerator::new(7).records(200).collect();
        assert_ne!(first, other);
    }

    #[test]
    fn values_stay_in_domain() {
        let mut generator = RecordGenerator::new(42);
        for record in generator.records(1_000) {
            assert!(is_reporting_period(record.period));
            assert!(OCCUPATION_CODES.contains(&record.occupation_code));
            assert!(record.wage >= WAGE_RANGE.0 && record.wage < WAGE_RANGE.1);
        }
    }

    #[test]
    fn injects_negative_wages() {
        let mut generator = RecordGenerator::new(42);
        let negatives = generator
            .records(5_000)
            .filter(|record| !record.has_valid_wage())
            .count();
        // 500 / 15500 of the interval is negative, roughly 3.2%.
        assert!(negatives > 50 && negatives < 350, "negatives = {negatives}");
    }
}
