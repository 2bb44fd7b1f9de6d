//! Labor-market movement records and their fixed enumerations.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reporting month column (first day of the month).
pub const PERIOD: &str = "period";
/// Subnational region code column; also the partition key.
pub const REGION_CODE: &str = "region_code";
/// Occupation classification code column.
pub const OCCUPATION_CODE: &str = "occupation_code";
/// Monthly wage column.
pub const WAGE: &str = "wage";
/// Movement type column.
pub const MOVEMENT_TYPE: &str = "movement_type";

/// Column order of both the staging file and the curated dataset.
pub const RECORD_COLUMNS: [&str; 5] = [PERIOD, REGION_CODE, OCCUPATION_CODE, WAGE, MOVEMENT_TYPE];

/// Occupation classification codes drawn by the generator.
pub const OCCUPATION_CODES: [i64; 10] = [
    411005, 411010, 511205, 521110, 782205, 414105, 515105, 422305, 522310, 413205,
];

/// Half-open wage interval used for synthesis. The lower bound is negative on
/// purpose so the transform stage has something to remove.
pub const WAGE_RANGE: (f64, f64) = (-500.0, 15000.0);

/// First and last reporting months (inclusive).
pub const FIRST_PERIOD: (i32, u32) = (2023, 1);
pub const LAST_PERIOD: (i32, u32) = (2024, 12);

/// Subnational region codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    SP,
    RJ,
    MG,
    RS,
    BA,
    PR,
    CE,
    PE,
    SC,
    GO,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::SP,
        Region::RJ,
        Region::MG,
        Region::RS,
        Region::BA,
        Region::PR,
        Region::CE,
        Region::PE,
        Region::SC,
        Region::GO,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::SP => "SP",
            Region::RJ => "RJ",
            Region::MG => "MG",
            Region::RS => "RS",
            Region::BA => "BA",
            Region::PR => "PR",
            Region::CE => "CE",
            Region::PE => "PE",
            Region::SC => "SC",
            Region::GO => "GO",
        }
    }

    /// Case-insensitive lookup by code.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of labor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    Admission,
    Termination,
    Transfer,
}

impl MovementType {
    pub const ALL: [MovementType; 3] = [
        MovementType::Admission,
        MovementType::Termination,
        MovementType::Transfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Admission => "Admission",
            MovementType::Termination => "Termination",
            MovementType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the staging file.
///
/// Field order matches [`RECORD_COLUMNS`]; the CSV writer derives the header
/// from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub period: NaiveDate,
    pub region_code: Region,
    pub occupation_code: i64,
    pub wage: f64,
    pub movement_type: MovementType,
}

impl RawRecord {
    pub fn has_valid_wage(&self) -> bool {
        self.wage >= 0.0
    }
}

/// All reporting months between [`FIRST_PERIOD`] and [`LAST_PERIOD`], as the
/// first day of each month.
pub fn reporting_periods() -> Vec<NaiveDate> {
    let mut periods = Vec::new();
    let (mut year, mut month) = FIRST_PERIOD;
    while (year, month) <= LAST_PERIOD {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) {
            periods.push(date);
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    periods
}

/// Returns true if `date` is one of the [`reporting_periods`].
pub fn is_reporting_period(date: NaiveDate) -> bool {
    date.day() == 1
        && (date.year(), date.month()) >= FIRST_PERIOD
        && (date.year(), date.month()) <= LAST_PERIOD
}
