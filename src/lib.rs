//! BaZi (Four Pillars) charts from Chinese lunisolar birth dates, and a
//! rule-based compatibility score between two charts.
//!
//! Lunar dates are supported from lunar 1900 to lunar 2049, i.e. Gregorian
//! 1900-01-31 to 2050-01-22, using a precomputed month-length table.
//!
//! # Examples
//!
//! Deriving a chart:
//!
//! ```
//! use bazi::to_chart;
//! use bazi::ganzhi::Branch;
//!
//! let chart = to_chart(1990, 5, 15, Branch::Wu, false).unwrap();
//!
//! assert_eq!("庚午 壬午 癸卯 戊午", chart.to_string());
//! assert_eq!("癸", chart.day_master().name());
//! ```
//!
//! Scoring two charts:
//!
//! ```
//! use bazi::{score, to_chart};
//! use bazi::ganzhi::Branch;
//!
//! let male = to_chart(1990, 5, 15, Branch::Wu, false).unwrap();
//! let female = to_chart(1992, 8, 20, Branch::Wei, false).unwrap();
//! let report = score(&male, &female);
//!
//! assert_eq!(90, report.total_score);
//! assert_eq!(25, report.day_master_harmony);
//! ```
//!
//! Converting between Gregorian and lunar dates:
//!
//! ```
//! use bazi::Date;
//! use bazi::chinese::{LunarDate, Month::*};
//!
//! let date = Date::from_gregorian(2020, 5, 23).unwrap();
//! let lunar = LunarDate::from_date(date).unwrap();
//!
//! assert_eq!((2020, Leap(4), 1), (lunar.year(), lunar.month(), lunar.day()));
//! assert_eq!(date, lunar.to_date());
//! ```

pub mod chart;
pub mod chinese;
pub mod compat;
pub mod config;
pub mod date;
pub mod error;
pub mod ganzhi;

pub use chart::{BirthTime, Chart, to_chart};
pub use compat::{Report, score};
pub use date::Date;
pub use error::{Error, RangeError, ValidationError};
