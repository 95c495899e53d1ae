//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RangeError, ValidationError};
use crate::ganzhi::GanZhi;

/// A calendar-independant date, stored as its Julian day number (JDN).
///
/// Serializes in ISO 8601 Gregorian form (`"2000-01-01"`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number.
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a proleptic Gregorian calendar date.
    ///
    /// `year` is an astronomical year number, i.e. 1 BC is `0`.
    ///
    /// # Errors
    ///
    /// [`RangeError::Gregorian`] if the month or day does not exist, or the
    /// date lies outside JDN `0..=u32::MAX`.
    ///
    /// # Example
    ///
    /// ```
    /// use bazi::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_gregorian(2001, 2, 29).is_err());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Result<Self, RangeError> {
        let err = RangeError::Gregorian { year, month, day };
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(err);
        }
        let (y, m, d) = (year as i64, month as i64, day as i64);
        let jdn = (1461 * (y + 4800 + (m - 14) / 12)) / 4
            + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
            - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
            + d
            - 32075;
        u32::try_from(jdn).map(Self::from_jdn).map_err(|_| err)
    }
    /// Represents the date in Gregorian calendar, as `(year, month, day)`.
    ///
    /// # Example
    ///
    /// ```
    /// use bazi::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date as ISO 8601, e.g. `1900-01-31`.
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the sexagenary (干支) day of the date.
    ///
    /// # Example
    ///
    /// ```
    /// use bazi::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("戊午", date.sexagenary().to_string());
    /// ```
    pub fn sexagenary(&self) -> GanZhi {
        GanZhi::from_cycle((self.jdn as i64 + 49) % 60)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn.wrapping_add_signed(rhs))
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}
impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.iso_gregorian())
    }
}

/// Parses `YYYY-MM-DD`.
impl FromStr for Date {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<i32> = s
            .trim()
            .split('-')
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| ValidationError::format(s, "YYYY-MM-DD"))?;
        match fields[..] {
            [y, m, d] => Ok(Date::from_gregorian(y, m, d)?),
            _ => Err(ValidationError::format(s, "YYYY-MM-DD").into()),
        }
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.iso_gregorian()
    }
}
impl TryFrom<String> for Date {
    type Error = crate::Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && year % 100 != 0 || year % 400 == 0
}

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gregorian() {
        for ((y, m, d), jdn) in [
            ((1970, 1, 1), 2440588),
            ((2021, 9, 8), 2459466),
            ((1900, 1, 31), 2415051),
            ((2000, 2, 29), 2451604),
        ] {
            assert_eq!(jdn, Date::from_gregorian(y, m, d).unwrap().jdn());
        }
    }

    #[test]
    fn invalid_gregorian() {
        for (y, m, d) in [
            (1900, 2, 29),
            (2021, 13, 1),
            (2021, 0, 1),
            (2021, 4, 31),
            (2021, 1, 0),
            (-4714, 1, 1),
            (99_999_999, 1, 1),
            (i32::MAX, 12, 31),
            (i32::MIN, 1, 1),
        ] {
            assert_eq!(
                Err(RangeError::Gregorian {
                    year: y,
                    month: m,
                    day: d
                }),
                Date::from_gregorian(y, m, d)
            );
        }
    }

    #[test]
    fn to_gregorian() {
        for (jdn, ymd) in [
            (2440588, (1970, 1, 1)),
            (2459466, (2021, 9, 8)),
            (2451545, (2000, 1, 1)),
        ] {
            assert_eq!(ymd, Date::from_jdn(jdn).gregorian());
        }
    }

    #[test]
    fn to_sexagenary() {
        for ((y, m, d), std) in [
            ((1970, 1, 1), "辛巳"),
            ((2021, 9, 8), "己未"),
            ((1900, 1, 31), "甲辰"),
        ] {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(std, date.sexagenary().to_string());
        }
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2020, 2, 28).unwrap();
        assert_eq!("2020-03-01", (date + 2).iso_gregorian());
        assert_eq!("2020-02-27", (date + -1).iso_gregorian());
        assert_eq!(2, (date + 2) - date);
    }

    #[test]
    fn parse() {
        assert_eq!(
            Ok(Date::from_gregorian(1992, 9, 16).unwrap()),
            "1992-09-16".parse::<Date>()
        );
        assert!("1992/09/16".parse::<Date>().is_err());
        assert!("1992-09".parse::<Date>().is_err());
        assert!("1992-02-30".parse::<Date>().is_err());
        assert!("99999999-01-01".parse::<Date>().is_err());
        assert!(serde_json::from_str::<Date>(r#""99999999-01-01""#).is_err());
    }
}
