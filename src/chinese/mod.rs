//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序採用預製的農曆數據表（見 [`table`]）推算 1900 至 2049 年的農曆日期。
//! 農曆 1900 年正月初一即公曆 1900 年 1 月 31 日，為推算起點。

use std::fmt as sfmt;

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::RangeError;

pub mod fmt;
pub mod table;

use table::YearInfo;

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 由月序號及是否閏月構造月名。
    pub fn new(num: u32, is_leap: bool) -> Self {
        if is_leap {
            Self::Leap(num)
        } else {
            Self::Common(num)
        }
    }
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「臘月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 取得農曆 `year` 年閏月月份，無閏月則為 `None`。
pub fn leap_month(year: i32) -> Result<Option<u32>, RangeError> {
    Ok(YearInfo::get(year)?.leap_month())
}

/// 取得農曆 `year` 年某月日數。
///
/// `is_leap` 為 `true` 時取閏月日數，若該年並無此閏月則回報 [`RangeError::NoLeapMonth`]。
///
/// # 用例
///
/// ```
/// use bazi::chinese::month_days;
///
/// assert_eq!(Ok(29), month_days(2017, 6, false));
/// assert_eq!(Ok(30), month_days(2017, 6, true));
/// assert!(month_days(2017, 5, true).is_err());
/// ```
pub fn month_days(year: i32, month: u32, is_leap: bool) -> Result<u32, RangeError> {
    let info = YearInfo::get(year)?;
    check_month(month)?;
    if !is_leap {
        return Ok(info.month_days(month));
    }
    match info.leap_month() {
        Some(m) if m == month => Ok(info.leap_month_days().unwrap_or(29)),
        _ => Err(RangeError::NoLeapMonth { year, month }),
    }
}

/// 取得農曆 `year` 年全年日數，含閏月。
pub fn year_days(year: i32) -> Result<u32, RangeError> {
    Ok(YearInfo::get(year)?.days())
}

/// 農曆推算起點：農曆 1900 年正月初一，即公曆 1900 年 1 月 31 日。
pub fn epoch() -> Date {
    Date::from_jdn(EPOCH_JDN)
}

const EPOCH_JDN: u32 = 2415051;

pub(crate) fn check_month(month: u32) -> Result<(), RangeError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(RangeError::Month(month))
    }
}

/// 農曆日期
///
/// 只能經 [`LunarDate::new`]、[`LunarDate::from_date`] 或反序列化構造，三者均核對數據表，
/// 故必為表內實有之日。序列化形式為 `{"year": .., "month": .., "day": ..}`。
///
/// # 用例
///
/// ```
/// use bazi::Date;
/// use bazi::chinese::{LunarDate, Month::*};
///
/// let date = LunarDate::new(2017, Leap(6), 1).unwrap();
/// assert_eq!("2017-07-23", date.to_date().iso_gregorian());
///
/// let date = LunarDate::from_date(Date::from_gregorian(2000, 2, 5).unwrap()).unwrap();
/// assert_eq!((2000, Common(1), 1), (date.year(), date.month(), date.day()));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "Fields", try_from = "Fields")]
pub struct LunarDate {
    year: i32,
    month: Month,
    day: u32,
    /// 自推算起點經過的日數
    elapsed: u32,
}

#[derive(Serialize, Deserialize)]
struct Fields {
    year: i32,
    month: Month,
    day: u32,
}

impl LunarDate {
    /// 構造農曆日期，並核對該月確有此日。
    pub fn new(year: i32, month: Month, day: u32) -> Result<Self, RangeError> {
        let len = month_days(year, month.num(), month.is_leap())?;
        if day == 0 || day > len {
            return Err(RangeError::DayOfMonth { month, day, len });
        }
        let mut elapsed = 0;
        for y in table::FIRST_YEAR..year {
            elapsed += YearInfo::get(y)?.days();
        }
        for (m, len) in YearInfo::get(year)?.months() {
            if m == month {
                return Ok(Self {
                    year,
                    month,
                    day,
                    elapsed: elapsed + day - 1,
                });
            }
            elapsed += len;
        }
        Err(RangeError::NoLeapMonth {
            year,
            month: month.num(),
        })
    }

    /// 取得公曆日期所在農曆日期。
    ///
    /// 支持自公曆 1900 年 1 月 31 日至 2050 年 1 月 22 日。
    pub fn from_date(date: Date) -> Result<Self, RangeError> {
        let elapsed = u32::try_from(date - epoch()).map_err(|_| RangeError::OutsideTable(date))?;
        let mut rest = elapsed;
        for year in table::FIRST_YEAR..=table::LAST_YEAR {
            let info = YearInfo::get(year)?;
            if rest >= info.days() {
                rest -= info.days();
                continue;
            }
            for (month, len) in info.months() {
                if rest < len {
                    return Ok(Self {
                        year,
                        month,
                        day: rest + 1,
                        elapsed,
                    });
                }
                rest -= len;
            }
        }
        Err(RangeError::OutsideTable(date))
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> Month {
        self.month
    }
    pub fn day(&self) -> u32 {
        self.day
    }

    /// 自推算起點至本日經過的日數，閏月按實計入。
    pub fn days_since_epoch(&self) -> u32 {
        self.elapsed
    }

    /// 轉為公曆日期。
    pub fn to_date(&self) -> Date {
        epoch() + self.elapsed as i32
    }

    /// 該日干支。
    pub fn sexagenary(&self) -> crate::ganzhi::GanZhi {
        self.to_date().sexagenary()
    }
}

impl From<LunarDate> for Fields {
    fn from(date: LunarDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
        }
    }
}
impl TryFrom<Fields> for LunarDate {
    type Error = RangeError;
    fn try_from(f: Fields) -> Result<Self, Self::Error> {
        Self::new(f.year, f.month, f.day)
    }
}

impl sfmt::Display for LunarDate {
    fn fmt(&self, f: &mut sfmt::Formatter<'_>) -> sfmt::Result {
        f.write_str(&fmt::lunar_date(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    #[test]
    fn epoch_date() {
        assert_eq!("1900-01-31", epoch().iso_gregorian());
        assert_eq!(Ok(epoch()), LunarDate::new(1900, Common(1), 1).map(|d| d.to_date()));
    }

    #[test]
    fn month_starts() {
        let stds = [
            (Common(1), "2017-01-28"),
            (Common(2), "2017-02-26"),
            (Common(3), "2017-03-28"),
            (Common(4), "2017-04-26"),
            (Common(5), "2017-05-26"),
            (Common(6), "2017-06-24"),
            (Leap(6), "2017-07-23"),
            (Common(7), "2017-08-22"),
            (Common(8), "2017-09-20"),
            (Common(9), "2017-10-20"),
            (Common(10), "2017-11-18"),
            (Common(11), "2017-12-18"),
        ];
        for (month, std) in stds {
            let date = LunarDate::new(2017, month, 1).unwrap();
            assert_eq!(std, date.to_date().iso_gregorian(), "{month:?}");
        }
    }

    #[test]
    fn dates() {
        let data = [
            ((2017, 1, 27), Ok((2016, Common(12), 30))),
            ((2017, 1, 28), Ok((2017, Common(1), 1))),
            ((2017, 7, 22), Ok((2017, Common(6), 29))),
            ((2017, 7, 23), Ok((2017, Leap(6), 1))),
            ((2017, 12, 17), Ok((2017, Common(10), 30))),
            ((2000, 2, 5), Ok((2000, Common(1), 1))),
            ((1900, 1, 31), Ok((1900, Common(1), 1))),
            ((2050, 1, 22), Ok((2049, Common(12), 29))),
        ];
        for ((y, m, d), std) in data {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(
                std,
                LunarDate::from_date(date).map(|l| (l.year(), l.month(), l.day()))
            );
        }
    }

    #[test]
    fn outside_table() {
        for (y, m, d) in [(1900, 1, 30), (2050, 1, 23)] {
            let date = Date::from_gregorian(y, m, d).unwrap();
            assert_eq!(Err(RangeError::OutsideTable(date)), LunarDate::from_date(date));
        }
    }

    #[test]
    fn round_trip_every_day() {
        let mut date = epoch();
        let mut count = 0;
        while let Ok(lunar) = LunarDate::from_date(date) {
            assert_eq!(date, lunar.to_date());
            assert_eq!(Ok(lunar), LunarDate::new(lunar.year(), lunar.month(), lunar.day()));
            date = date + 1;
            count += 1;
        }
        let total: u32 = (table::FIRST_YEAR..=table::LAST_YEAR)
            .map(|y| year_days(y).unwrap())
            .sum();
        assert_eq!(total, count);
    }

    #[test]
    fn strict_dates() {
        assert_eq!(
            Err(RangeError::DayOfMonth {
                month: Common(1),
                day: 30,
                len: 29
            }),
            LunarDate::new(2017, Common(1), 30)
        );
        assert_eq!(
            Err(RangeError::NoLeapMonth {
                year: 2017,
                month: 5
            }),
            LunarDate::new(2017, Leap(5), 1)
        );
        assert_eq!(Err(RangeError::Month(13)), LunarDate::new(2017, Common(13), 1));
        assert_eq!(Err(RangeError::Year(2050)), LunarDate::new(2050, Common(1), 1));
    }

    #[test]
    fn serde_checks_table() {
        let date = LunarDate::new(2020, Leap(4), 1).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(r#"{"year":2020,"month":{"Leap":4},"day":1}"#, json);
        assert_eq!(date, serde_json::from_str::<LunarDate>(&json).unwrap());
        assert_eq!("2020-05-23", date.to_date().iso_gregorian());

        for json in [
            r#"{"year":2100,"month":{"Common":1},"day":1}"#,
            r#"{"year":2049,"month":{"Leap":3},"day":1}"#,
            r#"{"year":2017,"month":{"Common":1},"day":30}"#,
        ] {
            assert!(serde_json::from_str::<LunarDate>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(Ok(Some(4)), leap_month(2020));
        assert_eq!(Ok(None), leap_month(2021));
        assert_eq!(Err(RangeError::Year(1899)), leap_month(1899));
        assert_eq!(Ok(384), year_days(2017));
        assert_eq!(Err(RangeError::Month(0)), month_days(2017, 0, false));
    }
}
