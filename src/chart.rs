//! 八字排盤
//!
//! 由農曆年、月、日、時辰推出年、月、日、時四柱。全部函數均為純函數，同一輸入必得同一結果。
//!
//! # 用例
//!
//! ```
//! use bazi::chart::to_chart;
//! use bazi::ganzhi::Branch;
//!
//! let chart = to_chart(1990, 5, 15, Branch::Wu, false).unwrap();
//! assert_eq!("庚午 壬午 癸卯 戊午", chart.to_string());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chinese::{LunarDate, Month, check_month, table::YearInfo};
use crate::config::{CalendarConfig, LeapCounting};
use crate::date::Date;
use crate::error::{RangeError, ValidationError};
use crate::ganzhi::{Branch, GanZhi, Stem};

/// 一柱，即一對干支。
pub type Pillar = GanZhi;

/// 五虎遁：年干（甲己、乙庚、丙辛、丁壬、戊癸）定正月月干。
const FIVE_TIGERS: [Stem; 5] = [Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren, Stem::Jia];

/// 五鼠遁：日干（甲己、乙庚、丙辛、丁壬、戊癸）定子時時干。
const FIVE_RATS: [Stem; 5] = [Stem::Jia, Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren];

/// 農曆 1900 年正月初一在六十甲子中的序號（甲辰）。
const EPOCH_CYCLE: u32 = 40;

/// 年柱。以 1984 年為甲子年。
///
/// ```
/// use bazi::chart::year_pillar;
///
/// assert_eq!("甲子", year_pillar(1984).to_string());
/// assert_eq!("庚子", year_pillar(1900).to_string());
/// ```
pub fn year_pillar(year: i32) -> Pillar {
    GanZhi::from_cycle(year as i64 - 4)
}

/// 月柱。正月建寅，月干依年干按五虎遁推算。
///
/// `month` 應在 `1..=12` 間。
pub fn month_pillar(year: i32, month: u32) -> Pillar {
    let year_stem = year_pillar(year).stem;
    let first = FIVE_TIGERS[year_stem.index() % 5];
    let offset = month as i64 - 1;
    GanZhi::new(
        Stem::from_index(first.index() as i64 + offset),
        Branch::from_index(month as i64 + 1),
    )
}

/// 日柱。
///
/// 自農曆 1900 年正月初一累計日數，只計平月；若 `is_leap_month` 且 `month` 正是該年閏月，
/// 則另加所閏平月的日數。`is_leap_month` 與該年閏月不符時不計。
///
/// 年份不在數據表內則回報 [`RangeError::Year`]。
///
/// ```
/// use bazi::chart::day_pillar;
///
/// assert_eq!("甲辰", day_pillar(1900, 1, 1, false).unwrap().to_string());
/// assert!(day_pillar(2050, 1, 1, false).is_err());
/// ```
pub fn day_pillar(year: i32, month: u32, day: u32, is_leap_month: bool) -> Result<Pillar, RangeError> {
    day_pillar_with(year, month, day, is_leap_month, LeapCounting::Regular)
}

/// 同 [`day_pillar`]，可選閏月計日方式。
pub fn day_pillar_with(
    year: i32,
    month: u32,
    day: u32,
    is_leap_month: bool,
    counting: LeapCounting,
) -> Result<Pillar, RangeError> {
    let offset = day_offset(year, month, day, is_leap_month, counting)?;
    Ok(GanZhi::from_cycle(((offset + EPOCH_CYCLE) % 60) as i64))
}

/// 時柱。時干依日干按五鼠遁推算。
///
/// ```
/// use bazi::chart::hour_pillar;
/// use bazi::ganzhi::{Branch, Stem};
///
/// assert_eq!("甲子", hour_pillar(Stem::Ji, Branch::Zi).to_string());
/// assert_eq!("丁亥", hour_pillar(Stem::Yi, Branch::Hai).to_string());
/// ```
pub fn hour_pillar(day_stem: Stem, hour: Branch) -> Pillar {
    let first = FIVE_RATS[day_stem.index() % 5];
    GanZhi::new(
        Stem::from_index((first.index() + hour.index()) as i64),
        hour,
    )
}

/// 排出八字。
///
/// 年份不在數據表內、月不在 `1..=12`、日不在 `1..=30` 均回報 [`RangeError`]。
pub fn to_chart(
    year: i32,
    month: u32,
    day: u32,
    hour: Branch,
    is_leap_month: bool,
) -> Result<Chart, RangeError> {
    to_chart_with(year, month, day, hour, is_leap_month, &CalendarConfig::default())
}

/// 同 [`to_chart`]，依給定曆法設定。
pub fn to_chart_with(
    year: i32,
    month: u32,
    day: u32,
    hour: Branch,
    is_leap_month: bool,
    config: &CalendarConfig,
) -> Result<Chart, RangeError> {
    let day_p = day_pillar_with(year, month, day, is_leap_month, config.leap_counting)?;
    Ok(Chart {
        year: year_pillar(year),
        month: month_pillar(year, month),
        day: day_p,
        hour: hour_pillar(day_p.stem, hour),
    })
}

fn day_offset(
    year: i32,
    month: u32,
    day: u32,
    is_leap_month: bool,
    counting: LeapCounting,
) -> Result<u32, RangeError> {
    let info = YearInfo::get(year)?;
    check_month(month)?;
    if !(1..=30).contains(&day) {
        return Err(RangeError::Day(day));
    }
    let mut offset: u32 = (crate::chinese::table::FIRST_YEAR..year)
        .map(|y| YearInfo::get(y).map(|i| i.days()))
        .sum::<Result<u32, _>>()?;
    offset += (1..month).map(|m| info.month_days(m)).sum::<u32>();
    let leap = info.leap_month();
    if counting == LeapCounting::Elapsed && leap.is_some_and(|m| m < month) {
        offset += info.leap_month_days().unwrap_or(0);
    }
    if is_leap_month && leap == Some(month) {
        offset += info.month_days(month);
    }
    Ok(offset + day - 1)
}

/// 八字：年、月、日、時四柱。
///
/// 序列化為八個干支字的數組，如 `["庚","午","壬","午","癸","卯","戊","午"]`，反序列化時逐字校驗。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Chart {
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }
    /// 日主，即日干。
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }
    pub fn stems(&self) -> [Stem; 4] {
        self.pillars().map(|p| p.stem)
    }
    pub fn branches(&self) -> [Branch; 4] {
        self.pillars().map(|p| p.branch)
    }
    /// 八字逐字列出，干支相間。
    pub fn symbols(&self) -> [&'static str; 8] {
        let p = self.pillars();
        std::array::from_fn(|i| {
            let pillar = p[i / 2];
            if i % 2 == 0 {
                pillar.stem.name()
            } else {
                pillar.branch.name()
            }
        })
    }

    /// 由八個干支字構造八字，須干支相間。
    ///
    /// # 用例
    ///
    /// ```
    /// use bazi::chart::Chart;
    ///
    /// let chart = Chart::from_symbols(&["壬", "申", "己", "酉", "乙", "未", "癸", "未"]).unwrap();
    /// assert_eq!("乙", chart.day_master().name());
    /// assert!(Chart::from_symbols(&["壬", "申"]).is_err());
    /// ```
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self, ValidationError> {
        if symbols.len() != 8 {
            return Err(ValidationError::Length(symbols.len()));
        }
        let mut pillars = [GanZhi::from_cycle(0); 4];
        for (i, pair) in symbols.chunks(2).enumerate() {
            pillars[i] = GanZhi::new(
                parse_stem(2 * i, pair[0].as_ref())?,
                parse_branch(2 * i + 1, pair[1].as_ref())?,
            );
        }
        let [year, month, day, hour] = pillars;
        Ok(Self {
            year,
            month,
            day,
            hour,
        })
    }
}

fn parse_stem(position: usize, symbol: &str) -> Result<Stem, ValidationError> {
    Stem::from_name(symbol).ok_or_else(|| misplaced(position, symbol, Branch::from_name(symbol).is_some()))
}

fn parse_branch(position: usize, symbol: &str) -> Result<Branch, ValidationError> {
    Branch::from_name(symbol).ok_or_else(|| misplaced(position, symbol, Stem::from_name(symbol).is_some()))
}

fn misplaced(position: usize, symbol: &str, known: bool) -> ValidationError {
    let symbol = symbol.to_owned();
    match (known, position % 2) {
        (false, _) => ValidationError::UnknownSymbol { position, symbol },
        (true, 0) => ValidationError::ExpectedStem { position, symbol },
        (true, _) => ValidationError::ExpectedBranch { position, symbol },
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::chinese::fmt::pillars(&self.pillars()))
    }
}

/// 八個干支字，空白可有可無，如 `庚午 壬午 癸卯 戊午` 或 `庚午壬午癸卯戊午`。
impl FromStr for Chart {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<String> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect();
        Self::from_symbols(&symbols[..])
    }
}

impl From<Chart> for Vec<String> {
    fn from(chart: Chart) -> Self {
        chart.symbols().iter().map(|s| s.to_string()).collect()
    }
}
impl TryFrom<Vec<String>> for Chart {
    type Error = ValidationError;
    fn try_from(symbols: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_symbols(&symbols[..])
    }
}

/// 生辰：農曆年月日、時辰及是否閏月。
///
/// 文本形式為 `年-月-日-時辰`，閏月在月前加 `L` 或「閏」，如 `2020-L4-01-子`。
///
/// ```
/// use bazi::chart::BirthTime;
///
/// let birth: BirthTime = "1992-8-20-未".parse().unwrap();
/// assert_eq!("壬申 己酉 乙未 癸未", birth.chart().unwrap().to_string());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(rename = "time")]
    pub hour: Branch,
    #[serde(default)]
    pub is_leap_month: bool,
}

impl BirthTime {
    /// 由公曆日期及時辰取得生辰。
    pub fn from_date(date: Date, hour: Branch) -> Result<Self, RangeError> {
        let lunar = LunarDate::from_date(date)?;
        Ok(Self::from_lunar(lunar, hour))
    }
    pub fn from_lunar(date: LunarDate, hour: Branch) -> Self {
        Self {
            year: date.year(),
            month: date.month().num(),
            day: date.day(),
            hour,
            is_leap_month: date.month().is_leap(),
        }
    }
    pub fn month(&self) -> Month {
        Month::new(self.month, self.is_leap_month)
    }
    pub fn chart(&self) -> Result<Chart, RangeError> {
        self.chart_with(&CalendarConfig::default())
    }
    pub fn chart_with(&self, config: &CalendarConfig) -> Result<Chart, RangeError> {
        to_chart_with(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.is_leap_month,
            config,
        )
    }
}

impl fmt::Display for BirthTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "L" } else { "" };
        write!(
            f,
            "{}-{}{:02}-{:02}-{}",
            self.year, leap, self.month, self.day, self.hour
        )
    }
}

impl FromStr for BirthTime {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str = "YEAR-MONTH-DAY-BRANCH, e.g. 2020-L4-01-子";
        let bad = || ValidationError::format(s, EXPECTED);
        let fields: Vec<&str> = s.trim().split('-').collect();
        let [year, month, day, hour] = fields[..] else {
            return Err(bad());
        };
        let (month, is_leap_month) = match month
            .strip_prefix('L')
            .or_else(|| month.strip_prefix('閏'))
        {
            Some(rest) => (rest, true),
            None => (month, false),
        };
        Ok(Self {
            year: year.parse().map_err(|_| bad())?,
            month: month.parse().map_err(|_| bad())?,
            day: day.parse().map_err(|_| bad())?,
            hour: hour.parse()?,
            is_leap_month,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(y: i32, m: u32, d: u32, hour: &str, leap: bool) -> String {
        to_chart(y, m, d, hour.parse().unwrap(), leap)
            .unwrap()
            .to_string()
    }

    #[test]
    fn epoch() {
        let c = to_chart(1900, 1, 1, Branch::Zi, false).unwrap();
        assert_eq!(Stem::Jia, c.day.stem);
        assert_eq!(Branch::Chen, c.day.branch);
        assert_eq!(GanZhi::from_cycle(1900 - 4), c.year);
        assert_eq!("庚子 戊寅 甲辰 甲子", c.to_string());
    }

    #[test]
    fn charts() {
        for ((y, m, d, h, leap), std) in [
            ((1990, 5, 15, "午", false), "庚午 壬午 癸卯 戊午"),
            ((1992, 8, 20, "未", false), "壬申 己酉 乙未 癸未"),
            ((2049, 12, 30, "亥", false), "己巳 丁丑 癸卯 癸亥"),
            ((2020, 4, 1, "子", true), "庚子 辛巳 丙寅 戊子"),
            ((2020, 4, 1, "子", false), "庚子 辛巳 丙申 戊子"),
        ] {
            assert_eq!(std, chart(y, m, d, h, leap), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn year_pillars() {
        for (year, std) in [(1984, "甲子"), (1900, "庚子"), (2000, "庚辰"), (2049, "己巳"), (3, "癸亥")] {
            assert_eq!(std, year_pillar(year).to_string());
        }
    }

    #[test]
    fn five_tigers() {
        for (year_stem_year, first) in [
            (1984, "丙寅"), // 甲
            (1985, "戊寅"), // 乙
            (1986, "庚寅"), // 丙
            (1987, "壬寅"), // 丁
            (1988, "甲寅"), // 戊
            (1989, "丙寅"), // 己
            (1993, "甲寅"), // 癸
        ] {
            assert_eq!(first, month_pillar(year_stem_year, 1).to_string());
        }
        assert_eq!("丁丑", month_pillar(1984, 12).to_string());
    }

    #[test]
    fn five_rats() {
        for (day_stem, std) in [
            (Stem::Jia, "甲子"),
            (Stem::Yi, "丙子"),
            (Stem::Bing, "戊子"),
            (Stem::Ding, "庚子"),
            (Stem::Wu, "壬子"),
            (Stem::Gui, "壬子"),
        ] {
            assert_eq!(std, hour_pillar(day_stem, Branch::Zi).to_string());
        }
    }

    #[test]
    fn leap_flag_ignored_when_not_leap_month() {
        assert_eq!(chart(2020, 5, 1, "子", false), chart(2020, 5, 1, "子", true));
        assert_eq!(chart(1992, 3, 3, "寅", false), chart(1992, 3, 3, "寅", true));
    }

    #[test]
    fn leap_counting() {
        // 閏四月之後的五月初一：只計平月時與閏四月初一同日
        let regular = day_pillar(2020, 5, 1, false).unwrap();
        assert_eq!(day_pillar(2020, 4, 1, true).unwrap(), regular);
        let elapsed = day_pillar_with(2020, 5, 1, false, LeapCounting::Elapsed).unwrap();
        let (e, r) = (elapsed.cycle_index().unwrap(), regular.cycle_index().unwrap());
        assert_eq!(29, (e + 60 - r) % 60);
        let civil = LunarDate::new(2020, Month::Common(5), 1).unwrap().sexagenary();
        assert_eq!(civil, elapsed);
    }

    #[test]
    fn elapsed_counting_matches_civil_days() {
        for year in [1900, 1957, 2017, 2033, 2049] {
            let info = YearInfo::get(year).unwrap();
            for (month, len) in info.months() {
                for day in [1, len] {
                    let date = LunarDate::new(year, month, day).unwrap();
                    let pillar =
                        day_pillar_with(year, month.num(), day, month.is_leap(), LeapCounting::Elapsed)
                            .unwrap();
                    assert_eq!(date.sexagenary(), pillar, "{date}");
                }
            }
        }
    }

    #[test]
    fn out_of_range() {
        for (y, m, d, std) in [
            (1899, 12, 1, RangeError::Year(1899)),
            (2050, 1, 1, RangeError::Year(2050)),
            (2000, 0, 1, RangeError::Month(0)),
            (2000, 13, 1, RangeError::Month(13)),
            (2000, 1, 0, RangeError::Day(0)),
            (2000, 1, 31, RangeError::Day(31)),
        ] {
            assert_eq!(Err(std), to_chart(y, m, d, Branch::Zi, false));
        }
    }

    #[test]
    fn symbols() {
        let c = to_chart(1990, 5, 15, Branch::Wu, false).unwrap();
        assert_eq!(["庚", "午", "壬", "午", "癸", "卯", "戊", "午"], c.symbols());
        assert_eq!(Ok(c), Chart::from_symbols(&c.symbols()));
        assert_eq!(Ok(c), "庚午壬午癸卯戊午".parse());
    }

    #[test]
    fn invalid_symbols() {
        let data: [(&[&str], ValidationError); 4] = [
            (&["甲", "子"], ValidationError::Length(2)),
            (
                &["甲", "子", "甲", "子", "甲", "X", "甲", "子"],
                ValidationError::UnknownSymbol {
                    position: 5,
                    symbol: "X".into(),
                },
            ),
            (
                &["子", "子", "甲", "子", "甲", "子", "甲", "子"],
                ValidationError::ExpectedStem {
                    position: 0,
                    symbol: "子".into(),
                },
            ),
            (
                &["甲", "子", "甲", "子", "甲", "子", "甲", "乙"],
                ValidationError::ExpectedBranch {
                    position: 7,
                    symbol: "乙".into(),
                },
            ),
        ];
        for (symbols, std) in data {
            assert_eq!(Err(std), Chart::from_symbols(symbols));
        }
    }

    #[test]
    fn serde_chart() {
        let c = to_chart(1992, 8, 20, Branch::Wei, false).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(r#"["壬","申","己","酉","乙","未","癸","未"]"#, json);
        assert_eq!(c, serde_json::from_str::<Chart>(&json).unwrap());
        assert!(serde_json::from_str::<Chart>(r#"["壬","申"]"#).is_err());
    }

    #[test]
    fn birth_time() {
        let birth: BirthTime = "2020-L4-01-子".parse().unwrap();
        assert!(birth.is_leap_month);
        assert_eq!(Month::Leap(4), birth.month());
        assert_eq!("2020-L04-01-子", birth.to_string());
        assert_eq!(Ok(birth), "2020-閏4-1-子".parse());
        assert!("2020-4-1".parse::<BirthTime>().is_err());
        assert!("2020-4-1-甲".parse::<BirthTime>().is_err());

        let json = serde_json::to_string(&birth).unwrap();
        assert_eq!(
            r#"{"year":2020,"month":4,"day":1,"time":"子","isLeapMonth":true}"#,
            json
        );
        let stored: BirthTime =
            serde_json::from_str(r#"{"year":1990,"month":5,"day":15,"time":"午"}"#).unwrap();
        assert!(!stored.is_leap_month);
    }

    #[test]
    fn birth_from_gregorian() {
        let date = Date::from_gregorian(2020, 5, 23).unwrap();
        let birth = BirthTime::from_date(date, Branch::Zi).unwrap();
        assert_eq!("2020-L04-01-子", birth.to_string());
        assert_eq!(
            Err(RangeError::OutsideTable(Date::from_gregorian(1900, 1, 1).unwrap())),
            BirthTime::from_date(Date::from_gregorian(1900, 1, 1).unwrap(), Branch::Zi)
        );
    }
}
