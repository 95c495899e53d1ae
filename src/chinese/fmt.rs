//! 格式化日期相關功能

use super::{LunarDate, Month};
use crate::ganzhi::GanZhi;

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 取得月名（含「月」字）。正月、十一月、十二月稱「正月」「冬月」「臘月」。
///
/// # 用例
///
/// ```
/// use bazi::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("閏四月", chinese::fmt::month(Leap(4)));
/// ```
///
/// # Panics
///
/// 若月序號不在 `1..=12` 間則 panic。
pub fn month(m: Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "閏";
    }
    let num = m.num();
    rt += match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "臘",
        _ => panic!("month {} not in 1..=12", num),
    };
    rt += "月";
    rt
}

/// 取得日名，前十日為「初一」到「初十」，第 21 至 29 日為「廿一」到「廿九」。
///
/// # 用例
///
/// ```
/// use bazi::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// ```
///
/// # Panics
///
/// 若日序號不在 `1..=30` 間則 panic。
pub fn day(d: u32) -> String {
    match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {} not in 1..=30", d),
    }
    .to_owned()
        + NUM_CHINESE[(d % 10) as usize]
}

/// 年名，以干支紀年，如「庚午年」。
pub fn year(y: i32) -> String {
    format!("{}年", crate::chart::year_pillar(y))
}

/// 農曆日期全名，如「庚午年五月十五」。
///
/// # 用例
///
/// ```
/// use bazi::chinese::{LunarDate, Month::*};
///
/// let date = LunarDate::new(2020, Leap(4), 1).unwrap();
/// assert_eq!("庚子年閏四月初一", date.to_string());
/// ```
pub fn lunar_date(date: &LunarDate) -> String {
    year(date.year()) + &month(date.month()) + &day(date.day())
}

/// 干支列為文本，各柱以空格分隔。
pub fn pillars<'a, I>(pillars: I) -> String
where
    I: IntoIterator<Item = &'a GanZhi>,
{
    pillars
        .into_iter()
        .map(GanZhi::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
