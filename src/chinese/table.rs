//! 農曆月份大小及閏月數據
//!
//! 每年一項，自 1900 年至 2049 年。各項按位壓縮：
//!
//! - 第 0–3 位：閏月月份，0 為無閏月
//! - 第 4–15 位：正月至十二月大小，正月在第 15 位，置位為大月（30 日），否則為小月（29 日）
//! - 第 16 位：閏月大小
//!
//! 數據在編譯期固定，運行期間只讀。

use super::Month;
use crate::error::RangeError;

/// 數據表首年
pub const FIRST_YEAR: i32 = 1900;
/// 數據表末年
pub const LAST_YEAR: i32 = 2049;

static LUNAR_INFO: [u32; (LAST_YEAR - FIRST_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900..=1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910..=1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920..=1929
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930..=1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940..=1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950..=1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960..=1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970..=1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980..=1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990..=1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000..=2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010..=2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020..=2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030..=2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040..=2049
];

/// 一年的壓縮數據
///
/// # 用例
///
/// ```
/// use bazi::chinese::table::YearInfo;
///
/// let info = YearInfo::get(2017).unwrap();
/// assert_eq!(Some(6), info.leap_month());
/// assert_eq!(384, info.days());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct YearInfo {
    year: i32,
    bits: u32,
}

impl YearInfo {
    /// 取得農曆 `year` 年的數據。
    ///
    /// 數據表無該年則回報 [`RangeError::Year`]。
    pub fn get(year: i32) -> Result<Self, RangeError> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(RangeError::Year(year));
        }
        Ok(Self {
            year,
            bits: LUNAR_INFO[(year - FIRST_YEAR) as usize],
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 閏月月份，無閏月則為 `None`。
    pub fn leap_month(&self) -> Option<u32> {
        match self.bits & 0xf {
            0 => None,
            m => Some(m),
        }
    }

    /// 平月 `month` 的日數，29 或 30。
    ///
    /// # Panics
    ///
    /// 若 `month` 不在 `1..=12` 間則 panic。
    pub fn month_days(&self, month: u32) -> u32 {
        assert!((1..=12).contains(&month), "month {} not in 1..=12", month);
        if self.bits & (0x8000 >> (month - 1)) != 0 {
            30
        } else {
            29
        }
    }

    /// 閏月日數，無閏月則為 `None`。
    pub fn leap_month_days(&self) -> Option<u32> {
        self.leap_month()
            .map(|_| if self.bits & 0x10000 != 0 { 30 } else { 29 })
    }

    /// 全年日數，含閏月。
    pub fn days(&self) -> u32 {
        (1..=12).map(|m| self.month_days(m)).sum::<u32>() + self.leap_month_days().unwrap_or(0)
    }

    /// 按時間順序列出全年各月及其日數，閏月緊隨其所閏之月。
    pub fn months(&self) -> impl Iterator<Item = (Month, u32)> + '_ {
        let leap = self.leap_month();
        (1..=12).flat_map(move |m| {
            let common = Some((Month::Common(m), self.month_days(m)));
            let leap = (leap == Some(m))
                .then(|| (Month::Leap(m), self.leap_month_days().unwrap_or(29)));
            common.into_iter().chain(leap)
        })
    }
}
