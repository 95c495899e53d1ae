//! 天干、地支、五行及其生剋合沖關係
//!
//! 天干十、地支十二，各屬五行之一。本模塊所有關係表均為靜態常量，程序運行期間不會改動。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 五行
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Element {
    #[serde(rename = "木")]
    Wood,
    #[serde(rename = "火")]
    Fire,
    #[serde(rename = "土")]
    Earth,
    #[serde(rename = "金")]
    Metal,
    #[serde(rename = "水")]
    Water,
}

impl Element {
    /// 相生序：木火土金水
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// 所生之行：木生火、火生土、土生金、金生水、水生木。
    pub fn generates(self) -> Element {
        use Element::*;
        match self {
            Wood => Fire,
            Fire => Earth,
            Earth => Metal,
            Metal => Water,
            Water => Wood,
        }
    }
    /// 所剋之行：木剋土、土剋水、水剋火、火剋金、金剋木。
    pub fn controls(self) -> Element {
        use Element::*;
        match self {
            Wood => Earth,
            Earth => Water,
            Water => Fire,
            Fire => Metal,
            Metal => Wood,
        }
    }
    pub fn name(self) -> &'static str {
        ["木", "火", "土", "金", "水"][self as usize]
    }
}

/// 天干
///
/// # 用例
///
/// ```
/// use bazi::ganzhi::{Element, Stem};
///
/// let stem: Stem = "癸".parse().unwrap();
/// assert_eq!(Stem::Gui, stem);
/// assert_eq!(Element::Water, stem.element());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲")]
    Jia,
    #[serde(rename = "乙")]
    Yi,
    #[serde(rename = "丙")]
    Bing,
    #[serde(rename = "丁")]
    Ding,
    #[serde(rename = "戊")]
    Wu,
    #[serde(rename = "己")]
    Ji,
    #[serde(rename = "庚")]
    Geng,
    #[serde(rename = "辛")]
    Xin,
    #[serde(rename = "壬")]
    Ren,
    #[serde(rename = "癸")]
    Gui,
}

const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// 依序號取天干，序號按 10 取模（可為負），甲為 0。
    pub fn from_index(idx: i64) -> Stem {
        Self::ALL[idx.rem_euclid(10) as usize]
    }
    /// 序號，甲為 0，癸為 9。
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn element(self) -> Element {
        Element::ALL[self.index() / 2]
    }
    pub fn name(self) -> &'static str {
        STEM_NAMES[self.index()]
    }
    /// 依文字取天干，非天干則為 `None`。
    pub fn from_name(name: &str) -> Option<Stem> {
        STEM_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self::ALL[i])
    }
    /// 若兩干相合，返回所化之行。
    pub fn combines_with(self, other: Stem) -> Option<Element> {
        STEM_COMBINATIONS
            .iter()
            .find(|(a, b, _)| (*a, *b) == (self, other) || (*b, *a) == (self, other))
            .map(|&(_, _, element)| element)
    }
}

/// 地支
///
/// 地支亦用以表示時辰，每一時辰兩小時，子時自 23 時起。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子")]
    Zi,
    #[serde(rename = "丑")]
    Chou,
    #[serde(rename = "寅")]
    Yin,
    #[serde(rename = "卯")]
    Mao,
    #[serde(rename = "辰")]
    Chen,
    #[serde(rename = "巳")]
    Si,
    #[serde(rename = "午")]
    Wu,
    #[serde(rename = "未")]
    Wei,
    #[serde(rename = "申")]
    Shen,
    #[serde(rename = "酉")]
    You,
    #[serde(rename = "戌")]
    Xu,
    #[serde(rename = "亥")]
    Hai,
}

const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// 依序號取地支，序號按 12 取模（可為負），子為 0。
    pub fn from_index(idx: i64) -> Branch {
        Self::ALL[idx.rem_euclid(12) as usize]
    }
    /// 序號，子為 0，亥為 11。
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn element(self) -> Element {
        use Element::*;
        [
            Water, Earth, Wood, Wood, Earth, Fire, Fire, Earth, Metal, Metal, Earth, Water,
        ][self.index()]
    }
    pub fn name(self) -> &'static str {
        BRANCH_NAMES[self.index()]
    }
    /// 依文字取地支，非地支則為 `None`。
    pub fn from_name(name: &str) -> Option<Branch> {
        BRANCH_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self::ALL[i])
    }

    /// 取得鐘點所在時辰。`hour` 為 `0..=23`，超出則為 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use bazi::ganzhi::Branch;
    ///
    /// assert_eq!(Some(Branch::Zi), Branch::from_clock_hour(23));
    /// assert_eq!(Some(Branch::Zi), Branch::from_clock_hour(0));
    /// assert_eq!(Some(Branch::Wu), Branch::from_clock_hour(12));
    /// ```
    pub fn from_clock_hour(hour: u32) -> Option<Branch> {
        (hour < 24).then(|| Self::from_index((hour as i64 + 1) / 2))
    }
    /// 時辰起止鐘點，格式為 `(起, 止)`，子時為 `(23, 1)`。
    pub fn clock_hours(self) -> (u32, u32) {
        let start = (self.index() as u32 * 2 + 23) % 24;
        (start, (start + 2) % 24)
    }

    /// 若兩支六合，返回所化之行。
    pub fn combines_with(self, other: Branch) -> Option<Element> {
        BRANCH_COMBINATIONS
            .iter()
            .find(|(a, b, _)| (*a, *b) == (self, other) || (*b, *a) == (self, other))
            .map(|&(_, _, element)| element)
    }
    /// 兩支是否相沖。
    pub fn clashes_with(self, other: Branch) -> bool {
        BRANCH_CLASHES
            .iter()
            .any(|&(a, b)| (a, b) == (self, other) || (b, a) == (self, other))
    }
}

/// 天干五合
pub const STEM_COMBINATIONS: [(Stem, Stem, Element); 5] = [
    (Stem::Jia, Stem::Ji, Element::Earth),
    (Stem::Yi, Stem::Geng, Element::Metal),
    (Stem::Bing, Stem::Xin, Element::Water),
    (Stem::Ding, Stem::Ren, Element::Wood),
    (Stem::Wu, Stem::Gui, Element::Fire),
];

/// 地支六合
pub const BRANCH_COMBINATIONS: [(Branch, Branch, Element); 6] = [
    (Branch::Zi, Branch::Chou, Element::Earth),
    (Branch::Yin, Branch::Hai, Element::Wood),
    (Branch::Mao, Branch::Xu, Element::Fire),
    (Branch::Chen, Branch::You, Element::Metal),
    (Branch::Si, Branch::Shen, Element::Water),
    (Branch::Wu, Branch::Wei, Element::Earth),
];

/// 地支六沖
pub const BRANCH_CLASHES: [(Branch, Branch); 6] = [
    (Branch::Zi, Branch::Wu),
    (Branch::Chou, Branch::Wei),
    (Branch::Yin, Branch::Shen),
    (Branch::Mao, Branch::You),
    (Branch::Chen, Branch::Xu),
    (Branch::Si, Branch::Hai),
];

/// 干支，即一柱。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GanZhi {
    pub stem: Stem,
    pub branch: Branch,
}

impl GanZhi {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }
    /// 依六十甲子序號取干支，甲子為 0，癸亥為 59。
    ///
    /// # 用例
    ///
    /// ```
    /// use bazi::ganzhi::GanZhi;
    ///
    /// assert_eq!("甲辰", GanZhi::from_cycle(40).to_string());
    /// ```
    pub fn from_cycle(idx: i64) -> Self {
        Self::new(Stem::from_index(idx), Branch::from_index(idx))
    }
    /// 六十甲子序號。干支陰陽不同（如甲丑）者不在六十甲子之中，為 `None`。
    ///
    /// ```
    /// use bazi::ganzhi::{Branch, GanZhi, Stem};
    ///
    /// assert_eq!(Some(40), GanZhi::new(Stem::Jia, Branch::Chen).cycle_index());
    /// assert_eq!(None, GanZhi::new(Stem::Jia, Branch::Chou).cycle_index());
    /// ```
    pub fn cycle_index(self) -> Option<usize> {
        let (s, b) = (self.stem.index(), self.branch.index());
        // b + 12k 依次遍歷與 b 同陰陽的五個天干
        (0..5).map(|k| b + 12 * k).find(|i| i % 10 == s)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl fmt::Display for GanZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for Stem {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| ValidationError::format(s, "a heavenly stem"))
    }
}
impl FromStr for Branch {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| ValidationError::format(s, "an earthly branch"))
    }
}
