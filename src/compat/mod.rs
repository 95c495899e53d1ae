//! 八字合婚
//!
//! 比較男女雙方八字，分四項評分，總分 `0..=100`：
//!
//! | 項目 | 基礎分 | 範圍 |
//! |------|--------|------|
//! | 日主和諧度 | 15 | `15..=30` |
//! | 五行平衡度 | 15 | `17..=25` |
//! | 特殊組合 | 10 | `10..=25` |
//! | 沖剋避免 | 20 | `5..=20` |
//!
//! 各項另附評語，由所觸發規則（見 [`narrative`]）生成。
//!
//! # 用例
//!
//! ```
//! use bazi::chart::to_chart;
//! use bazi::compat::score;
//! use bazi::ganzhi::Branch;
//!
//! let male = to_chart(1990, 5, 15, Branch::Wu, false).unwrap();
//! let female = to_chart(1992, 8, 20, Branch::Wei, false).unwrap();
//! let report = score(&male, &female);
//! assert_eq!(90, report.total_score);
//! assert!(report.details.clashes_details.contains("地支卯和酉相沖"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::config::{PairCounting, ScoringConfig};
use crate::error::ValidationError;
use crate::ganzhi::{Branch, Element, STEM_COMBINATIONS};

pub mod narrative;

pub use narrative::{Dimension, Finding, Narrative, Party};

/// 合婚結果
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// 總分，為四項之和
    pub total_score: u32,
    pub day_master_harmony: u32,
    pub five_elements_balance: u32,
    pub special_combinations: u32,
    pub clashes_avoidance: u32,
    pub details: Details,
    /// 各項所觸發規則，依判定順序
    pub findings: Findings,
}

/// 各項評語
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    pub day_master_details: String,
    pub five_elements_details: String,
    pub special_combinations_details: String,
    pub clashes_details: String,
}

/// 各項所觸發規則
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Findings {
    pub day_master: Vec<Finding>,
    pub five_elements: Vec<Finding>,
    pub special_combinations: Vec<Finding>,
    pub clashes: Vec<Finding>,
}

impl Report {
    /// 某一項得分。
    pub fn sub_score(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::DayMaster => self.day_master_harmony,
            Dimension::FiveElements => self.five_elements_balance,
            Dimension::SpecialCombinations => self.special_combinations,
            Dimension::Clashes => self.clashes_avoidance,
        }
    }
    /// 某一項評語。
    pub fn detail(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::DayMaster => &self.details.day_master_details,
            Dimension::FiveElements => &self.details.five_elements_details,
            Dimension::SpecialCombinations => &self.details.special_combinations_details,
            Dimension::Clashes => &self.details.clashes_details,
        }
    }
    /// 某一項所觸發規則。
    pub fn findings(&self, dimension: Dimension) -> &[Finding] {
        match dimension {
            Dimension::DayMaster => &self.findings.day_master,
            Dimension::FiveElements => &self.findings.five_elements,
            Dimension::SpecialCombinations => &self.findings.special_combinations,
            Dimension::Clashes => &self.findings.clashes,
        }
    }
    /// 依總分所得評級。
    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.total_score)
    }
}

/// 總分評級
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// 90 分以上
    Ideal,
    /// 80 分以上
    Good,
    /// 70 分以上
    AboveAverage,
    /// 60 分以上
    Fair,
    /// 50 分以上
    Strained,
    Unadvised,
}

impl Verdict {
    pub fn from_score(total: u32) -> Self {
        match total {
            90.. => Verdict::Ideal,
            80..=89 => Verdict::Good,
            70..=79 => Verdict::AboveAverage,
            60..=69 => Verdict::Fair,
            50..=59 => Verdict::Strained,
            _ => Verdict::Unadvised,
        }
    }
    pub fn description(self) -> &'static str {
        match self {
            Verdict::Ideal => "非常理想的婚配，天作之合",
            Verdict::Good => "良好的婚配，相處和諧",
            Verdict::AboveAverage => "中上等婚配，有較好基礎",
            Verdict::Fair => "一般婚配，需要互相包容",
            Verdict::Strained => "勉強婚配，婚後可能有較多磨合",
            Verdict::Unadvised => "不建議的婚配，可能面臨較大挑戰",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// 合婚評分，採默認設定。
pub fn score(male: &Chart, female: &Chart) -> Report {
    score_with(male, female, &ScoringConfig::default())
}

/// 合婚評分，依給定評分設定。
pub fn score_with(male: &Chart, female: &Chart, config: &ScoringConfig) -> Report {
    let (day_master, dm) = day_master_harmony(male, female);
    let (five_elements, fe) = five_elements_balance(male, female);
    let (special, sc) = special_combinations(male, female, config.pair_counting);
    let (clashes, cl) = clashes_avoidance(male, female, config.pair_counting);
    Report {
        total_score: day_master + five_elements + special + clashes,
        day_master_harmony: day_master,
        five_elements_balance: five_elements,
        special_combinations: special,
        clashes_avoidance: clashes,
        details: Details {
            day_master_details: narrative::render(Dimension::DayMaster, dm.findings()),
            five_elements_details: narrative::render(Dimension::FiveElements, fe.findings()),
            special_combinations_details: narrative::render(
                Dimension::SpecialCombinations,
                sc.findings(),
            ),
            clashes_details: narrative::render(Dimension::Clashes, cl.findings()),
        },
        findings: Findings {
            day_master: dm.into_findings(),
            five_elements: fe.into_findings(),
            special_combinations: sc.into_findings(),
            clashes: cl.into_findings(),
        },
    }
}

/// 由雙方各八個干支字評分。
///
/// # 用例
///
/// ```
/// use bazi::compat::score_symbols;
///
/// let male = ["庚", "午", "壬", "午", "癸", "卯", "戊", "午"];
/// let female = ["壬", "申", "己", "酉", "乙", "未", "癸", "未"];
/// assert_eq!(90, score_symbols(&male, &female).unwrap().total_score);
/// assert!(score_symbols(&male, &female[..6]).is_err());
/// ```
pub fn score_symbols<S: AsRef<str>>(male: &[S], female: &[S]) -> Result<Report, ValidationError> {
    let male = Chart::from_symbols(male)?;
    let female = Chart::from_symbols(female)?;
    Ok(score(&male, &female))
}

/// 日主和諧度：日干相合加 15；否則日干五行相生加 10、相剋加 5、互不生剋加 8。
fn day_master_harmony(male: &Chart, female: &Chart) -> (u32, Narrative) {
    let (m, f) = (male.day_master(), female.day_master());
    let mut narrative = Narrative::new();
    narrative.push(Finding::DayMasters { male: m, female: f });

    let combination = STEM_COMBINATIONS
        .iter()
        .find(|&&(a, b, _)| (a, b) == (m, f) || (a, b) == (f, m));
    let bonus = if let Some(&(a, b, result)) = combination {
        narrative.push(Finding::StemCombination {
            stems: [a, b],
            result,
        });
        15
    } else {
        let (me, fe) = (m.element(), f.element());
        let directed = [(Party::Male, me, fe), (Party::Female, fe, me)];
        if let Some(&(from, source, target)) =
            directed.iter().find(|(_, s, t)| s.generates() == *t)
        {
            narrative.push(Finding::Generation {
                from,
                source,
                target,
            });
            10
        } else if let Some(&(from, source, target)) =
            directed.iter().find(|(_, s, t)| s.controls() == *t)
        {
            narrative.push(Finding::Control {
                from,
                source,
                target,
            });
            5
        } else {
            narrative.push(Finding::NeutralElements {
                male: me,
                female: fe,
            });
            8
        }
    };
    (Dimension::DayMaster.base() + bonus, narrative)
}

/// 八字所含五行，按首次出現順序，不重複。
pub fn elements(chart: &Chart) -> Vec<Element> {
    let mut list = Vec::with_capacity(5);
    for pillar in chart.pillars() {
        for element in [pillar.stem.element(), pillar.branch.element()] {
            if !list.contains(&element) {
                list.push(element);
            }
        }
    }
    list
}

/// 五行平衡度：雙方合計五行五種加 10、四種加 8、三種加 5，其餘加 2。
fn five_elements_balance(male: &Chart, female: &Chart) -> (u32, Narrative) {
    let (m, f) = (elements(male), elements(female));
    let distinct = Element::ALL
        .iter()
        .filter(|e| m.contains(e) || f.contains(e))
        .count();
    let bonus = match distinct {
        5.. => 10,
        4 => 8,
        3 => 5,
        _ => 2,
    };
    let mut narrative = Narrative::new();
    narrative
        .push(Finding::ElementSets { male: m, female: f })
        .push(Finding::ElementDiversity { distinct });
    (Dimension::FiveElements.base() + bonus, narrative)
}

/// 男方每個地支對女方每個地支，依男方柱序、女方柱序列出。
fn branch_pairs(male: &Chart, female: &Chart, counting: PairCounting) -> Vec<(Branch, Branch)> {
    let side = |chart: &Chart| {
        let mut list = chart.branches().to_vec();
        if counting == PairCounting::Distinct {
            let mut seen = Vec::with_capacity(4);
            list.retain(|b| {
                let first = !seen.contains(b);
                seen.push(*b);
                first
            });
        }
        list
    };
    let female = side(female);
    side(male)
        .into_iter()
        .flat_map(|m| female.iter().map(move |&f| (m, f)))
        .collect()
}

/// 特殊組合：地支六合三對以上加 15、兩對加 10、一對加 5。
fn special_combinations(male: &Chart, female: &Chart, counting: PairCounting) -> (u32, Narrative) {
    let mut narrative = Narrative::new();
    let mut count = 0;
    for (m, f) in branch_pairs(male, female, counting) {
        if let Some(result) = m.combines_with(f) {
            narrative.push(Finding::BranchCombination {
                male: m,
                female: f,
                result,
            });
            count += 1;
        }
    }
    narrative.push(Finding::CombinationTally { count });
    let bonus = match count {
        0 => 0,
        1 => 5,
        2 => 10,
        _ => 15,
    };
    (Dimension::SpecialCombinations.base() + bonus, narrative)
}

/// 沖剋避免：地支相沖三對以上減 15、兩對減 10、一對減 5。
fn clashes_avoidance(male: &Chart, female: &Chart, counting: PairCounting) -> (u32, Narrative) {
    let mut narrative = Narrative::new();
    let mut count = 0;
    for (m, f) in branch_pairs(male, female, counting) {
        if m.clashes_with(f) {
            narrative.push(Finding::BranchClash { male: m, female: f });
            count += 1;
        }
    }
    narrative.push(Finding::ClashTally { count });
    let penalty = match count {
        0 => 0,
        1 => 5,
        2 => 10,
        _ => 15,
    };
    (Dimension::Clashes.base() - penalty, narrative)
}
