//! 評語
//!
//! 評分時先按判定順序記下所觸發的規則（[`Finding`]），再由本模塊統一轉為文字。
//! 規則記錄與措辭分開，便於單獨檢驗「觸發了哪條規則」。

use serde::{Deserialize, Serialize};

use crate::ganzhi::{Branch, Element, Stem};

/// 男方或女方
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Male,
    Female,
}

impl Party {
    pub fn other(self) -> Party {
        match self {
            Party::Male => Party::Female,
            Party::Female => Party::Male,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Party::Male => "男方",
            Party::Female => "女方",
        }
    }
}

/// 評分四項
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// 日主和諧度
    DayMaster,
    /// 五行平衡度
    FiveElements,
    /// 特殊組合
    SpecialCombinations,
    /// 沖剋避免
    Clashes,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::DayMaster,
        Dimension::FiveElements,
        Dimension::SpecialCombinations,
        Dimension::Clashes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::DayMaster => "日主和諧度",
            Dimension::FiveElements => "五行平衡度",
            Dimension::SpecialCombinations => "特殊組合",
            Dimension::Clashes => "沖剋避免",
        }
    }
    /// 基礎分
    pub fn base(self) -> u32 {
        match self {
            Dimension::DayMaster => 15,
            Dimension::FiveElements => 15,
            Dimension::SpecialCombinations => 10,
            Dimension::Clashes => 20,
        }
    }
    /// 滿分
    pub fn max(self) -> u32 {
        match self {
            Dimension::DayMaster => 30,
            Dimension::FiveElements => 25,
            Dimension::SpecialCombinations => 25,
            Dimension::Clashes => 20,
        }
    }
    fn heading(self) -> &'static str {
        match self {
            Dimension::DayMaster => "",
            Dimension::FiveElements => "分析雙方八字五行分佈：",
            Dimension::SpecialCombinations => "檢查雙方八字特殊組合：",
            Dimension::Clashes => "檢查雙方八字沖剋關係：",
        }
    }
}

/// 一條已觸發的評分規則及其涉及的干支、五行。
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Finding {
    /// 雙方日主
    DayMasters { male: Stem, female: Stem },
    /// 日主天干相合
    StemCombination { stems: [Stem; 2], result: Element },
    /// 一方日主五行生另一方
    Generation {
        from: Party,
        source: Element,
        target: Element,
    },
    /// 一方日主五行剋另一方
    Control {
        from: Party,
        source: Element,
        target: Element,
    },
    /// 日主五行互不生剋
    NeutralElements { male: Element, female: Element },
    /// 雙方八字所含五行，按首次出現順序
    ElementSets {
        male: Vec<Element>,
        female: Vec<Element>,
    },
    /// 雙方合計五行種數
    ElementDiversity { distinct: usize },
    /// 地支六合
    BranchCombination {
        male: Branch,
        female: Branch,
        result: Element,
    },
    /// 六合總數
    CombinationTally { count: usize },
    /// 地支相沖
    BranchClash { male: Branch, female: Branch },
    /// 相沖總數
    ClashTally { count: usize },
}

impl Finding {
    /// 本條規則的評語。
    pub fn sentence(&self) -> String {
        use Finding::*;
        match self {
            DayMasters { male, female } => format!("男方日主：{male}，女方日主：{female}。"),
            StemCombination { stems, result } => {
                format!("日主天干{}和{}相合，形成{result}，關係和諧。", stems[0], stems[1])
            }
            Generation {
                from,
                source,
                target,
            } => format!(
                "{}五行({source})生{}五行({target})，{}在關係中付出較多。",
                from.name(),
                from.other().name(),
                from.name()
            ),
            Control {
                from,
                source,
                target,
            } => format!(
                "{}五行({source})剋{}五行({target})，{}可能在關係中佔主導。",
                from.name(),
                from.other().name(),
                from.name()
            ),
            NeutralElements { male, female } => {
                format!("雙方五行({male}和{female})關係中性，互不相生相剋，關係平淡但穩定。")
            }
            ElementSets { male, female } => {
                format!("男方五行：{}；女方五行：{}。", join(male), join(female))
            }
            ElementDiversity { distinct } => match distinct {
                5.. => "雙方八字五行齊全，陰陽平衡，有利於相互補充。",
                4 => "雙方八字五行較為齊全，基本平衡，關係和諧。",
                3 => "雙方八字五行欠缺，平衡性一般，需要相互包容。",
                _ => "雙方八字五行單一，平衡性較差，可能在相處中有較多摩擦。",
            }
            .to_owned(),
            BranchCombination {
                male,
                female,
                result,
            } => format!("地支{male}和{female}六合，形成{result}。"),
            CombinationTally { count } => match count {
                3.. => "雙方八字中存在多個吉祥組合，婚姻大吉。",
                2 => "雙方八字中存在較好組合，婚姻和順。",
                1 => "雙方八字中存在一定組合，婚姻中等。",
                _ => "雙方八字中缺乏特殊組合，婚姻需要經營。",
            }
            .to_owned(),
            BranchClash { male, female } => format!("地支{male}和{female}相沖，可能帶來矛盾。"),
            ClashTally { count } => match count {
                3.. => "雙方八字沖剋嚴重，婚姻中容易產生矛盾。",
                2 => "雙方八字有一定沖剋，婚姻中需要相互理解。",
                1 => "雙方八字沖剋較少，婚姻基礎較好。",
                _ => "雙方八字無明顯沖剋，婚姻和諧。",
            }
            .to_owned(),
        }
    }
}

fn join(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|e| e.name())
        .collect::<Vec<_>>()
        .join("、")
}

/// 按判定順序累積規則記錄。
#[derive(Debug, Clone, Default)]
pub struct Narrative {
    findings: Vec<Finding>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, finding: Finding) -> &mut Self {
        self.findings.push(finding);
        self
    }
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// 將某一項的規則記錄轉為評語，前加該項標題。
pub fn render(dimension: Dimension, findings: &[Finding]) -> String {
    let mut text = dimension.heading().to_owned();
    for finding in findings {
        text.push_str(&finding.sentence());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences() {
        let data = [
            (
                Finding::DayMasters {
                    male: Stem::Gui,
                    female: Stem::Yi,
                },
                "男方日主：癸，女方日主：乙。",
            ),
            (
                Finding::StemCombination {
                    stems: [Stem::Jia, Stem::Ji],
                    result: Element::Earth,
                },
                "日主天干甲和己相合，形成土，關係和諧。",
            ),
            (
                Finding::Generation {
                    from: Party::Female,
                    source: Element::Water,
                    target: Element::Wood,
                },
                "女方五行(水)生男方五行(木)，女方在關係中付出較多。",
            ),
            (
                Finding::Control {
                    from: Party::Male,
                    source: Element::Metal,
                    target: Element::Wood,
                },
                "男方五行(金)剋女方五行(木)，男方可能在關係中佔主導。",
            ),
            (
                Finding::ElementSets {
                    male: vec![Element::Metal, Element::Fire],
                    female: vec![Element::Water],
                },
                "男方五行：金、火；女方五行：水。",
            ),
            (
                Finding::BranchClash {
                    male: Branch::Mao,
                    female: Branch::You,
                },
                "地支卯和酉相沖，可能帶來矛盾。",
            ),
            (Finding::ClashTally { count: 7 }, "雙方八字沖剋嚴重，婚姻中容易產生矛盾。"),
        ];
        for (finding, std) in data {
            assert_eq!(std, finding.sentence());
        }
    }

    #[test]
    fn render_with_heading() {
        let mut narrative = Narrative::new();
        narrative
            .push(Finding::BranchCombination {
                male: Branch::Wu,
                female: Branch::Wei,
                result: Element::Earth,
            })
            .push(Finding::CombinationTally { count: 1 });
        assert_eq!(
            "檢查雙方八字特殊組合：地支午和未六合，形成土。雙方八字中存在一定組合，婚姻中等。",
            render(Dimension::SpecialCombinations, narrative.findings())
        );
        assert_eq!("", render(Dimension::DayMaster, &[]));
    }

    #[test]
    fn dimension_bounds() {
        let total: u32 = Dimension::ALL.iter().map(|d| d.max()).sum();
        assert_eq!(100, total);
        for d in Dimension::ALL {
            assert!(d.base() <= d.max());
        }
    }

    #[test]
    fn finding_json() {
        let json = serde_json::to_string(&Finding::BranchClash {
            male: Branch::Zi,
            female: Branch::Wu,
        })
        .unwrap();
        assert_eq!(r#"{"rule":"branch_clash","male":"子","female":"午"}"#, json);
    }
}
