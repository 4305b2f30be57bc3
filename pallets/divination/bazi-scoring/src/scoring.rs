//! # 运势评分
//!
//! 事业财运、大运、流年、流月四级评分。
//!
//! 加减分全部表驱动：一条 [`Rule`] 是 (子类, 分值, 说明)，同一方向下的基础分与细则
//! 组成一个 [`Cascade`]，由 [`ScoreAccumulator::cascade`] 统一执行。子类按名称包含
//! 匹配，"合"覆盖合、六合、三合，"克"覆盖克、被克。
//!
//! 被制之字遇 `-` 作用为得力（加分），遇 `+` 作用为失力（减分）。

use crate::calculations::month_ganzhi_of;
use crate::dayun::{DaYun, DaYunList};
use crate::error::{Error, Stage};
use crate::relations::{gan_relation, zhi_relation, Relation, RelationKind, Sign};
use crate::shishen::{canggan, resolve_gan, resolve_zhi};
use crate::types::{DiZhi, GanZhi, ShiShen, SiZhu, TianGan, Tier, ZhuPosition};
use crate::zuogong::{Favour, ZuoGongAnalysis};
use alloc::{format, string::String};
use codec::{Decode, DecodeWithMemTracking, Encode};
use scale_info::TypeInfo;
use sp_std::prelude::*;

const SHI_SHANG: [ShiShen; 2] = [ShiShen::ShiShen, ShiShen::ShangGuan];
const CAI: [ShiShen; 2] = [ShiShen::ZhengCai, ShiShen::PianCai];
const YIN_XIAO: [ShiShen; 2] = [ShiShen::ZhengYin, ShiShen::PianYin];
const GUAN_SHA: [ShiShen; 2] = [ShiShen::ZhengGuan, ShiShen::QiSha];

// ==================== 规则表 ====================

/// 子类加减分规则：作用子类名包含 `family` 时生效
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    pub family: &'static str,
    pub delta: i32,
    pub reason: &'static str,
}

impl Rule {
    pub fn matches(&self, rel: &Relation) -> bool {
        rel.kind.name().contains(self.family)
    }
}

const fn rule(family: &'static str, delta: i32, reason: &'static str) -> Rule {
    Rule { family, delta, reason }
}

/// 一个方向下的基础分和子类细则
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cascade {
    pub delta: i32,
    pub reason: &'static str,
    pub rules: &'static [Rule],
}

/// 运柱地支对本柱天干：喜运
const SELF_GOOD_PLUS: Cascade = Cascade {
    delta: 2,
    reason: "天干地支正向作用，为事业吉运",
    rules: &[
        rule("合", 4, "天干地支合，为事业吉运"),
        rule("生", 2, "地支生天干，为事业吉运"),
        rule("被生", 2, "天干生地支，为事业吉运"),
        rule("害", -2, "天干地支相害，相害会应凶，要多加注意"),
    ],
};

const SELF_GOOD_MINUS_DAYUN: Cascade = Cascade {
    delta: -2,
    reason: "天干地支反向作用",
    rules: &[
        rule("害", -6, "天干地支相害应凶，要多加注意"),
        rule("合", -4, "天干地支相合减力较大，要多加注意"),
        rule("克", -5, "天干地支克减力较大，天干虚透"),
        rule("被克", -3, "天干地支克减力较大，要多加注意"),
    ],
};

const SELF_GOOD_MINUS_LIUNIAN: Cascade = Cascade {
    delta: -2,
    reason: "天干地支反向作用",
    rules: &[
        rule("害", -6, "天干地支相害应凶，要多加注意"),
        rule("合", -4, "天干地支相合减力较大，要多加注意"),
        rule("克", -6, "天干地支克减力较大，天干虚透"),
        rule("被克", -3, "天干地支克减力较大，要多加注意"),
    ],
};

/// 运柱地支对本柱天干：忌运
const SELF_BAD_PLUS: Cascade = Cascade {
    delta: -2,
    reason: "天干地支正向作用，为事业反运",
    rules: &[
        rule("合", -4, "天干地支合，为事业反运"),
        rule("生", -2, "地支生天干，为事业反运"),
        rule("被生", -2, "天干生地支，为事业反运"),
        rule("害", -2, "天干地支相害，相害会应凶，要多加注意"),
    ],
};

const SELF_BAD_MINUS_DAYUN: Cascade = Cascade {
    delta: 2,
    reason: "天干地支反向作用",
    rules: &[
        rule("害", 6, "天干地支相害，反运减力"),
        rule("合", 4, "天干地支相合，反运减力"),
        rule("克", 3, "天干地支相克，反运减力"),
        rule("被克", 3, "天干地支相克，反运减力"),
    ],
};

const SELF_BAD_MINUS_LIUNIAN: Cascade = Cascade {
    delta: 2,
    reason: "天干地支反向作用",
    rules: &[
        rule("害", 6, "天干地支相害，反运减力"),
        rule("合", 4, "天干地支相合，反运减力"),
        rule("克", 6, "天干地支相克，反运减力"),
        rule("被克", 3, "天干地支相克，反运减力"),
    ],
};

/// 运柱地支作用于被制之字
const CONTROLLED_MINUS: Cascade = Cascade {
    delta: 5,
    reason: "制之有力，事业运吉",
    rules: &[
        rule("合", 5, "合制非常有力"),
        rule("冲", 6, "冲制非常有力"),
        rule("害", 3, "穿害制之有力，但要注意健康及六亲健康"),
        rule("会", 3, "三会制之有力，但要注意健康及六亲健康"),
        rule("墓", 3, "墓制有力，但要注意健康及六亲健康"),
    ],
};

const CONTROLLED_PLUS: Cascade = Cascade {
    delta: -5,
    reason: "为被制之字增力，事业运不吉",
    rules: &[
        rule("合", -5, "合而增力"),
        rule("冲", -6, "冲而增力"),
        rule("害", -8, "害而增力，要多加注意"),
        rule("会", -3, "三会增力"),
        rule("墓", -3, "墓库增力"),
    ],
};

/// 运柱天干作用于被制天干
const STEM_MINUS: Cascade = Cascade {
    delta: 5,
    reason: "天干制之有力，事业运吉",
    rules: &[rule("合", 5, "天干合制非常有力")],
};

const STEM_PLUS: Cascade = Cascade {
    delta: -5,
    reason: "天干为被制之字增力，事业运不吉",
    rules: &[rule("合", -5, "天干合而增力")],
};

/// 事业财运评分中使增量加倍的子类
const STRONG_FAMILIES: [&str; 7] = ["合", "冲", "害", "刑", "暗", "会", "克"];

fn is_strong(rel: &Relation) -> bool {
    STRONG_FAMILIES.iter().any(|family| rel.kind.name().contains(family))
}

/// 被制地支在各柱位时，其余各柱的权重
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionWeights {
    pub zhi: [i32; 4],
    pub gan: [i32; 4],
}

/// 事业财运权重表，按被制柱位索引
pub const CAREER_WEIGHTS: [PositionWeights; 4] = [
    PositionWeights { zhi: [0, 8, 4, 2], gan: [4, 2, 1, 1] },
    PositionWeights { zhi: [6, 0, 6, 2], gan: [2, 4, 1, 1] },
    PositionWeights { zhi: [2, 8, 0, 6], gan: [1, 4, 6, 2] },
    PositionWeights { zhi: [2, 4, 6, 0], gan: [1, 2, 2, 4] },
];

// ==================== 吉凶分级 ====================

/// 吉凶阈值，从两端向中间判定
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierThresholds {
    pub da_ji: i32,
    pub ji: i32,
    pub xiong: i32,
    pub da_xiong: i32,
}

impl TierThresholds {
    pub fn tier(&self, score: i32) -> Tier {
        if score >= self.da_ji {
            Tier::DaJi
        } else if score <= self.da_xiong {
            Tier::DaXiong
        } else if score >= self.ji {
            Tier::Ji
        } else if score <= self.xiong {
            Tier::Xiong
        } else {
            Tier::Ping
        }
    }
}

/// 事业、大运、流年
pub const MAIN_TIERS: TierThresholds = TierThresholds { da_ji: 20, ji: 10, xiong: -5, da_xiong: -15 };

/// 流月
pub const MONTH_TIERS: TierThresholds = TierThresholds { da_ji: 5, ji: 2, xiong: 0, da_xiong: -3 };

// ==================== 累加器 ====================

/// 分数与理由
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreAccumulator {
    pub score: i32,
    pub reasons: Vec<String>,
}

impl ScoreAccumulator {
    pub fn new(seed: i32) -> Self {
        Self { score: seed, reasons: Vec::new() }
    }

    pub fn add(&mut self, delta: i32, reason: impl Into<String>) {
        self.score += delta;
        let reason = reason.into();
        self.reasons.push(format!("{}（{:+}）", reason, delta));
    }

    /// 不计分的说明
    pub fn note(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// 按作用方向选择一组规则执行，无方向时不计
    pub fn cascade(&mut self, rel: Relation, plus: &Cascade, minus: &Cascade, prefix: &str) {
        let chosen = match rel.sign {
            Sign::Plus => plus,
            Sign::Minus => minus,
            Sign::Neutral => return,
        };
        self.add(chosen.delta, format!("{}{}", prefix, chosen.reason));
        for r in chosen.rules.iter().filter(|r| r.matches(&rel)) {
            self.add(r.delta, format!("{}{}", prefix, r.reason));
        }
    }
}

// ==================== 结果 ====================

/// 事业财运评分及用神、忌神
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CareerScore {
    pub score: i32,
    pub tier: Tier,
    pub reasons: Vec<String>,
    /// 地支用神
    pub yong_zhi: Vec<DiZhi>,
    /// 地支忌神（含被制地支本身）
    pub ji_zhi: Vec<DiZhi>,
    pub yong_gan: Vec<TianGan>,
    pub ji_gan: Vec<TianGan>,
    /// 用神十神（地支按藏干）
    pub yong_shishen: Vec<ShiShen>,
    pub ji_shishen: Vec<ShiShen>,
}

/// 一步大运的评分
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DaYunScore {
    pub dayun: DaYun,
    pub score: i32,
    pub tier: Tier,
    pub reasons: Vec<String>,
}

/// 流年评分
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct YearScore {
    pub year: i32,
    pub ganzhi: GanZhi,
    /// 所在大运序号
    pub dayun_index: u8,
    pub score: i32,
    pub tier: Tier,
    pub reasons: Vec<String>,
}

/// 流月评分
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthScore {
    /// 节令月序，寅月为 1
    pub month: u8,
    pub ganzhi: GanZhi,
    pub score: i32,
    pub tier: Tier,
}

// ==================== 事业财运 ====================

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// 事业财运评分
///
/// 对每个被制地支，查它对其余三支与四干的作用，按柱位权重加减：
/// `-` 为制（加分，强作用子类加倍），`+` 为助（减分）。
pub fn score_career(sizhu: &SiZhu, zuogong: &ZuoGongAnalysis) -> Result<CareerScore, Error> {
    let rizhu = sizhu.rizhu();
    let mut acc = ScoreAccumulator::new(0);
    let (mut yong_zhi, mut ji_zhi, mut yong_gan, mut ji_gan) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());

    let controlled = zuogong.controlled_zhi();
    if controlled.is_empty() {
        acc.note("命局无做功，无被制地支，财运不计制化");
    }

    for (pos, zhi) in controlled {
        let weights = &CAREER_WEIGHTS[pos.index()];
        push_unique(&mut ji_zhi, zhi);

        for other_pos in ZhuPosition::ALL.iter().filter(|p| **p != pos) {
            let other = sizhu.pillar(*other_pos).zhi;
            let rel = zhi_relation(zhi, other)?;
            let weight = weights.zhi[other_pos.index()];
            match rel.sign {
                Sign::Minus => {
                    let delta = if is_strong(&rel) { weight * 2 } else { weight };
                    acc.add(
                        delta,
                        format!("{}支{}被{}支{}{}制", pos.name(), zhi, other_pos.name(), other, rel.kind.name()),
                    );
                    push_unique(&mut yong_zhi, other);
                },
                Sign::Plus => {
                    acc.add(
                        -weight,
                        format!("{}支{}得{}支{}{}助", pos.name(), zhi, other_pos.name(), other, rel.kind.name()),
                    );
                    push_unique(&mut ji_zhi, other);
                },
                Sign::Neutral => {},
            }
        }

        for gan_pos in ZhuPosition::ALL {
            let gan = sizhu.pillar(gan_pos).gan;
            let rel = zhi_relation(zhi, gan)?;
            let weight = weights.gan[gan_pos.index()];
            match rel.sign {
                Sign::Minus => {
                    acc.add(weight, format!("{}支{}与{}干{}{}，为制", pos.name(), zhi, gan_pos.name(), gan, rel.kind.name()));
                    push_unique(&mut yong_gan, gan);
                },
                Sign::Plus => {
                    acc.add(-weight, format!("{}支{}与{}干{}{}，为助", pos.name(), zhi, gan_pos.name(), gan, rel.kind.name()));
                    push_unique(&mut ji_gan, gan);
                },
                Sign::Neutral => {},
            }
        }
    }

    let roles = |gans: &[TianGan], zhis: &[DiZhi]| -> Result<Vec<ShiShen>, Error> {
        let mut out = Vec::new();
        for gan in gans {
            push_unique(&mut out, resolve_gan(rizhu, *gan)?);
        }
        for zhi in zhis {
            for (_, role) in resolve_zhi(rizhu, *zhi)? {
                push_unique(&mut out, role);
            }
        }
        Ok(out)
    };
    let yong_shishen = roles(&yong_gan, &yong_zhi)?;
    let ji_shishen = roles(&ji_gan, &ji_zhi)?;

    let tier = MAIN_TIERS.tier(acc.score);
    log::debug!(target: crate::LOG_TARGET, "💰 事业财运: {} 分（{}）", acc.score, tier.name());
    Ok(CareerScore {
        score: acc.score,
        tier,
        reasons: acc.reasons,
        yong_zhi,
        ji_zhi,
        yong_gan,
        ji_gan,
        yong_shishen,
        ji_shishen,
    })
}

// ==================== 大运 / 流年 ====================

/// 运的层级
struct Layer {
    name: &'static str,
    self_good_minus: &'static Cascade,
    self_bad_minus: &'static Cascade,
}

const DAYUN_LAYER: Layer =
    Layer { name: "大运", self_good_minus: &SELF_GOOD_MINUS_DAYUN, self_bad_minus: &SELF_BAD_MINUS_DAYUN };

const LIUNIAN_LAYER: Layer =
    Layer { name: "流年", self_good_minus: &SELF_GOOD_MINUS_LIUNIAN, self_bad_minus: &SELF_BAD_MINUS_LIUNIAN };

/// 运柱对被制地支、被制天干的作用
fn controlled_cascade(
    acc: &mut ScoreAccumulator,
    layer: &Layer,
    zuogong: &ZuoGongAnalysis,
    overlay: GanZhi,
) -> Result<(), Error> {
    let zhis = zuogong.controlled_zhi();
    let gans = zuogong.controlled_gan();
    if zhis.is_empty() && gans.is_empty() {
        acc.note(format!("命局无做功，{}不计制化", layer.name));
        return Ok(());
    }

    for (pos, zhi) in zhis {
        let rel = zhi_relation(zhi, overlay.zhi)?;
        let prefix = format!("{}{}对{}支{}：", layer.name, overlay.zhi, pos.name(), zhi);
        acc.cascade(rel, &CONTROLLED_PLUS, &CONTROLLED_MINUS, &prefix);
    }
    for (pos, gan) in gans {
        let rel = zhi_relation(overlay.zhi, gan)?;
        let prefix = format!("{}{}对{}干{}：", layer.name, overlay.zhi, pos.name(), gan);
        acc.cascade(rel, &CONTROLLED_PLUS, &CONTROLLED_MINUS, &prefix);

        let rel = gan_relation(overlay.gan, gan);
        let prefix = format!("{}{}对{}干{}：", layer.name, overlay.gan, pos.name(), gan);
        acc.cascade(rel, &STEM_PLUS, &STEM_MINUS, &prefix);
    }
    Ok(())
}

/// 运柱十神加分（印化官杀、食伤生财）
fn role_bonus(
    acc: &mut ScoreAccumulator,
    layer: &Layer,
    rizhu: TianGan,
    overlay: GanZhi,
    stem_roles: &[ShiShen],
    hidden: [&[ShiShen]; 2],
    pattern: &str,
) -> Result<(), Error> {
    let role = resolve_gan(rizhu, overlay.gan)?;
    if stem_roles.contains(&role) {
        acc.add(5, format!("{}天干{}为{}，进入{}，事业运吉", layer.name, overlay.gan, role.short_name(), pattern));
    }
    for gan in canggan(overlay.zhi)? {
        let role = resolve_gan(rizhu, *gan)?;
        for wanted in hidden {
            if wanted.contains(&role) {
                acc.add(
                    3,
                    format!("{}地支{}藏{}为{}，进入{}，事业运吉", layer.name, overlay.zhi, gan, role.short_name(), pattern),
                );
            }
        }
    }
    Ok(())
}

/// 大运、流年共用的评分级联
fn layer_cascade(
    acc: &mut ScoreAccumulator,
    layer: &Layer,
    sizhu: &SiZhu,
    zuogong: &ZuoGongAnalysis,
    overlay: GanZhi,
) -> Result<(), Error> {
    let polarity = overlay.zhi.work_yin_yang();
    let self_rel = zhi_relation(overlay.zhi, overlay.gan)?;
    let favours = zuogong.favours();
    let prefix = format!("{}{}：", layer.name, overlay);

    if zuogong.favours_polarity(polarity) {
        acc.add(10, format!("{}行{}{}，为事业吉运", layer.name, polarity.name(), overlay.zhi));
        acc.cascade(self_rel, &SELF_GOOD_PLUS, layer.self_good_minus, &prefix);
        controlled_cascade(acc, layer, zuogong, overlay)?;
    } else if favours.contains(&Favour::Hua) {
        role_bonus(acc, layer, sizhu.rizhu(), overlay, &YIN_XIAO, [&YIN_XIAO, &GUAN_SHA], "印化官杀")?;
    } else if favours.contains(&Favour::Sheng) {
        role_bonus(acc, layer, sizhu.rizhu(), overlay, &SHI_SHANG, [&SHI_SHANG, &CAI], "食伤生财")?;
    } else {
        acc.add(-10, format!("{}行{}{}，为事业反运", layer.name, polarity.name(), overlay.zhi));
        acc.cascade(self_rel, &SELF_BAD_PLUS, layer.self_bad_minus, &prefix);
        controlled_cascade(acc, layer, zuogong, overlay)?;
    }
    Ok(())
}

/// 大运评分
pub fn score_dayun(sizhu: &SiZhu, zuogong: &ZuoGongAnalysis, dayun: &DaYun) -> Result<DaYunScore, Error> {
    let mut acc = ScoreAccumulator::new(0);
    layer_cascade(&mut acc, &DAYUN_LAYER, sizhu, zuogong, dayun.ganzhi)?;
    let tier = MAIN_TIERS.tier(acc.score);
    Ok(DaYunScore { dayun: *dayun, score: acc.score, tier, reasons: acc.reasons })
}

/// 全部大运评分
pub fn score_dayun_all(
    sizhu: &SiZhu,
    zuogong: &ZuoGongAnalysis,
    luck: &DaYunList,
) -> Result<Vec<DaYunScore>, Error> {
    luck.steps.iter().map(|dy| score_dayun(sizhu, zuogong, dy)).collect()
}

/// 大运与流年的联动：(作用, 同向加倍子类, 反向加倍子类, 说明)
type Link = (Relation, &'static [RelationKind], &'static [RelationKind], &'static str);

/// 流年与所在大运的联动
///
/// 大运分为正时，流年与大运同向（`+`）加分、反向（`-`）减分；大运分为负时相反。
fn decade_link(acc: &mut ScoreAccumulator, decade_score: i32, yun: GanZhi, annual: GanZhi) -> Result<(), Error> {
    use RelationKind::*;

    let direction = decade_score.signum();
    if direction == 0 {
        return Ok(());
    }
    let links: [Link; 3] = [
        (
            zhi_relation(annual.zhi, yun.zhi)?,
            &[SanHe, LiuHe, Chong, Mu],
            &[Hai, Xing, SanXing, ZiXing, Chong, Mu, Po],
            "流年地支与大运地支",
        ),
        (zhi_relation(annual.zhi, yun.gan)?, &[Sheng, BeiSheng, Bi, Jie], &[Ke, BeiKe, Hai], "流年地支与大运天干"),
        (gan_relation(annual.gan, yun.gan), &[Sheng, BeiSheng, Bi, Jie, He], &[Ke, BeiKe], "流年天干与大运天干"),
    ];

    for (rel, plus_kinds, minus_kinds, what) in links {
        let (base, doubled) = match rel.sign {
            Sign::Plus => (5 * direction, rel.is_any(plus_kinds)),
            Sign::Minus => (-5 * direction, rel.is_any(minus_kinds)),
            Sign::Neutral => continue,
        };
        let trend = if base > 0 { "顺大运之势" } else { "逆大运之势" };
        acc.add(base, format!("{}{}，{}", what, rel.kind.name(), trend));
        if doubled {
            acc.add(base, format!("{}{}，作用加重", what, rel.kind.name()));
        }
    }
    Ok(())
}

/// 流年评分
///
/// 以所在大运的分数为起点，理由从一条大运概述开始，不修改大运记录。
pub fn score_liunian(
    sizhu: &SiZhu,
    zuogong: &ZuoGongAnalysis,
    luck: &DaYunList,
    dayun_scores: &[DaYunScore],
    year: i32,
) -> Result<YearScore, Error> {
    let index = luck.active_index(year)?;
    let decade = dayun_scores.get(index).ok_or(Error::StageNotReady(Stage::DaYun))?;
    let yun = decade.dayun.ganzhi;
    let annual = GanZhi::from_year(year);

    let mut acc = ScoreAccumulator::new(decade.score);
    acc.note(format!(
        "{}年{}，行{}大运（{}分，{}）",
        year,
        annual,
        yun,
        decade.score,
        decade.tier.name()
    ));
    layer_cascade(&mut acc, &LIUNIAN_LAYER, sizhu, zuogong, annual)?;
    decade_link(&mut acc, decade.score, yun, annual)?;

    let tier = MAIN_TIERS.tier(acc.score);
    log::debug!(target: crate::LOG_TARGET, "📅 流年 {} {}: {} 分（{}）", year, annual, acc.score, tier.name());
    Ok(YearScore { year, ganzhi: annual, dayun_index: index as u8, score: acc.score, tier, reasons: acc.reasons })
}

// ==================== 流月 ====================

/// 流月评分：目标年的十二个节令月（寅月起）对每个地支忌神打分
///
/// 任一忌神被月支以强作用子类制（`-`）时，当月另加 2 分。
pub fn score_liuyue(career: &CareerScore, year: i32) -> Result<Vec<MonthScore>, Error> {
    let year_gan = GanZhi::from_year(year).gan;
    (0..12)
        .map(|i| -> Result<MonthScore, Error> {
            let ganzhi = month_ganzhi_of(year_gan, DiZhi(2).offset(i));
            let mut score = 0;
            let mut strong = false;
            for ji in &career.ji_zhi {
                let rz = zhi_relation(*ji, ganzhi.zhi)?;
                let rg = zhi_relation(*ji, ganzhi.gan)?;
                score += match (rz.sign, rg.sign) {
                    (Sign::Minus, Sign::Minus) => 3,
                    (Sign::Minus, Sign::Plus) => 1,
                    (Sign::Plus, Sign::Minus) => -1,
                    (Sign::Plus, Sign::Plus) => -3,
                    _ => 0,
                };
                strong |= rz.is_minus() && is_strong(&rz);
            }
            // 强作用每月只加一次
            if strong {
                score += 2;
            }
            Ok(MonthScore { month: i as u8 + 1, ganzhi, score, tier: MONTH_TIERS.tier(score) })
        })
        .collect()
}
