//! # 做功分类
//!
//! 按四支做功阴阳的分布确定命局结构：谁制、谁被制。
//!
//! 判定顺序（先命中者为准）：
//!
//! 1. 四阳 / 四阴：贼捕条件成立时为"贼捕阳制阴 / 贼捕阴制阳"，四支全部被制；
//!    否则为"木火阳一气 / 金水阴一气"，少数阴阳的天干被制，地支不被制
//! 2. 三一：少数阴阳的一支被制，为"三阳制阴 / 三阴制阳"
//! 3. 二二：年时同（外制内）、年月同（前制后）、干支六比二多数、日坐兜底，
//!    得"阳制阴 / 阴制阳"
//!
//! 另有两种与上述并存的格局：食伤生财、印化官杀。

use crate::error::Error;
use crate::shishen::{canggan, contains_any, resolve_gan};
use crate::types::{DiZhi, ShiShen, SiZhu, TianGan, YinYang, ZhuPosition};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use alloc::vec;
use sp_std::prelude::*;

const BI_JIE_SHI_SHANG: [ShiShen; 4] =
    [ShiShen::BiJian, ShiShen::JieCai, ShiShen::ShiShen, ShiShen::ShangGuan];
const SHI_SHANG: [ShiShen; 2] = [ShiShen::ShiShen, ShiShen::ShangGuan];
const CAI: [ShiShen; 2] = [ShiShen::ZhengCai, ShiShen::PianCai];
const YIN_XIAO: [ShiShen; 2] = [ShiShen::ZhengYin, ShiShen::PianYin];
const GUAN_SHA: [ShiShen; 2] = [ShiShen::ZhengGuan, ShiShen::QiSha];

// ==================== 类型 ====================

/// 做功格局
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ZuoGong {
    SanYangZhiYin,
    SanYinZhiYang,
    YangZhiYin,
    YinZhiYang,
    ZeiBuYangZhiYin,
    ZeiBuYinZhiYang,
    MuHuoYangYiQi,
    JinShuiYinYiQi,
    ShiShangShengCai,
    YinHuaGuanSha,
}

impl ZuoGong {
    pub fn name(&self) -> &'static str {
        match self {
            ZuoGong::SanYangZhiYin => "三阳制阴",
            ZuoGong::SanYinZhiYang => "三阴制阳",
            ZuoGong::YangZhiYin => "阳制阴",
            ZuoGong::YinZhiYang => "阴制阳",
            ZuoGong::ZeiBuYangZhiYin => "贼捕阳制阴",
            ZuoGong::ZeiBuYinZhiYang => "贼捕阴制阳",
            ZuoGong::MuHuoYangYiQi => "木火阳一气",
            ZuoGong::JinShuiYinYiQi => "金水阴一气",
            ZuoGong::ShiShangShengCai => "食伤生财",
            ZuoGong::YinHuaGuanSha => "印化官杀",
        }
    }

    /// 格局所喜（贼捕阳制阴喜阴，贼捕阴制阳喜阳）
    pub fn favour(&self) -> Favour {
        match self {
            ZuoGong::SanYangZhiYin
            | ZuoGong::YangZhiYin
            | ZuoGong::ZeiBuYinZhiYang
            | ZuoGong::MuHuoYangYiQi => Favour::Yang,
            ZuoGong::SanYinZhiYang
            | ZuoGong::YinZhiYang
            | ZuoGong::ZeiBuYangZhiYin
            | ZuoGong::JinShuiYinYiQi => Favour::Yin,
            ZuoGong::YinHuaGuanSha => Favour::Hua,
            ZuoGong::ShiShangShengCai => Favour::Sheng,
        }
    }
}

/// 格局所喜的运
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Favour {
    /// 喜阳运
    Yang,
    /// 喜阴运
    Yin,
    /// 喜印化
    Hua,
    /// 喜食伤生财
    Sheng,
}

impl From<YinYang> for Favour {
    fn from(yy: YinYang) -> Self {
        match yy {
            YinYang::Yang => Favour::Yang,
            YinYang::Yin => Favour::Yin,
        }
    }
}

/// 四支阴阳计数
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PolarityCount {
    AllYang,
    AllYin,
    ThreeYang,
    ThreeYin,
    TwoTwo,
}

/// 二二分布的判定依据
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitCase {
    /// 年时同性，外制内
    OuterInner,
    /// 年月同性，前制后
    FrontBack,
    /// 干支合计六比二
    Majority,
    /// 阴阳相间，以日坐定
    DaySeat,
}

/// 一个格局及其被制之字
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ZuoGongRecord {
    pub kind: ZuoGong,
    pub controlled_zhi: Vec<(ZhuPosition, DiZhi)>,
    pub controlled_gan: Vec<(ZhuPosition, TianGan)>,
}

impl ZuoGongRecord {
    fn bare(kind: ZuoGong) -> Self {
        Self { kind, controlled_zhi: Vec::new(), controlled_gan: Vec::new() }
    }
}

/// 做功分析结果
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ZuoGongAnalysis {
    pub count: PolarityCount,
    pub split: Option<SplitCase>,
    pub records: Vec<ZuoGongRecord>,
}

impl ZuoGongAnalysis {
    pub fn kinds(&self) -> Vec<ZuoGong> {
        self.records.iter().map(|r| r.kind).collect()
    }

    /// 全部被制地支（去重，按出现顺序）
    pub fn controlled_zhi(&self) -> Vec<(ZhuPosition, DiZhi)> {
        let mut out: Vec<(ZhuPosition, DiZhi)> = Vec::new();
        for item in self.records.iter().flat_map(|r| r.controlled_zhi.iter()) {
            if !out.contains(item) {
                out.push(*item);
            }
        }
        out
    }

    /// 全部被制天干（去重，按出现顺序）
    pub fn controlled_gan(&self) -> Vec<(ZhuPosition, TianGan)> {
        let mut out: Vec<(ZhuPosition, TianGan)> = Vec::new();
        for item in self.records.iter().flat_map(|r| r.controlled_gan.iter()) {
            if !out.contains(item) {
                out.push(*item);
            }
        }
        out
    }

    pub fn favours(&self) -> Vec<Favour> {
        let mut out = Vec::new();
        for favour in self.records.iter().map(|r| r.kind.favour()) {
            if !out.contains(&favour) {
                out.push(favour);
            }
        }
        out
    }

    pub fn favours_polarity(&self, yy: YinYang) -> bool {
        self.records.iter().any(|r| r.kind.favour() == Favour::from(yy))
    }

    /// 是否有结构做功（存在被制之字）
    pub fn has_work(&self) -> bool {
        self.records.iter().any(|r| !r.controlled_zhi.is_empty() || !r.controlled_gan.is_empty())
    }
}

// ==================== 分类 ====================

/// 指定阴阳的地支
fn zhi_with(sizhu: &SiZhu, yy: YinYang) -> Vec<(ZhuPosition, DiZhi)> {
    ZhuPosition::ALL
        .iter()
        .map(|pos| (*pos, sizhu.pillar(*pos).zhi))
        .filter(|(_, zhi)| zhi.work_yin_yang() == yy)
        .collect()
}

/// 指定阴阳的天干
fn gan_with(sizhu: &SiZhu, yy: YinYang) -> Vec<(ZhuPosition, TianGan)> {
    ZhuPosition::ALL
        .iter()
        .map(|pos| (*pos, sizhu.pillar(*pos).gan))
        .filter(|(_, gan)| gan.work_yin_yang() == yy)
        .collect()
}

fn is_bing_ding(gan: TianGan) -> bool {
    gan.0 == 2 || gan.0 == 3
}

/// 四阳 / 四阴下的贼捕条件
///
/// `minority` 为天干中的少数阴阳（四阳局为阴）。相邻两干同为少数阴阳且互为比劫食伤，
/// 或日干为少数阴阳且与月干互为比劫食伤，或天干以少数阴阳为主时成立。
/// 四阴局中丙丁不参与前两项。
fn is_thief(gans: &[TianGan; 4], minority: YinYang) -> Result<bool, Error> {
    let yy = |i: usize| gans[i].work_yin_yang();
    let minority_gan = gans.iter().filter(|g| g.work_yin_yang() == minority).count();
    let excluded = |g: TianGan| minority == YinYang::Yang && is_bing_ding(g);

    if minority_gan == 2
        && yy(0) == minority
        && yy(1) == minority
        && !excluded(gans[0])
        && !excluded(gans[1])
        && BI_JIE_SHI_SHANG.contains(&resolve_gan(gans[0], gans[1])?)
    {
        return Ok(true);
    }
    if yy(2) == minority
        && !excluded(gans[1])
        && !excluded(gans[2])
        && BI_JIE_SHI_SHANG.contains(&resolve_gan(gans[1], gans[2])?)
    {
        return Ok(true);
    }
    Ok(minority_gan > 2)
}

fn classify_pure(sizhu: &SiZhu, branch: YinYang) -> Result<ZuoGongRecord, Error> {
    let minority = branch.opposite();
    let gans = sizhu.gans();
    let (thief, pure) = match branch {
        YinYang::Yang => (ZuoGong::ZeiBuYangZhiYin, ZuoGong::MuHuoYangYiQi),
        YinYang::Yin => (ZuoGong::ZeiBuYinZhiYang, ZuoGong::JinShuiYinYiQi),
    };
    if is_thief(&gans, minority)? {
        Ok(ZuoGongRecord {
            kind: thief,
            controlled_zhi: zhi_with(sizhu, branch),
            controlled_gan: Vec::new(),
        })
    } else {
        Ok(ZuoGongRecord {
            kind: pure,
            controlled_zhi: Vec::new(),
            controlled_gan: gan_with(sizhu, minority),
        })
    }
}

/// 被制地支为 `controlled`、被制天干为 `stems` 时的"阳制阴 / 阴制阳"
fn two_sided(sizhu: &SiZhu, controlled: YinYang, stems: YinYang) -> ZuoGongRecord {
    let kind = match controlled {
        YinYang::Yin => ZuoGong::YangZhiYin,
        YinYang::Yang => ZuoGong::YinZhiYang,
    };
    ZuoGongRecord {
        kind,
        controlled_zhi: zhi_with(sizhu, controlled),
        controlled_gan: gan_with(sizhu, stems),
    }
}

fn classify_split(sizhu: &SiZhu) -> (SplitCase, ZuoGongRecord) {
    let zhi_yy = sizhu.zhis().map(|z| z.work_yin_yang());
    let day = zhi_yy[2];
    // 外制内、前制后：被制天干与日干同性
    let day_gan = sizhu.rizhu().work_yin_yang();

    if zhi_yy[0] == zhi_yy[3] {
        return (SplitCase::OuterInner, two_sided(sizhu, day, day_gan));
    }
    if zhi_yy[0] == zhi_yy[1] {
        return (SplitCase::FrontBack, two_sided(sizhu, day, day_gan));
    }

    let yang = |yy: YinYang| yy == YinYang::Yang;
    let yang_total = zhi_yy.iter().filter(|yy| yang(**yy)).count()
        + sizhu.gans().iter().filter(|g| yang(g.work_yin_yang())).count();
    if yang_total == 6 {
        return (SplitCase::Majority, two_sided(sizhu, YinYang::Yin, YinYang::Yin));
    }
    if yang_total == 2 {
        return (SplitCase::Majority, two_sided(sizhu, YinYang::Yang, YinYang::Yang));
    }
    (SplitCase::DaySeat, two_sided(sizhu, day, day))
}

/// 食伤生财、印化官杀
fn cross_patterns(sizhu: &SiZhu) -> Result<Vec<ZuoGongRecord>, Error> {
    let rizhu = sizhu.rizhu();
    let mut all: Vec<TianGan> = sizhu.gans().to_vec();
    for zhi in sizhu.zhis() {
        all.extend_from_slice(canggan(zhi)?);
    }

    let mut out = Vec::new();
    if contains_any(rizhu, canggan(sizhu.hour_zhu.zhi)?, &SHI_SHANG)?
        && contains_any(rizhu, &all, &SHI_SHANG)?
        && contains_any(rizhu, &all, &CAI)?
    {
        out.push(ZuoGongRecord::bare(ZuoGong::ShiShangShengCai));
    }

    let mut near: Vec<TianGan> = vec![sizhu.month_zhu.gan, sizhu.hour_zhu.gan];
    near.extend_from_slice(canggan(sizhu.day_zhu.zhi)?);
    if contains_any(rizhu, &near, &YIN_XIAO)? && contains_any(rizhu, &all, &GUAN_SHA)? {
        out.push(ZuoGongRecord::bare(ZuoGong::YinHuaGuanSha));
    }
    Ok(out)
}

/// 做功分类
pub fn classify(sizhu: &SiZhu) -> Result<ZuoGongAnalysis, Error> {
    let yang_zhi = sizhu.zhis().iter().filter(|z| z.work_yin_yang() == YinYang::Yang).count();

    let (count, split, mut records) = match yang_zhi {
        4 => (PolarityCount::AllYang, None, vec![classify_pure(sizhu, YinYang::Yang)?]),
        0 => (PolarityCount::AllYin, None, vec![classify_pure(sizhu, YinYang::Yin)?]),
        3 => (
            PolarityCount::ThreeYang,
            None,
            vec![ZuoGongRecord { kind: ZuoGong::SanYangZhiYin, ..two_sided(sizhu, YinYang::Yin, YinYang::Yin) }],
        ),
        1 => (
            PolarityCount::ThreeYin,
            None,
            vec![ZuoGongRecord { kind: ZuoGong::SanYinZhiYang, ..two_sided(sizhu, YinYang::Yang, YinYang::Yang) }],
        ),
        _ => {
            let (case, record) = classify_split(sizhu);
            (PolarityCount::TwoTwo, Some(case), vec![record])
        },
    };
    records.extend(cross_patterns(sizhu)?);

    let analysis = ZuoGongAnalysis { count, split, records };
    log::debug!(
        target: crate::LOG_TARGET,
        "⚖️ 做功: {} -> {:?} 被制地支 {:?}",
        sizhu,
        analysis.kinds().iter().map(|k| k.name()).collect::<Vec<_>>(),
        analysis.controlled_zhi()
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(s: &str) -> SiZhu {
        SiZhu::from_symbols(s).unwrap()
    }

    #[test]
    fn test_three_yang() {
        // 寅午戌阳，子阴
        let a = classify(&chart("甲寅 丙午 戊戌 庚子")).unwrap();
        assert_eq!(a.count, PolarityCount::ThreeYang);
        assert_eq!(a.records[0].kind, ZuoGong::SanYangZhiYin);
        assert_eq!(a.records[0].controlled_zhi, vec![(ZhuPosition::Hour, DiZhi(0))]);
        assert_eq!(a.records[0].controlled_gan, vec![(ZhuPosition::Hour, TianGan(6))]);
        assert!(a.favours_polarity(YinYang::Yang));
    }

    #[test]
    fn test_outer_inner() {
        // 年时同阳（寅、午），月日同阴（子、亥）：日支阴，阳制阴
        let a = classify(&chart("甲寅 丙子 己亥 庚午")).unwrap();
        assert_eq!(a.split, Some(SplitCase::OuterInner));
        assert_eq!(a.records[0].kind, ZuoGong::YangZhiYin);
        assert_eq!(
            a.records[0].controlled_zhi,
            vec![(ZhuPosition::Month, DiZhi(0)), (ZhuPosition::Day, DiZhi(11))]
        );
    }

    #[test]
    fn test_front_back() {
        // 年月阴（子、丑），日时阳（寅、午）：日支阳，阴制阳
        let a = classify(&chart("壬子 癸丑 甲寅 庚午")).unwrap();
        assert_eq!(a.split, Some(SplitCase::FrontBack));
        assert_eq!(a.records[0].kind, ZuoGong::YinZhiYang);
        assert_eq!(
            a.records[0].controlled_zhi,
            vec![(ZhuPosition::Day, DiZhi(2)), (ZhuPosition::Hour, DiZhi(6))]
        );
    }

    #[test]
    fn test_split_stems_follow_day_gan() {
        // 日支子阴被制，日干甲阳：被制天干取阳干
        let a = classify(&chart("甲寅 丙子 甲子 庚午")).unwrap();
        assert_eq!(a.split, Some(SplitCase::OuterInner));
        assert_eq!(a.records[0].kind, ZuoGong::YangZhiYin);
        assert_eq!(
            a.records[0].controlled_zhi,
            vec![(ZhuPosition::Month, DiZhi(0)), (ZhuPosition::Day, DiZhi(0))]
        );
        assert_eq!(
            a.records[0].controlled_gan,
            vec![(ZhuPosition::Year, TianGan(0)), (ZhuPosition::Month, TianGan(2)), (ZhuPosition::Day, TianGan(0))]
        );

        // 前制后同理：日支卯阳，日干己阴
        let b = classify(&chart("壬子 癸丑 己卯 庚午")).unwrap();
        assert_eq!(b.split, Some(SplitCase::FrontBack));
        assert_eq!(b.records[0].kind, ZuoGong::YinZhiYang);
        assert!(b.records[0].controlled_gan.iter().all(|(_, g)| g.work_yin_yang() == YinYang::Yin));
        assert_eq!(b.records[0].controlled_gan.len(), 4);
    }

    #[test]
    fn test_alternating_day_seat() {
        // 子午相间：日坐子（阴），阳制阴
        let a = classify(&chart("庚子 甲午 甲子 庚午")).unwrap();
        assert_eq!(a.count, PolarityCount::TwoTwo);
        assert_eq!(a.split, Some(SplitCase::DaySeat));
        assert_eq!(a.records[0].kind, ZuoGong::YangZhiYin);
        assert!(a.controlled_zhi().contains(&(ZhuPosition::Day, DiZhi(0))));
        assert!(a.controlled_zhi().iter().all(|(_, z)| z.work_yin_yang() == YinYang::Yin));
    }

    #[test]
    fn test_alternating_majority() {
        // 四干皆阳：干支合计六阳
        let a = classify(&chart("甲子 甲午 甲子 甲午")).unwrap();
        assert_eq!(a.split, Some(SplitCase::Majority));
        assert_eq!(a.records[0].kind, ZuoGong::YangZhiYin);
        assert!(a.controlled_zhi().contains(&(ZhuPosition::Day, DiZhi(0))));
    }

    #[test]
    fn test_pure_yang_and_thief() {
        // 四干皆阳，无少数阴干：木火阳一气，无被制
        let pure = classify(&chart("甲寅 丙午 戊戌 甲午")).unwrap();
        assert_eq!(pure.count, PolarityCount::AllYang);
        assert_eq!(pure.records[0].kind, ZuoGong::MuHuoYangYiQi);
        assert!(pure.records[0].controlled_zhi.is_empty());

        // 阴干占多数：贼捕阳制阴，四支被制
        let thief = classify(&chart("辛卯 癸巳 庚午 丙戌")).unwrap();
        assert_eq!(thief.records[0].kind, ZuoGong::ZeiBuYangZhiYin);
        assert_eq!(thief.records[0].controlled_zhi.len(), 4);
    }

    #[test]
    fn test_pure_yin() {
        // 四阴支，四阴干：阳干不足，金水阴一气
        let a = classify(&chart("庚申 辛酉 壬子 癸亥")).unwrap();
        assert_eq!(a.count, PolarityCount::AllYin);
        assert_eq!(a.records[0].kind, ZuoGong::JinShuiYinYiQi);
        assert!(a.records[0].controlled_gan.is_empty());
        assert!(!a.has_work());
        // 月干辛为印，申藏戊为杀
        assert_eq!(a.kinds(), vec![ZuoGong::JinShuiYinYiQi, ZuoGong::YinHuaGuanSha]);
        assert_eq!(a.favours(), vec![Favour::Yin, Favour::Hua]);
    }

    #[test]
    fn test_cross_patterns() {
        // 甲日：时支午藏丁（伤），辰藏戊（才）；月干癸为印，庚金为杀
        let a = classify(&chart("庚辰 癸未 甲子 庚午")).unwrap();
        let kinds = a.kinds();
        assert!(kinds.contains(&ZuoGong::ShiShangShengCai));
        assert!(kinds.contains(&ZuoGong::YinHuaGuanSha));
        assert!(a.favours().contains(&Favour::Sheng));
        assert!(a.favours().contains(&Favour::Hua));
    }
}
