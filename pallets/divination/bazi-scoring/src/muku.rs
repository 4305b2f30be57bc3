//! # 墓库追踪
//!
//! 四库（辰戌丑未）收藏特定天干。原局、大运、流年逐层叠加时，记录墓库的
//! 入墓、闭库、冲库、穿害事件。事件只追加，不删除。
//!
//! - 原局层：严重度"普通"
//! - 大运层：严重度"注意"
//! - 流年层：严重度"重要"，同时检查当前大运带来的库

use crate::constants::{MuKuAttrs, MUKU_TABLE};
use crate::dayun::DaYun;
use crate::error::Error;
use crate::shishen::{canggan, resolve_gan};
use crate::types::{DiZhi, GanZhi, ShiShenGroup, SiZhu, TianGan};
use alloc::{format, string::String};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_std::prelude::*;

// ==================== 类型 ====================

/// 墓库类别（按所藏天干的十神）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MuKuCategory {
    BiJieKu,
    ShiShangKu,
    CaiKu,
    GuanKu,
    YinKu,
}

impl MuKuCategory {
    pub fn name(&self) -> &'static str {
        match self {
            MuKuCategory::BiJieKu => "比劫库",
            MuKuCategory::ShiShangKu => "食伤库",
            MuKuCategory::CaiKu => "财库",
            MuKuCategory::GuanKu => "官库",
            MuKuCategory::YinKu => "印库",
        }
    }
}

impl From<ShiShenGroup> for MuKuCategory {
    fn from(group: ShiShenGroup) -> Self {
        match group {
            ShiShenGroup::BiJie => MuKuCategory::BiJieKu,
            ShiShenGroup::ShiShang => MuKuCategory::ShiShangKu,
            ShiShenGroup::CaiXing => MuKuCategory::CaiKu,
            ShiShenGroup::GuanSha => MuKuCategory::GuanKu,
            ShiShenGroup::YinXiao => MuKuCategory::YinKu,
        }
    }
}

/// 事件所在层
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MuKuScope {
    /// 原局
    Natal,
    /// 大运
    DaYun,
    /// 流年
    LiuNian,
}

impl MuKuScope {
    pub fn name(&self) -> &'static str {
        match self {
            MuKuScope::Natal => "原局",
            MuKuScope::DaYun => "大运",
            MuKuScope::LiuNian => "流年",
        }
    }

    /// 各层固定的严重度
    pub fn severity(&self) -> Severity {
        match self {
            MuKuScope::Natal => Severity::Normal,
            MuKuScope::DaYun => Severity::Attention,
            MuKuScope::LiuNian => Severity::Important,
        }
    }
}

/// 严重度
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Normal,
    Attention,
    Important,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Normal => "普通",
            Severity::Attention => "注意",
            Severity::Important => "重要",
        }
    }
}

/// 事件类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MuKuEventKind {
    /// 见库
    Present,
    /// 入墓
    Entered,
    /// 六合闭库
    Closed,
    /// 冲开
    Clashed,
    /// 穿害
    Harmed,
}

impl MuKuEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            MuKuEventKind::Present => "见库",
            MuKuEventKind::Entered => "入墓",
            MuKuEventKind::Closed => "闭库",
            MuKuEventKind::Clashed => "冲库",
            MuKuEventKind::Harmed => "穿害",
        }
    }
}

/// 墓库事件
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MuKuEvent {
    pub scope: MuKuScope,
    /// "原局"、大运干支（如 "丙寅大运"）或年份
    pub label: String,
    pub vault: DiZhi,
    pub kind: MuKuEventKind,
    pub categories: Vec<MuKuCategory>,
    pub description: String,
    pub severity: Severity,
}

/// 单个墓库的累积状态
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MuKuState {
    pub vault: DiZhi,
    pub categories: Vec<MuKuCategory>,
    /// 按发生顺序叠加的状态
    pub statuses: Vec<MuKuEventKind>,
}

// ==================== 查表 ====================

/// 墓库属性，非四库返回 None
pub fn muku_attrs(zhi: DiZhi) -> Option<&'static MuKuAttrs> {
    MUKU_TABLE.iter().find(|attrs| attrs.zhi == zhi)
}

fn category_names(categories: &[MuKuCategory]) -> String {
    categories.iter().map(|c| c.name()).collect::<Vec<_>>().join("、")
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// 伴随地支的藏干中被 `attrs` 收藏者
///
/// 返回 (伴随地支, 入墓天干) 列表与涉及的库类别。库支自身的余气也计入。
fn entries(
    rizhu: TianGan,
    attrs: &MuKuAttrs,
    companions: &[DiZhi],
) -> Result<(Vec<(DiZhi, TianGan)>, Vec<MuKuCategory>), Error> {
    let mut entered = Vec::new();
    let mut categories = Vec::new();
    for zhi in companions {
        for gan in canggan(*zhi)? {
            if attrs.stored.contains(gan) && !entered.contains(&(*zhi, *gan)) {
                entered.push((*zhi, *gan));
                push_unique(&mut categories, MuKuCategory::from(resolve_gan(rizhu, *gan)?.group()));
            }
        }
    }
    Ok((entered, categories))
}

// ==================== 追踪器 ====================

/// 已入墓的库
#[derive(Clone, Debug)]
struct OpenVault {
    attrs: &'static MuKuAttrs,
    categories: Vec<MuKuCategory>,
}

/// 墓库追踪器
///
/// 以原局建立，之后依次叠加大运、流年。
#[derive(Clone, Debug)]
pub struct MuKuTracker {
    rizhu: TianGan,
    natal_zhis: [DiZhi; 4],
    natal_vaults: Vec<OpenVault>,
    events: Vec<MuKuEvent>,
}

impl MuKuTracker {
    /// 原局墓库
    pub fn natal(sizhu: &SiZhu) -> Result<Self, Error> {
        let mut tracker = Self {
            rizhu: sizhu.rizhu(),
            natal_zhis: sizhu.zhis(),
            natal_vaults: Vec::new(),
            events: Vec::new(),
        };

        let mut seen: Vec<DiZhi> = Vec::new();
        for zhi in sizhu.zhis() {
            let Some(attrs) = muku_attrs(zhi) else { continue };
            if seen.contains(&zhi) {
                continue;
            }
            seen.push(zhi);

            let companions = tracker.natal_zhis;
            if let Some(vault) = tracker.enter(MuKuScope::Natal, "原局", attrs, &companions)? {
                for other in companions {
                    tracker.check_overlay(MuKuScope::Natal, "原局", &vault, other);
                }
                tracker.natal_vaults.push(vault);
            }
        }

        log::debug!(
            target: crate::LOG_TARGET,
            "🏺 原局墓库: {:?}",
            tracker.natal_vaults.iter().map(|v| v.attrs.zhi).collect::<Vec<_>>()
        );
        Ok(tracker)
    }

    /// 叠加一步大运
    pub fn overlay_dayun(&mut self, dayun: &DaYun) -> Result<(), Error> {
        let label = format!("{}大运", dayun.ganzhi);
        let zhi = dayun.ganzhi.zhi;

        let mut opened = None;
        if let Some(attrs) = muku_attrs(zhi) {
            let mut companions = self.natal_zhis.to_vec();
            companions.push(zhi);
            opened = self.enter(MuKuScope::DaYun, &label, attrs, &companions)?;
        }

        let natal = self.natal_vaults.clone();
        for vault in &natal {
            self.check_overlay(MuKuScope::DaYun, &label, vault, zhi);
        }

        // 大运之库受原局四支闭、冲、害
        if let Some(vault) = opened {
            if !natal.iter().any(|v| v.attrs.zhi == vault.attrs.zhi) {
                for other in self.natal_zhis {
                    self.check_overlay(MuKuScope::DaYun, &label, &vault, other);
                }
            }
        }
        Ok(())
    }

    /// 叠加流年，`dayun` 为该年所在大运
    pub fn overlay_year(&mut self, year: i32, annual: GanZhi, dayun: Option<&DaYun>) -> Result<(), Error> {
        let label = format!("{}", year);
        let zhi = annual.zhi;

        let mut companions = self.natal_zhis.to_vec();
        if let Some(dy) = dayun {
            companions.push(dy.ganzhi.zhi);
        }
        companions.push(zhi);

        if let Some(attrs) = muku_attrs(zhi) {
            self.enter(MuKuScope::LiuNian, &label, attrs, &companions)?;
        }

        let mut targets = self.natal_vaults.clone();
        if let Some(attrs) = dayun.and_then(|dy| muku_attrs(dy.ganzhi.zhi)) {
            if !targets.iter().any(|v| v.attrs.zhi == attrs.zhi) {
                let (entered, categories) = entries(self.rizhu, attrs, &companions)?;
                if !entered.is_empty() {
                    targets.push(OpenVault { attrs, categories });
                }
            }
        }
        for vault in &targets {
            self.check_overlay(MuKuScope::LiuNian, &label, vault, zhi);
        }
        Ok(())
    }

    pub fn events(&self) -> &[MuKuEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MuKuEvent> {
        self.events
    }

    /// 按库汇总的状态
    pub fn states(&self) -> Vec<MuKuState> {
        let mut states: Vec<MuKuState> = Vec::new();
        for event in &self.events {
            let index = match states.iter().position(|s| s.vault == event.vault) {
                Some(i) => i,
                None => {
                    states.push(MuKuState { vault: event.vault, categories: Vec::new(), statuses: Vec::new() });
                    states.len() - 1
                },
            };
            let state = &mut states[index];
            if event.kind == MuKuEventKind::Entered {
                for category in &event.categories {
                    push_unique(&mut state.categories, *category);
                }
            }
            state.statuses.push(event.kind);
        }
        states
    }

    // ==================== 内部 ====================

    fn push(
        &mut self,
        scope: MuKuScope,
        label: &str,
        vault: DiZhi,
        kind: MuKuEventKind,
        categories: Vec<MuKuCategory>,
        description: String,
    ) {
        log::debug!(target: crate::LOG_TARGET, "🏺 [{}] {}", label, description);
        self.events.push(MuKuEvent {
            scope,
            label: label.into(),
            vault,
            kind,
            categories,
            description,
            severity: scope.severity(),
        });
    }

    /// 见库并计算入墓，无天干入墓时返回 None
    fn enter(
        &mut self,
        scope: MuKuScope,
        label: &str,
        attrs: &'static MuKuAttrs,
        companions: &[DiZhi],
    ) -> Result<Option<OpenVault>, Error> {
        let vault = attrs.zhi;
        self.push(scope, label, vault, MuKuEventKind::Present, Vec::new(), format!("{}见{}墓", scope.name(), vault));

        let (entered, categories) = entries(self.rizhu, attrs, companions)?;
        if entered.is_empty() {
            return Ok(None);
        }
        let parts: Vec<String> =
            entered.iter().map(|(zhi, gan)| format!("{}中{}", zhi.to_char(), gan.to_char())).collect();
        let description = format!("{}入{}墓（{}）", parts.join("、"), vault, category_names(&categories));
        self.push(scope, label, vault, MuKuEventKind::Entered, categories.clone(), description);
        Ok(Some(OpenVault { attrs, categories }))
    }

    /// `other` 对已入墓之库的闭、冲、害
    fn check_overlay(&mut self, scope: MuKuScope, label: &str, vault: &OpenVault, other: DiZhi) {
        let attrs = vault.attrs;
        let v = attrs.zhi;
        let cats = category_names(&vault.categories);
        let (kind, description) = if other == attrs.bi {
            (MuKuEventKind::Closed, format!("{}{}合，{}墓闭（{}）", other, v, v, cats))
        } else if other == attrs.chong {
            (MuKuEventKind::Clashed, format!("{}{}冲，{}墓冲开（{}）", other, v, v, cats))
        } else if other == attrs.hai {
            (MuKuEventKind::Harmed, format!("{}{}害，{}墓穿害（{}）", other, v, v, cats))
        } else {
            return;
        };
        self.push(scope, label, v, kind, vault.categories.clone(), description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShiShen;

    fn chart(s: &str) -> SiZhu {
        SiZhu::from_symbols(s).unwrap()
    }

    #[test]
    fn test_every_hidden_stem_has_one_vault() {
        for zhi in DiZhi::all() {
            for gan in canggan(zhi).unwrap() {
                let owners = MUKU_TABLE.iter().filter(|a| a.stored.contains(gan)).count();
                assert_eq!(owners, 1, "{:?} 的藏干 {:?}", zhi, gan);
            }
        }
        for attrs in MUKU_TABLE.iter() {
            assert!(attrs.bi.0 < 12 && attrs.chong.0 < 12 && attrs.hai.0 < 12);
            assert!(attrs.zhi.is_muku());
        }
    }

    #[test]
    fn test_natal_vault_entered() {
        // 戊日，辰中癸为财
        let tracker = MuKuTracker::natal(&chart("庚辰 乙酉 戊午 甲寅")).unwrap();
        let entered: Vec<&MuKuEvent> =
            tracker.events().iter().filter(|e| e.kind == MuKuEventKind::Entered).collect();
        assert_eq!(entered.len(), 1);
        assert_eq!(entered[0].vault, DiZhi(4));
        assert!(entered[0].categories.contains(&MuKuCategory::CaiKu));
        assert_eq!(resolve_gan(TianGan(4), TianGan(9)).unwrap(), ShiShen::ZhengCai);

        // 原局月支酉已合辰
        let closed = tracker.events().iter().find(|e| e.kind == MuKuEventKind::Closed).unwrap();
        assert_eq!(closed.severity, Severity::Normal);
        assert!(closed.description.contains('合'));
    }

    #[test]
    fn test_annual_close_is_important() {
        let mut tracker = MuKuTracker::natal(&chart("庚辰 乙酉 戊午 甲寅")).unwrap();
        let before = tracker.events().len();
        tracker.overlay_year(2029, GanZhi::from_year(2029), None).unwrap();
        let new_events = &tracker.events()[before..];
        let closed = new_events.iter().find(|e| e.kind == MuKuEventKind::Closed).unwrap();
        assert_eq!(closed.severity, Severity::Important);
        assert_eq!(closed.vault, DiZhi(4));
        assert_eq!(closed.label, "2029");
        assert!(closed.categories.contains(&MuKuCategory::CaiKu));
        assert!(closed.description.contains('合'));
    }

    #[test]
    fn test_dayun_layer_and_states() {
        let mut tracker = MuKuTracker::natal(&chart("庚辰 乙酉 戊午 甲寅")).unwrap();
        let dayun = DaYun { index: 0, ganzhi: GanZhi::from_symbols("庚戌").unwrap(), start_age: 5, start_year: 2005 };
        tracker.overlay_dayun(&dayun).unwrap();

        // 戌冲辰：注意
        let clash = tracker.events().iter().find(|e| e.kind == MuKuEventKind::Clashed).unwrap();
        assert_eq!(clash.severity, Severity::Attention);
        assert_eq!(clash.label, "庚戌大运");
        // 戌为库，原局午中丁己入戌
        assert!(tracker
            .events()
            .iter()
            .any(|e| e.vault == DiZhi(10) && e.kind == MuKuEventKind::Entered && e.scope == MuKuScope::DaYun));
        // 原局酉穿戌库，辰冲戌库
        let xu: Vec<MuKuEventKind> = tracker
            .events()
            .iter()
            .filter(|e| e.vault == DiZhi(10) && e.scope == MuKuScope::DaYun)
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            xu,
            vec![MuKuEventKind::Present, MuKuEventKind::Entered, MuKuEventKind::Clashed, MuKuEventKind::Harmed]
        );
        let harmed = tracker.events().iter().find(|e| e.kind == MuKuEventKind::Harmed).unwrap();
        assert_eq!(harmed.label, "庚戌大运");
        assert!(harmed.description.starts_with("酉戌害"));

        let states = tracker.states();
        let chen = states.iter().find(|s| s.vault == DiZhi(4)).unwrap();
        assert_eq!(chen.statuses.first(), Some(&MuKuEventKind::Present));
        assert!(chen.statuses.contains(&MuKuEventKind::Clashed));
        assert!(chen.categories.contains(&MuKuCategory::CaiKu));

        // 只追加
        let count = tracker.events().len();
        tracker.overlay_year(2006, GanZhi::from_year(2006), Some(&dayun)).unwrap();
        assert!(tracker.events().len() >= count);
    }
}
