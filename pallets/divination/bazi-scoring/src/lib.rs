//! # 八字关系评分引擎 (Bazi Scoring)
//!
//! ## 概述
//!
//! 以四柱干支之间的生克冲合刑害墓关系为基础，对命局做结构分类，并给出
//! 事业财运、大运、流年、流月的加权评分与逐条理由：
//!
//! - 四柱排盘（立春定年、交节定月、儒略日定日、五鼠遁定时）
//! - 十神（日主为唯一参照）
//! - 做功分类（三阳制阴、阴制阳、贼捕、一气、食伤生财、印化官杀）
//! - 大运（顺逆、起运岁数、十二步）
//! - 墓库追踪（入墓、闭库、冲库、穿害，按层记录严重度）
//! - 评分（表驱动规则，五级吉凶）
//!
//! ## 流水线
//!
//! ```text
//! 四柱 → 做功分类 → 事业财运(用神/忌神) → 大运 → 流年 / 流月
//!                 ↘ 墓库追踪（原局 → 各步大运 → 流年）
//! ```
//!
//! 每次分析使用独立的 [`AnalysisState`]，无全局可变状态，纯计算、无 I/O。
//!
//! ## 使用示例
//!
//! ```ignore
//! let chart = Engine::build_chart(&['庚', '乙', '戊', '甲'], &['辰', '酉', '午', '寅'])?;
//! let luck = Engine::generate_luck_cycle(&chart, Gender::Female, &BirthTime::new(2000, 9, 15, 10, 0))?;
//! let report = Engine::analyze(&chart, &luck, 2029)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod calculations;
pub mod config;
pub mod constants;
pub mod dayun;
pub mod error;
pub mod muku;
pub mod relations;
pub mod scoring;
pub mod shishen;
pub mod state;
pub mod types;
pub mod zuogong;

#[cfg(test)]
mod tests;

pub use config::{Config, DefaultConfig};
pub use dayun::{DaYun, DaYunDirection, DaYunList};
pub use error::{Error, Stage};
pub use muku::{MuKuCategory, MuKuEvent, MuKuEventKind, MuKuScope, MuKuState, MuKuTracker, Severity};
pub use relations::{Relation, RelationKind, Sign};
pub use scoring::{CareerScore, DaYunScore, MonthScore, YearScore};
pub use state::AnalysisState;
pub use types::*;
pub use zuogong::{Favour, ZuoGong, ZuoGongAnalysis};

use alloc::string::String;
use codec::{Decode, DecodeWithMemTracking, Encode};
use core::marker::PhantomData;
use scale_info::TypeInfo;
use sp_std::prelude::*;

/// 日志 target
pub const LOG_TARGET: &str = "bazi-scoring";

/// 一次完整分析的结果
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FortuneReport {
    pub chart: SiZhu,
    pub year: i32,
    pub annual: GanZhi,
    /// 做功分类
    pub zuogong: ZuoGongAnalysis,
    /// 流年吉凶
    pub tier: Tier,
    /// 流年分数
    pub score: i32,
    /// 流年理由，首条为所在大运概述
    pub reasons: Vec<String>,
    pub muku_events: Vec<MuKuEvent>,
    pub muku_states: Vec<MuKuState>,
    pub career: CareerScore,
    pub dayun: Vec<DaYunScore>,
    pub months: Vec<MonthScore>,
}

impl FortuneReport {
    pub fn patterns(&self) -> Vec<ZuoGong> {
        self.zuogong.kinds()
    }
}

/// 引擎门面
///
/// 所有方法都是纯函数；`T` 提供大运步数、节气查找窗口等常量。
pub struct BaziEngine<T: Config = DefaultConfig>(PhantomData<T>);

/// 默认配置的引擎
pub type Engine = BaziEngine<DefaultConfig>;

impl<T: Config> BaziEngine<T> {
    /// 由四个天干、四个地支字符构造命盘
    pub fn build_chart(stems: &[char], branches: &[char]) -> Result<SiZhu, Error> {
        if stems.len() != 4 || branches.len() != 4 {
            return Err(Error::IncompleteChart);
        }
        let gans = stems.iter().map(|c| TianGan::from_char(*c)).collect::<Result<Vec<_>, _>>()?;
        let zhis = branches.iter().map(|c| DiZhi::from_char(*c)).collect::<Result<Vec<_>, _>>()?;
        SiZhu::from_parts(&gans, &zhis)
    }

    /// 由出生时间排盘
    pub fn chart_from_birth(birth: &BirthTime, mode: ZiShiMode) -> Result<SiZhu, Error> {
        calculations::calculate_sizhu(birth, mode)
    }

    /// 排大运
    pub fn generate_luck_cycle(chart: &SiZhu, gender: Gender, birth: &BirthTime) -> Result<DaYunList, Error> {
        dayun::generate_luck_cycle::<T>(chart, gender, birth)
    }

    /// 完整分析：做功 → 事业财运 → 大运 → 流年 → 流月，并叠加墓库
    pub fn analyze(chart: &SiZhu, luck: &DaYunList, year: i32) -> Result<FortuneReport, Error> {
        log::info!(target: LOG_TARGET, "🔮 开始分析: {} 目标年 {}", chart, year);
        let mut state = AnalysisState::new(*chart);

        state.set_zuogong(zuogong::classify(chart)?);

        let career = scoring::score_career(chart, state.zuogong()?)?;
        state.set_career(career);
        log::debug!(
            target: LOG_TARGET,
            "🎯 被制地支 {:?}，忌神地支 {:?}",
            state.controlled_zhi()?,
            state.ji_zhi()?
        );

        let dayun_scores = scoring::score_dayun_all(chart, state.zuogong()?, luck)?;
        state.set_dayun_scores(dayun_scores);

        let year_score = scoring::score_liunian(chart, state.zuogong()?, luck, state.dayun_scores()?, year)?;
        let months = scoring::score_liuyue(state.career()?, year)?;

        // 墓库：原局 → 全部大运 → 流年
        let active = luck.active(year)?;
        let mut tracker = MuKuTracker::natal(chart)?;
        for dy in &luck.steps {
            tracker.overlay_dayun(dy)?;
        }
        tracker.overlay_year(year, year_score.ganzhi, Some(active))?;
        let muku_states = tracker.states();
        state.extend_muku_events(tracker.into_events());

        log::info!(
            target: LOG_TARGET,
            "✅ 分析完成: {}年 {} 分（{}），墓库事件 {} 条",
            year,
            year_score.score,
            year_score.tier.name(),
            state.muku_events().len()
        );

        Ok(FortuneReport {
            chart: *state.sizhu(),
            year,
            annual: year_score.ganzhi,
            zuogong: state.zuogong()?.clone(),
            tier: year_score.tier,
            score: year_score.score,
            reasons: year_score.reasons,
            career: state.career()?.clone(),
            dayun: state.dayun_scores()?.to_vec(),
            months,
            muku_states,
            muku_events: state.into_muku_events(),
        })
    }

    /// 前一年、目标年、后一年的流年评分
    pub fn outlook(chart: &SiZhu, luck: &DaYunList, year: i32) -> Result<[YearScore; 3], Error> {
        let zg = zuogong::classify(chart)?;
        let decades = scoring::score_dayun_all(chart, &zg, luck)?;
        let score = |y: i32| scoring::score_liunian(chart, &zg, luck, &decades, y);
        Ok([score(year - 1)?, score(year)?, score(year + 1)?])
    }
}
