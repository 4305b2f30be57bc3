//! # 分析上下文
//!
//! 一次分析从头到尾只有一个 [`AnalysisState`]，按阶段顺序写入：
//!
//! 做功分类 → 事业财运（用神/忌神） → 大运 → 流年 / 流月，墓库事件随时追加。
//!
//! 后续阶段通过访问器读取前置阶段的结果，前置阶段未执行时返回 `StageNotReady`。

use crate::error::{Error, Stage};
use crate::muku::MuKuEvent;
use crate::scoring::{CareerScore, DaYunScore};
use crate::types::{DiZhi, SiZhu, ZhuPosition};
use crate::zuogong::ZuoGongAnalysis;
use sp_std::prelude::*;

/// 分析上下文
#[derive(Clone, Debug)]
pub struct AnalysisState {
    sizhu: SiZhu,
    zuogong: Option<ZuoGongAnalysis>,
    career: Option<CareerScore>,
    dayun_scores: Option<Vec<DaYunScore>>,
    muku_events: Vec<MuKuEvent>,
}

impl AnalysisState {
    pub fn new(sizhu: SiZhu) -> Self {
        Self {
            sizhu,
            zuogong: None,
            career: None,
            dayun_scores: None,
            muku_events: Vec::new(),
        }
    }

    pub fn sizhu(&self) -> &SiZhu {
        &self.sizhu
    }

    // ==================== 写入 ====================

    pub fn set_zuogong(&mut self, analysis: ZuoGongAnalysis) {
        self.zuogong = Some(analysis);
    }

    pub fn set_career(&mut self, career: CareerScore) {
        self.career = Some(career);
    }

    pub fn set_dayun_scores(&mut self, scores: Vec<DaYunScore>) {
        self.dayun_scores = Some(scores);
    }

    pub fn extend_muku_events(&mut self, events: impl IntoIterator<Item = MuKuEvent>) {
        self.muku_events.extend(events);
    }

    // ==================== 读取 ====================

    pub fn zuogong(&self) -> Result<&ZuoGongAnalysis, Error> {
        self.zuogong.as_ref().ok_or(Error::StageNotReady(Stage::ZuoGong))
    }

    pub fn controlled_zhi(&self) -> Result<Vec<(ZhuPosition, DiZhi)>, Error> {
        Ok(self.zuogong()?.controlled_zhi())
    }

    pub fn career(&self) -> Result<&CareerScore, Error> {
        self.career.as_ref().ok_or(Error::StageNotReady(Stage::Career))
    }

    /// 地支忌神
    pub fn ji_zhi(&self) -> Result<&[DiZhi], Error> {
        Ok(&self.career()?.ji_zhi)
    }

    pub fn dayun_scores(&self) -> Result<&[DaYunScore], Error> {
        self.dayun_scores.as_deref().ok_or(Error::StageNotReady(Stage::DaYun))
    }

    pub fn muku_events(&self) -> &[MuKuEvent] {
        &self.muku_events
    }

    pub fn into_muku_events(self) -> Vec<MuKuEvent> {
        self.muku_events
    }
}
