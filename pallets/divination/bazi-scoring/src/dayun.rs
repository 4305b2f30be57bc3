//! # 大运
//!
//! - 顺逆：阳年男、阴年女顺排，阴年男、阳年女逆排（年干序数奇偶）
//! - 大运干支：从月柱起按顺逆逐位推移
//! - 起运：从出生日按顺逆逐日查找，遇"节"即止，三天折一岁
//!   （岁数四舍五入，起运年取整：出生年 + 天数 / 3）

use crate::calculations::{adjust_date, is_jie_day, validate_birth_time};
use crate::config::Config;
use crate::error::Error;
use crate::types::{BirthTime, Gender, GanZhi, SiZhu, TianGan};
use alloc::string::String;
use codec::{Decode, DecodeWithMemTracking, Encode};
use frame_support::traits::Get;
use scale_info::TypeInfo;
use sp_std::prelude::*;

/// 大运方向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum DaYunDirection {
    /// 顺排
    Shun,
    /// 逆排
    Ni,
}

impl DaYunDirection {
    /// 顺为 +1，逆为 -1
    pub fn step(&self) -> i32 {
        match self {
            DaYunDirection::Shun => 1,
            DaYunDirection::Ni => -1,
        }
    }
}

/// 一步大运
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DaYun {
    /// 第几步（0 起）
    pub index: u8,
    pub ganzhi: GanZhi,
    /// 起始虚岁
    pub start_age: u8,
    /// 起始公历年
    pub start_year: i32,
}

/// 大运序列
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DaYunList {
    pub direction: DaYunDirection,
    /// 出生到交节所走天数
    pub qiyun_days: u32,
    /// 起运岁数
    pub qiyun_age: u8,
    pub birth_year: i32,
    /// 每步年数
    pub years_per_step: u8,
    pub steps: Vec<DaYun>,
}

impl DaYunList {
    /// 大运时间线结束年（不含）
    pub fn end_year(&self) -> i32 {
        self.steps
            .last()
            .map(|last| last.start_year + self.years_per_step as i32)
            .unwrap_or(self.birth_year)
    }

    /// 目标年所在大运序号
    pub fn active_index(&self, year: i32) -> Result<usize, Error> {
        self.steps
            .iter()
            .position(|dy| dy.start_year <= year && year < dy.start_year + self.years_per_step as i32)
            .ok_or(Error::YearOutOfRange)
    }

    pub fn active(&self, year: i32) -> Result<&DaYun, Error> {
        self.active_index(year).map(|i| &self.steps[i])
    }

    /// 干支序列的文字形式，如 "丙寅 丁卯 ..."
    pub fn to_symbols(&self) -> String {
        let names: Vec<String> = self.steps.iter().map(|dy| alloc::format!("{}", dy.ganzhi)).collect();
        names.join(" ")
    }

    /// 由文字形式的干支序列与起运信息重建
    pub fn from_symbols(
        symbols: &str,
        direction: DaYunDirection,
        qiyun_days: u32,
        birth_year: i32,
        years_per_step: u8,
    ) -> Result<Self, Error> {
        let qiyun_age = qiyun_age_from_days(qiyun_days);
        let steps = symbols
            .split_whitespace()
            .enumerate()
            .map(|(i, s)| -> Result<DaYun, Error> {
                let ganzhi = GanZhi::from_symbols(s)?;
                Ok(step_at(i as u32, ganzhi, birth_year, qiyun_days, years_per_step))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self { direction, qiyun_days, qiyun_age, birth_year, years_per_step, steps })
    }
}

/// 大运顺逆：男命阳年、女命阴年顺排
pub fn dayun_direction(gender: Gender, year_gan: TianGan) -> DaYunDirection {
    let is_male = gender == Gender::Male;
    let is_odd = year_gan.0 % 2 == 1;
    if is_male ^ is_odd {
        DaYunDirection::Shun
    } else {
        DaYunDirection::Ni
    }
}

/// 从出生日按方向逐日查找"节"，返回所走天数
///
/// 出生当日即交节时为 0。
pub fn calculate_qiyun_days(
    birth: &BirthTime,
    direction: DaYunDirection,
    max_days: u32,
) -> Result<u32, Error> {
    let (mut year, mut month, mut day) = (birth.year as i32, birth.month, birth.day);
    for walked in 0..=max_days {
        match is_jie_day(year, month, day) {
            Some(true) => return Ok(walked),
            Some(false) => {}
            // 走出节气表范围
            None => return Err(Error::InvalidBirthTime),
        }
        (year, month, day) = adjust_date(year, month, day, direction.step());
    }
    log::error!(target: crate::LOG_TARGET, "❌ {} 天内未找到节: {:?}", max_days, birth);
    Err(Error::LookupGap)
}

/// 三天折一岁，四舍五入
pub fn qiyun_age_from_days(days: u32) -> u8 {
    ((days + 1) / 3) as u8
}

/// 起运年数，不足一年舍去
pub fn qiyun_years_from_days(days: u32) -> i32 {
    (days / 3) as i32
}

fn step_at(i: u32, ganzhi: GanZhi, birth_year: i32, qiyun_days: u32, years_per_step: u8) -> DaYun {
    let offset = years_per_step as i32 * i as i32;
    DaYun {
        index: i as u8,
        ganzhi,
        start_age: (qiyun_age_from_days(qiyun_days) as i32 + offset) as u8,
        start_year: birth_year + qiyun_years_from_days(qiyun_days) + offset,
    }
}

/// 从月柱推排大运
pub fn calculate_dayun_list(
    month_zhu: GanZhi,
    birth_year: i32,
    qiyun_days: u32,
    direction: DaYunDirection,
    count: u32,
    years_per_step: u8,
) -> Vec<DaYun> {
    (0..count)
        .map(|i| {
            let ganzhi = month_zhu.offset(direction.step() * (i as i32 + 1));
            step_at(i, ganzhi, birth_year, qiyun_days, years_per_step)
        })
        .collect()
}

/// 生成大运：纯函数，同样的输入总得到同样的结果
pub fn generate_luck_cycle<T: Config>(
    sizhu: &SiZhu,
    gender: Gender,
    birth: &BirthTime,
) -> Result<DaYunList, Error> {
    validate_birth_time(birth)?;
    let direction = dayun_direction(gender, sizhu.year_zhu.gan);
    let qiyun_days = calculate_qiyun_days(birth, direction, T::MaxJieQiSearchDays::get())?;
    let qiyun_age = qiyun_age_from_days(qiyun_days);
    let years_per_step = T::YearsPerDaYun::get() as u8;
    let birth_year = birth.year as i32;
    let steps = calculate_dayun_list(
        sizhu.month_zhu,
        birth_year,
        qiyun_days,
        direction,
        T::MaxDaYunSteps::get(),
        years_per_step,
    );

    log::debug!(
        target: crate::LOG_TARGET,
        "🔄 大运: {:?} 起运 {} 岁（{} 天）",
        direction, qiyun_age, qiyun_days
    );

    Ok(DaYunList { direction, qiyun_days, qiyun_age, birth_year, years_per_step, steps })
}
