//! # 十神
//!
//! 以日主为参照，把任一天干（或地支藏干）映射为十神。
//!
//! 规则（序数阴阳）：
//! - 同我者：同性为比，异性为劫
//! - 我生者：同性为食，异性为伤
//! - 我克者：同性为才，异性为财
//! - 克我者：同性为杀，异性为官
//! - 生我者：同性为枭，异性为印

use crate::constants::CANGGAN;
use crate::error::Error;
use crate::relations::Target;
use crate::types::{DiZhi, ShiShen, TianGan};
use alloc::vec;
use sp_std::prelude::*;

const BI: ShiShen = ShiShen::BiJian;
const JIE: ShiShen = ShiShen::JieCai;
const SHI: ShiShen = ShiShen::ShiShen;
const SHANG: ShiShen = ShiShen::ShangGuan;
const PCAI: ShiShen = ShiShen::PianCai;
const ZCAI: ShiShen = ShiShen::ZhengCai;
const SHA: ShiShen = ShiShen::QiSha;
const GUAN: ShiShen = ShiShen::ZhengGuan;
const XIAO: ShiShen = ShiShen::PianYin;
const YIN: ShiShen = ShiShen::ZhengYin;

/// 十神表：`SHISHEN_TABLE[日主][他干]`
pub const SHISHEN_TABLE: [[ShiShen; 10]; 10] = [
    // 甲乙丙丁戊己庚辛壬癸
    [BI, JIE, SHI, SHANG, PCAI, ZCAI, SHA, GUAN, XIAO, YIN],  // 甲
    [JIE, BI, SHANG, SHI, ZCAI, PCAI, GUAN, SHA, YIN, XIAO],  // 乙
    [XIAO, YIN, BI, JIE, SHI, SHANG, PCAI, ZCAI, SHA, GUAN],  // 丙
    [YIN, XIAO, JIE, BI, SHANG, SHI, ZCAI, PCAI, GUAN, SHA],  // 丁
    [SHA, GUAN, XIAO, YIN, BI, JIE, SHI, SHANG, PCAI, ZCAI],  // 戊
    [GUAN, SHA, YIN, XIAO, JIE, BI, SHANG, SHI, ZCAI, PCAI],  // 己
    [PCAI, ZCAI, SHA, GUAN, XIAO, YIN, BI, JIE, SHI, SHANG],  // 庚
    [ZCAI, PCAI, GUAN, SHA, YIN, XIAO, JIE, BI, SHANG, SHI],  // 辛
    [SHI, SHANG, PCAI, ZCAI, SHA, GUAN, XIAO, YIN, BI, JIE],  // 壬
    [SHANG, SHI, ZCAI, PCAI, GUAN, SHA, YIN, XIAO, JIE, BI],  // 癸
];

/// 地支藏干
pub fn canggan(zhi: DiZhi) -> Result<&'static [TianGan], Error> {
    CANGGAN.get(zhi.0 as usize).copied().ok_or(Error::InvalidSymbol)
}

/// 天干十神
pub fn resolve_gan(rizhu: TianGan, other: TianGan) -> Result<ShiShen, Error> {
    SHISHEN_TABLE
        .get(rizhu.0 as usize)
        .and_then(|row| row.get(other.0 as usize))
        .copied()
        .ok_or(Error::InvalidSymbol)
}

/// 地支藏干十神，按藏干顺序返回 (藏干, 十神)
pub fn resolve_zhi(rizhu: TianGan, zhi: DiZhi) -> Result<Vec<(TianGan, ShiShen)>, Error> {
    canggan(zhi)?
        .iter()
        .map(|gan| resolve_gan(rizhu, *gan).map(|ss| (*gan, ss)))
        .collect()
}

/// 统一入口：天干返回一项，地支返回每个藏干一项
pub fn resolve(rizhu: TianGan, other: impl Into<Target>) -> Result<Vec<(TianGan, ShiShen)>, Error> {
    match other.into() {
        Target::Gan(gan) => Ok(vec![(gan, resolve_gan(rizhu, gan)?)]),
        Target::Zhi(zhi) => resolve_zhi(rizhu, zhi),
    }
}

/// 一组天干中是否出现任一指定十神
pub fn contains_any(rizhu: TianGan, gans: &[TianGan], wanted: &[ShiShen]) -> Result<bool, Error> {
    for gan in gans {
        if wanted.contains(&resolve_gan(rizhu, *gan)?) {
            return Ok(true);
        }
    }
    Ok(false)
}
