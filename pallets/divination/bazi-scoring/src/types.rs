//! # 基础类型
//!
//! 天干、地支、干支、四柱、十神等值类型。
//!
//! ## 天干地支索引
//!
//! - 天干: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! - 地支: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
//!
//! ## 两种阴阳
//!
//! - **序数阴阳**：索引为偶数者为阳。十神、大运顺逆、干支配对都用它。
//! - **做功阴阳**：木火与燥土为阳，金水与湿土为阴。做功分类和运势评分用它。

use crate::constants::{DIZHI_CHARS, NAYIN_NAMES, TIANGAN_CHARS};
use crate::error::Error;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use core::fmt;
use scale_info::TypeInfo;
use sp_std::prelude::*;

// ==================== 五行 / 阴阳 ====================

/// 五行
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum WuXing {
    Jin,
    Mu,
    Shui,
    Huo,
    Tu,
}

impl WuXing {
    pub fn name(&self) -> &'static str {
        match self {
            WuXing::Jin => "金",
            WuXing::Mu => "木",
            WuXing::Shui => "水",
            WuXing::Huo => "火",
            WuXing::Tu => "土",
        }
    }

    /// 我生者
    pub fn sheng(&self) -> WuXing {
        match self {
            WuXing::Mu => WuXing::Huo,
            WuXing::Huo => WuXing::Tu,
            WuXing::Tu => WuXing::Jin,
            WuXing::Jin => WuXing::Shui,
            WuXing::Shui => WuXing::Mu,
        }
    }

    /// 我克者
    pub fn ke(&self) -> WuXing {
        match self {
            WuXing::Mu => WuXing::Tu,
            WuXing::Tu => WuXing::Shui,
            WuXing::Shui => WuXing::Huo,
            WuXing::Huo => WuXing::Jin,
            WuXing::Jin => WuXing::Mu,
        }
    }
}

/// 阴阳
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum YinYang {
    Yang,
    Yin,
}

impl YinYang {
    pub fn name(&self) -> &'static str {
        match self {
            YinYang::Yang => "阳",
            YinYang::Yin => "阴",
        }
    }

    pub fn opposite(&self) -> YinYang {
        match self {
            YinYang::Yang => YinYang::Yin,
            YinYang::Yin => YinYang::Yang,
        }
    }
}

// ==================== 天干 ====================

/// 天干（0-9）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TianGan(pub u8);

impl TianGan {
    pub const COUNT: u8 = 10;

    /// 从索引构造，超出 0-9 返回 `InvalidSymbol`
    pub fn new(index: u8) -> Result<Self, Error> {
        if index < Self::COUNT {
            Ok(TianGan(index))
        } else {
            Err(Error::InvalidSymbol)
        }
    }

    /// 从汉字构造（甲乙丙丁戊己庚辛壬癸）
    pub fn from_char(c: char) -> Result<Self, Error> {
        TIANGAN_CHARS
            .iter()
            .position(|&x| x == c)
            .map(|i| TianGan(i as u8))
            .ok_or(Error::InvalidSymbol)
    }

    pub fn to_char(&self) -> char {
        TIANGAN_CHARS[self.0 as usize % 10]
    }

    /// 全部十天干，按甲到癸排列
    pub fn all() -> impl Iterator<Item = TianGan> {
        (0..Self::COUNT).map(TianGan)
    }

    pub fn to_wuxing(&self) -> WuXing {
        match self.0 / 2 {
            0 => WuXing::Mu,
            1 => WuXing::Huo,
            2 => WuXing::Tu,
            3 => WuXing::Jin,
            _ => WuXing::Shui,
        }
    }

    /// 序数阴阳：甲丙戊庚壬为阳
    pub fn yin_yang(&self) -> YinYang {
        if self.0 % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    /// 做功阴阳：甲乙丙丁戊为阳，己庚辛壬癸为阴
    pub fn work_yin_yang(&self) -> YinYang {
        if self.0 < 5 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    /// 天干五合：甲己、乙庚、丙辛、丁壬、戊癸
    pub fn he(&self) -> TianGan {
        TianGan((self.0 + 5) % 10)
    }

    /// 天干相冲：甲庚、乙辛、丙壬、丁癸（戊己无冲）
    pub fn chong(&self) -> Option<TianGan> {
        match self.0 {
            0..=3 => Some(TianGan(self.0 + 6)),
            6..=9 => Some(TianGan(self.0 - 6)),
            _ => None,
        }
    }

    /// 顺数（负数为逆数）若干位
    pub fn offset(&self, step: i32) -> TianGan {
        TianGan((self.0 as i32 + step).rem_euclid(10) as u8)
    }
}

// ==================== 地支 ====================

/// 地支（0-11）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DiZhi(pub u8);

impl DiZhi {
    pub const COUNT: u8 = 12;

    /// 从索引构造，超出 0-11 返回 `InvalidSymbol`
    pub fn new(index: u8) -> Result<Self, Error> {
        if index < Self::COUNT {
            Ok(DiZhi(index))
        } else {
            Err(Error::InvalidSymbol)
        }
    }

    /// 从汉字构造（子丑寅卯辰巳午未申酉戌亥）
    pub fn from_char(c: char) -> Result<Self, Error> {
        DIZHI_CHARS
            .iter()
            .position(|&x| x == c)
            .map(|i| DiZhi(i as u8))
            .ok_or(Error::InvalidSymbol)
    }

    pub fn to_char(&self) -> char {
        DIZHI_CHARS[self.0 as usize % 12]
    }

    pub fn all() -> impl Iterator<Item = DiZhi> {
        (0..Self::COUNT).map(DiZhi)
    }

    pub fn to_wuxing(&self) -> WuXing {
        match self.0 {
            0 | 11 => WuXing::Shui,
            2 | 3 => WuXing::Mu,
            5 | 6 => WuXing::Huo,
            8 | 9 => WuXing::Jin,
            _ => WuXing::Tu,
        }
    }

    /// 序数阴阳：子寅辰午申戌为阳
    pub fn yin_yang(&self) -> YinYang {
        if self.0 % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    /// 做功阴阳：寅卯巳午未戌为阳，申酉亥子丑辰为阴
    pub fn work_yin_yang(&self) -> YinYang {
        match self.0 {
            2 | 3 | 5 | 6 | 7 | 10 => YinYang::Yang,
            _ => YinYang::Yin,
        }
    }

    /// 是否为四库（辰戌丑未）
    pub fn is_muku(&self) -> bool {
        matches!(self.0, 1 | 4 | 7 | 10)
    }

    pub fn offset(&self, step: i32) -> DiZhi {
        DiZhi((self.0 as i32 + step).rem_euclid(12) as u8)
    }
}

// ==================== 干支 ====================

/// 干支（一柱）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GanZhi {
    pub gan: TianGan,
    pub zhi: DiZhi,
}

impl GanZhi {
    pub fn new(gan: TianGan, zhi: DiZhi) -> Self {
        Self { gan, zhi }
    }

    /// 从六十甲子序号构造（甲子=0 ... 癸亥=59）
    pub fn from_index(index: u8) -> Option<Self> {
        if index >= 60 {
            return None;
        }
        Some(Self { gan: TianGan(index % 10), zhi: DiZhi(index % 12) })
    }

    /// 六十甲子序号；干支阴阳不配（如甲丑）时为 None
    pub fn to_index(&self) -> Option<u8> {
        if self.gan.0 % 2 != self.zhi.0 % 2 {
            return None;
        }
        Some(((6 * self.gan.0 as i32 - 5 * self.zhi.0 as i32).rem_euclid(60)) as u8)
    }

    /// 公历年份对应的流年干支（以立春为界的年份）
    pub fn from_year(year: i32) -> Self {
        let offset = (year - 4).rem_euclid(60);
        Self { gan: TianGan((offset % 10) as u8), zhi: DiZhi((offset % 12) as u8) }
    }

    /// 从两个汉字构造，如 "甲子"
    pub fn from_symbols(s: &str) -> Result<Self, Error> {
        let mut chars = s.chars();
        let gan = chars.next().ok_or(Error::InvalidSymbol)?;
        let zhi = chars.next().ok_or(Error::InvalidSymbol)?;
        if chars.next().is_some() {
            return Err(Error::InvalidSymbol);
        }
        Ok(Self { gan: TianGan::from_char(gan)?, zhi: DiZhi::from_char(zhi)? })
    }

    /// 干支同步推移（负数为逆推）
    pub fn offset(&self, step: i32) -> Self {
        Self { gan: self.gan.offset(step), zhi: self.zhi.offset(step) }
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    /// 纳音五行名称，如甲子为"海中金"
    pub fn nayin(&self) -> Option<&'static str> {
        self.to_index().map(|i| NAYIN_NAMES[i as usize / 2])
    }
}

impl fmt::Display for TianGan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for DiZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Display for GanZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.gan.to_char(), self.zhi.to_char())
    }
}

// ==================== 四柱 ====================

/// 柱位
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ZhuPosition {
    Year,
    Month,
    Day,
    Hour,
}

impl ZhuPosition {
    pub const ALL: [ZhuPosition; 4] =
        [ZhuPosition::Year, ZhuPosition::Month, ZhuPosition::Day, ZhuPosition::Hour];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZhuPosition::Year => "年",
            ZhuPosition::Month => "月",
            ZhuPosition::Day => "日",
            ZhuPosition::Hour => "时",
        }
    }
}

/// 四柱命盘
///
/// 构造后不可变，日柱天干即日主，是所有十神查询的唯一参照。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SiZhu {
    pub year_zhu: GanZhi,
    pub month_zhu: GanZhi,
    pub day_zhu: GanZhi,
    pub hour_zhu: GanZhi,
}

impl SiZhu {
    pub fn new(year_zhu: GanZhi, month_zhu: GanZhi, day_zhu: GanZhi, hour_zhu: GanZhi) -> Self {
        Self { year_zhu, month_zhu, day_zhu, hour_zhu }
    }

    /// 由天干、地支序列构造，必须各 4 个
    pub fn from_parts(gans: &[TianGan], zhis: &[DiZhi]) -> Result<Self, Error> {
        if gans.len() != 4 || zhis.len() != 4 {
            return Err(Error::IncompleteChart);
        }
        Ok(Self::new(
            GanZhi::new(gans[0], zhis[0]),
            GanZhi::new(gans[1], zhis[1]),
            GanZhi::new(gans[2], zhis[2]),
            GanZhi::new(gans[3], zhis[3]),
        ))
    }

    /// 解析 "甲子 乙丑 丙寅 丁卯" 形式的四柱
    pub fn from_symbols(s: &str) -> Result<Self, Error> {
        let zhus = s.split_whitespace().map(GanZhi::from_symbols).collect::<Result<Vec<_>, _>>()?;
        match zhus.as_slice() {
            [y, m, d, h] => Ok(Self::new(*y, *m, *d, *h)),
            _ => Err(Error::IncompleteChart),
        }
    }

    /// 日主
    pub fn rizhu(&self) -> TianGan {
        self.day_zhu.gan
    }

    pub fn pillar(&self, pos: ZhuPosition) -> GanZhi {
        match pos {
            ZhuPosition::Year => self.year_zhu,
            ZhuPosition::Month => self.month_zhu,
            ZhuPosition::Day => self.day_zhu,
            ZhuPosition::Hour => self.hour_zhu,
        }
    }

    pub fn pillars(&self) -> [GanZhi; 4] {
        [self.year_zhu, self.month_zhu, self.day_zhu, self.hour_zhu]
    }

    pub fn gans(&self) -> [TianGan; 4] {
        [self.year_zhu.gan, self.month_zhu.gan, self.day_zhu.gan, self.hour_zhu.gan]
    }

    pub fn zhis(&self) -> [DiZhi; 4] {
        [self.year_zhu.zhi, self.month_zhu.zhi, self.day_zhu.zhi, self.hour_zhu.zhi]
    }
}

impl fmt::Display for SiZhu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.year_zhu, self.month_zhu, self.day_zhu, self.hour_zhu)
    }
}

// ==================== 出生信息 ====================

/// 性别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    Male,
    Female,
}

/// 子时归属模式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ZiShiMode {
    /// 传统派：23:00 起即换日，晚子时用次日日柱
    Traditional,
    /// 现代派：23:00-23:59 仍用当日日柱
    #[default]
    Modern,
}

/// 出生时间（公历）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BirthTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl BirthTime {
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self { year, month, day, hour, minute }
    }
}

// ==================== 十神 ====================

/// 十神
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiShen {
    /// 比肩
    BiJian,
    /// 劫财
    JieCai,
    /// 食神
    ShiShen,
    /// 伤官
    ShangGuan,
    /// 偏财（才）
    PianCai,
    /// 正财
    ZhengCai,
    /// 七杀
    QiSha,
    /// 正官
    ZhengGuan,
    /// 偏印（枭）
    PianYin,
    /// 正印
    ZhengYin,
}

/// 十神类别（两两一组）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiShenGroup {
    BiJie,
    ShiShang,
    CaiXing,
    GuanSha,
    YinXiao,
}

impl ShiShen {
    pub const ALL: [ShiShen; 10] = [
        ShiShen::BiJian,
        ShiShen::JieCai,
        ShiShen::ShiShen,
        ShiShen::ShangGuan,
        ShiShen::PianCai,
        ShiShen::ZhengCai,
        ShiShen::QiSha,
        ShiShen::ZhengGuan,
        ShiShen::PianYin,
        ShiShen::ZhengYin,
    ];

    /// 单字简称
    pub fn short_name(&self) -> &'static str {
        match self {
            ShiShen::BiJian => "比",
            ShiShen::JieCai => "劫",
            ShiShen::ShiShen => "食",
            ShiShen::ShangGuan => "伤",
            ShiShen::PianCai => "才",
            ShiShen::ZhengCai => "财",
            ShiShen::QiSha => "杀",
            ShiShen::ZhengGuan => "官",
            ShiShen::PianYin => "枭",
            ShiShen::ZhengYin => "印",
        }
    }

    pub fn group(&self) -> ShiShenGroup {
        match self {
            ShiShen::BiJian | ShiShen::JieCai => ShiShenGroup::BiJie,
            ShiShen::ShiShen | ShiShen::ShangGuan => ShiShenGroup::ShiShang,
            ShiShen::PianCai | ShiShen::ZhengCai => ShiShenGroup::CaiXing,
            ShiShen::QiSha | ShiShen::ZhengGuan => ShiShenGroup::GuanSha,
            ShiShen::PianYin | ShiShen::ZhengYin => ShiShenGroup::YinXiao,
        }
    }
}

impl ShiShenGroup {
    pub fn name(&self) -> &'static str {
        match self {
            ShiShenGroup::BiJie => "比劫",
            ShiShenGroup::ShiShang => "食伤",
            ShiShenGroup::CaiXing => "财才",
            ShiShenGroup::GuanSha => "官杀",
            ShiShenGroup::YinXiao => "印枭",
        }
    }
}

// ==================== 吉凶等级 ====================

/// 五级吉凶
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    DaJi,
    Ji,
    Ping,
    Xiong,
    DaXiong,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::DaJi => "大吉",
            Tier::Ji => "吉",
            Tier::Ping => "平",
            Tier::Xiong => "凶",
            Tier::DaXiong => "大凶",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiangan_attributes() {
        let jia = TianGan(0);
        assert_eq!(jia.to_wuxing(), WuXing::Mu);
        assert_eq!(jia.he(), TianGan(5));
        assert_eq!(jia.chong(), Some(TianGan(6)));
        assert_eq!(TianGan(4).chong(), None);
        assert_eq!(TianGan(9).chong(), Some(TianGan(3)));
        assert_eq!(TianGan(4).work_yin_yang(), YinYang::Yang);
        assert_eq!(TianGan(5).work_yin_yang(), YinYang::Yin);
        assert!(TianGan::new(10).is_err());
    }

    #[test]
    fn test_dizhi_work_yin_yang() {
        let yang: Vec<char> = DiZhi::all()
            .filter(|z| z.work_yin_yang() == YinYang::Yang)
            .map(|z| z.to_char())
            .collect();
        assert_eq!(yang, vec!['寅', '卯', '巳', '午', '未', '戌']);
    }

    #[test]
    fn test_ganzhi_index_and_year() {
        for i in 0..60u8 {
            let gz = GanZhi::from_index(i).unwrap();
            assert_eq!(gz.to_index(), Some(i));
        }
        assert_eq!(GanZhi::new(TianGan(0), DiZhi(1)).to_index(), None);
        // 1984 甲子年, 2024 甲辰年
        assert_eq!(GanZhi::from_year(1984).to_index(), Some(0));
        assert_eq!(GanZhi::from_symbols("甲辰").unwrap(), GanZhi::from_year(2024));
        assert_eq!(GanZhi::from_index(0).unwrap().nayin(), Some("海中金"));
        assert_eq!(GanZhi::from_index(59).unwrap().nayin(), Some("大海水"));
    }

    #[test]
    fn test_ganzhi_offset_wraps() {
        let jiazi = GanZhi::from_index(0).unwrap();
        assert_eq!(jiazi.offset(-1), GanZhi::from_index(59).unwrap());
        assert_eq!(jiazi.offset(61), GanZhi::from_index(1).unwrap());
    }

    #[test]
    fn test_sizhu_symbols() {
        let sizhu = SiZhu::from_symbols("庚辰 乙酉 戊午 甲寅").unwrap();
        assert_eq!(sizhu.rizhu(), TianGan(4));
        assert_eq!(sizhu.to_string(), "庚辰 乙酉 戊午 甲寅");
        assert_eq!(SiZhu::from_symbols("庚辰 乙酉 戊午"), Err(Error::IncompleteChart));
        assert_eq!(SiZhu::from_symbols("庚辰 乙酉 戊午 甲X"), Err(Error::InvalidSymbol));
    }
}
