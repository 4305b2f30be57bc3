//! # 干支作用关系
//!
//! 地支对干支的作用查 [`DIZHI_RELATIONS`] 表，天干之间的作用由五合、相冲和五行生克推出。
//!
//! 方向约定：`+` 表示同向助力（生扶、同党），`-` 表示反向做功（克、冲、合制）。
//! 评分时被制之字遇 `-` 为得力，遇 `+` 为失力。

use crate::constants::DIZHI_RELATIONS;
use crate::error::Error;
use crate::types::{DiZhi, TianGan};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 作用子类
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationKind {
    /// 生
    Sheng,
    /// 被生
    BeiSheng,
    /// 克
    Ke,
    /// 被克
    BeiKe,
    /// 合（干合、半合、拱合）
    He,
    /// 六合
    LiuHe,
    /// 三合
    SanHe,
    /// 三会
    SanHui,
    /// 会
    Hui,
    /// 比
    Bi,
    /// 劫
    Jie,
    /// 伏吟
    FuYin,
    /// 刑
    Xing,
    /// 三刑
    SanXing,
    /// 自刑
    ZiXing,
    /// 害
    Hai,
    /// 冲
    Chong,
    /// 破
    Po,
    /// 暗合
    An,
    /// 墓
    Mu,
    /// 泄
    Xie,
    /// 耗
    Hao,
    /// 无
    Wu,
}

impl RelationKind {
    pub fn name(&self) -> &'static str {
        match self {
            RelationKind::Sheng => "生",
            RelationKind::BeiSheng => "被生",
            RelationKind::Ke => "克",
            RelationKind::BeiKe => "被克",
            RelationKind::He => "合",
            RelationKind::LiuHe => "六合",
            RelationKind::SanHe => "三合",
            RelationKind::SanHui => "三会",
            RelationKind::Hui => "会",
            RelationKind::Bi => "比",
            RelationKind::Jie => "劫",
            RelationKind::FuYin => "伏吟",
            RelationKind::Xing => "刑",
            RelationKind::SanXing => "三刑",
            RelationKind::ZiXing => "自刑",
            RelationKind::Hai => "害",
            RelationKind::Chong => "冲",
            RelationKind::Po => "破",
            RelationKind::An => "暗",
            RelationKind::Mu => "墓",
            RelationKind::Xie => "泄",
            RelationKind::Hao => "耗",
            RelationKind::Wu => "无",
        }
    }
}

/// 作用方向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// 同向 (+)
    Plus,
    /// 反向 (-)
    Minus,
    /// 无方向
    Neutral,
}

/// 一对干支之间的作用
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub kind: RelationKind,
    pub sign: Sign,
}

impl Relation {
    pub fn is_plus(&self) -> bool {
        self.sign == Sign::Plus
    }

    pub fn is_minus(&self) -> bool {
        self.sign == Sign::Minus
    }

    pub fn is_any(&self, kinds: &[RelationKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// 地支作用的对象
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Gan(TianGan),
    Zhi(DiZhi),
}

impl Target {
    fn code(&self) -> u8 {
        match self {
            Target::Gan(gan) => gan.0,
            Target::Zhi(zhi) => zhi.0 + 10,
        }
    }
}

impl From<TianGan> for Target {
    fn from(gan: TianGan) -> Self {
        Target::Gan(gan)
    }
}

impl From<DiZhi> for Target {
    fn from(zhi: DiZhi) -> Self {
        Target::Zhi(zhi)
    }
}

/// 查询地支 `zhi` 对 `target` 的作用
pub fn zhi_relation(zhi: DiZhi, target: impl Into<Target>) -> Result<Relation, Error> {
    let code = target.into().code();
    let row = DIZHI_RELATIONS.get(zhi.0 as usize).ok_or(Error::InvalidSymbol)?;
    row.iter()
        .find(|(c, _)| *c == code)
        .map(|(_, rel)| *rel)
        .ok_or_else(|| {
            log::error!(target: crate::LOG_TARGET, "❌ 关系表缺项: {:?} -> {}", zhi, code);
            Error::LookupGap
        })
}

/// 天干 `a` 对天干 `b` 的作用
///
/// 合、冲优先于五行生克；同五行为比劫。
pub fn gan_relation(a: TianGan, b: TianGan) -> Relation {
    let (kind, sign) = if a.he() == b {
        (RelationKind::He, Sign::Minus)
    } else if a.chong() == Some(b) {
        (RelationKind::Chong, Sign::Minus)
    } else {
        let (wa, wb) = (a.to_wuxing(), b.to_wuxing());
        if wa == wb {
            if a.0 % 2 == b.0 % 2 {
                (RelationKind::Bi, Sign::Plus)
            } else {
                (RelationKind::Jie, Sign::Plus)
            }
        } else if wa.sheng() == wb {
            (RelationKind::Sheng, Sign::Plus)
        } else if wb.sheng() == wa {
            (RelationKind::BeiSheng, Sign::Plus)
        } else if wa.ke() == wb {
            (RelationKind::Ke, Sign::Minus)
        } else {
            (RelationKind::BeiKe, Sign::Minus)
        }
    };
    Relation { kind, sign }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zhi_relation_lookup() {
        // 子午冲
        let rel = zhi_relation(DiZhi(0), DiZhi(6)).unwrap();
        assert_eq!(rel, Relation { kind: RelationKind::Chong, sign: Sign::Minus });
        // 辰中壬癸入墓
        let rel = zhi_relation(DiZhi(4), TianGan(9)).unwrap();
        assert_eq!(rel.kind, RelationKind::Mu);
        assert!(rel.is_plus());
        // 卯对丙无方向
        assert_eq!(zhi_relation(DiZhi(3), TianGan(2)).unwrap().sign, Sign::Neutral);
    }

    #[test]
    fn test_zhi_relation_total() {
        for zhi in DiZhi::all() {
            for gan in TianGan::all() {
                assert!(zhi_relation(zhi, gan).is_ok());
            }
            for other in DiZhi::all() {
                assert!(zhi_relation(zhi, other).is_ok());
            }
        }
    }

    #[test]
    fn test_gan_relation() {
        let jia = TianGan(0);
        assert_eq!(gan_relation(jia, TianGan(5)).kind, RelationKind::He);
        assert_eq!(gan_relation(jia, TianGan(6)).kind, RelationKind::Chong);
        assert_eq!(gan_relation(jia, TianGan(1)).kind, RelationKind::Jie);
        assert_eq!(gan_relation(jia, TianGan(0)).kind, RelationKind::Bi);
        assert_eq!(gan_relation(jia, TianGan(2)).kind, RelationKind::Sheng);
        assert_eq!(gan_relation(jia, TianGan(8)).kind, RelationKind::BeiSheng);
        assert_eq!(gan_relation(jia, TianGan(4)).kind, RelationKind::Ke);
        assert_eq!(gan_relation(jia, TianGan(7)).kind, RelationKind::BeiKe);
        assert!(gan_relation(jia, TianGan(4)).is_minus());
        // 戊无冲：戊对壬为克
        assert_eq!(gan_relation(TianGan(4), TianGan(8)).kind, RelationKind::Ke);
    }
}
