//! # 错误定义
//!
//! 引擎的所有失败路径都以 [`Error`] 返回，调用方用 `?` 逐层传播。
//!
//! - 输入类错误（`InvalidSymbol`、`IncompleteChart`、`InvalidBirthTime`、`YearOutOfRange`）
//!   由上层拒绝请求；
//! - 内部类错误（`LookupGap`、`StageNotReady`）表示规则表或流水线顺序被破坏，
//!   必须显式暴露，不得以中性分数代替。

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use core::fmt;
use scale_info::TypeInfo;

/// 流水线阶段
///
/// 用于 [`Error::StageNotReady`]，标明缺失的前置阶段。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// 做功分类
    ZuoGong,
    /// 事业财运评分（用神/忌神）
    Career,
    /// 大运评分
    DaYun,
}

/// 引擎错误
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// 天干/地支符号不在 10 干 12 支之内
    InvalidSymbol,
    /// 四柱不完整（不是恰好 4 柱）
    IncompleteChart,
    /// 出生时间无效或超出节气算法支持的范围（1901-2100）
    InvalidBirthTime,
    /// 目标年份不在大运时间线内
    YearOutOfRange,
    /// 关系表缺项（内部不变量被破坏）
    LookupGap,
    /// 前置阶段尚未执行
    StageNotReady(Stage),
}

impl Error {
    /// 是否为内部错误（对应 5xx），否则为输入错误（对应 4xx）
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::LookupGap | Error::StageNotReady(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSymbol => write!(f, "无效的天干或地支符号"),
            Error::IncompleteChart => write!(f, "四柱不完整，需要恰好 4 柱"),
            Error::InvalidBirthTime => write!(f, "出生时间无效或超出 1901-2100 年范围"),
            Error::YearOutOfRange => write!(f, "目标年份不在大运时间线内"),
            Error::LookupGap => write!(f, "关系表缺项"),
            Error::StageNotReady(stage) => write!(f, "前置阶段未完成: {:?}", stage),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(!Error::InvalidSymbol.is_internal());
        assert!(!Error::IncompleteChart.is_internal());
        assert!(!Error::YearOutOfRange.is_internal());
        assert!(Error::LookupGap.is_internal());
        assert!(Error::StageNotReady(Stage::Career).is_internal());
    }
}
