//! # 引擎配置
//!
//! 与 pallet 的 `Config` 相同的写法：常量以 `Get<u32>` 关联类型提供，运行时或测试可以替换。

use frame_support::traits::{ConstU32, Get};

/// 引擎配置
pub trait Config {
    /// 大运步数
    type MaxDaYunSteps: Get<u32>;

    /// 起运推算时向前/向后查找"节"的最多天数
    type MaxJieQiSearchDays: Get<u32>;

    /// 每步大运年数
    type YearsPerDaYun: Get<u32>;
}

/// 默认配置：12 步大运，每步 10 年，最多查找 35 天
pub struct DefaultConfig;

impl Config for DefaultConfig {
    type MaxDaYunSteps = ConstU32<12>;
    type MaxJieQiSearchDays = ConstU32<35>;
    type YearsPerDaYun = ConstU32<10>;
}
