//! # 常量表
//!
//! 干支字符、藏干、地支属性、四库、地支作用关系表、纳音以及节气常数。
//! 所有表在编译期构造，查询方不做任何修改。

use crate::relations::{Relation, RelationKind, RelationKind::*, Sign, Sign::*};
use crate::types::{DiZhi, TianGan};

// ==================== 字符 ====================

/// 十天干
pub const TIANGAN_CHARS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// 十二地支
pub const DIZHI_CHARS: [char; 12] =
    ['子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥'];

/// 关系表目标编码：天干 0-9，地支 10-21
pub const fn symbol_code(c: char) -> u8 {
    match c {
        '甲' => 0,
        '乙' => 1,
        '丙' => 2,
        '丁' => 3,
        '戊' => 4,
        '己' => 5,
        '庚' => 6,
        '辛' => 7,
        '壬' => 8,
        '癸' => 9,
        '子' => 10,
        '丑' => 11,
        '寅' => 12,
        '卯' => 13,
        '辰' => 14,
        '巳' => 15,
        '午' => 16,
        '未' => 17,
        '申' => 18,
        '酉' => 19,
        '戌' => 20,
        '亥' => 21,
        _ => panic!("unknown ganzhi symbol"),
    }
}

const fn g(c: char) -> TianGan {
    TianGan(symbol_code(c))
}

const fn z(c: char) -> DiZhi {
    DiZhi(symbol_code(c) - 10)
}

// ==================== 藏干 ====================

/// 地支藏干
pub const CANGGAN: [&[TianGan]; 12] = [
    &[g('癸')],                   // 子
    &[g('癸'), g('辛'), g('己')], // 丑
    &[g('甲'), g('丙'), g('戊')], // 寅
    &[g('乙')],                   // 卯
    &[g('乙'), g('戊'), g('癸')], // 辰
    &[g('庚'), g('丙'), g('戊')], // 巳
    &[g('丁'), g('己')],          // 午
    &[g('乙'), g('己'), g('丁')], // 未
    &[g('戊'), g('庚'), g('壬')], // 申
    &[g('辛')],                   // 酉
    &[g('辛'), g('丁'), g('戊')], // 戌
    &[g('甲'), g('壬')],          // 亥
];

// ==================== 地支属性 ====================

/// 地支冲害合属性
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZhiAttrs {
    /// 六冲
    pub chong: DiZhi,
    /// 六害
    pub hai: DiZhi,
    /// 六合
    pub liuhe: DiZhi,
}

const fn attrs(chong: char, hai: char, liuhe: char) -> ZhiAttrs {
    ZhiAttrs { chong: z(chong), hai: z(hai), liuhe: z(liuhe) }
}

/// 十二地支属性表
pub const ZHI_ATTRS: [ZhiAttrs; 12] = [
    attrs('午', '未', '丑'), // 子
    attrs('未', '午', '子'), // 丑
    attrs('申', '巳', '亥'), // 寅
    attrs('酉', '辰', '戌'), // 卯
    attrs('戌', '卯', '酉'), // 辰
    attrs('亥', '寅', '申'), // 巳
    attrs('子', '丑', '未'), // 午
    attrs('丑', '子', '午'), // 未
    attrs('寅', '亥', '巳'), // 申
    attrs('卯', '戌', '辰'), // 酉
    attrs('辰', '酉', '卯'), // 戌
    attrs('巳', '申', '寅'), // 亥
];

// ==================== 四库 ====================

/// 墓库属性
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MuKuAttrs {
    /// 库支
    pub zhi: DiZhi,
    /// 收藏的天干
    pub stored: &'static [TianGan],
    /// 闭库之支（六合）
    pub bi: DiZhi,
    /// 冲库之支
    pub chong: DiZhi,
    /// 穿害之支
    pub hai: DiZhi,
}

/// 闭、冲、害取自库支的六合、六冲、六害
const fn muku(zhi: char, stored: &'static [TianGan]) -> MuKuAttrs {
    let a = ZHI_ATTRS[z(zhi).0 as usize];
    MuKuAttrs { zhi: z(zhi), stored, bi: a.liuhe, chong: a.chong, hai: a.hai }
}

/// 四库：丑为金库，辰为水库，未为木库，戌为火土库
pub const MUKU_TABLE: [MuKuAttrs; 4] = [
    muku('丑', &[g('庚'), g('辛')]),
    muku('辰', &[g('壬'), g('癸')]),
    muku('未', &[g('甲'), g('乙')]),
    muku('戌', &[g('丙'), g('丁'), g('戊'), g('己')]),
];

// ==================== 地支作用关系表 ====================

const fn e(target: char, kind: RelationKind, sign: Sign) -> (u8, Relation) {
    (symbol_code(target), Relation { kind, sign })
}

/// 地支对天干、地支的作用关系
///
/// 每行是一支对 10 干 12 支的作用：子类（生、克、合、冲……）与方向（+ 同向助力，- 反向做功）。
/// 行内按查询目标编码检索，缺项即 `LookupGap`。
pub const DIZHI_RELATIONS: [&[(u8, Relation)]; 12] = [
    // 子
    &[
        e('甲', Sheng, Minus), e('乙', Sheng, Minus), e('丙', Ke, Minus), e('丁', Ke, Minus),
        e('戊', He, Minus), e('己', BeiKe, Minus), e('庚', BeiSheng, Plus), e('辛', BeiSheng, Plus),
        e('壬', Jie, Plus), e('癸', Bi, Plus),
        e('子', FuYin, Plus), e('丑', LiuHe, Plus), e('寅', Sheng, Minus), e('卯', Xing, Minus),
        e('辰', SanHui, Plus), e('巳', Ke, Minus), e('午', Chong, Minus), e('未', Hai, Minus),
        e('申', SanHe, Plus), e('酉', Po, Plus), e('戌', BeiKe, Minus), e('亥', SanHui, Plus),
    ],
    // 丑
    &[
        e('甲', BeiKe, Minus), e('乙', BeiKe, Minus), e('丙', Ke, Minus), e('丁', Hai, Minus),
        e('戊', Jie, Minus), e('己', Hai, Minus), e('庚', Sheng, Plus), e('辛', Sheng, Plus),
        e('壬', Ke, Plus), e('癸', Ke, Plus),
        e('子', LiuHe, Plus), e('丑', FuYin, Plus), e('寅', BeiKe, Minus), e('卯', BeiKe, Minus),
        e('辰', Wu, Plus), e('巳', SanHe, Minus), e('午', Hai, Minus), e('未', Chong, Minus),
        e('申', Sheng, Plus), e('酉', SanHe, Plus), e('戌', SanXing, Minus), e('亥', SanHui, Minus),
    ],
    // 寅
    &[
        e('丙', Hai, Plus), e('丁', Sheng, Plus), e('戊', Hai, Plus), e('己', Ke, Plus),
        e('庚', BeiKe, Minus), e('辛', BeiKe, Minus), e('壬', BeiSheng, Plus), e('癸', BeiSheng, Plus),
        e('甲', Bi, Plus), e('乙', Jie, Plus),
        e('子', Sheng, Plus), e('丑', Ke, Minus), e('寅', FuYin, Plus), e('卯', SanHui, Plus),
        e('辰', SanHui, Plus), e('巳', Hai, Plus), e('午', SanHe, Plus), e('未', Ke, Plus),
        e('申', Chong, Minus), e('酉', BeiKe, Minus), e('戌', SanHe, Plus), e('亥', He, Minus),
    ],
    // 卯
    &[
        e('丙', Sheng, Neutral), e('丁', Sheng, Plus), e('戊', Ke, Plus), e('己', Ke, Plus),
        e('庚', BeiKe, Minus), e('辛', BeiKe, Minus), e('壬', BeiSheng, Minus), e('癸', BeiSheng, Plus),
        e('甲', Jie, Plus), e('乙', Bi, Plus),
        e('子', Xing, Minus), e('丑', Ke, Minus), e('寅', SanHui, Plus), e('卯', FuYin, Plus),
        e('辰', Hai, Minus), e('巳', Xie, Plus), e('午', Po, Plus), e('未', SanHe, Plus),
        e('申', Ke, Minus), e('酉', Chong, Minus), e('戌', LiuHe, Plus), e('亥', SanHe, Minus),
    ],
    // 辰
    &[
        e('戊', BeiKe, Minus), e('己', BeiKe, Minus), e('庚', BeiSheng, Plus), e('辛', BeiSheng, Plus),
        e('壬', Mu, Plus), e('癸', Mu, Plus), e('甲', Sheng, Minus), e('乙', Sheng, Minus),
        e('丙', Ke, Minus), e('丁', Ke, Minus),
        e('子', SanHe, Plus), e('丑', Po, Plus), e('寅', Hui, Minus), e('卯', Hai, Minus),
        e('辰', FuYin, Plus), e('巳', Ke, Minus), e('午', Ke, Minus), e('未', Ke, Minus),
        e('申', SanHe, Plus), e('酉', He, Plus), e('戌', Chong, Minus), e('亥', Hao, Plus),
    ],
    // 巳
    &[
        e('戊', Sheng, Plus), e('己', Sheng, Plus), e('庚', Ke, Minus), e('辛', Ke, Minus),
        e('壬', BeiKe, Minus), e('癸', BeiKe, Minus), e('甲', BeiSheng, Plus), e('乙', BeiSheng, Plus),
        e('丙', Bi, Plus), e('丁', Jie, Plus),
        e('子', Ke, Minus), e('丑', He, Minus), e('寅', Hai, Plus), e('卯', Sheng, Plus),
        e('辰', Ke, Minus), e('巳', FuYin, Plus), e('午', SanHui, Plus), e('未', Xie, Plus),
        e('申', He, Minus), e('酉', Hao, Minus), e('戌', Xie, Plus), e('亥', Chong, Minus),
    ],
    // 午
    &[
        e('庚', Ke, Minus), e('辛', Ke, Minus), e('壬', BeiKe, Minus), e('癸', BeiKe, Minus),
        e('甲', BeiSheng, Plus), e('乙', BeiSheng, Plus), e('丙', Jie, Plus), e('丁', Bi, Plus),
        e('戊', Sheng, Plus), e('己', Sheng, Plus),
        e('子', Chong, Minus), e('丑', Hai, Minus), e('寅', SanHe, Plus), e('卯', Po, Plus),
        e('辰', Ke, Minus), e('巳', SanHui, Plus), e('午', ZiXing, Plus), e('未', He, Plus),
        e('申', Hao, Minus), e('酉', Hao, Minus), e('戌', SanHe, Plus), e('亥', Ke, Minus),
    ],
    // 未
    &[
        e('庚', Sheng, Minus), e('辛', Sheng, Minus), e('壬', Ke, Minus), e('癸', Ke, Minus),
        e('甲', BeiKe, Plus), e('乙', BeiKe, Plus), e('丙', BeiSheng, Plus), e('丁', BeiSheng, Plus),
        e('戊', Jie, Plus), e('己', Bi, Plus),
        e('子', Hai, Minus), e('丑', Chong, Minus), e('寅', Ke, Plus), e('卯', SanHui, Plus),
        e('辰', Ke, Minus), e('巳', Sheng, Plus), e('午', SanHui, Plus), e('未', FuYin, Plus),
        e('申', Xie, Minus), e('酉', Xie, Minus), e('戌', Po, Plus), e('亥', SanHe, Minus),
    ],
    // 申
    &[
        e('壬', Sheng, Plus), e('癸', Sheng, Plus), e('甲', Ke, Minus), e('乙', Ke, Minus),
        e('丙', BeiKe, Minus), e('丁', BeiKe, Minus), e('戊', BeiSheng, Plus), e('己', BeiSheng, Plus),
        e('庚', Bi, Plus), e('辛', Jie, Plus),
        e('子', SanHe, Plus), e('丑', Sheng, Plus), e('寅', Chong, Minus), e('卯', Hao, Minus),
        e('辰', SanHe, Plus), e('巳', He, Minus), e('午', Ke, Minus), e('未', Sheng, Plus),
        e('申', FuYin, Plus), e('酉', SanHui, Plus), e('戌', SanHui, Plus), e('亥', Hai, Plus),
    ],
    // 酉
    &[
        e('壬', Sheng, Plus), e('癸', Sheng, Plus), e('甲', Ke, Minus), e('乙', Ke, Minus),
        e('丙', BeiKe, Minus), e('丁', BeiKe, Minus), e('戊', BeiSheng, Plus), e('己', BeiSheng, Plus),
        e('庚', Jie, Plus), e('辛', Bi, Plus),
        e('子', Po, Plus), e('丑', SanHe, Plus), e('寅', Hao, Minus), e('卯', Chong, Minus),
        e('辰', He, Plus), e('巳', SanHe, Minus), e('午', Ke, Minus), e('未', Sheng, Plus),
        e('申', SanHui, Plus), e('酉', ZiXing, Plus), e('戌', SanHui, Minus), e('亥', Xie, Plus),
    ],
    // 戌
    &[
        e('壬', Ke, Minus), e('癸', Ke, Minus), e('甲', BeiKe, Plus), e('乙', BeiKe, Plus),
        e('丙', BeiSheng, Plus), e('丁', BeiSheng, Plus), e('戊', Bi, Plus), e('己', Jie, Plus),
        e('庚', Sheng, Minus), e('辛', Sheng, Minus),
        e('子', Hao, Minus), e('丑', SanXing, Minus), e('寅', SanHe, Plus), e('卯', He, Plus),
        e('辰', Chong, Minus), e('巳', Sheng, Plus), e('午', SanHe, Plus), e('未', Po, Plus),
        e('申', SanHui, Minus), e('酉', Hai, Minus), e('戌', FuYin, Plus), e('亥', Hao, Minus),
    ],
    // 亥
    &[
        e('壬', Bi, Plus), e('癸', Jie, Plus), e('甲', Sheng, Minus), e('乙', Sheng, Minus),
        e('丙', Ke, Minus), e('丁', Ke, Minus), e('戊', BeiKe, Minus), e('己', BeiKe, Minus),
        e('庚', Sheng, Plus), e('辛', Sheng, Plus),
        e('子', SanHui, Plus), e('丑', SanHui, Plus), e('寅', He, Minus), e('卯', SanHe, Minus),
        e('辰', Ke, Plus), e('巳', Chong, Minus), e('午', Hao, Minus), e('未', SanHe, Minus),
        e('申', Hai, Plus), e('酉', Sheng, Plus), e('戌', Ke, Minus), e('亥', ZiXing, Plus),
    ],
];

// ==================== 纳音 ====================

/// 六十甲子纳音，每两柱一名
pub const NAYIN_NAMES: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火",
    "涧下水", "城头土", "白蜡金", "杨柳木", "井泉水", "屋上土",
    "霹雳火", "松柏木", "长流水", "沙中金", "山下火", "平地木",
    "壁上土", "金箔金", "覆灯火", "天河水", "大驿土", "钗钏金",
    "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

// ==================== 节气 ====================

/// 支持的节气年份范围
pub const JIEQI_MIN_YEAR: i32 = 1901;
pub const JIEQI_MAX_YEAR: i32 = 2100;

/// 二十四节气名称，冬至为 0，奇数序号为"节"
pub const JIEQI_NAMES: [&str; 24] = [
    "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明",
    "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑", "立秋",
    "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
];

/// 寿星通式 20 世纪 C 值（×10000），按冬至序号排列
pub const JIEQI_C_20TH: [u32; 24] = [
    226000, 61100, 208400, 46295, 194599, 63826, 214155, 55900,
    208880, 63180, 218600, 65000, 222000, 79280, 236500, 83500,
    239500, 84400, 238220, 90980, 242180, 82180, 230800, 79000,
];

/// 寿星通式 21 世纪 C 值（×10000），按冬至序号排列
pub const JIEQI_C_21ST: [u32; 24] = [
    219400, 54055, 201200, 38700, 187300, 56300, 206460, 48100,
    201000, 55200, 210400, 56780, 213700, 71080, 228300, 75000,
    231300, 76460, 230420, 83180, 234380, 74380, 223600, 71800,
];

/// 通式例外修正：(年份, 节气序号, 天数修正)
pub const JIEQI_CORRECTIONS: [(i32, u8, i8); 21] = [
    (1982, 1, 1),
    (2019, 1, -1),
    (2082, 2, 1),
    (2026, 4, -1),
    (2084, 6, 1),
    (1911, 9, 1),
    (2008, 10, 1),
    (1902, 11, 1),
    (1928, 12, 1),
    (1925, 13, 1),
    (2016, 13, 1),
    (1922, 14, 1),
    (2002, 15, 1),
    (1927, 17, 1),
    (1942, 18, 1),
    (2089, 20, 1),
    (2089, 21, 1),
    (1978, 22, 1),
    (1954, 23, 1),
    (1918, 0, -1),
    (2021, 0, -1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_rows_cover_all_targets() {
        for (zhi, row) in DIZHI_RELATIONS.iter().enumerate() {
            assert_eq!(row.len(), 22, "row {} incomplete", zhi);
            for code in 0..22u8 {
                assert_eq!(row.iter().filter(|(c, _)| *c == code).count(), 1, "row {} code {}", zhi, code);
            }
        }
    }

    #[test]
    fn test_zhi_attrs_symmetry() {
        for (i, attrs) in ZHI_ATTRS.iter().enumerate() {
            let zhi = DiZhi(i as u8);
            assert_eq!(ZHI_ATTRS[attrs.chong.0 as usize].chong, zhi);
            assert_eq!(ZHI_ATTRS[attrs.liuhe.0 as usize].liuhe, zhi);
            assert_eq!(ZHI_ATTRS[attrs.hai.0 as usize].hai, zhi);
        }
    }

    #[test]
    fn test_muku_table() {
        let pairs: Vec<(char, char, char, char)> = MUKU_TABLE
            .iter()
            .map(|m| (m.zhi.to_char(), m.bi.to_char(), m.chong.to_char(), m.hai.to_char()))
            .collect();
        assert_eq!(
            pairs,
            vec![('丑', '子', '未', '午'), ('辰', '酉', '戌', '卯'), ('未', '午', '丑', '子'), ('戌', '卯', '辰', '酉')]
        );
        // 冲、害与作用关系表一致
        for m in MUKU_TABLE.iter() {
            let row = DIZHI_RELATIONS[m.zhi.0 as usize];
            let kind = |target: DiZhi| row.iter().find(|(c, _)| *c == 10 + target.0).map(|(_, r)| r.kind);
            assert_eq!(kind(m.chong), Some(Chong));
            assert_eq!(kind(m.hai), Some(Hai));
        }
    }
}
