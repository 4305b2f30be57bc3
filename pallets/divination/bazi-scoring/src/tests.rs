//! # 引擎整体测试
//!
//! 覆盖排盘、做功分类、完整流水线与墓库叠加的端到端场景。

use crate::relations::{gan_relation, zhi_relation};
use crate::shishen::resolve_zhi;
use crate::zuogong::{classify, PolarityCount};
use crate::*;
use codec::{Decode, Encode};

fn chart(s: &str) -> SiZhu {
    SiZhu::from_symbols(s).unwrap()
}

fn vault_chart_luck() -> (SiZhu, DaYunList) {
    let sizhu = chart("庚辰 乙酉 戊午 甲寅");
    let luck = Engine::generate_luck_cycle(&sizhu, Gender::Female, &BirthTime::new(2000, 9, 15, 10, 0)).unwrap();
    (sizhu, luck)
}

// ========================================
// 排盘
// ========================================

#[test]
fn test_build_chart() {
    let sizhu = Engine::build_chart(&['庚', '乙', '戊', '甲'], &['辰', '酉', '午', '寅']).unwrap();
    assert_eq!(sizhu.to_string(), "庚辰 乙酉 戊午 甲寅");
    assert_eq!(sizhu, chart("庚辰 乙酉 戊午 甲寅"));
    assert_eq!(chart(&sizhu.to_string()), sizhu);

    assert_eq!(
        Engine::build_chart(&['庚', '乙', '戊'], &['辰', '酉', '午', '寅']),
        Err(Error::IncompleteChart)
    );
    assert_eq!(
        Engine::build_chart(&['庚', '乙', '戊', '甲'], &['辰', '酉', '午', '寅', '子']),
        Err(Error::IncompleteChart)
    );
    assert_eq!(
        Engine::build_chart(&['庚', '乙', 'X', '甲'], &['辰', '酉', '午', '寅']),
        Err(Error::InvalidSymbol)
    );
}

#[test]
fn test_chart_from_birth() {
    // 白露后为酉月，日柱丙子，巳时五鼠遁得癸巳
    let sizhu = Engine::chart_from_birth(&BirthTime::new(2000, 9, 15, 10, 0), ZiShiMode::Modern).unwrap();
    assert_eq!(sizhu.to_string(), "庚辰 乙酉 丙子 癸巳");

    assert_eq!(
        Engine::chart_from_birth(&BirthTime::new(2000, 2, 30, 10, 0), ZiShiMode::Modern),
        Err(Error::InvalidBirthTime)
    );
}

// ========================================
// 查表完备性
// ========================================

#[test]
fn test_relation_tables_are_total() {
    for zhi in DiZhi::all() {
        for gan in TianGan::all() {
            assert!(zhi_relation(zhi, gan).is_ok(), "{}→{}", zhi, gan);
        }
        for other in DiZhi::all() {
            assert!(zhi_relation(zhi, other).is_ok(), "{}→{}", zhi, other);
        }
    }
    // 天干之间总有关系，自身为比
    for a in TianGan::all() {
        assert_eq!(gan_relation(a, a).kind, RelationKind::Bi);
    }
}

#[test]
fn test_hidden_stems_resolve_for_every_rizhu() {
    for rizhu in TianGan::all() {
        for zhi in DiZhi::all() {
            let resolved = resolve_zhi(rizhu, zhi).unwrap();
            assert!(!resolved.is_empty() && resolved.len() <= 3);
        }
    }
}

// ========================================
// 做功分类
// ========================================

#[test]
fn test_classification_covers_all_polarity_layouts() {
    // 午为阳、子为阴，枚举四支的 16 种阴阳排布
    for mask in 0u8..16 {
        let zhis: Vec<DiZhi> = (0..4).map(|i| if mask & (1 << i) != 0 { DiZhi(6) } else { DiZhi(0) }).collect();
        let sizhu = SiZhu::from_parts(&[TianGan(0); 4], &zhis).unwrap();
        let analysis = classify(&sizhu).unwrap();

        let yang = mask.count_ones();
        let expected = match yang {
            4 => PolarityCount::AllYang,
            0 => PolarityCount::AllYin,
            3 => PolarityCount::ThreeYang,
            1 => PolarityCount::ThreeYin,
            _ => PolarityCount::TwoTwo,
        };
        assert_eq!(analysis.count, expected, "{}", sizhu);
        assert_eq!(analysis.split.is_some(), yang == 2, "{}", sizhu);
        assert!(!analysis.records.is_empty());

        // 被制地支同为一种阴阳
        let controlled = analysis.records[0].controlled_zhi.iter().map(|(_, z)| z.work_yin_yang()).collect::<Vec<_>>();
        assert!(controlled.windows(2).all(|w| w[0] == w[1]), "{}", sizhu);
        if matches!(yang, 1 | 2 | 3) {
            assert!(!controlled.is_empty(), "{}", sizhu);
        }
    }
}

#[test]
fn test_alternating_chart_day_seat() {
    let sizhu = chart("甲子 甲午 甲子 甲午");
    let analysis = classify(&sizhu).unwrap();
    assert!(analysis.kinds().contains(&ZuoGong::YangZhiYin));
    assert!(analysis.controlled_zhi().contains(&(ZhuPosition::Day, DiZhi(0))));
}

// ========================================
// 完整流水线
// ========================================

#[test]
fn test_analyze_annual_vault_closure() {
    let (sizhu, luck) = vault_chart_luck();
    let report = Engine::analyze(&sizhu, &luck, 2029).unwrap();

    assert_eq!(report.annual, GanZhi::from_symbols("己酉").unwrap());
    assert_eq!(report.months.len(), 12);
    assert_eq!(report.dayun.len(), luck.steps.len());
    assert_eq!(report.patterns(), report.zuogong.kinds());
    assert!(report.reasons[0].starts_with("2029年己酉"));

    // 流年酉合辰库：重要
    let closed = report
        .muku_events
        .iter()
        .find(|e| e.scope == MuKuScope::LiuNian && e.kind == MuKuEventKind::Closed && e.vault == DiZhi(4))
        .unwrap();
    assert_eq!(closed.severity, Severity::Important);
    assert_eq!(closed.label, "2029");
    assert!(closed.categories.contains(&MuKuCategory::CaiKu));
    assert!(closed.description.contains('合'));

    let chen = report.muku_states.iter().find(|s| s.vault == DiZhi(4)).unwrap();
    assert!(chen.statuses.contains(&MuKuEventKind::Closed));

    // 原局事件在前
    assert_eq!(report.muku_events[0].scope, MuKuScope::Natal);
}

#[test]
fn test_analyze_covers_every_decade() {
    let (sizhu, luck) = vault_chart_luck();
    let report = Engine::analyze(&sizhu, &luck, 2029).unwrap();

    // 逆排：甲申、癸未、壬午……，2029 年行壬午运
    let active = luck.active(2029).unwrap();
    let wei = luck.steps.iter().find(|dy| dy.ganzhi == GanZhi::from_symbols("癸未").unwrap()).unwrap();
    assert!(wei.index < active.index);

    // 已过的癸未运：未库见、入，原局午合未闭库
    let events: Vec<&MuKuEvent> = report.muku_events.iter().filter(|e| e.label == "癸未大运").collect();
    assert!(events.iter().all(|e| e.scope == MuKuScope::DaYun && e.vault == DiZhi(7)));
    let kinds: Vec<MuKuEventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![MuKuEventKind::Present, MuKuEventKind::Entered, MuKuEventKind::Closed]);
    assert_eq!(events[2].severity, Severity::Attention);

    // 流年事件在全部大运事件之后
    let first_year = report.muku_events.iter().position(|e| e.scope == MuKuScope::LiuNian).unwrap();
    assert!(report.muku_events[first_year..].iter().all(|e| e.scope == MuKuScope::LiuNian));
    let wei_state = report.muku_states.iter().find(|s| s.vault == DiZhi(7)).unwrap();
    assert!(wei_state.statuses.contains(&MuKuEventKind::Closed));
}

#[test]
fn test_analyze_is_deterministic() {
    let (sizhu, luck) = vault_chart_luck();
    let first = Engine::analyze(&sizhu, &luck, 2029).unwrap();
    let second = Engine::analyze(&sizhu, &luck, 2029).unwrap();
    assert_eq!(first, second);

    // 另一年份的分析不影响已有结果
    let _ = Engine::analyze(&sizhu, &luck, 2031).unwrap();
    assert_eq!(Engine::analyze(&sizhu, &luck, 2029).unwrap(), first);
}

#[test]
fn test_analyze_year_out_of_range() {
    let (sizhu, luck) = vault_chart_luck();
    assert_eq!(Engine::analyze(&sizhu, &luck, 1990), Err(Error::YearOutOfRange));
    assert_eq!(Engine::analyze(&sizhu, &luck, luck.end_year()), Err(Error::YearOutOfRange));
}

#[test]
fn test_outlook() {
    let (sizhu, luck) = vault_chart_luck();
    let [prev, current, next] = Engine::outlook(&sizhu, &luck, 2029).unwrap();
    assert_eq!((prev.year, current.year, next.year), (2028, 2029, 2030));

    let report = Engine::analyze(&sizhu, &luck, 2029).unwrap();
    assert_eq!(current.score, report.score);
    assert_eq!(current.tier, report.tier);
    assert_eq!(current.reasons, report.reasons);
}

// ========================================
// 编解码
// ========================================

#[test]
fn test_report_codec_and_serde() {
    let (sizhu, luck) = vault_chart_luck();
    let report = Engine::analyze(&sizhu, &luck, 2029).unwrap();

    let encoded = report.encode();
    assert_eq!(FortuneReport::decode(&mut &encoded[..]).unwrap(), report);

    let json = serde_json::to_string(&report).unwrap();
    let back: FortuneReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);

    let rebuilt = DaYunList::from_symbols(
        &luck.to_symbols(),
        luck.direction,
        luck.qiyun_days,
        luck.birth_year,
        luck.years_per_step,
    )
    .unwrap();
    assert_eq!(rebuilt, luck);
}
