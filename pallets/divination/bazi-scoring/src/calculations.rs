//! # 历法计算
//!
//! - 公历日期与儒略日互转
//! - 二十四节气（寿星通式，1901-2100 年，整数运算）
//! - 四柱排盘：年柱以立春为界，月柱以"节"为界（五虎遁），日柱取儒略日，时柱用五鼠遁
//!
//! 节气序号以冬至为 0，奇数序号为"节"（小寒、立春、惊蛰……大雪），偶数为"气"。

use crate::constants::{
    JIEQI_CORRECTIONS, JIEQI_C_20TH, JIEQI_C_21ST, JIEQI_MAX_YEAR, JIEQI_MIN_YEAR,
};
use crate::error::Error;
use crate::types::{BirthTime, DiZhi, GanZhi, SiZhu, TianGan, ZiShiMode};

// ==================== 公历 ====================

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_valid_date(year: i32, month: u8, day: u8) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

/// 公历日期转儒略日数（正午）
pub fn gregorian_to_jdn(year: i32, month: u8, day: u8) -> i32 {
    let (month, day) = (month as i32, day as i32);
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

/// 儒略日数转公历日期
pub fn jdn_to_gregorian(jdn: i32) -> (i32, u8, u8) {
    let a = jdn + 32044;
    let b = (4 * a + 3) / 146097;
    let c = a - 146097 * b / 4;
    let d = (4 * c + 3) / 1461;
    let e = c - 1461 * d / 4;
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = 100 * b + d - 4800 + m / 10;
    (year, month as u8, day as u8)
}

/// 日期偏移若干天（负数为向前）
pub fn adjust_date(year: i32, month: u8, day: u8, offset: i32) -> (i32, u8, u8) {
    jdn_to_gregorian(gregorian_to_jdn(year, month, day) + offset)
}

// ==================== 节气 ====================

/// 节气所在公历月份（冬至在 12 月）
pub fn jieqi_month(index: u8) -> u8 {
    if index == 0 {
        12
    } else {
        (index + 1) / 2
    }
}

/// 公历某月的"节"序号：1 月小寒(1)、2 月立春(3) …… 12 月大雪(23)
pub fn jie_of_month(month: u8) -> u8 {
    month * 2 - 1
}

/// 某年第 `index` 个节气的公历日
///
/// 超出 1901-2100 年或序号无效时返回 None。
pub fn jieqi_day(year: i32, index: u8) -> Option<u8> {
    if !(JIEQI_MIN_YEAR..=JIEQI_MAX_YEAR).contains(&year) || index >= 24 {
        return None;
    }
    let (y, c) = if year <= 2000 {
        (year - 1900, JIEQI_C_20TH[index as usize] as i32)
    } else {
        (year - 2000, JIEQI_C_21ST[index as usize] as i32)
    };
    // 小寒、大寒、立春、雨水用上一年的闰年数
    let leap = if (1..=4).contains(&index) { (y - 1) / 4 } else { y / 4 };
    let mut day = (y * 2422 + c) / 10000 - leap;
    if let Some((_, _, fix)) = JIEQI_CORRECTIONS.iter().find(|(yr, idx, _)| *yr == year && *idx == index) {
        day += *fix as i32;
    }
    Some(day as u8)
}

/// 该日是否交"节"
pub fn is_jie_day(year: i32, month: u8, day: u8) -> Option<bool> {
    if !(1..=12).contains(&month) {
        return None;
    }
    jieqi_day(year, jie_of_month(month)).map(|jie| jie == day)
}

// ==================== 四柱 ====================

/// 年柱：立春前属上一年
pub fn calculate_year_ganzhi(year: i32, month: u8, day: u8) -> Option<GanZhi> {
    let lichun = jieqi_day(year, 3)?;
    let ganzhi_year = if month < 2 || (month == 2 && day < lichun) { year - 1 } else { year };
    Some(GanZhi::from_year(ganzhi_year))
}

/// 五虎遁：由年干和月支求月柱
pub fn month_ganzhi_of(year_gan: TianGan, month_zhi: DiZhi) -> GanZhi {
    let yin_month_gan = TianGan((year_gan.0 % 5 * 2 + 2) % 10);
    let offset = (month_zhi.0 as i32 - 2).rem_euclid(12);
    GanZhi::new(yin_month_gan.offset(offset), month_zhi)
}

/// 月柱：交节换月
///
/// `year_gan` 必须是以立春为界的年干。
pub fn calculate_month_ganzhi(year: i32, month: u8, day: u8, year_gan: TianGan) -> Option<GanZhi> {
    if !is_valid_date(year, month, day) {
        return None;
    }
    let jie = jieqi_day(year, jie_of_month(month))?;
    let zhi = if day >= jie { DiZhi(month % 12) } else { DiZhi((month - 1) % 12) };
    Some(month_ganzhi_of(year_gan, zhi))
}

/// 日柱：2000-01-01 为戊午日
pub fn calculate_day_ganzhi(year: i32, month: u8, day: u8) -> Option<GanZhi> {
    if !is_valid_date(year, month, day) {
        return None;
    }
    let index = (gregorian_to_jdn(year, month, day) + 49).rem_euclid(60);
    GanZhi::from_index(index as u8)
}

/// 时柱（五鼠遁）
///
/// 返回 (时柱, 是否换日)。传统派 23 点起换日，换日时时干按次日日干重算。
pub fn calculate_hour_ganzhi(hour: u8, day_gan: TianGan, mode: ZiShiMode) -> Option<(GanZhi, bool)> {
    if hour > 23 {
        return None;
    }
    let zhi = DiZhi(((hour as u16 + 1) / 2 % 12) as u8);
    let is_next_day = hour == 23 && mode == ZiShiMode::Traditional;
    let zi_hour_gan = TianGan(day_gan.0 % 5 * 2);
    Some((GanZhi::new(zi_hour_gan.offset(zhi.0 as i32), zhi), is_next_day))
}

/// 校验出生时间
pub fn validate_birth_time(birth: &BirthTime) -> Result<(), Error> {
    let year = birth.year as i32;
    if !(JIEQI_MIN_YEAR..=JIEQI_MAX_YEAR).contains(&year)
        || !is_valid_date(year, birth.month, birth.day)
        || birth.hour > 23
        || birth.minute > 59
    {
        return Err(Error::InvalidBirthTime);
    }
    Ok(())
}

/// 由出生时间排四柱
pub fn calculate_sizhu(birth: &BirthTime, mode: ZiShiMode) -> Result<SiZhu, Error> {
    validate_birth_time(birth)?;
    let (year, month, day) = (birth.year as i32, birth.month, birth.day);

    let year_zhu = calculate_year_ganzhi(year, month, day).ok_or(Error::InvalidBirthTime)?;
    let month_zhu =
        calculate_month_ganzhi(year, month, day, year_zhu.gan).ok_or(Error::InvalidBirthTime)?;
    let day_zhu = calculate_day_ganzhi(year, month, day).ok_or(Error::InvalidBirthTime)?;
    let (hour_zhu, is_next_day) =
        calculate_hour_ganzhi(birth.hour, day_zhu.gan, mode).ok_or(Error::InvalidBirthTime)?;

    let (day_zhu, hour_zhu) = if is_next_day {
        let next_day = day_zhu.next();
        let (hour_zhu, _) =
            calculate_hour_ganzhi(birth.hour, next_day.gan, mode).ok_or(Error::InvalidBirthTime)?;
        (next_day, hour_zhu)
    } else {
        (day_zhu, hour_zhu)
    };

    log::debug!(
        target: crate::LOG_TARGET,
        "📅 排盘 {}-{}-{} {}时: {} {} {} {}",
        year, month, day, birth.hour, year_zhu, month_zhu, day_zhu, hour_zhu
    );

    Ok(SiZhu::new(year_zhu, month_zhu, day_zhu, hour_zhu))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jdn_round_trip() {
        assert_eq!(gregorian_to_jdn(2000, 1, 1), 2451545);
        assert_eq!(jdn_to_gregorian(2451545), (2000, 1, 1));
        assert_eq!(adjust_date(2024, 2, 28, 1), (2024, 2, 29));
        assert_eq!(adjust_date(2023, 2, 28, 1), (2023, 3, 1));
        assert_eq!(adjust_date(2024, 1, 1, -1), (2023, 12, 31));
    }

    #[test]
    fn test_known_jieqi_days() {
        assert_eq!(jieqi_day(2024, 3), Some(4)); // 2024 立春 2月4日
        assert_eq!(jieqi_day(2024, 0), Some(21)); // 2024 冬至 12月21日
        assert_eq!(jieqi_day(1990, 3), Some(4)); // 1990 立春 2月4日
        assert_eq!(jieqi_day(1990, 5), Some(6)); // 1990 惊蛰 3月6日
        assert_eq!(jieqi_day(2000, 3), Some(4)); // 2000 立春 2月4日
        assert_eq!(jieqi_day(2019, 1), Some(5)); // 2019 小寒 1月5日（修正）
        assert_eq!(jieqi_day(2026, 4), Some(18)); // 2026 雨水 2月18日（修正）
        assert_eq!(jieqi_day(1900, 3), None);
        assert_eq!(jieqi_day(2101, 3), None);
    }

    #[test]
    fn test_jie_months() {
        for month in 1..=12u8 {
            let index = jie_of_month(month);
            assert_eq!(index % 2, 1);
            assert_eq!(jieqi_month(index), month);
        }
        assert_eq!(jieqi_month(0), 12);
        assert_eq!(is_jie_day(2024, 2, 4), Some(true));
        assert_eq!(is_jie_day(2024, 2, 5), Some(false));
    }

    #[test]
    fn test_day_ganzhi() {
        // 2000-01-01 戊午日
        let gz = calculate_day_ganzhi(2000, 1, 1).unwrap();
        assert_eq!((gz.gan, gz.zhi), (TianGan(4), DiZhi(6)));
        assert!(calculate_day_ganzhi(2023, 2, 29).is_none());
    }

    #[test]
    fn test_year_and_month_boundary() {
        // 2024-01-10：立春前属癸卯年，小寒后为乙丑月
        let year = calculate_year_ganzhi(2024, 1, 10).unwrap();
        assert_eq!(year.to_string(), "癸卯");
        let month = calculate_month_ganzhi(2024, 1, 10, year.gan).unwrap();
        assert_eq!(month.to_string(), "乙丑");
        // 2024-02-04 立春当日换年，甲辰年丙寅月
        let year = calculate_year_ganzhi(2024, 2, 4).unwrap();
        assert_eq!(year.to_string(), "甲辰");
        assert_eq!(calculate_month_ganzhi(2024, 2, 4, year.gan).unwrap().to_string(), "丙寅");
    }

    #[test]
    fn test_hour_ganzhi_zishi() {
        // 甲日子时为甲子
        let (gz, next) = calculate_hour_ganzhi(0, TianGan(0), ZiShiMode::Modern).unwrap();
        assert_eq!(gz.to_string(), "甲子");
        assert!(!next);
        let (_, next) = calculate_hour_ganzhi(23, TianGan(0), ZiShiMode::Traditional).unwrap();
        assert!(next);
        // 甲日午时为庚午
        let (gz, _) = calculate_hour_ganzhi(12, TianGan(0), ZiShiMode::Modern).unwrap();
        assert_eq!(gz.to_string(), "庚午");
    }

    #[test]
    fn test_calculate_sizhu() {
        let birth = BirthTime::new(2000, 1, 1, 12, 0);
        let sizhu = calculate_sizhu(&birth, ZiShiMode::Modern).unwrap();
        // 2000-01-01 午时：己卯年 丙子月 戊午日 戊午时
        assert_eq!(sizhu.to_string(), "己卯 丙子 戊午 戊午");

        let late = BirthTime::new(2000, 1, 1, 23, 30);
        let traditional = calculate_sizhu(&late, ZiShiMode::Traditional).unwrap();
        assert_eq!(traditional.day_zhu.to_string(), "己未");
        let modern = calculate_sizhu(&late, ZiShiMode::Modern).unwrap();
        assert_eq!(modern.day_zhu.to_string(), "戊午");

        assert_eq!(
            calculate_sizhu(&BirthTime::new(1899, 5, 1, 0, 0), ZiShiMode::Modern),
            Err(Error::InvalidBirthTime)
        );
    }
}
