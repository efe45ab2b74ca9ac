//! Reference city validation, within one minute.

use chrono::{NaiveDate, Timelike};
use miqat_core::{
    compute_prayer_times, HighLatitudeRule, Location, MethodId, Prayer, PrayerConfig, PrayerTimes,
    TimeFormat,
};

fn redmond() -> Location {
    Location::new(47.7580361, -122.1985255, "America/Los_Angeles").unwrap()
}

fn minutes(times: &PrayerTimes, prayer: Prayer) -> i64 {
    let t = times.get(prayer).unwrap_or_else(|| panic!("{} missing", prayer));
    t.hour() as i64 * 60 + t.minute() as i64
}

fn assert_near(times: &PrayerTimes, prayer: Prayer, expected: &str) {
    let (h, m) = expected.split_once(':').unwrap();
    let want = h.parse::<i64>().unwrap() * 60 + m.parse::<i64>().unwrap();
    let got = minutes(times, prayer);
    // Compare on the clock face so 23:59 and 00:00 are one minute apart.
    let diff = (got - want).rem_euclid(1440).min((want - got).rem_euclid(1440));
    assert!(
        diff <= 1,
        "{} on {}: expected {}, got {}",
        prayer,
        times.date,
        expected,
        times.format_one(prayer, TimeFormat::H24)
    );
}

#[test]
fn test_redmond_winter_isna() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let config = PrayerConfig::for_method(MethodId::Isna).high_latitude(HighLatitudeRule::AngleBased);
    let times = compute_prayer_times(date, &redmond(), &config).unwrap();

    assert_near(&times, Prayer::Fajr, "06:24");
    assert_near(&times, Prayer::Sunrise, "07:58");
    assert_near(&times, Prayer::Dhuhr, "12:13");
    assert_near(&times, Prayer::Asr, "14:10");
    assert_near(&times, Prayer::Maghrib, "16:29");
    assert_near(&times, Prayer::Isha, "18:02");
}

#[test]
fn test_redmond_winter_derived_times() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let config = PrayerConfig::for_method(MethodId::Isna);
    let times = compute_prayer_times(date, &redmond(), &config).unwrap();

    assert_near(&times, Prayer::Imsak, "06:14");
    assert_near(&times, Prayer::Sunset, "16:28");
    assert_near(&times, Prayer::Midnight, "00:13");
    assert_near(&times, Prayer::FirstThird, "21:38");
    assert_near(&times, Prayer::LastThird, "02:48");
    assert!(!times.high_latitude_adjusted);
}

#[test]
fn test_redmond_summer_night_middle() {
    let date = NaiveDate::from_ymd_opt(2026, 6, 25).unwrap();
    let config = PrayerConfig::for_method(MethodId::Isna).high_latitude(HighLatitudeRule::NightMiddle);
    let times = compute_prayer_times(date, &redmond(), &config).unwrap();

    assert_near(&times, Prayer::Fajr, "02:57");
    assert_near(&times, Prayer::Sunrise, "05:12");
    assert_near(&times, Prayer::Dhuhr, "13:12");
    assert_near(&times, Prayer::Asr, "17:26");
    assert_near(&times, Prayer::Maghrib, "21:12");
    assert_near(&times, Prayer::Isha, "23:26");
}

#[test]
fn test_makkah_isha_interval() {
    let makkah = Location::new(21.4225, 39.8262, "Asia/Riyadh").unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let times = compute_prayer_times(date, &makkah, &PrayerConfig::for_method(MethodId::Makkah)).unwrap();

    let maghrib = times.get(Prayer::Maghrib).unwrap();
    let isha = times.get(Prayer::Isha).unwrap();
    let sunset = times.get(Prayer::Sunset).unwrap();
    assert_eq!((isha - maghrib).num_minutes(), 90);
    assert_eq!((maghrib - sunset).num_minutes(), 1);
}

#[test]
fn test_tehran_jafari_midnight_precedes_standard() {
    let tehran = Location::new(35.6892, 51.3890, "Asia/Tehran").unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 21).unwrap();
    let jafari = compute_prayer_times(date, &tehran, &PrayerConfig::for_method(MethodId::Tehran)).unwrap();
    let standard = compute_prayer_times(
        date,
        &tehran,
        &PrayerConfig::for_method(MethodId::Tehran).midnight(miqat_core::MidnightMode::Standard),
    )
    .unwrap();

    assert_near(&jafari, Prayer::Midnight, "23:29");
    assert_near(&standard, Prayer::Midnight, "00:12");
    let gap = standard.get(Prayer::Midnight).unwrap() - jafari.get(Prayer::Midnight).unwrap();
    assert!((30..=55).contains(&gap.num_minutes()), "gap {} min", gap.num_minutes());
}
