use chrono::{Datelike, Duration, NaiveDate, Timelike};
use miqat_core::prelude::*;
use miqat_core::{
    calendar::Language, FormattedTime, HijriContextBuilder, Method, Offset, PrayerConfigBuilder,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reykjavik() -> Location {
    Location::new(64.1466, -21.9426, "Atlantic/Reykjavik").unwrap()
}

fn hm(times: &miqat_core::PrayerTimes, prayer: Prayer) -> (u32, u32) {
    let t = times.get(prayer).unwrap();
    (t.hour(), t.minute())
}

#[test]
fn test_mid_latitude_ordering() {
    let cities = [
        Location::new(47.7580361, -122.1985255, "America/Los_Angeles").unwrap(),
        Location::new(21.4225, 39.8262, "Asia/Riyadh").unwrap(),
        Location::new(-6.2088, 106.8456, "Asia/Jakarta").unwrap(),
        Location::new(-33.8688, 151.2093, "Australia/Sydney").unwrap(),
        Location::new(30.0444, 31.2357, "Africa/Cairo").unwrap(),
    ];
    for loc in &cities {
        for month in 1..=12 {
            let date = ymd(2026, month, 15);
            let times = compute_prayer_times(date, loc, &PrayerConfig::for_method(MethodId::Isna)).unwrap();
            let seq: Vec<_> = [
                Prayer::Fajr,
                Prayer::Sunrise,
                Prayer::Dhuhr,
                Prayer::Asr,
                Prayer::Sunset,
                Prayer::Maghrib,
                Prayer::Isha,
            ]
            .iter()
            .map(|p| times.get(*p).unwrap())
            .collect();
            for w in seq.windows(2) {
                assert!(w[0] <= w[1], "{:?} on {}: {} > {}", loc, date, w[0], w[1]);
            }
            assert!(seq[0] < seq[1] && seq[1] < seq[2] && seq[2] < seq[3] && seq[3] < seq[4]);
            assert!(seq[5] < seq[6]);
        }
    }
}

#[test]
fn test_dhuhr_independent_of_angles() {
    let loc = Location::new(51.5074, -0.1278, "Europe/London").unwrap();
    let date = ymd(2026, 4, 2);
    let reference = compute_prayer_times(date, &loc, &PrayerConfig::new().method(Method::custom(12.0, Offset::Angle(12.0))))
        .unwrap()
        .get(Prayer::Dhuhr);
    for (fajr, isha) in [(15.0, Offset::Angle(15.0)), (19.5, Offset::Minutes(90.0)), (20.0, Offset::Angle(18.0))] {
        let config = PrayerConfig::new().method(Method::custom(fajr, isha));
        let dhuhr = compute_prayer_times(date, &loc, &config).unwrap().get(Prayer::Dhuhr);
        assert_eq!(dhuhr, reference);
    }
}

#[test]
fn test_dhuhr_minutes_shift_only_dhuhr() {
    let loc = Location::new(21.4225, 39.8262, "Asia/Riyadh").unwrap();
    let date = ymd(2026, 4, 2);
    let base = PrayerConfig::new().method(Method::custom(18.0, Offset::Angle(17.0)));
    let plain = compute_prayer_times(date, &loc, &base).unwrap();
    let shifted = compute_prayer_times(date, &loc, &base.method(base.method.with_dhuhr_minutes(3.0))).unwrap();
    assert_eq!(shifted.get(Prayer::Dhuhr).unwrap() - plain.get(Prayer::Dhuhr).unwrap(), Duration::minutes(3));
    assert_eq!(shifted.get(Prayer::Asr), plain.get(Prayer::Asr));
}

#[test]
fn test_equator_night_close_to_twelve_hours() {
    let equator = Location::new(0.0, 0.0, "UTC").unwrap();
    let mut date = ymd(2026, 1, 1);
    while date.year() == 2026 {
        let times = compute_prayer_times(date, &equator, &PrayerConfig::default()).unwrap();
        let day = times.get(Prayer::Sunset).unwrap() - times.get(Prayer::Sunrise).unwrap();
        let night = Duration::hours(24) - day;
        assert!(
            (night - Duration::hours(12)).num_minutes().abs() <= 15,
            "night on {} is {} min",
            date,
            night.num_minutes()
        );
        date += Duration::days(14);
    }
}

#[test]
fn test_reykjavik_solstice_without_adjustment() {
    let config = PrayerConfig::for_method(MethodId::Mwl).high_latitude(HighLatitudeRule::None);
    let times = compute_prayer_times(ymd(2026, 6, 21), &reykjavik(), &config).unwrap();
    assert!(times.get(Prayer::Fajr).is_none());
    assert!(times.get(Prayer::Isha).is_none());
    assert!(times.get(Prayer::Imsak).is_none());
    assert_eq!(hm(&times, Prayer::Sunrise), (2, 55));
    assert_eq!(hm(&times, Prayer::Sunset), (0, 4));
    assert!(!times.high_latitude_adjusted);

    let formatted = times.format(TimeFormat::H24);
    assert_eq!(formatted[&Prayer::Fajr], FormattedTime::Invalid);
    assert_eq!(formatted[&Prayer::Isha].to_string(), miqat_core::astronomy::INVALID_TIME);
    assert_eq!(times.format_one(Prayer::Fajr, TimeFormat::Float), FormattedTime::Invalid);
}

#[test]
fn test_reykjavik_solstice_clamps() {
    let cases = [
        (HighLatitudeRule::NightMiddle, (1, 30), (1, 30)),
        (HighLatitudeRule::OneSeventh, (2, 31), (0, 28)),
        (HighLatitudeRule::AngleBased, (2, 4), (0, 52)),
    ];
    for (rule, fajr, isha) in cases {
        let config = PrayerConfig::for_method(MethodId::Mwl).high_latitude(rule);
        let times = compute_prayer_times(ymd(2026, 6, 21), &reykjavik(), &config).unwrap();
        assert!(times.high_latitude_adjusted, "{:?}", rule);
        assert_eq!(hm(&times, Prayer::Fajr), fajr, "{:?} Fajr", rule);
        assert_eq!(hm(&times, Prayer::Isha), isha, "{:?} Isha", rule);
        assert!(times.get(Prayer::Fajr).unwrap() < times.get(Prayer::Sunrise).unwrap());
        assert!(times.get(Prayer::Isha).unwrap() > times.get(Prayer::Sunset).unwrap());
    }
}

#[test]
fn test_polar_day_never_errors() {
    let tromso = Location::new(69.6492, 18.9553, "Europe/Oslo").unwrap();
    for rule in [
        HighLatitudeRule::None,
        HighLatitudeRule::NightMiddle,
        HighLatitudeRule::OneSeventh,
        HighLatitudeRule::AngleBased,
    ] {
        let config = PrayerConfig::for_method(MethodId::Mwl).high_latitude(rule);
        let times = compute_prayer_times(ymd(2026, 6, 21), &tromso, &config).unwrap();
        assert!(times.get(Prayer::Sunrise).is_none());
        assert!(times.get(Prayer::Dhuhr).is_some());
        let formatted = times.format(TimeFormat::H12);
        assert_eq!(formatted.len(), 11);
        assert!(!formatted[&Prayer::Sunset].is_valid());
    }
}

#[test]
fn test_seventy_north_solstice_rules() {
    let north = Location::new(70.0, 25.0, "Europe/Oslo").unwrap();
    let date = ymd(2026, 6, 21);

    let none = PrayerConfig::for_method(MethodId::Mwl).high_latitude(HighLatitudeRule::None);
    let times = compute_prayer_times(date, &north, &none).unwrap();
    assert_eq!(times.format_one(Prayer::Fajr, TimeFormat::H24), FormattedTime::Invalid);
    assert_eq!(times.format_one(Prayer::Isha, TimeFormat::H24), FormattedTime::Invalid);
    assert!(!times.high_latitude_adjusted);

    for rule in [HighLatitudeRule::NightMiddle, HighLatitudeRule::OneSeventh, HighLatitudeRule::AngleBased] {
        let config = PrayerConfig::for_method(MethodId::Mwl).high_latitude(rule);
        let times = compute_prayer_times(date, &north, &config).unwrap();
        assert!(times.high_latitude_adjusted, "{:?}", rule);
        assert!(times.get(Prayer::Sunrise).is_none());

        // Both collapse onto solar midnight, one on each side of Dhuhr.
        let fajr = times.get(Prayer::Fajr).unwrap();
        let dhuhr = times.get(Prayer::Dhuhr).unwrap();
        let isha = times.get(Prayer::Isha).unwrap();
        assert!(fajr < dhuhr && dhuhr < isha, "{:?}", rule);
        assert!(((isha - fajr) - Duration::hours(24)).num_minutes().abs() <= 1);
        assert!(((dhuhr - fajr) - Duration::hours(12)).num_minutes().abs() <= 1);
        assert_eq!(fajr.date_naive(), date);
        assert!(times.format_one(Prayer::Fajr, TimeFormat::H24).is_valid());
        assert!(times.format_one(Prayer::Isha, TimeFormat::H24).is_valid());
        let imsak = times.get(Prayer::Imsak).unwrap();
        assert!(((fajr - imsak).num_minutes() - 10).abs() <= 1);
    }
}

#[test]
fn test_seventy_north_polar_night_keeps_twilight() {
    let north = Location::new(70.0, 25.0, "Europe/Oslo").unwrap();
    for rule in [HighLatitudeRule::None, HighLatitudeRule::NightMiddle, HighLatitudeRule::AngleBased] {
        let config = PrayerConfig::for_method(MethodId::Mwl).high_latitude(rule);
        let times = compute_prayer_times(ymd(2026, 12, 21), &north, &config).unwrap();
        assert!(times.get(Prayer::Sunrise).is_none());
        let fajr = times.get(Prayer::Fajr).unwrap();
        let isha = times.get(Prayer::Isha).unwrap();
        assert!(fajr < times.get(Prayer::Dhuhr).unwrap() && times.get(Prayer::Dhuhr).unwrap() < isha);
    }
}

#[test]
fn test_format_map_keys() {
    let loc = Location::new(47.7580361, -122.1985255, "America/Los_Angeles").unwrap();
    let times = compute_prayer_times(ymd(2026, 1, 1), &loc, &PrayerConfig::for_method(MethodId::Isna)).unwrap();
    let names: Vec<String> = times.format(TimeFormat::H24).keys().map(|p| p.to_string()).collect();
    assert_eq!(
        names,
        [
            "Imsak", "Fajr", "Sunrise", "Dhuhr", "Asr", "Sunset", "Maghrib", "Isha", "Midnight",
            "Firstthird", "Lastthird"
        ]
    );
    assert_eq!(times.format_one(Prayer::Isha, TimeFormat::H12).to_string(), "6:02 PM");
    assert_eq!(
        times.format_one(Prayer::Fajr, TimeFormat::Iso8601).to_string(),
        "2026-01-01T06:24:00-08:00"
    );
}

#[test]
fn test_invalid_inputs_fail_fast() {
    assert!(matches!(
        Location::new(10.0, 10.0, "Mars/Olympus_Mons"),
        Err(MiqatError::InvalidTimeZone { .. })
    ));
    assert!(matches!(
        PrayerConfigBuilder::new().method_name("NOPE").build(),
        Err(MiqatError::UnknownMethod { .. })
    ));
    assert!(matches!(Method::lookup("isna"), Ok(m) if m.id == MethodId::Isna));

    let bad = Location::new_unchecked(91.0, 0.0, chrono_tz::Tz::UTC);
    assert!(matches!(
        compute_prayer_times(ymd(2026, 1, 1), &bad, &PrayerConfig::default()),
        Err(MiqatError::ValidationError(_))
    ));
    assert!(Location::new(0.0, 181.0, "UTC").is_err());
}

#[test]
fn test_method_registry_is_queryable() {
    assert_eq!(Method::all().len(), 22);
    for method in Method::all() {
        let found = Method::lookup(method.id.as_str()).unwrap();
        assert_eq!(&found, method);
        assert!(method.validate().is_ok());
    }
    let makkah = Method::get(MethodId::Makkah);
    assert_eq!(makkah.isha, Offset::Minutes(90.0));
}

#[test]
fn test_hijri_known_dates() {
    let cases = [
        (ymd(2000, 1, 1), (1420, 9, 24)),
        (ymd(2024, 3, 11), (1445, 9, 1)),
        (ymd(2024, 4, 10), (1445, 10, 1)),
        (ymd(2026, 1, 1), (1447, 7, 12)),
        (ymd(622, 7, 16), (1, 1, 1)),
    ];
    for (date, (y, m, d)) in cases {
        let h = to_hijri(date, 0, Language::English).unwrap();
        assert_eq!((h.year, h.month, h.day), (y, m, d), "{}", date);
    }
    assert_eq!(ymd(2024, 3, 11).hijri(0).unwrap().formatted(), "1 Ramadhan 1445");
}

#[test]
fn test_hijri_offset_matches_next_day_across_month_boundaries() {
    // 29 Dhu al-Hijjah 1444 / 1 Muharram 1445, 29 Sha'ban / 1 Ramadhan 1445
    for date in [ymd(2023, 7, 18), ymd(2023, 7, 19), ymd(2024, 3, 10), ymd(2024, 3, 11)] {
        let shifted = to_hijri(date, 1, Language::English).unwrap();
        let next = to_hijri(date + Duration::days(1), 0, Language::English).unwrap();
        assert_eq!(shifted, next, "{}", date);
    }
    assert_eq!(ymd(2023, 7, 18).hijri(0).unwrap().month, 12);
    assert_eq!(ymd(2023, 7, 19).hijri(0).unwrap().month, 1);
}

#[test]
fn test_hijri_strict_offset_bounds() {
    assert!(HijriContextBuilder::new().offset(3).strict(true).build().is_err());
    let ctx = HijriContextBuilder::new().offset(-1).language(Language::Arabic).build().unwrap();
    let h = ctx.convert(ymd(2024, 3, 12)).unwrap();
    assert_eq!((h.month, h.day), (9, 1));
    assert!(to_hijri(ymd(2024, 1, 1), 31, Language::English).is_err());
}
