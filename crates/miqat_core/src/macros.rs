/// Builds a [`PrayerConfig`](crate::PrayerConfig) from setter calls.
///
/// An optional leading method name selects a registered preset.
///
/// ```
/// use miqat_core::{prayer_config, AsrFactor, HighLatitudeRule, MethodId};
///
/// let config = prayer_config!(Isna, high_latitude: HighLatitudeRule::NightMiddle, asr: AsrFactor::Hanafi);
/// assert_eq!(config.method.id, MethodId::Isna);
/// assert_eq!(config.high_latitude, HighLatitudeRule::NightMiddle);
///
/// let default = prayer_config!();
/// assert_eq!(default.method.id, MethodId::Mwl);
/// ```
#[macro_export]
macro_rules! prayer_config {
    ($method:ident $(, $key:ident : $value:expr)* $(,)?) => {
        $crate::astronomy::PrayerConfig::for_method($crate::astronomy::MethodId::$method)
            $(.$key($value))*
    };
    ($($key:ident : $value:expr),* $(,)?) => {
        $crate::astronomy::PrayerConfig::new()
            $(.$key($value))*
    };
}
