/// One of the five obligatory daily prayers, the only targets of
/// countdowns and alarms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalPrayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl CanonicalPrayer {
    /// Fixed scan order used by the resolver and the alarm matcher.
    pub const ALL: [CanonicalPrayer; 5] = [
        CanonicalPrayer::Fajr,
        CanonicalPrayer::Dhuhr,
        CanonicalPrayer::Asr,
        CanonicalPrayer::Maghrib,
        CanonicalPrayer::Isha,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CanonicalPrayer::Fajr => "Fajr",
            CanonicalPrayer::Dhuhr => "Dhuhr",
            CanonicalPrayer::Asr => "Asr",
            CanonicalPrayer::Maghrib => "Maghrib",
            CanonicalPrayer::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for CanonicalPrayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Every event in a computed day, including Sunrise which is shown as a
/// reference point but never alarmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrayerEvent {
    Prayer(CanonicalPrayer),
    Sunrise,
}

impl PrayerEvent {
    pub const ALL: [PrayerEvent; 6] = [
        PrayerEvent::Prayer(CanonicalPrayer::Fajr),
        PrayerEvent::Sunrise,
        PrayerEvent::Prayer(CanonicalPrayer::Dhuhr),
        PrayerEvent::Prayer(CanonicalPrayer::Asr),
        PrayerEvent::Prayer(CanonicalPrayer::Maghrib),
        PrayerEvent::Prayer(CanonicalPrayer::Isha),
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerEvent::Prayer(p) => p.display_name(),
            PrayerEvent::Sunrise => "Sunrise",
        }
    }
}
