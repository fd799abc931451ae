pub mod prayer;
pub mod times;

pub use prayer::{CanonicalPrayer, PrayerEvent};
pub use times::{ClockTime, Coordinate, PrayerTimeSet, MINUTES_PER_DAY};
