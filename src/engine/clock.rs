use chrono::{Local, NaiveDateTime};

/// Wall clock in local time. Injected so the periodic tasks can be driven
/// by a fake clock in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::cell::Cell;

    pub struct FakeClock {
        now: Cell<NaiveDateTime>,
    }

    impl FakeClock {
        pub fn at(date: (i32, u32, u32), time: (u32, u32, u32)) -> Self {
            let now = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .and_then(|d| d.and_hms_opt(time.0, time.1, time.2))
                .unwrap();
            Self {
                now: Cell::new(now),
            }
        }

        pub fn set_time(&self, h: u32, m: u32, s: u32) {
            let now = self.now.get().date().and_hms_opt(h, m, s).unwrap();
            self.now.set(now);
        }

        pub fn advance(&self, secs: i64) {
            self.now.set(self.now.get() + Duration::seconds(secs));
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> NaiveDateTime {
            self.now.get()
        }
    }
}
