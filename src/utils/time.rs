// src/utils/time.rs - Cross-platform time utilities and the welcome greeting

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc};

/// Cross-platform time utilities that work on both native and WASM
pub struct Time;

impl Time {
    /// Get current UTC time - works on both native and WASM
    pub fn now() -> DateTime<Utc> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Utc::now()
        }

        #[cfg(target_arch = "wasm32")]
        {
            let millis = js_sys::Date::now() as i64;
            DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
        }
    }

    /// Get current local wall-clock time with its UTC offset
    pub fn local_now() -> DateTime<FixedOffset> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            chrono::Local::now().fixed_offset()
        }

        // No timezone database on wasm32; the browser reports the offset.
        #[cfg(target_arch = "wasm32")]
        {
            use chrono::Offset;

            let offset_minutes = -(js_sys::Date::new_0().get_timezone_offset() as i32);
            let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or(Utc.fix());
            Self::now().with_timezone(&offset)
        }
    }
}

/// Wall-clock source used for time-of-day decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Hour of day in `0..24`
    fn hour(&self) -> u32 {
        self.now().hour()
    }

    fn year(&self) -> i32 {
        self.now().year()
    }
}

/// Clock backed by the system (or browser) time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Time::local_now()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }

    /// Clock frozen at `hour:00` UTC on a fixed date; `None` for hours outside `0..24`
    pub fn at_hour(hour: u32) -> Option<Self> {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)?.and_hms_opt(hour, 0, 0)?;
        let offset = FixedOffset::east_opt(0)?;
        naive.and_local_timezone(offset).single().map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Time-of-day greeting shown in the welcome toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Morning before noon, afternoon until 18:00, evening after.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::from_hour(clock.hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "Good Morning",
            Self::Afternoon => "Good Afternoon",
            Self::Evening => "Good Evening",
        }
    }

    /// Full toast text, e.g. "Good Morning, Welcome to the Hopewell Hospital!"
    pub fn welcome_message(&self, hospital_name: &str) -> String {
        format!("{}, Welcome to the {}!", self.as_str(), hospital_name)
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
