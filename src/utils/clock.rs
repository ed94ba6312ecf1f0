use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

/// Represents an entity responsible for providing the current moment across application. This
/// allows tests and the `--at` / `--date` flags to pin the time.
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }

    fn now(&self) -> NaiveTime {
        self.time().time()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that always answers with the same moment. Parts that aren't pinned follow the system
/// clock at construction time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    moment: DateTime<Local>,
}

impl FixedClock {
    pub fn pinned(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Self {
        let now = Local::now();
        let naive = date
            .unwrap_or(now.date_naive())
            .and_time(time.unwrap_or(now.time()));
        // Ambiguous or skipped local times (DST changes) fall back to the real clock.
        let moment = Local.from_local_datetime(&naive).earliest().unwrap_or(now);
        Self { moment }
    }
}

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Local> {
        self.moment
    }
}

/// Picks [FixedClock] when anything is pinned, otherwise the system clock.
pub fn clock_for(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Box<dyn Clock> {
    if date.is_none() && time.is_none() {
        Box::new(DefaultClock)
    } else {
        Box::new(FixedClock::pinned(date, time))
    }
}
