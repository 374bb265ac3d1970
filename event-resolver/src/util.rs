//! Identifier and clock capabilities available to resolvers.
//!
//! Resolvers never reach for a global clock or random source directly: they are handed a [`Util`]
//! so that tests can substitute deterministic implementations.

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Generates opaque, unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Provides the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Random (v4) UUIDs rendered in their hyphenated form.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Number of fractional second digits in generated timestamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPrecision {
    /// `2024-05-01T12:30:00Z`
    Seconds,
    /// `2024-05-01T12:30:00.123Z`
    #[default]
    Millis,
    /// `2024-05-01T12:30:00.123456Z`
    Micros,
    /// `2024-05-01T12:30:00.123456789Z`
    Nanos,
}

impl From<TimestampPrecision> for SecondsFormat {
    fn from(precision: TimestampPrecision) -> Self {
        match precision {
            TimestampPrecision::Seconds => SecondsFormat::Secs,
            TimestampPrecision::Millis => SecondsFormat::Millis,
            TimestampPrecision::Micros => SecondsFormat::Micros,
            TimestampPrecision::Nanos => SecondsFormat::Nanos,
        }
    }
}

/// The capabilities handed to a resolver.
#[derive(Clone)]
pub struct Util {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    precision: TimestampPrecision,
}

#[buildstructor::buildstructor]
impl Util {
    /// Returns a builder for [`Util`].
    ///
    /// Every component is optional: identifiers default to [`UuidGenerator`], the clock to
    /// [`SystemClock`] and timestamps to millisecond precision.
    #[builder(visibility = "pub")]
    fn new(
        ids: Option<Arc<dyn IdGenerator>>,
        clock: Option<Arc<dyn Clock>>,
        precision: Option<TimestampPrecision>,
    ) -> Self {
        Self {
            ids: ids.unwrap_or_else(|| Arc::new(UuidGenerator)),
            clock: clock.unwrap_or_else(|| Arc::new(SystemClock)),
            precision: precision.unwrap_or_default(),
        }
    }

    /// A fresh unique identifier.
    pub fn auto_id(&self) -> String {
        self.ids.generate()
    }

    /// The current time as an RFC 3339 string in UTC, with a `Z` designator.
    pub fn now_iso8601(&self) -> String {
        self.clock
            .now()
            .to_rfc3339_opts(self.precision.into(), true)
    }
}

impl Default for Util {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Util {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Util")
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use chrono::TimeZone;

    use super::*;

    /// Hands out `event-1`, `event-2`, ...
    #[derive(Default)]
    pub(crate) struct SequentialIds(AtomicUsize);

    impl IdGenerator for SequentialIds {
        fn generate(&self) -> String {
            format!("event-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

    impl FixedClock {
        pub(crate) fn at(
            year: i32,
            month: u32,
            day: u32,
            hour: u32,
            min: u32,
            sec: u32,
        ) -> Self {
            Self(Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap())
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    pub(crate) fn fixed_util() -> Util {
        Util::builder()
            .ids(Arc::new(SequentialIds::default()) as Arc<dyn IdGenerator>)
            .clock(Arc::new(FixedClock::at(2024, 5, 1, 12, 30, 0)) as Arc<dyn Clock>)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Duration;

    use super::test_support::*;
    use super::*;

    #[test]
    fn uuid_ids_do_not_repeat() {
        let util = Util::default();
        let ids: HashSet<String> = (0..10_000).map(|_| util.auto_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn uuid_ids_are_hyphenated_v4() {
        let id = Util::default().auto_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id, parsed.hyphenated().to_string());
    }

    #[test]
    fn timestamps_are_utc_with_designator() {
        let now = Util::default().now_iso8601();
        assert!(now.ends_with('Z'), "{now}");
        let parsed = DateTime::parse_from_rfc3339(&now).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn system_timestamps_do_not_decrease() {
        let util = Util::default();
        let mut previous = DateTime::parse_from_rfc3339(&util.now_iso8601()).unwrap();
        for _ in 0..1_000 {
            let next = DateTime::parse_from_rfc3339(&util.now_iso8601()).unwrap();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[rstest::rstest]
    #[case(TimestampPrecision::Seconds, "2024-05-01T12:30:00Z")]
    #[case(TimestampPrecision::Millis, "2024-05-01T12:30:00.250Z")]
    #[case(TimestampPrecision::Micros, "2024-05-01T12:30:00.250000Z")]
    #[case(TimestampPrecision::Nanos, "2024-05-01T12:30:00.250000000Z")]
    fn formats_with_precision(#[case] precision: TimestampPrecision, #[case] expected: &str) {
        let instant = FixedClock::at(2024, 5, 1, 12, 30, 0).0 + Duration::milliseconds(250);
        let util = Util::builder()
            .clock(Arc::new(FixedClock(instant)) as Arc<dyn Clock>)
            .precision(precision)
            .build();
        assert_eq!(util.now_iso8601(), expected);
    }

    #[test]
    fn substituted_generators_are_used() {
        let util = fixed_util();
        assert_eq!(util.auto_id(), "event-1");
        assert_eq!(util.auto_id(), "event-2");
        assert_eq!(util.now_iso8601(), "2024-05-01T12:30:00.000Z");
    }
}
