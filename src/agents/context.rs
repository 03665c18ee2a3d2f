use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock source for the engine and for leaf computations.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Used for reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Where the per-call random source draws from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Entropy {
    #[default]
    Os,
    /// Every call starts from the same seed, so identical inputs give identical outputs.
    Seeded(u64),
}

impl Entropy {
    fn rng(self) -> StdRng {
        match self {
            Entropy::Os => StdRng::from_entropy(),
            Entropy::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Capabilities handed to a leaf computation for one call. The instant is captured once
/// so every timestamp an agent emits within a call agrees.
pub struct AgentContext {
    now: DateTime<Utc>,
    rng: StdRng,
}

impl AgentContext {
    pub fn new(clock: &dyn Clock, entropy: Entropy) -> Self {
        Self {
            now: clock.now(),
            rng: entropy.rng(),
        }
    }

    /// Current instant as an ISO-8601 string.
    pub fn timestamp(&self) -> String {
        iso(self.now)
    }

    pub fn days_ago(&self, days: i64) -> String {
        iso(self.now - Duration::days(days))
    }

    pub fn days_ahead(&self, days: i64) -> String {
        iso(self.now + Duration::days(days))
    }

    /// Random (version 4) UUID drawn from this call's random source.
    pub fn uuid_v4(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Identifier with a domain prefix, e.g. `COI-3fa85f64`.
    pub fn short_id(&mut self, prefix: &str) -> String {
        let uuid = self.uuid_v4().simple().to_string();
        format!("{prefix}-{}", &uuid[..8])
    }
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap())
    }

    #[test]
    fn seeded_contexts_repeat() {
        let clock = fixed();
        let mut a = AgentContext::new(&clock, Entropy::Seeded(7));
        let mut b = AgentContext::new(&clock, Entropy::Seeded(7));
        assert_eq!(a.uuid_v4(), b.uuid_v4());
        assert_eq!(a.short_id("X"), b.short_id("X"));
    }

    #[test]
    fn uuids_are_version_four() {
        let mut ctx = AgentContext::new(&fixed(), Entropy::Os);
        let id = ctx.uuid_v4();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.to_string().as_bytes()[14], b'4');
    }

    #[test]
    fn relative_dates_use_captured_instant() {
        let ctx = AgentContext::new(&fixed(), Entropy::Seeded(1));
        assert_eq!(ctx.timestamp(), "2025-03-01T09:30:00.000Z");
        assert_eq!(ctx.days_ago(7), "2025-02-22T09:30:00.000Z");
        assert_eq!(ctx.days_ahead(30), "2025-03-31T09:30:00.000Z");
    }
}
