use chrono::Utc;

use crate::dto::AccountId;

/// Issues account ids from the wall clock in milliseconds.
///
/// Two accounts created within the same millisecond would share a timestamp,
/// so an id is never issued at or below the previous one: when the clock has
/// not moved on, the previous id plus one is used instead. Ids stay plain
/// millisecond-scale numbers, which keeps the stored `uuid` field compatible.
///
/// Once the previous id is `AccountId::MAX` there is nothing above it, and ids
/// are taken from below the lowest one seen instead: the clock if it is lower,
/// otherwise the lowest id minus one.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<AccountId>,
    lowest: Option<AccountId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: None,
            lowest: None,
        }
    }

    /// Starts outside the range of `existing`, so loaded accounts are never collided with.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a AccountId>) -> Self {
        existing
            .into_iter()
            .fold(Self::new(), |ids, &id| Self {
                last: Some(ids.last.map_or(id, |last| last.max(id))),
                lowest: Some(ids.lowest.map_or(id, |lowest| lowest.min(id))),
            })
    }

    pub fn next_id(&mut self) -> AccountId {
        self.next_after(Utc::now().timestamp_millis())
    }

    fn next_after(&mut self, now: AccountId) -> AccountId {
        let id = match self.last {
            Some(last) if now <= last => match last.checked_add(1) {
                Some(above) => above,
                None => self.below_lowest(now),
            },
            _ => now,
        };
        self.last = Some(self.last.map_or(id, |last| last.max(id)));
        self.lowest = Some(self.lowest.map_or(id, |lowest| lowest.min(id)));
        id
    }

    fn below_lowest(&self, now: AccountId) -> AccountId {
        // Ids from `lowest` up to `AccountId::MAX` may all be taken; anything under is free.
        match self.lowest {
            Some(lowest) if now < lowest => now,
            Some(lowest) => lowest.checked_sub(1).unwrap_or(now),
            None => now,
        }
    }
}
