use crate::error::TurnOrderError;
use crate::state::{ParticipantId, Priority, TurnEntry, TurnFlag, TurnOrder};

use super::{Notice, Target, TurnEngine, TurnOutcome, ensure_distinct};

impl TurnEngine<'_> {
    /// Sets or clears the delay/ready flag on one participant.
    ///
    /// A flag takes the single suffix slot, replacing whatever was there.
    /// Clearing only touches a `D`/`R` suffix. Targeting the front entry when
    /// it is a round marker or timed effect changes nothing.
    pub fn set_flag(
        &self,
        order: &TurnOrder,
        target: &Target,
        flag: Option<TurnFlag>,
    ) -> Result<TurnOutcome, TurnOrderError> {
        if order.is_empty() {
            return Err(TurnOrderError::EmptyOrder);
        }
        let index = match target {
            Target::Current => 0,
            Target::Participant(id) => order
                .position_of(id)
                .ok_or_else(|| TurnOrderError::NotFound(id.clone()))?,
        };

        let mut entries = order.entries().to_vec();
        let TurnEntry::Participant { id, priority } = &mut entries[index] else {
            return Ok(self.unchanged(order));
        };

        let notice = match flag {
            Some(flag) => {
                priority.suffix = Some(flag.into());
                Notice::FlagSet {
                    id: id.clone(),
                    flag,
                }
            }
            None if priority.flag().is_some() => {
                priority.suffix = None;
                Notice::FlagCleared { id: id.clone() }
            }
            None => return Ok(self.unchanged(order)),
        };

        self.finish(entries, vec![notice])
    }

    /// Brings delayed or readied participants back in to act right now.
    ///
    /// They are pulled out and reinserted directly after the current entry,
    /// taking the current entry's priority. Readied participants go first,
    /// each group keeping its original relative order.
    pub fn undelay_and_reinsert(
        &self,
        order: &TurnOrder,
        ids: &[ParticipantId],
    ) -> Result<TurnOutcome, TurnOrderError> {
        if order.is_empty() {
            return Err(TurnOrderError::EmptyOrder);
        }
        if ids.is_empty() {
            return Err(TurnOrderError::NoParticipants);
        }
        ensure_distinct(ids)?;
        for id in ids {
            match order.position_of(id) {
                None => return Err(TurnOrderError::NotFound(id.clone())),
                Some(0) => return Err(TurnOrderError::CurrentParticipant(id.clone())),
                Some(_) => {}
            }
        }

        let mut entries = order.entries().to_vec();
        let mut pulled: Vec<(ParticipantId, Priority)> = Vec::with_capacity(ids.len());
        entries.retain(|entry| match entry {
            TurnEntry::Participant { id, priority } if ids.contains(id) => {
                pulled.push((id.clone(), *priority));
                false
            }
            _ => true,
        });
        pulled.sort_by(|(a_id, a), (b_id, b)| {
            b.without_suffix()
                .cmp(&a.without_suffix())
                .then_with(|| a_id.cmp(b_id))
        });

        let (readying, delayed): (Vec<_>, Vec<_>) = pulled
            .into_iter()
            .partition(|(_, priority)| priority.flag() == Some(TurnFlag::Readying));

        let current = entries
            .first()
            .and_then(TurnEntry::priority)
            .map(|priority| priority.without_suffix());

        let mut notices = Vec::with_capacity(ids.len());
        let reinserted: Vec<TurnEntry> = readying
            .into_iter()
            .chain(delayed)
            .map(|(id, original)| {
                let priority = current.unwrap_or_else(|| original.without_suffix());
                notices.push(Notice::Reinserted {
                    id: id.clone(),
                    priority,
                });
                TurnEntry::Participant { id, priority }
            })
            .collect();
        entries.splice(1..1, reinserted);

        self.finish(entries, notices)
    }
}
