//! Open/close lifecycle for rendered modals.
//!
//! Each modal moves `Closed -> Opening -> Open -> Closing -> Closed`. The
//! delayed half of each transition is stored as a deadline on the modal and
//! fired by `tick`, so a later event simply overwrites (cancels) it.
//! Scroll lock is derived from layout visibility and cannot drift from it.

use std::collections::BTreeMap;

/// Milliseconds on the caller's clock.
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl ModalState {
    /// Part of the layout (`display: block`).
    pub fn in_layout(self) -> bool {
        self != ModalState::Closed
    }

    /// Carries the animated-in `show` class.
    pub fn is_shown(self) -> bool {
        self == ModalState::Open
    }
}

/// What a pointer action inside an open modal landed on. Parsed from the
/// `on` query field of a click link (`scrim` or `content`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, rocket::FromFormField)]
pub enum PointerTarget {
    Scrim,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTiming {
    pub open_delay: Millis,
    pub close_delay: Millis,
}

impl Default for ModalTiming {
    fn default() -> Self {
        ModalTiming {
            open_delay: 10,
            close_delay: 300,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    state: ModalState,
    due: Option<Millis>,
}

impl Slot {
    fn closed() -> Self {
        Slot {
            state: ModalState::Closed,
            due: None,
        }
    }
}

pub struct ModalController {
    timing: ModalTiming,
    slots: BTreeMap<String, Slot>,
}

impl ModalController {
    pub fn new(timing: ModalTiming) -> Self {
        ModalController {
            timing,
            slots: BTreeMap::new(),
        }
    }

    /// Attach to a freshly rendered set of modals. Replaces any previous
    /// registry; every modal starts closed and pending transitions are dropped.
    pub fn wire<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots = ids.into_iter().map(|id| (id.into(), Slot::closed())).collect();
    }

    pub fn is_wired(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn state(&self, id: &str) -> Option<ModalState> {
        self.slots.get(id).map(|s| s.state)
    }

    /// Background scroll is locked exactly while some modal is in the layout.
    pub fn scroll_locked(&self) -> bool {
        self.slots.values().any(|s| s.state.in_layout())
    }

    /// The modal currently opening or open, if any.
    #[cfg(test)]
    pub fn active(&self) -> Option<&str> {
        self.slots
            .iter()
            .find(|(_, s)| matches!(s.state, ModalState::Opening | ModalState::Open))
            .map(|(id, _)| id.as_str())
    }

    /// Earliest pending transition deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.slots.values().filter_map(|s| s.due).min()
    }

    /// Tile activation. Returns false when no modal is wired under `id`.
    ///
    /// Only one modal is kept in the layout: any other visible modal is
    /// closed immediately, without its close transition. Reopening a modal
    /// that is still closing cancels the pending close.
    pub fn open(&mut self, id: &str, now: Millis) -> bool {
        if !self.is_wired(id) {
            log::warn!("[modal] open requested for unknown modal `{}`", id);
            return false;
        }

        for (other, slot) in self.slots.iter_mut() {
            if other != id && slot.state.in_layout() {
                log::debug!("[modal] `{}` replaced by `{}`", other, id);
                *slot = Slot::closed();
            }
        }

        let open_delay = self.timing.open_delay;
        if let Some(slot) = self.slots.get_mut(id) {
            match slot.state {
                ModalState::Opening | ModalState::Open => {}
                ModalState::Closed | ModalState::Closing => {
                    slot.state = ModalState::Opening;
                    slot.due = Some(now + open_delay);
                }
            }
        }
        true
    }

    /// Close control activation. Returns true when a close transition started.
    pub fn close(&mut self, id: &str, now: Millis) -> bool {
        let close_delay = self.timing.close_delay;
        match self.slots.get_mut(id) {
            Some(slot) if matches!(slot.state, ModalState::Opening | ModalState::Open) => {
                slot.state = ModalState::Closing;
                slot.due = Some(now + close_delay);
                true
            }
            Some(_) => false,
            None => {
                log::warn!("[modal] close requested for unknown modal `{}`", id);
                false
            }
        }
    }

    /// Pointer action on a modal. Only the scrim dismisses.
    pub fn pointer(&mut self, id: &str, target: PointerTarget, now: Millis) -> bool {
        match target {
            PointerTarget::Scrim => self.close(id, now),
            PointerTarget::Content => false,
        }
    }

    /// Fire every transition due at or before `now`. Returns how many fired.
    pub fn tick(&mut self, now: Millis) -> usize {
        let mut fired = 0;
        for slot in self.slots.values_mut() {
            if !matches!(slot.due, Some(d) if d <= now) {
                continue;
            }
            slot.state = match slot.state {
                ModalState::Opening => ModalState::Open,
                ModalState::Closing => ModalState::Closed,
                other => other,
            };
            slot.due = None;
            fired += 1;
        }
        fired
    }
}
