//! Per-frame zone membership tracking with enter/exit edge detection.

use glam::Vec3;
use smallvec::SmallVec;

use crate::registry::ZoneRegistry;

/// One-shot membership change for the zone at a registry index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneTransition {
    Enter(usize),
    Exit(usize),
}

impl ZoneTransition {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ZoneTransition::Enter(i) | ZoneTransition::Exit(i) => i,
        }
    }

    #[inline]
    pub fn is_enter(self) -> bool {
        matches!(self, ZoneTransition::Enter(_))
    }
}

/// Transitions produced by a single frame; rarely more than a handful.
pub type Transitions = SmallVec<[ZoneTransition; 4]>;

/// Outside/Inside flag per zone, indexed like the registry.
///
/// Every zone starts `Outside` regardless of where the observer is, so a zone
/// containing the starting position is entered on the first evaluated frame.
#[derive(Clone, Debug, Default)]
pub struct MembershipTracker {
    inside: Vec<bool>,
}

impl MembershipTracker {
    pub fn new(zone_count: usize) -> Self {
        Self {
            inside: vec![false; zone_count],
        }
    }

    /// Forget all membership; every zone goes back to `Outside`.
    pub fn reset(&mut self) {
        self.inside.iter_mut().for_each(|s| *s = false);
    }

    /// Evaluate every zone against `observer` in registry order and return
    /// the edges crossed since the previous call.
    pub fn update(&mut self, registry: &ZoneRegistry, observer: Vec3) -> Transitions {
        if self.inside.len() != registry.len() {
            self.inside.resize(registry.len(), false);
        }
        let mut out = Transitions::new();
        for (i, zone) in registry.zones().iter().enumerate() {
            let now = zone.contains(observer);
            let was = self.inside[i];
            if now && !was {
                out.push(ZoneTransition::Enter(i));
            } else if was && !now {
                out.push(ZoneTransition::Exit(i));
            }
            self.inside[i] = now;
        }
        out
    }

    #[inline]
    pub fn is_inside(&self, index: usize) -> bool {
        self.inside.get(index).copied().unwrap_or(false)
    }

    /// Registry indices of zones currently inside, ascending.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.inside
            .iter()
            .enumerate()
            .filter_map(|(i, inside)| inside.then_some(i))
    }

    pub fn active_count(&self) -> usize {
        self.inside.iter().filter(|s| **s).count()
    }
}
