//! Immutable zone registry built once from a zone document.
//!
//! Loading never fails outward: a malformed document leaves the registry
//! empty, a bad entry is skipped. Either way the problem is logged and the
//! host keeps rendering without (some) zones.

use fnv::FnvHashSet;
use glam::Vec3;

use crate::config::{ConfigError, ZonesDocument};
use crate::zone::Zone;

#[derive(Clone, Debug, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from an already-parsed document, in document order.
    ///
    /// Duplicate ids are an authoring error; they are reported but kept, and
    /// precedence between them is unspecified.
    pub fn load(document: ZonesDocument) -> Self {
        let mut zones = Vec::with_capacity(document.zones.len());
        let mut seen = FnvHashSet::default();
        for entry in document.zones {
            match entry.into_zone() {
                Ok(zone) => {
                    if !seen.insert(zone.id.clone()) {
                        log::warn!("[zones] duplicate zone id '{}'", zone.id);
                    }
                    zones.push(zone);
                }
                Err(e) => log::warn!("[zones] skipping zone: {}", e),
            }
        }
        log::info!("[zones] loaded {} zone(s)", zones.len());
        Self { zones }
    }

    /// Parse and load a JSON document; malformed input yields an empty registry.
    pub fn from_json(text: &str) -> Self {
        match ZonesDocument::from_json(text) {
            Ok(doc) => Self::load(doc),
            Err(e) => {
                log::error!("[zones] {}; continuing without zones", e);
                Self::empty()
            }
        }
    }

    /// Like [`ZoneRegistry::from_json`] but for an optional document, e.g. a
    /// config fetch that may have failed.
    pub fn from_optional_json(text: Option<&str>) -> Self {
        match text {
            Some(t) => Self::from_json(t),
            None => {
                log::error!("[zones] no zone document available; continuing without zones");
                Self::empty()
            }
        }
    }

    /// Strict variant surfacing the parse error to callers that want it.
    pub fn try_from_json(text: &str) -> Result<Self, ConfigError> {
        ZonesDocument::from_json(text).map(Self::load)
    }

    #[inline]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// First zone with `id`, registry order.
    pub fn find(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.zones.iter().position(|z| z.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones containing `point`, registry order. The first frame already
    /// reports zones around the start position as entered; use this to know
    /// earlier, not to synthesize an enter.
    pub fn containing(&self, point: Vec3) -> impl Iterator<Item = &Zone> + '_ {
        self.zones.iter().filter(move |z| z.contains(point))
    }
}
