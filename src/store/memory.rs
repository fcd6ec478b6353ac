use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::models::short_link::ShortLink;

/// Insert failed because the code is already claimed by an active link.
#[derive(Debug, PartialEq, Eq)]
pub struct InsertError;

/// In-memory store for short links, keyed by code.
///
/// The map is the only shared mutable state in the process; insert is atomic
/// with respect to the uniqueness check so two concurrent creations can never
/// both claim the same code.
#[derive(Default)]
pub struct LinkStore {
    links: DashMap<String, ShortLink>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic check-then-insert, unique on code.
    ///
    /// An expired record occupying the slot is logically absent and gets
    /// replaced; an active one yields `InsertError`.
    pub fn insert(&self, link: ShortLink) -> Result<(), InsertError> {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired() {
                    occupied.insert(link);
                    Ok(())
                } else {
                    Err(InsertError)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(link);
                Ok(())
            }
        }
    }

    /// Look up a link by code. Does not apply the expiry policy; that lives
    /// in the service layer.
    pub fn lookup(&self, code: &str) -> Option<ShortLink> {
        self.links.get(code).map(|entry| entry.value().clone())
    }

    /// Best-effort click bump, not transactionally tied to lookup.
    pub fn increment_clicks(&self, code: &str) {
        if let Some(mut entry) = self.links.get_mut(code) {
            entry.clicks += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
