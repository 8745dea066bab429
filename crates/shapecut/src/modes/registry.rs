//! Mode factories keyed by id.

use std::collections::BTreeMap;

use super::cut_mode::CutMode;
use super::friend_foe::FriendFoeMode;
use super::types::{GameMode, ModeError, ModeId};

pub type ModeFactory = fn() -> Box<dyn GameMode>;

/// Registry of mode constructors. A fresh mode is built on every `create`.
#[derive(Clone, Debug, Default)]
pub struct ModeRegistry {
    factories: BTreeMap<ModeId, ModeFactory>,
}

impl ModeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All built-in modes.
    pub fn with_defaults() -> Self {
        let mut reg = Self::empty();
        reg.register(ModeId::Cut, || Box::new(CutMode::standard()));
        reg.register(ModeId::CutEasy, || Box::new(CutMode::easy()));
        reg.register(ModeId::CutHard, || Box::new(CutMode::hard()));
        reg.register(ModeId::CutExtreme, || Box::new(CutMode::extreme()));
        reg.register(ModeId::FriendFoe, || Box::new(FriendFoeMode::standard()));
        reg.register(ModeId::FriendFoeEasy, || Box::new(FriendFoeMode::easy()));
        reg.register(ModeId::FriendFoeHard, || Box::new(FriendFoeMode::hard()));
        reg
    }

    /// Add or replace the factory for `id`.
    pub fn register(&mut self, id: ModeId, factory: ModeFactory) {
        self.factories.insert(id, factory);
    }

    pub fn contains(&self, id: ModeId) -> bool {
        self.factories.contains_key(&id)
    }

    pub fn create(&self, id: ModeId) -> Result<Box<dyn GameMode>, ModeError> {
        let factory = self.factories.get(&id).ok_or(ModeError::NotRegistered(id))?;
        Ok(factory())
    }

    /// Registered ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = ModeId> + '_ {
        self.factories.keys().copied()
    }
}
