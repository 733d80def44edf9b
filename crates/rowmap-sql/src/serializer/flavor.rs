use super::Serializer;

use rowmap_core::driver::{Capability, Dialect};

#[derive(Debug, Clone, Copy)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
}

impl Serializer {
    pub fn new(capability: &'static Capability) -> Serializer {
        let flavor = match capability.dialect {
            Dialect::Sqlite => Flavor::Sqlite,
            Dialect::Postgresql => Flavor::Postgresql,
        };

        Serializer { flavor, capability }
    }

    pub fn sqlite() -> Serializer {
        Serializer::new(&Capability::SQLITE)
    }

    pub fn postgresql() -> Serializer {
        Serializer::new(&Capability::POSTGRESQL)
    }

    pub(super) fn is_sqlite(&self) -> bool {
        matches!(self.flavor, Flavor::Sqlite)
    }
}
