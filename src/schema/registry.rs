//! # Schema Registry
//!
//! The registry maps schema names to their compiled descriptors so a
//! record type is compiled once and shared for the process lifetime.
//! It is purely a cache: every codec operation takes the `Arc` handle
//! directly, and correctness never depends on registration.
//!
//! Registered handles are immutable, so lookups hand out cheap clones
//! that are safe to share across threads.

use std::sync::Arc;
use std::sync::OnceLock;

use eyre::{ensure, Result};
use hashbrown::HashMap;
use parking_lot::RwLock;

use super::RecordSchema;

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<RecordSchema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compiled schema under its name.
    pub fn register(&self, schema: Arc<RecordSchema>) -> Result<()> {
        let mut schemas = self.schemas.write();
        ensure!(
            !schemas.contains_key(schema.name()),
            "schema '{}' already registered",
            schema.name()
        );
        schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<RecordSchema>> {
        self.schemas.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Process-wide registry instance.
    pub fn global() -> &'static SchemaRegistry {
        static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SchemaRegistry::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use crate::types::WireType;

    #[test]
    fn registry_stores_and_returns_schema_handles() {
        let registry = SchemaRegistry::new();
        let schema =
            RecordSchema::new("task", vec![FieldDef::new("id", WireType::int())]).unwrap();

        registry.register(schema.clone()).unwrap();

        let fetched = registry.get("task").unwrap();
        assert!(Arc::ptr_eq(&schema, &fetched));
        assert!(registry.contains("task"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_rejects_duplicate_names() {
        let registry = SchemaRegistry::new();
        let first =
            RecordSchema::new("task", vec![FieldDef::new("id", WireType::int())]).unwrap();
        let second =
            RecordSchema::new("task", vec![FieldDef::new("id", WireType::text())]).unwrap();

        registry.register(first).unwrap();
        let result = registry.register(second);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("already registered"));
    }

    #[test]
    fn registry_get_misses_return_none() {
        let registry = SchemaRegistry::new();
        assert!(registry.get("absent").is_none());
        assert!(registry.is_empty());
    }
}
