//! Name-keyed municipality lookup.

use std::collections::HashMap;

use crate::error::{StaffError, StaffResult};
use crate::models::Municipality;

/// All municipalities, retrievable by name.
#[derive(Debug, Clone, Default)]
pub struct Municipalities {
    by_name: HashMap<String, Municipality>,
    order: Vec<String>,
}

impl Municipalities {
    /// Creates the registry. A repeated name keeps the first row.
    pub fn new(municipalities: Vec<Municipality>) -> Self {
        let mut registry = Self::default();
        for m in municipalities {
            if !registry.by_name.contains_key(&m.name) {
                registry.order.push(m.name.clone());
                registry.by_name.insert(m.name.clone(), m);
            }
        }
        registry
    }

    /// Municipality by name.
    pub fn get(&self, name: &str) -> Option<&Municipality> {
        self.by_name.get(name)
    }

    /// Municipality by name, as an error if missing.
    pub fn resolve(&self, name: &str) -> StaffResult<&Municipality> {
        self.get(name)
            .ok_or_else(|| StaffError::UnknownMunicipality(name.to_string()))
    }

    /// Municipalities in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Municipality> {
        self.order.iter().filter_map(|n| self.by_name.get(n))
    }

    /// Number of municipalities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_order() {
        let registry = Municipalities::new(vec![
            Municipality::new("Media", 10, 0),
            Municipality::new("Upland", 5, 1),
            Municipality::new("Media", 1, 2),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Media").unwrap().priority, 10);
        assert!(registry.get("Chester").is_none());
        assert!(matches!(
            registry.resolve("Chester"),
            Err(StaffError::UnknownMunicipality(_))
        ));

        let names: Vec<&str> = registry.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Media", "Upland"]);
    }
}
