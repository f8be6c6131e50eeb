//! Worker registry in input order.

use std::collections::HashMap;

use crate::models::Worker;

/// All workers, in the order they were read. The engine processes them
/// first-come-first-served in this order.
#[derive(Debug, Clone, Default)]
pub struct WorkerRegistry {
    workers: Vec<Worker>,
    index: HashMap<String, usize>,
}

impl WorkerRegistry {
    /// Creates the registry. A repeated email resolves to its first row.
    pub fn new(workers: Vec<Worker>) -> Self {
        let mut index = HashMap::with_capacity(workers.len());
        for (i, w) in workers.iter().enumerate() {
            index.entry(w.email.clone()).or_insert(i);
        }
        Self { workers, index }
    }

    /// Worker by email.
    pub fn get(&self, email: &str) -> Option<&Worker> {
        self.index.get(email).map(|&i| &self.workers[i])
    }

    /// Workers in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Worker> {
        self.workers.iter()
    }

    /// Mutable workers in input order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Worker> {
        self.workers.iter_mut()
    }

    /// Number of workers.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Whether there are no workers.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}
