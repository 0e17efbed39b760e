// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
The registry of native-embed records.

Pages can carry `<embed>` elements that the host renders natively. The engine
reports their lifecycle from its callback threads; the UI thread reads the
records while laying out the native content. This is the one structure in the
adapter that is mutated off the UI thread, which is why it hides behind a
reader/writer lock — everything else is UI-thread-owned by construction.
*/

#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::RwLock;

/// The data record of one native embed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedData {
    /// The element's tag name.
    pub tag: String,
    /// The element's source attribute.
    pub src: String,
    /// Layout width in physical pixels.
    pub width: u32,
    /// Layout height in physical pixels.
    pub height: u32,
}

/// Map from embed identifier to its record.
#[derive(Default)]
pub struct EmbedDataRegistry {
    records: RwLock<HashMap<String, EmbedData>>,
}

impl EmbedDataRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `id`.
    pub fn insert(&self, id: String, data: EmbedData) {
        self.records.write().unwrap().insert(id, data);
    }

    /// Remove the record for `id`; returns whether one existed.
    pub fn remove(&self, id: &str) -> bool {
        self.records.write().unwrap().remove(id).is_some()
    }

    /// A copy of the record for `id`.
    pub fn get(&self, id: &str) -> Option<EmbedData> {
        self.records.read().unwrap().get(id).cloned()
    }

    /// Whether a record for `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.records.read().unwrap().contains_key(id)
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn data(tag: &str) -> EmbedData {
        EmbedData { tag: tag.into(), src: String::new(), width: 100, height: 100 }
    }

    #[test]
    fn insert_get_remove() {
        let registry = EmbedDataRegistry::new();
        registry.insert("a".into(), data("video"));
        assert_eq!(registry.get("a").unwrap().tag, "video");
        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert!(registry.is_empty());
    }

    #[test]
    fn readable_while_written_from_another_thread() {
        let registry = Arc::new(EmbedDataRegistry::new());
        let writer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for i in 0..100 {
                    registry.insert(format!("embed-{i}"), data("object"));
                }
            })
        };
        // Concurrent reads must never block indefinitely or poison the lock.
        for _ in 0..100 {
            let _ = registry.contains("embed-0");
        }
        writer.join().unwrap();
        assert_eq!(registry.len(), 100);
    }
}
