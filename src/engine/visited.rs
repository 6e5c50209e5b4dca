// src/engine/visited.rs
// =============================================================================
// The visited registry: one shared record of every address the crawl has
// ever admitted.
//
// How it works:
// - Each address maps to a monotonic discovery sequence number
// - try_admit() is the single admission point: it checks membership AND
//   the crawl limit AND inserts, all under one lock, so no two workers
//   can both admit the same address and the limit can never be overshot
// - Addresses are never removed; after the crawl the registry is the
//   authoritative "which nodes did we visit" answer
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

// Concurrency-safe membership set over discovered addresses,
// with a bounded-size admission policy
pub struct VisitedRegistry {
    inner: Mutex<Inner>,
    // None means unbounded
    limit: Option<usize>,
}

struct Inner {
    seen: HashMap<String, u64>,
    next_seq: u64,
}

impl VisitedRegistry {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                seen: HashMap::new(),
                next_seq: 0,
            }),
            limit,
        }
    }

    // Atomic check-and-insert: true iff the address was not already
    // present and the registry still had room. Never errors.
    pub fn try_admit(&self, address: &str) -> bool {
        let mut inner = self.inner.lock().expect("visited registry lock poisoned");

        if inner.seen.contains_key(address) {
            return false;
        }
        if let Some(limit) = self.limit {
            if inner.seen.len() >= limit {
                return false;
            }
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.seen.insert(address.to_string(), seq);
        true
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("visited registry lock poisoned")
            .seen
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // True once the registry has admitted as many addresses as the limit
    // allows; always false for an unbounded crawl
    pub fn at_capacity(&self) -> bool {
        match self.limit {
            Some(limit) => self.len() >= limit,
            None => false,
        }
    }

    // The discovery sequence number assigned to an address, if admitted
    pub fn sequence_of(&self, address: &str) -> Option<u64> {
        self.inner
            .lock()
            .expect("visited registry lock poisoned")
            .seen
            .get(address)
            .copied()
    }

    // Every admitted address, in discovery order
    pub fn snapshot(&self) -> Vec<String> {
        let inner = self.inner.lock().expect("visited registry lock poisoned");
        let mut entries: Vec<(&String, &u64)> = inner.seen.iter().collect();
        entries.sort_by_key(|(_, seq)| **seq);
        entries.into_iter().map(|(addr, _)| addr.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_admit_is_idempotent() {
        let registry = VisitedRegistry::new(None);
        assert!(registry.is_empty());
        assert!(registry.try_admit("https://a.example"));
        assert!(!registry.try_admit("https://a.example"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_limit_caps_admissions() {
        let registry = VisitedRegistry::new(Some(2));
        assert!(registry.try_admit("https://a.example"));
        assert!(registry.try_admit("https://b.example"));
        assert!(!registry.try_admit("https://c.example"));
        assert_eq!(registry.len(), 2);
        assert!(registry.at_capacity());
        // Rejection at capacity applies to new addresses only; known
        // addresses were already rejected as duplicates
        assert!(!registry.try_admit("https://a.example"));
    }

    #[test]
    fn test_sequence_numbers_follow_discovery_order() {
        let registry = VisitedRegistry::new(None);
        registry.try_admit("https://a.example");
        registry.try_admit("https://b.example");
        registry.try_admit("https://c.example");
        assert_eq!(registry.sequence_of("https://a.example"), Some(0));
        assert_eq!(registry.sequence_of("https://b.example"), Some(1));
        assert_eq!(registry.sequence_of("https://c.example"), Some(2));
        assert_eq!(registry.sequence_of("https://d.example"), None);
        assert_eq!(
            registry.snapshot(),
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
                "https://c.example".to_string(),
            ]
        );
    }

    #[test]
    fn test_unbounded_registry_never_reports_capacity() {
        let registry = VisitedRegistry::new(None);
        for i in 0..100 {
            assert!(registry.try_admit(&format!("https://site{i}.example")));
        }
        assert!(!registry.at_capacity());
        assert_eq!(registry.len(), 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_admissions_never_double_admit() {
        let registry = Arc::new(VisitedRegistry::new(Some(50)));
        let mut handles = Vec::new();

        // 8 tasks race to admit the same 100 addresses
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let mut admitted = 0usize;
                for i in 0..100 {
                    if registry.try_admit(&format!("https://site{i}.example")) {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }

        let mut total_admitted = 0usize;
        for handle in handles {
            total_admitted += handle.await.unwrap();
        }

        // Every admission was granted exactly once, and the limit held
        assert_eq!(total_admitted, registry.len());
        assert_eq!(registry.len(), 50);
    }
}
