use std::sync::{Arc, Mutex};

use ledger::UtxoSet;

use crate::{Accepted, Pool, PoolStats, RejectReason, Transaction};

/// Thread-safe handle around a [`Pool`].
///
/// Every operation holds the lock for its full critical section. `admit` in
/// particular covers the conflict scan, ledger validation, eviction, and
/// commit under one guard, so two racing admissions can never both claim the
/// same outpoint. Read operations return owned snapshots and never observe a
/// partially committed admission.
#[derive(Debug, Clone)]
pub struct SharedPool {
    inner: Arc<Mutex<Pool>>,
}

impl SharedPool {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Pool::new(capacity_bytes))),
        }
    }

    pub fn admit(&self, tx: Transaction, utxos: &UtxoSet) -> Result<Accepted, RejectReason> {
        self.inner.lock().unwrap().admit(tx, utxos)
    }

    pub fn remove(&self, id: &str) {
        self.inner.lock().unwrap().remove(id);
    }

    pub fn evict_for_space(&self, required_bytes: usize) -> bool {
        self.inner.lock().unwrap().evict_for_space(required_bytes)
    }

    pub fn by_fee_rate(&self, limit: Option<usize>) -> Vec<Transaction> {
        self.inner.lock().unwrap().by_fee_rate(limit)
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().unwrap().stats()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::test::scenario::{funded_ledger as funded, single_spend as spend};

    #[test]
    fn concurrent_distinct_admissions_all_land() {
        let utxos = Arc::new(funded(100));
        let pool = SharedPool::new(100 * 54);

        let mut handles = vec![];
        for i in 0..100 {
            let pool = pool.clone();
            let utxos = Arc::clone(&utxos);
            handles.push(thread::spawn(move || {
                pool.admit(spend(&format!("tx{i}"), i, 1.0 + i as f64), &utxos)
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = pool.stats();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.occupied_bytes, 100 * 54);
    }

    /// Many threads race to spend the same outpoint. Whatever the
    /// interleaving, exactly one claim survives and the accounting stays
    /// balanced; each successful replacement raised the fee rate strictly.
    #[test]
    fn racing_double_spenders_leave_one_claim() {
        let utxos = Arc::new(funded(1));
        let pool = SharedPool::new(1_000);

        let mut handles = vec![];
        for i in 0..32 {
            let pool = pool.clone();
            let utxos = Arc::clone(&utxos);
            handles.push(thread::spawn(move || {
                // Either outcome is legal; the invariants below are not.
                let _ = pool.admit(spend(&format!("tx{i}"), 0, 1.0 + i as f64), &utxos);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = pool.stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.occupied_bytes, 54);
    }

    #[test]
    fn snapshot_reads_see_committed_state_only() {
        let utxos = funded(2);
        let pool = SharedPool::new(1_000);
        pool.admit(spend("a", 0, 2.0), &utxos).unwrap();
        pool.admit(spend("b", 1, 7.0), &utxos).unwrap();

        let ordered = pool.by_fee_rate(None);
        assert_eq!(ordered[0].id(), "b");
        assert_eq!(ordered[1].id(), "a");

        pool.clear();
        assert!(pool.by_fee_rate(None).is_empty());
    }
}
