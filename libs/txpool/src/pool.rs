use std::collections::{HashMap, HashSet};

use ledger::{Outpoint, UtxoSet};
use log::debug;
use serde::Serialize;

use crate::Transaction;

/// Why an admission attempt was turned down. All variants are recoverable;
/// a rejected candidate leaves the pool untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectReason {
    #[error("transaction {0} already in mempool")]
    DuplicateId(String),
    #[error("double spend attempt: {outpoint} is claimed by {holder}")]
    DoubleSpend { outpoint: Outpoint, holder: String },
    #[error("invalid inputs: {0} not found in UTXO set")]
    InvalidInput(Outpoint),
    #[error("mempool full and cannot evict enough transactions")]
    PoolFull,
}

/// Outcome of a successful admission: the ids of incumbents this candidate
/// replaced, empty for a plain add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accepted {
    pub replaced: Vec<String>,
}

/// Point-in-time usage snapshot. `utilization` is a fraction in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoolStats {
    pub occupied_bytes: usize,
    pub capacity_bytes: usize,
    pub utilization: f64,
    pub count: usize,
}

#[derive(Debug)]
struct Entry {
    tx: Transaction,
    /// Admission tick, used to break fee-rate ties deterministically.
    seq: u64,
}

/// A bounded, fee-prioritized pool of unconfirmed transactions.
///
/// The pool owns three indices: the admitted set keyed by id, the set of
/// outpoints those transactions claim, and a reverse map from outpoint to
/// claiming id for O(1) conflict lookup. `occupied` always equals the sum of
/// admitted sizes and never exceeds `capacity`.
///
/// All operations take `&mut self` and complete synchronously; wrap the pool
/// in a [`SharedPool`](crate::SharedPool) to serve concurrent callers.
#[derive(Debug)]
pub struct Pool {
    entries: HashMap<String, Entry>,
    reserved: HashSet<Outpoint>,
    claims: HashMap<Outpoint, String>,
    occupied: usize,
    capacity: usize,
    admissions: u64,
}

impl Pool {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            reserved: HashSet::new(),
            claims: HashMap::new(),
            occupied: 0,
            capacity: capacity_bytes,
            admissions: 0,
        }
    }

    /// Validates `tx` against the pool and the unspent set and commits it.
    ///
    /// Gates run in a fixed order and the first failing one decides the
    /// rejection: duplicate id, conflict scan (with replace-by-fee), ledger
    /// validation, capacity (with eviction). Only after every gate passes are
    /// superseded incumbents removed and the candidate inserted, so a
    /// rejection never mutates the pool.
    ///
    /// Replace-by-fee is judged per input: each claimed outpoint's incumbent
    /// must be outbid with a strictly higher fee rate, independently of the
    /// others. An incumbent at an equal fee rate is never replaced.
    pub fn admit(&mut self, tx: Transaction, utxos: &UtxoSet) -> Result<Accepted, RejectReason> {
        // 1. Duplicate identifier
        if self.entries.contains_key(tx.id()) {
            return Err(RejectReason::DuplicateId(tx.id().to_owned()));
        }

        // 2. Conflict scan against outpoints already claimed in the pool
        for outpoint in tx.inputs() {
            if self.reserved.contains(outpoint) && !self.outbids_claim(&tx, outpoint) {
                let holder = self
                    .claims
                    .get(outpoint)
                    .cloned()
                    .unwrap_or_default();
                return Err(RejectReason::DoubleSpend {
                    outpoint: outpoint.clone(),
                    holder,
                });
            }
        }

        // 3. Every input must exist in the unspent set, claimed or not
        utxos
            .validate_inputs(tx.inputs())
            .map_err(RejectReason::InvalidInput)?;

        // 4. Capacity, counting any to-be-replaced incumbents at full size.
        // Eviction can free the whole pool at most, so a candidate larger
        // than the capacity is rejected before any eviction runs; rejection
        // then never has side effects.
        if self.occupied + tx.size() > self.capacity
            && (tx.size() > self.capacity || !self.evict_for_space(tx.size()))
        {
            return Err(RejectReason::PoolFull);
        }

        // 5. Commit: supersede outbid incumbents, then insert and reserve.
        // An incumbent that eviction already removed has no claim left here.
        let mut replaced = Vec::new();
        for outpoint in tx.inputs() {
            if let Some(holder) = self.claims.get(outpoint).cloned() {
                debug!("replacing {holder} with {} on {outpoint}", tx.id());
                self.remove(&holder);
                replaced.push(holder);
            }
        }

        self.occupied += tx.size();
        for outpoint in tx.inputs() {
            self.reserved.insert(outpoint.clone());
            self.claims.insert(outpoint.clone(), tx.id().to_owned());
        }
        let seq = self.admissions;
        self.admissions += 1;
        self.entries.insert(tx.id().to_owned(), Entry { tx, seq });

        Ok(Accepted { replaced })
    }

    /// Whether `tx` outbids the incumbent claiming `outpoint` with a strictly
    /// higher fee rate.
    fn outbids_claim(&self, tx: &Transaction, outpoint: &Outpoint) -> bool {
        let Some(holder) = self.claims.get(outpoint) else {
            return false;
        };
        let Some(entry) = self.entries.get(holder) else {
            return false;
        };
        tx.fee_rate() > entry.tx.fee_rate()
    }

    /// Evicts lowest-fee-rate transactions until `required_bytes` more would
    /// fit, walking ascending fee rate with admission order breaking ties.
    ///
    /// Stops as soon as the requirement is met, so a higher-fee transaction is
    /// never evicted while a lower one remains and the pool never over-evicts.
    /// Returns whether the requirement is met after the walk.
    pub fn evict_for_space(&mut self, required_bytes: usize) -> bool {
        let mut victims: Vec<(String, f64, u64)> = self
            .entries
            .values()
            .map(|entry| (entry.tx.id().to_owned(), entry.tx.fee_rate(), entry.seq))
            .collect();
        victims.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        for (id, _, _) in victims {
            if self.occupied + required_bytes <= self.capacity {
                break;
            }
            debug!("evicting {id} to free space");
            self.remove(&id);
        }

        self.occupied + required_bytes <= self.capacity
    }

    /// Removes a transaction and releases its claimed outpoints. Removing an
    /// unknown id is a no-op. This is the only path by which `reserved`
    /// shrinks.
    pub fn remove(&mut self, id: &str) {
        let Some(entry) = self.entries.remove(id) else {
            return;
        };
        self.occupied -= entry.tx.size();
        for outpoint in entry.tx.inputs() {
            self.reserved.remove(outpoint);
            self.claims.remove(outpoint);
        }
    }

    /// Admitted transactions ordered by descending fee rate, admission order
    /// on ties. `limit` truncates to the first `n`. Read-only.
    pub fn by_fee_rate(&self, limit: Option<usize>) -> Vec<Transaction> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            b.tx.fee_rate()
                .total_cmp(&a.tx.fee_rate())
                .then(a.seq.cmp(&b.seq))
        });

        let n = limit.unwrap_or(entries.len());
        entries.into_iter().take(n).map(|entry| entry.tx.clone()).collect()
    }

    pub fn stats(&self) -> PoolStats {
        let utilization = if self.capacity == 0 {
            0.0
        } else {
            self.occupied as f64 / self.capacity as f64
        };
        PoolStats {
            occupied_bytes: self.occupied,
            capacity_bytes: self.capacity,
            utilization,
            count: self.entries.len(),
        }
    }

    /// Drops every admitted transaction and resets the byte accounting. Used
    /// for scenario resets, not part of the normal transaction lifecycle.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.reserved.clear();
        self.claims.clear();
        self.occupied = 0;
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.entries.get(id).map(|entry| &entry.tx)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
