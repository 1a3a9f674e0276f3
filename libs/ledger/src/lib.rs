use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a specific, indexed output of a prior transaction.
///
/// Equality is structural; an [`Outpoint`] is used as a map key throughout the
/// pool and ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outpoint {
    pub txid: String,
    pub index: u32,
}

impl Outpoint {
    pub fn new(txid: impl Into<String>, index: u32) -> Self {
        Self {
            txid: txid.into(),
            index,
        }
    }
}

impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

/// A spendable output: who owns it and how much it is worth, in satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub address: String,
    pub amount: u64,
}

impl Output {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// The authoritative set of currently unspent transaction outputs.
///
/// The pool consults this set read-only while validating candidate inputs;
/// only block confirmation (outside the pool) mutates it.
#[derive(Debug, Default)]
pub struct UtxoSet {
    utxos: HashMap<Outpoint, Output>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new unspent output. A re-registered outpoint overwrites the
    /// previous entry.
    pub fn add(&mut self, outpoint: Outpoint, output: Output) {
        self.utxos.insert(outpoint, output);
    }

    /// Marks an output as spent, returning it if it was present.
    pub fn spend(&mut self, outpoint: &Outpoint) -> Option<Output> {
        self.utxos.remove(outpoint)
    }

    pub fn get(&self, outpoint: &Outpoint) -> Option<&Output> {
        self.utxos.get(outpoint)
    }

    pub fn contains(&self, outpoint: &Outpoint) -> bool {
        self.utxos.contains_key(outpoint)
    }

    /// Checks that every input refers to an existing unspent output.
    ///
    /// # Error
    /// Returns the first missing [`Outpoint`] in input order.
    pub fn validate_inputs(&self, inputs: &[Outpoint]) -> Result<(), Outpoint> {
        match inputs.iter().find(|input| !self.contains(input)) {
            Some(missing) => Err(missing.clone()),
            None => Ok(()),
        }
    }

    /// Total unspent value held by `address`.
    pub fn balance_of(&self, address: &str) -> u64 {
        self.utxos
            .values()
            .filter(|output| output.address == address)
            .map(|output| output.amount)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Outpoint, &Output)> {
        self.utxos.iter()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }
}
