use ledger::{Outpoint, Output, UtxoSet};

use crate::Transaction;

/// Outpoint `utxo{i}:0`, matching what [`funded_ledger`] registers.
pub fn utxo(i: usize) -> Outpoint {
    Outpoint::new(format!("utxo{i}"), 0)
}

/// A ledger funded with `n` single-output UTXOs, `utxo0:0` .. `utxo{n-1}:0`.
pub fn funded_ledger(n: usize) -> UtxoSet {
    let mut utxos = UtxoSet::new();
    for i in 0..n {
        utxos.add(utxo(i), Output::new("addr", 1_000_000));
    }
    utxos
}

/// The hand-picked demo UTXOs: a few addresses with a spread of amounts.
pub fn sample_ledger() -> UtxoSet {
    let mut utxos = UtxoSet::new();
    utxos.add(Outpoint::new("prev_tx1", 0), Output::new("addr1", 1_000_000));
    utxos.add(Outpoint::new("prev_tx1", 1), Output::new("addr2", 2_000_000));
    utxos.add(Outpoint::new("prev_tx2", 0), Output::new("addr3", 1_500_000));
    utxos.add(Outpoint::new("prev_tx3", 0), Output::new("addr1", 500_000));
    utxos
}

/// One-input one-output candidate spending `utxo{input}:0`; 54 bytes under
/// the standard size estimate.
pub fn single_spend(id: &str, input: usize, fee_rate: f64) -> Transaction {
    Transaction::build(
        id,
        vec![utxo(input)],
        vec![Output::new("dest", 100)],
        fee_rate,
    )
    .expect("positive fee rate")
}
