use ledger::{Outpoint, Output};
use serde::Serialize;

// Rough per-field byte weights for the size estimate. This is not a wire
// encoding; the pool only needs a consistent measure for capacity accounting.
const INPUT_BYTES: usize = 10;
const OUTPUT_BYTES: usize = 34;
const OVERHEAD_BYTES: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("fee rate must be a positive finite number, got {0}")]
    InvalidFeeRate(f64),
}

/// An unconfirmed candidate transaction, immutable once built.
///
/// The fee rate is externally asserted (sat/byte), not derived from the
/// transaction's own arithmetic, and the size is a deterministic estimate
/// computed once at construction. Neither changes for the object's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: String,
    inputs: Vec<Outpoint>,
    outputs: Vec<Output>,
    fee_rate: f64,
    size: usize,
}

impl Transaction {
    /// Builds a candidate from caller-supplied fields.
    ///
    /// The identifier must be unique within the pool at submission time; that
    /// is checked by [`Pool::admit`](crate::Pool::admit), not here. Empty
    /// input or output sequences are accepted as a degenerate case.
    ///
    /// # Error
    /// Rejects a fee rate that is not a positive finite number.
    pub fn build(
        id: impl Into<String>,
        inputs: Vec<Outpoint>,
        outputs: Vec<Output>,
        fee_rate: f64,
    ) -> Result<Self, BuildError> {
        if !fee_rate.is_finite() || fee_rate <= 0.0 {
            return Err(BuildError::InvalidFeeRate(fee_rate));
        }

        let size = estimate_size(inputs.len(), outputs.len());
        Ok(Self {
            id: id.into(),
            inputs,
            outputs,
            fee_rate,
            size,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inputs(&self) -> &[Outpoint] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Asserted fee rate in satoshis per byte.
    pub fn fee_rate(&self) -> f64 {
        self.fee_rate
    }

    /// Estimated size in bytes, fixed at construction.
    pub fn size(&self) -> usize {
        self.size
    }
}

fn estimate_size(inputs: usize, outputs: usize) -> usize {
    inputs * INPUT_BYTES + outputs * OUTPUT_BYTES + OVERHEAD_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outpoint(txid: &str) -> Outpoint {
        Outpoint::new(txid, 0)
    }

    #[test]
    fn size_is_derived_from_input_and_output_counts() {
        let tx = Transaction::build(
            "tx1",
            vec![outpoint("a"), outpoint("b")],
            vec![Output::new("addr1", 100)],
            2.5,
        )
        .unwrap();

        // 2 inputs * 10 + 1 output * 34 + 10 overhead
        assert_eq!(tx.size(), 64);
        assert_eq!(tx.fee_rate(), 2.5);
    }

    #[test]
    fn empty_candidate_still_carries_the_overhead() {
        let tx = Transaction::build("tx1", vec![], vec![], 1.0).unwrap();
        assert_eq!(tx.size(), 10);
    }

    #[test]
    fn rejects_non_positive_fee_rates() {
        for fee_rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Transaction::build("tx1", vec![], vec![], fee_rate);
            assert!(
                matches!(result, Err(BuildError::InvalidFeeRate(_))),
                "fee rate {fee_rate} should be rejected"
            );
        }
    }
}
