#[derive(Debug, Clone, clap::Parser)]
pub struct Cfg {
    /// The scenario to run.
    pub scenario: Scenario,
    /// Mempool capacity in bytes.
    #[arg(short, long, default_value_t = 1_000_000)]
    pub capacity_bytes: usize,
    /// Maximum block size in bytes for the mining step.
    #[arg(short, long, default_value_t = 1_000_000)]
    pub block_size_bytes: usize,
    /// Number of submitter threads (stress scenario).
    #[arg(short, long, default_value_t = 4)]
    pub submitter_num: usize,
    /// Number of transactions each submitter will push (stress scenario).
    #[arg(short, long, default_value_t = 10_000)]
    pub transaction_num: usize,
    /// Number of funded UTXOs in the stress ledger. Fewer outputs mean more
    /// conflicts, so more replacements and double-spend rejections.
    #[arg(short, long, default_value_t = 1_000)]
    pub funded_outputs: usize,
    /// Delay between block-assembly rounds (stress scenario).
    #[arg(long, default_value_t = 5)]
    pub mine_interval_ms: u64,
    // Hard cap on the stress run's execution time
    #[arg(long, default_value_t = 10)]
    pub run_duration_seconds: u64,
}

#[derive(Debug, Clone, strum::EnumString, clap::ValueEnum)]
pub enum Scenario {
    /// Scripted walkthrough: seeding, admissions, RBF, mining a block.
    #[strum(ascii_case_insensitive)]
    Demo,
    /// Randomized concurrent load against a shared pool.
    #[strum(ascii_case_insensitive)]
    Stress,
}
