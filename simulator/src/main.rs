use cfg::{Cfg, Scenario};
use clap::Parser;
use ledger::{Outpoint, UtxoSet};
use log::info;
use num_format::{Locale, ToFormattedString};
use txpool::test::scenario;
use txpool::{Pool, Transaction};
use uuid::Uuid;

pub mod cfg;

fn main() {
    env_logger::init();
    let cfg = Cfg::parse();
    println!("Running configuration:\n{cfg:#?}");

    let res = match cfg.scenario {
        Scenario::Demo => run_demo(cfg),
        Scenario::Stress => run_stress(cfg),
    };
    if let Err(e) = res {
        eprintln!("Error: {e:?}");
    }
}

fn run_stress(cfg: Cfg) -> anyhow::Result<()> {
    use txpool::test::stress::{StressTestConfig, run_stress_test};

    let config = StressTestConfig {
        num_submitters: cfg.submitter_num,
        num_transactions: cfg.transaction_num,
        funded_outputs: cfg.funded_outputs,
        fee_rate_range: (1.0, 100.0),
        capacity_bytes: cfg.capacity_bytes,
        mine_interval_ms: cfg.mine_interval_ms,
        block_size_bytes: cfg.block_size_bytes,
        run_duration_seconds: cfg.run_duration_seconds,
    };
    let results = run_stress_test(config);
    results.print_summary();

    Ok(())
}

/// Scripted tour of the pool: seeds the sample ledger, walks one of each
/// admission outcome, then mines a block and confirms it against the ledger.
fn run_demo(cfg: Cfg) -> anyhow::Result<()> {
    let mut utxos = scenario::sample_ledger();
    let mut pool = Pool::new(cfg.capacity_bytes);
    info!("seeded ledger with {} sample UTXOs", utxos.len());

    show_utxos(&utxos);

    // -- A plain admission
    let payment = Transaction::build(
        generate_txid(),
        vec![Outpoint::new("prev_tx1", 0)],
        vec![ledger::Output::new("addr2", 900_000)],
        10.0,
    )?;
    let payment_id = payment.id().to_owned();
    submit(&mut pool, &utxos, payment.clone());

    // -- The same candidate again: duplicate identifier
    submit(&mut pool, &utxos, payment);

    // -- A cheaper double spend of the same outpoint
    let underbid = Transaction::build(
        generate_txid(),
        vec![Outpoint::new("prev_tx1", 0)],
        vec![ledger::Output::new("addr3", 850_000)],
        5.0,
    )?;
    submit(&mut pool, &utxos, underbid);

    // -- A strictly higher fee rate replaces the incumbent
    let outbid = Transaction::build(
        generate_txid(),
        vec![Outpoint::new("prev_tx1", 0)],
        vec![ledger::Output::new("addr3", 850_000)],
        25.0,
    )?;
    submit(&mut pool, &utxos, outbid);
    assert!(!pool.contains(&payment_id));

    // -- An independent spend at a low fee rate
    let trickle = Transaction::build(
        generate_txid(),
        vec![Outpoint::new("prev_tx1", 1)],
        vec![ledger::Output::new("addr1", 1_900_000)],
        3.0,
    )?;
    submit(&mut pool, &utxos, trickle);

    // -- An input the ledger has never heard of
    let phantom = Transaction::build(
        generate_txid(),
        vec![Outpoint::new("no_such_tx", 0)],
        vec![ledger::Output::new("addr1", 1_000)],
        50.0,
    )?;
    submit(&mut pool, &utxos, phantom);

    show_mempool(&pool);

    mine_block(&mut pool, &mut utxos, cfg.block_size_bytes);

    show_utxos(&utxos);
    show_mempool(&pool);

    Ok(())
}

fn generate_txid() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("tx_{}", &hex[..16])
}

fn submit(pool: &mut Pool, utxos: &UtxoSet, tx: Transaction) {
    let id = tx.id().to_owned();
    let fee_rate = tx.fee_rate();
    match pool.admit(tx, utxos) {
        Ok(accepted) if accepted.replaced.is_empty() => {
            println!("✓ {id} added at {fee_rate} sat/byte");
        }
        Ok(accepted) => {
            println!(
                "✓ {id} added at {fee_rate} sat/byte, replacing {}",
                accepted.replaced.join(", ")
            );
        }
        Err(reason) => println!("✗ {id} rejected: {reason}"),
    }
}

/// Greedy pack-until-full over the fee-ordered view, then confirm the block:
/// mined transactions leave the pool, their inputs leave the ledger, and
/// their outputs become fresh UTXOs. Ledger mutation happens only here, on
/// confirmation, never inside the pool.
fn mine_block(pool: &mut Pool, utxos: &mut UtxoSet, max_block_bytes: usize) {
    let mut block = vec![];
    let mut block_bytes = 0;

    for tx in pool.by_fee_rate(None) {
        if block_bytes + tx.size() > max_block_bytes {
            break;
        }
        block_bytes += tx.size();
        block.push(tx);
    }

    for tx in &block {
        pool.remove(tx.id());
        for input in tx.inputs() {
            utxos.spend(input);
        }
        for (index, output) in tx.outputs().iter().enumerate() {
            utxos.add(Outpoint::new(tx.id(), index as u32), output.clone());
        }
    }

    println!(
        "\nMined block with {} transactions ({} bytes)",
        block.len(),
        block_bytes.to_formatted_string(&Locale::en)
    );
}

fn show_utxos(utxos: &UtxoSet) {
    println!("\n{:=^80}", " UNSPENT TRANSACTION OUTPUTS ");
    if utxos.is_empty() {
        println!("No UTXOs available");
    } else {
        let mut entries: Vec<_> = utxos.iter().collect();
        entries.sort_by_key(|(outpoint, _)| (outpoint.txid.clone(), outpoint.index));
        for (outpoint, output) in entries {
            println!(
                "{outpoint} -> {}: {:.8} BTC",
                output.address,
                output.amount as f64 / 1e8
            );
        }
    }
    println!("{:=^80}\n", "");
}

fn show_mempool(pool: &Pool) {
    println!("\n{:=^80}", " MEMPOOL CONTENTS ");

    let stats = pool.stats();
    println!("Transactions: {}", stats.count);
    println!(
        "Size: {} of {} bytes ({:.1}%)",
        stats.occupied_bytes.to_formatted_string(&Locale::en),
        stats.capacity_bytes.to_formatted_string(&Locale::en),
        stats.utilization * 100.0
    );

    let txs = pool.by_fee_rate(None);
    if txs.is_empty() {
        println!("\nMempool is empty");
    } else {
        println!("\nTransactions (sorted by fee rate):");
        for (i, tx) in txs.iter().enumerate() {
            println!(
                "{:3}. {} | Fee rate: {:>6.1} sat/byte | Size: {:>5} bytes | Inputs: {} | Outputs: {}",
                i + 1,
                tx.id(),
                tx.fee_rate(),
                tx.size(),
                tx.inputs().len(),
                tx.outputs().len()
            );
        }
    }
    println!("{:=^80}\n", "");
}
