/// Implementation of `tlvm mutate`.
///
/// Runs the same pipeline the fuzzer hook runs, with a seeded stand-in for
/// libFuzzer's byte mutator so results are reproducible from the command
/// line. With `--rounds R` the output of each round is fed into the next,
/// round `i` using seed `seed + i`.
use std::fs;

use anyhow::{Context, Result};
use tlvm_mutator::{BlockCollection, MutatorConfig, SeededByteMutator, TlvMutator};
use tlvm_types::TypeRegistry;
use tracing::debug;

use crate::MutateArgs;

/// Run the `tlvm mutate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written.
pub fn run(args: &MutateArgs) -> Result<()> {
    let mut data =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let registry = TypeRegistry::standard();
    let mut config = MutatorConfig::default();
    if let Some(attempts) = args.max_attempts {
        config.max_attempts = attempts;
    }
    let mutator = TlvMutator::with_config(&registry, config);

    for round in 0..args.rounds {
        let seed = args.seed.wrapping_add(round);
        let mut bytes = SeededByteMutator::new(u64::from(seed));
        data = mutator.mutate_to_vec(&data, args.max_size, seed, &mut bytes);
        debug!(round, seed, size = data.len(), "mutation round done");
    }

    if let Some(output) = &args.output {
        fs::write(output, &data).with_context(|| format!("cannot write {}", output.display()))?;
        println!("Wrote {} bytes to {}", data.len(), output.display());
    } else {
        let collection =
            BlockCollection::from_bytes(&registry, config, u64::from(args.seed), &data);
        println!(
            "{} bytes, {} records (budget {})",
            data.len(),
            collection.len(),
            args.max_size
        );
        print!("{collection}");
    }
    Ok(())
}
