/// Implementation of `tlvm crossover`.
///
/// Splices the records of two TLV files into a new one no larger than
/// `--max-size`. Fails when either input decodes to no records, mirroring
/// the hook's empty result.
use std::fs;

use anyhow::{Context, Result, bail};
use tlvm_mutator::TlvMutator;
use tlvm_types::TypeRegistry;

use crate::CrossoverArgs;

/// Run the `tlvm crossover` command.
///
/// # Errors
///
/// Returns an error if an input cannot be read, the splice is refused, or
/// the output cannot be written.
pub fn run(args: &CrossoverArgs) -> Result<()> {
    let first =
        fs::read(&args.first).with_context(|| format!("cannot read {}", args.first.display()))?;
    let second = fs::read(&args.second)
        .with_context(|| format!("cannot read {}", args.second.display()))?;

    let registry = TypeRegistry::standard();
    let mutator = TlvMutator::new(&registry);
    let out = mutator.crossover_to_vec(&first, &second, args.seed, args.max_size);
    if out.is_empty() {
        bail!("crossover produced nothing: an input has no valid records or the budget is too small");
    }

    fs::write(&args.output, &out)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    println!("Wrote {} bytes to {}", out.len(), args.output.display());
    Ok(())
}
