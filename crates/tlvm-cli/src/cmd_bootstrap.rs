/// Implementation of `tlvm bootstrap`.
///
/// Synthesizes a fresh, well-typed collection (two plain strings, one flag,
/// then interesting strings up to `--budget` bytes) and writes it out. Handy
/// for seeding an empty corpus directory.
use std::fs;

use anyhow::{Context, Result};
use tlvm_mutator::{BlockCollection, MutatorConfig};
use tlvm_types::TypeRegistry;

use crate::BootstrapArgs;

/// Run the `tlvm bootstrap` command.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn run(args: &BootstrapArgs) -> Result<()> {
    let registry = TypeRegistry::standard();
    let mut collection = BlockCollection::new(&registry, MutatorConfig::default(), args.seed);
    collection.bootstrap(args.budget);
    collection.canonicalize();

    let bytes = collection.encode_to_vec().context("failed to encode collection")?;
    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    println!(
        "Wrote {} records ({} bytes) to {}",
        collection.len(),
        bytes.len(),
        args.output.display()
    );
    Ok(())
}
