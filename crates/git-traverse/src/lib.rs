//! Fixture runs for the sorted index and the tree codec.
//!
//! Each run builds its entries from [`SAMPLES`], drives one primitive and
//! compares what comes back against the expected order. Any mismatch is an
//! error; the caller decides how to report it.

use anyhow::{bail, ensure, Context, Result};
use bstr::BStr;
use git_hash::ObjectId;
use git_index::{Index, IndexEntry, IndexError};
use git_object::{tree_id, FileMode, TreeBuilder, TreeCursor};
use tracing::{debug, info};

/// One fixture entry: a path and the sequence number its object id comes from.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub seq: u32,
    pub path: &'static str,
}

impl Sample {
    pub fn oid(&self) -> ObjectId {
        ObjectId::from_sequence(self.seq)
    }

    pub fn to_entry(&self) -> IndexEntry {
        IndexEntry::new(self.path, FileMode::Regular, self.oid())
    }
}

/// Deliberately out of order so the index has to sort.
pub const SAMPLES: [Sample; 3] = [
    Sample { seq: 1, path: "a" },
    Sample { seq: 2, path: "c" },
    Sample { seq: 3, path: "b" },
];

/// `samples` sorted by path, as the index should yield them.
fn expected_order(samples: &[Sample]) -> Vec<Sample> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));
    sorted
}

fn build_index(samples: &[Sample]) -> Result<Index> {
    let mut index = Index::new();
    for sample in samples {
        index
            .insert(sample.to_entry())
            .with_context(|| format!("unable to add cache entry: {}", sample.path))?;
        debug!(path = sample.path, seq = sample.seq, "inserted");
    }
    Ok(index)
}

/// Insert every sample, check the walk order, check a repeated path is
/// refused, then discard.
pub fn test_index(samples: &[Sample]) -> Result<()> {
    let mut index = build_index(samples)?;
    let expected = expected_order(samples);

    ensure!(
        index.len() == expected.len(),
        "index holds {} entries, expected {}",
        index.len(),
        expected.len()
    );
    for (entry, want) in index.iter().zip(&expected) {
        ensure!(
            entry.path == want.path && entry.oid == want.oid(),
            "index walk produced '{}' ({}), expected '{}' ({})",
            entry.path,
            entry.oid,
            want.path,
            want.oid()
        );
    }

    if let Some(first) = samples.first() {
        let before = index.clone();
        match index.insert(first.to_entry()) {
            Err(IndexError::DuplicatePath { .. }) => {}
            Err(e) => return Err(e).context("unexpected error re-adding an existing path"),
            Ok(()) => bail!("index accepted duplicate path '{}'", first.path),
        }
        ensure!(index == before, "rejected insert changed the index");
    }

    index.discard();
    ensure!(index.is_empty(), "discarded index still holds entries");
    info!(entries = samples.len(), "index fixture passed");
    Ok(())
}

/// Encode the samples in index order and walk the result with a cursor.
pub fn test_tree(samples: &[Sample]) -> Result<()> {
    let expected = expected_order(samples);

    let mut builder = TreeBuilder::with_capacity(expected.len());
    for sample in &expected {
        builder.push(sample.to_entry().as_tree_entry())?;
    }
    let buf = builder.finish();
    debug!(bytes = buf.len(), "encoded tree");

    let index = build_index(samples)?;
    ensure!(
        index.write_tree()? == buf,
        "index encoding differs from sorted fixture encoding"
    );

    let mut cursor = TreeCursor::open(&buf).context("unable to open tree cursor")?;
    for want in &expected {
        let Some(entry) = cursor.current() else {
            bail!("tree ended early, expected '{}'", want.path);
        };
        ensure!(
            entry.path == BStr::new(want.path) && entry.oid == want.oid(),
            "tree yielded '{}' ({}), expected '{}' ({})",
            entry.path,
            entry.oid,
            want.path,
            want.oid()
        );
        ensure!(
            entry.mode == FileMode::Regular,
            "tree entry '{}' has mode {:o}",
            entry.path,
            entry.mode.raw()
        );
        cursor.advance()?;
    }
    if let Some(extra) = cursor.current() {
        bail!("tree has unexpected trailing entry '{}'", extra.path);
    }

    let oid = tree_id(&buf)?;
    ensure!(oid == tree_id(&buf)?, "tree id is not deterministic");
    info!(entries = expected.len(), tree = %oid, "tree fixture passed");
    Ok(())
}

/// Run every fixture against [`SAMPLES`].
pub fn run_all() -> Result<()> {
    test_index(&SAMPLES)?;
    test_tree(&SAMPLES)?;
    Ok(())
}
