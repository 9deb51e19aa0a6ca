//! §4.9: the `Context` a subcommand operates on. No global state is kept anywhere else in this
//! crate — a fresh `Context` is built once per invocation and threaded through explicitly.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use klv_block::{build_block, Block};
use klv_codec::BlockDump;
use klv_engine::KlStore;

use crate::error::CliError;
use crate::fixtures;

/// How a subcommand obtains the block it operates on. "Loading a group" in this system means
/// either constructing one of the fixed small groups directly, or deserializing a previously
/// written block-file dump (§6.2) — there is no general root-datum/KGB loader in scope (§6.1).
#[derive(Args, Clone, Debug)]
pub struct BlockSource {
    /// Name of a small, hand-tabulated group (see `smallkgb --help` for the list).
    #[arg(long, conflicts_with = "from_dump")]
    pub small: Option<String>,

    /// Path to a block-file dump (§6.2) previously written by `blockwrite`.
    #[arg(long, conflicts_with = "small")]
    pub from_dump: Option<PathBuf>,

    /// Swaps the real and dual sides before building (the block's own dual block).
    #[arg(long)]
    pub dual: bool,
}

pub struct Context {
    pub block: Option<Block>,
    pub store: Option<KlStore>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            block: None,
            store: None,
        }
    }

    /// Loads the block named by `source` into `self`, resetting any previously filled KL store.
    pub fn load(&mut self, source: &BlockSource) -> Result<()> {
        let block = if let Some(name) = &source.small {
            let (real, dual, map) = fixtures::resolve(name)?;
            if source.dual {
                build_block(&dual, &real, &map.reversed())?
            } else {
                build_block(&real, &dual, &map)?
            }
        } else if let Some(path) = &source.from_dump {
            let file = File::open(path)?;
            let mut reader = BufReader::new(file);
            BlockDump::read(&mut reader)?.to_block()
        } else {
            return Err(CliError::NoBlockLoaded.into());
        };
        self.store = Some(KlStore::new(block.size()));
        self.block = Some(block);
        Ok(())
    }

    pub fn block(&self) -> Result<&Block> {
        self.block.as_ref().ok_or_else(|| CliError::NoBlockLoaded.into())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
