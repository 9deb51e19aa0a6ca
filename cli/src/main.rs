//! Command-line surface (§6.5) over block construction, the KL engine, the W-graph extractor,
//! the Bruhat order, and the binary dump codec.

mod commands;
mod context;
mod error;
mod fixtures;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use context::{BlockSource, Context};

#[derive(Parser, Debug)]
#[command(name = "klv", about = "Kazhdan-Lusztig-Vogan polynomial computation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cross actions, Cayley transforms, descents and length per block element.
    Block {
        #[command(flatten)]
        source: BlockSource,
    },
    /// Like `block`, reporting involution support instead of raw cross/Cayley tables.
    Blockd {
        #[command(flatten)]
        source: BlockSource,
    },
    /// The unitary elements of the block (outside this system's scope).
    Blocku {
        #[command(flatten)]
        source: BlockSource,
    },
    /// The Hasse diagram of the Bruhat order.
    Blockorder {
        #[command(flatten)]
        source: BlockSource,
    },
    /// Writes the block-file dump (§6.2).
    Blockwrite {
        #[command(flatten)]
        source: BlockSource,
        output: PathBuf,
    },
    /// Every non-zero Kazhdan-Lusztig-Vogan polynomial.
    Klbasis {
        #[command(flatten)]
        source: BlockSource,
        #[arg(long)]
        fill_limit: Option<u32>,
    },
    /// Kazhdan-Lusztig-Vogan polynomials for primitive pairs only.
    Primkl {
        #[command(flatten)]
        source: BlockSource,
        #[arg(long)]
        fill_limit: Option<u32>,
    },
    /// The list of all distinct Kazhdan-Lusztig-Vogan polynomials.
    Kllist {
        #[command(flatten)]
        source: BlockSource,
        #[arg(long)]
        fill_limit: Option<u32>,
    },
    /// Writes the KL-matrix file and the KL-polynomial-store file (§6.3-6.4).
    Klwrite {
        #[command(flatten)]
        source: BlockSource,
        #[arg(long)]
        fill_limit: Option<u32>,
        matrix_output: PathBuf,
        poly_output: PathBuf,
    },
    /// The W-graph of the block (§4.7).
    Wgraph {
        #[command(flatten)]
        source: BlockSource,
        #[arg(long)]
        fill_limit: Option<u32>,
    },
    /// The cells of the W-graph.
    Wcells {
        #[command(flatten)]
        source: BlockSource,
        #[arg(long)]
        fill_limit: Option<u32>,
    },
    /// The real-side KGB table of a named small group.
    Smallkgb { name: String },
    /// The dual-side KGB table of a named small group.
    Smalldualkgb { name: String },
    /// Builds and prints the block of a named small group.
    Smallblock { name: String },
    /// Builds and prints the dual block of a named small group.
    Smalldualblock { name: String },
    /// The correspondence between a named small group's block and its dual block.
    Dualmap { name: String },
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = Context::new();

    match cli.command {
        Command::Block { source } => {
            ctx.load(&source)?;
            commands::block(&mut ctx)
        }
        Command::Blockd { source } => {
            ctx.load(&source)?;
            commands::blockd(&mut ctx)
        }
        Command::Blocku { source } => {
            ctx.load(&source)?;
            commands::blocku(&mut ctx)
        }
        Command::Blockorder { source } => {
            ctx.load(&source)?;
            commands::blockorder(&mut ctx)
        }
        Command::Blockwrite { source, output } => {
            ctx.load(&source)?;
            commands::blockwrite(&mut ctx, &output)
        }
        Command::Klbasis { source, fill_limit } => {
            ctx.load(&source)?;
            commands::klbasis(&mut ctx, fill_limit)
        }
        Command::Primkl { source, fill_limit } => {
            ctx.load(&source)?;
            commands::primkl(&mut ctx, fill_limit)
        }
        Command::Kllist { source, fill_limit } => {
            ctx.load(&source)?;
            commands::kllist(&mut ctx, fill_limit)
        }
        Command::Klwrite { source, fill_limit, matrix_output, poly_output } => {
            ctx.load(&source)?;
            commands::klwrite(&mut ctx, fill_limit, &matrix_output, &poly_output)
        }
        Command::Wgraph { source, fill_limit } => {
            ctx.load(&source)?;
            commands::wgraph(&mut ctx, fill_limit)
        }
        Command::Wcells { source, fill_limit } => {
            ctx.load(&source)?;
            commands::wcells(&mut ctx, fill_limit)
        }
        Command::Smallkgb { name } => commands::smallkgb(&name),
        Command::Smalldualkgb { name } => commands::smalldualkgb(&name),
        Command::Smallblock { name } => commands::smallblock(&mut ctx, &name),
        Command::Smalldualblock { name } => commands::smalldualblock(&mut ctx, &name),
        Command::Dualmap { name } => commands::dualmap(&name),
    }
}

/// Exit codes per §6.5/§7: 0 success, 1 input error, 2 memory/fill overflow.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(klv_engine::KlError::FillOverflow { .. }) = err.downcast_ref::<klv_engine::KlError>() {
        2
    } else {
        1
    }
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
