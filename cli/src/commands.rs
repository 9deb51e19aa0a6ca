//! One function per subcommand (§6.5), each `fn(&mut Context, ...) -> anyhow::Result<()>`.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Result;
use klv_block::{Block, UNDEF_BLOCK};
use klv_codec::{BlockDump, MatrixDump, PolyStoreDump};
use klv_engine::{support, BruhatOrder, KlStore, WGraph};
use klv_kgb::Kgb;

use crate::context::Context;
use crate::error::CliError;
use crate::fixtures;

fn fill_default(block: &Block, store: &mut KlStore, fill_limit: Option<u32>) -> Result<()> {
    let limit = fill_limit.unwrap_or(block.size() as u32 - 1);
    klv_engine::fill(store, block, limit)?;
    Ok(())
}

fn fmt_opt(z: u32) -> String {
    if z == UNDEF_BLOCK {
        "*".to_string()
    } else {
        z.to_string()
    }
}

/// `block`: cross actions, Cayley transforms, descents and length per element.
pub fn block(ctx: &mut Context) -> Result<()> {
    let block = ctx.block()?;
    for z in 0..block.size() as u32 {
        let crosses: Vec<String> = (0..block.rank()).map(|s| fmt_opt(block.cross(s, z))).collect();
        let cayleys: Vec<String> = (0..block.rank())
            .map(|s| {
                let (a, b) = block.cayley(s, z);
                format!("({},{})", fmt_opt(a), fmt_opt(b))
            })
            .collect();
        let descents: Vec<String> = (0..block.rank()).map(|s| format!("{:?}", block.descent(s, z))).collect();
        println!(
            "{z:>4}: cross [{}]  cayley [{}]  descent [{}]  length {}",
            crosses.join(","),
            cayleys.join(","),
            descents.join(","),
            block.length(z)
        );
    }
    Ok(())
}

/// `blockd`: like `block`, but reports each element's involution support (the reduced-involution
/// substitute this system carries, since Weyl-word reduction is out of scope, §6.1).
pub fn blockd(ctx: &mut Context) -> Result<()> {
    let block = ctx.block()?;
    for z in 0..block.size() as u32 {
        println!(
            "{z:>4}: length {}  involution support {:#x}",
            block.length(z),
            block.involution_support(z).bits()
        );
    }
    Ok(())
}

/// `blocku`: the unitary elements of the block. Classifying unitarity requires the unitary dual
/// algorithm, which this system does not implement (no module in its scope computes it).
pub fn blocku(_ctx: &mut Context) -> Result<()> {
    Err(CliError::OutOfScope { command: "blocku" }.into())
}

/// `blockorder`: the Hasse diagram of the Bruhat order (§4.8).
pub fn blockorder(ctx: &mut Context) -> Result<()> {
    let block = ctx.block()?;
    let order = BruhatOrder::build(block);
    println!("block size: {}", block.size());
    for z in 0..block.size() as u32 {
        let covers: Vec<String> = order.covers(z).iter().map(|w| w.to_string()).collect();
        println!("{z:>4} covers [{}]", covers.join(","));
    }
    Ok(())
}

/// `blockwrite`: dumps the block to a binary file (§6.2).
pub fn blockwrite(ctx: &mut Context, output: &Path) -> Result<()> {
    let block = ctx.block()?;
    let dump = BlockDump::from_block(block);
    let mut w = BufWriter::new(File::create(output)?);
    dump.write(&mut w)?;
    println!("wrote block dump to {}", output.display());
    Ok(())
}

/// `klbasis`: every non-zero `P_{x,y}`, one `y` at a time.
pub fn klbasis(ctx: &mut Context, fill_limit: Option<u32>) -> Result<()> {
    let block = ctx.block.as_ref().ok_or(CliError::NoBlockLoaded)?;
    let store = ctx.store.as_mut().ok_or(CliError::NoBlockLoaded)?;
    fill_default(block, store, fill_limit)?;

    println!("Full list of non-zero Kazhdan-Lusztig-Vogan polynomials:\n");
    for y in 0..block.size() as u32 {
        let Some(row) = store.row(y) else { continue };
        let ds = support::descent_set(block, y);
        for (ord, x) in (0..y).filter(|&x| support::is_primitive(block, x, ds)).enumerate() {
            let poly = store.polys().get(row.get(ord));
            if !poly.is_zero() {
                println!("P_{{{x},{y}}} = {:?}", poly.coeffs());
            }
        }
    }
    Ok(())
}

/// `primkl`: only the primitive pairs — the ones no easy recursion formula resolves directly.
pub fn primkl(ctx: &mut Context, fill_limit: Option<u32>) -> Result<()> {
    let block = ctx.block.as_ref().ok_or(CliError::NoBlockLoaded)?;
    let store = ctx.store.as_mut().ok_or(CliError::NoBlockLoaded)?;
    fill_default(block, store, fill_limit)?;

    println!("Kazhdan-Lusztig-Vogan polynomials for primitive pairs:\n");
    for y in 0..block.size() as u32 {
        let Some(row) = store.row(y) else { continue };
        for (ord, x) in support::primitive_row(block, y).into_iter().enumerate() {
            let poly = store.polys().get(row.get(ord));
            println!("P_{{{x},{y}}} = {:?}", poly.coeffs());
        }
    }
    Ok(())
}

/// `kllist`: the list of all distinct Kazhdan-Lusztig-Vogan polynomials in the store.
pub fn kllist(ctx: &mut Context, fill_limit: Option<u32>) -> Result<()> {
    let block = ctx.block.as_ref().ok_or(CliError::NoBlockLoaded)?;
    let store = ctx.store.as_mut().ok_or(CliError::NoBlockLoaded)?;
    fill_default(block, store, fill_limit)?;

    for (i, p) in store.polys().iter().enumerate() {
        println!("{i}: {:?}", p.coeffs());
    }
    Ok(())
}

/// `klwrite`: the matrix file and polynomial-store file (§6.3-6.4). The matrix file needs every
/// row filled, so a `--fill-limit` short of the whole block is rejected rather than left to panic
/// inside `MatrixDump::from_store`.
pub fn klwrite(ctx: &mut Context, fill_limit: Option<u32>, matrix_output: &Path, poly_output: &Path) -> Result<()> {
    let block = ctx.block.as_ref().ok_or(CliError::NoBlockLoaded)?;
    let full = block.size() as u32 - 1;
    if let Some(limit) = fill_limit {
        if limit < full {
            return Err(CliError::RowNotFilled { y: full }.into());
        }
    }
    let store = ctx.store.as_mut().ok_or(CliError::NoBlockLoaded)?;
    fill_default(block, store, Some(full))?;

    let matrix = MatrixDump::from_store(block, store);
    let mut w = BufWriter::new(File::create(matrix_output)?);
    matrix.write(&mut w)?;
    println!("wrote matrix entries to {}", matrix_output.display());

    let polys = PolyStoreDump::from_store(store.polys());
    let mut w = BufWriter::new(File::create(poly_output)?);
    polys.write(&mut w)?;
    println!("wrote polynomial coefficients to {}", poly_output.display());
    Ok(())
}

/// `wgraph`: the W-graph on the filled block (§4.7).
pub fn wgraph(ctx: &mut Context, fill_limit: Option<u32>) -> Result<()> {
    let block = ctx.block.as_ref().ok_or(CliError::NoBlockLoaded)?;
    let store = ctx.store.as_mut().ok_or(CliError::NoBlockLoaded)?;
    fill_default(block, store, fill_limit)?;

    let wg = WGraph::build(block, store);
    for z in 0..wg.vertex_count() as u32 {
        println!("{z:>4}: descent set {:#x}", wg.descent_set(z).bits());
    }
    for e in wg.edges() {
        println!("{} -> {}  weight {}", e.from, e.to, e.weight);
    }
    Ok(())
}

/// `wcells`: the strongly connected components of the W-graph's directed edges.
///
/// Cell decomposition is ambient glue over an already-built `WGraph`, not a named module in this
/// system's scope — implemented directly here with a plain Tarjan pass rather than exposed from
/// `klv_engine`.
pub fn wcells(ctx: &mut Context, fill_limit: Option<u32>) -> Result<()> {
    let block = ctx.block.as_ref().ok_or(CliError::NoBlockLoaded)?;
    let store = ctx.store.as_mut().ok_or(CliError::NoBlockLoaded)?;
    fill_default(block, store, fill_limit)?;

    let wg = WGraph::build(block, store);
    let cells = tarjan_scc(wg.vertex_count(), wg.edges());
    for (i, cell) in cells.iter().enumerate() {
        let members: Vec<String> = cell.iter().map(|z| z.to_string()).collect();
        println!("cell {i}: [{}]", members.join(","));
    }
    Ok(())
}

fn tarjan_scc(n: usize, edges: &[klv_engine::WGraphEdge]) -> Vec<Vec<u32>> {
    let mut adj = vec![Vec::new(); n];
    for e in edges {
        adj[e.from as usize].push(e.to);
    }

    struct State {
        index: Vec<Option<u32>>,
        lowlink: Vec<u32>,
        on_stack: Vec<bool>,
        stack: Vec<u32>,
        counter: u32,
        sccs: Vec<Vec<u32>>,
    }

    fn strongconnect(v: u32, adj: &[Vec<u32>], st: &mut State) {
        st.index[v as usize] = Some(st.counter);
        st.lowlink[v as usize] = st.counter;
        st.counter += 1;
        st.stack.push(v);
        st.on_stack[v as usize] = true;

        for &w in &adj[v as usize] {
            if st.index[w as usize].is_none() {
                strongconnect(w, adj, st);
                st.lowlink[v as usize] = st.lowlink[v as usize].min(st.lowlink[w as usize]);
            } else if st.on_stack[w as usize] {
                st.lowlink[v as usize] = st.lowlink[v as usize].min(st.index[w as usize].unwrap());
            }
        }

        if st.lowlink[v as usize] == st.index[v as usize].unwrap() {
            let mut component = Vec::new();
            loop {
                let w = st.stack.pop().unwrap();
                st.on_stack[w as usize] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            component.sort_unstable();
            st.sccs.push(component);
        }
    }

    let mut st = State {
        index: vec![None; n],
        lowlink: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        counter: 0,
        sccs: Vec::new(),
    };
    for v in 0..n as u32 {
        if st.index[v as usize].is_none() {
            strongconnect(v, &adj, &mut st);
        }
    }
    st.sccs
}

fn print_kgb(kgb: &dyn Kgb) {
    for x in 0..kgb.size() as u32 {
        let status: Vec<String> = (0..kgb.rank()).map(|s| format!("{:?}", kgb.status(s, x))).collect();
        let cross: Vec<String> = (0..kgb.rank()).map(|s| fmt_opt(kgb.cross(s, x))).collect();
        println!(
            "{x:>4}: status [{}]  cross [{}]  length {}  cartan {}",
            status.join(","),
            cross.join(","),
            kgb.length(x),
            kgb.cartan_class(x)
        );
    }
}

/// `smallkgb`: the real-side KGB table of a named small group.
pub fn smallkgb(name: &str) -> Result<()> {
    let (real, _, _) = fixtures::resolve(name)?;
    print_kgb(&real);
    Ok(())
}

/// `smalldualkgb`: the dual-side KGB table of a named small group.
pub fn smalldualkgb(name: &str) -> Result<()> {
    let (_, dual, _) = fixtures::resolve(name)?;
    print_kgb(&dual);
    Ok(())
}

/// `smallblock`: builds and loads the block for a named small group.
pub fn smallblock(ctx: &mut Context, name: &str) -> Result<()> {
    let (real, dual, map) = fixtures::resolve(name)?;
    let built = klv_block::build_block(&real, &dual, &map)?;
    ctx.store = Some(KlStore::new(built.size()));
    ctx.block = Some(built);
    block(ctx)
}

/// `smalldualblock`: builds and loads the dual of a named small group's block (real and dual
/// sides swapped).
pub fn smalldualblock(ctx: &mut Context, name: &str) -> Result<()> {
    let (real, dual, map) = fixtures::resolve(name)?;
    let built = klv_block::build_block(&dual, &real, &map.reversed())?;
    ctx.store = Some(KlStore::new(built.size()));
    ctx.block = Some(built);
    block(ctx)
}

/// `dualmap`: the correspondence `z <-> z'` between a block and its dual block, via their shared
/// `(x, y)` coordinates (`z = (x, y)` in the block corresponds to `z' = (y, x)` in the dual).
pub fn dualmap(name: &str) -> Result<()> {
    let (real, dual, map) = fixtures::resolve(name)?;
    let block = klv_block::build_block(&real, &dual, &map)?;
    let dual_block = klv_block::build_block(&dual, &real, &map.reversed())?;

    let mut seen = HashSet::new();
    let mut pairs = Vec::with_capacity(block.size());
    for z in 0..block.size() as u32 {
        let z_prime = dual_block.element(block.y(z), block.x(z));
        pairs.push((z, z_prime));
        seen.insert(z_prime);
    }
    println!("[{}]", pairs.iter().map(|(_, zp)| fmt_opt(*zp)).collect::<Vec<_>>().join(", "));
    if seen.len() != block.size() || pairs.iter().any(|&(_, zp)| zp == UNDEF_BLOCK) {
        log::warn!("dual map is not a bijection onto the dual block's elements");
    }
    Ok(())
}
