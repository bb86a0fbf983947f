//! Serialises a [`Network`] to the text format.

use std::io::{self, Write};

use crate::{network::Network, params::GenerationParams};

/// Writes `network` to `out`.
///
/// Output is a pure function of the network, so identical parameters give
/// byte-identical files. The problem line reports the realised arc and
/// interdependency counts. When both cost bounds are `1` the maximum-flow
/// form is written instead and interdependencies are omitted.
///
/// # Errors
/// Returns any error reported by `out`.
///
/// # Examples
/// ```
/// use netgen_core::{GenerationParams, GeneratorBuilder, write_network};
///
/// let network = GeneratorBuilder::new()
///     .with_params(GenerationParams {
///         seed: 123,
///         nodes: 10,
///         sources: 2,
///         sinks: 2,
///         density: 20,
///         interdependencies: 2,
///         ..GenerationParams::default()
///     })
///     .build()
///     .expect("parameters are valid")
///     .generate()
///     .expect("generation succeeds");
/// let mut buffer = Vec::new();
/// write_network(&network, &mut buffer).expect("writing to memory succeeds");
/// let text = String::from_utf8(buffer).expect("output is UTF-8");
/// assert!(text.lines().any(|line| line.starts_with("p min 10 ")));
/// ```
pub fn write_network<W: Write>(network: &Network, mut out: W) -> io::Result<()> {
    let params = network.params();
    write_header(params, &mut out)?;
    if params.is_max_flow() {
        write_max_flow(network, &mut out)?;
    } else {
        write_min_cost(network, &mut out)?;
    }
    out.flush()
}

fn write_header(params: &GenerationParams, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "c NETGEN flow network generator")?;
    writeln!(out, "c Modified to generate interdependent networks")?;
    writeln!(out, "c  ---------------------------")?;
    writeln!(out, "c   Random seed:          {}", params.seed)?;
    writeln!(out, "c   Number of nodes:      {}", params.nodes)?;
    writeln!(out, "c   Source nodes:         {}", params.sources)?;
    writeln!(out, "c   Sink nodes:           {}", params.sinks)?;
    writeln!(out, "c   Number of arcs:       {}", params.density)?;
    writeln!(out, "c   Minimum arc cost:     {}", params.min_cost)?;
    writeln!(out, "c   Maximum arc cost:     {}", params.max_cost)?;
    writeln!(out, "c   Total supply:         {}", params.supply)?;
    writeln!(out, "c   Transshipment -")?;
    writeln!(out, "c     Sources:            {}", params.transshipment_sources)?;
    writeln!(out, "c     Sinks:              {}", params.transshipment_sinks)?;
    writeln!(out, "c   Skeleton arcs -")?;
    writeln!(out, "c     With max cost:      {}%", params.hicost_percent)?;
    writeln!(out, "c     Capacitated:        {}%", params.capacitated_percent)?;
    writeln!(out, "c   Minimum arc capacity: {}", params.min_capacity)?;
    writeln!(out, "c   Maximum arc capacity: {}", params.max_capacity)?;
    writeln!(out, "c   Interdependencies -")?;
    writeln!(out, "c     Parents:            {}", params.parent_mode.label())?;
    writeln!(out, "c     Number:             {}", params.interdependencies)?;
    Ok(())
}

fn write_max_flow(network: &Network, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "c")?;
    writeln!(out, "c  *** Maximum flow ***")?;
    writeln!(out, "c")?;
    writeln!(out, "p max {} {}", network.node_count(), network.arc_count())?;
    for (id, &balance) in (1..).zip(network.balances()) {
        if balance > 0 {
            writeln!(out, "n {id} s")?;
        } else if balance < 0 {
            writeln!(out, "n {id} t")?;
        }
    }
    for arc in network.arcs() {
        writeln!(out, "a {} {} {}", arc.tail, arc.head, arc.capacity)?;
    }
    Ok(())
}

fn write_min_cost(network: &Network, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "c")?;
    writeln!(out, "c  *** Minimum cost flow ***")?;
    writeln!(out, "c")?;
    writeln!(
        out,
        "p min {} {} {} {}",
        network.node_count(),
        network.arc_count(),
        network.interdependencies().len(),
        network.parent_mode().token()
    )?;
    for (id, &balance) in (1..).zip(network.balances()) {
        if balance != 0 {
            writeln!(out, "n {id} {balance}")?;
        }
    }
    for arc in network.arcs() {
        writeln!(
            out,
            "a {} {} 0 {} {}",
            arc.tail, arc.head, arc.capacity, arc.cost
        )?;
    }
    for pair in network.interdependencies() {
        writeln!(out, "i {} {}", pair.parent, pair.child)?;
    }
    Ok(())
}
