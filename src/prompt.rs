use crate::{
    chains::{Chain, ChainRegistry},
    payload::DataSize,
};
use eyre::{Result, bail, eyre};
use std::io::{BufRead, Write};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print `question` and read one line of input.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before a selection was made");
    }
    Ok(line.trim().to_owned())
}

fn render_group<'a, W: Write>(
    output: &mut W,
    title: &str,
    chains: impl Iterator<Item = (u32, &'a Chain)>,
) -> Result<()> {
    writeln!(output, "{title}")?;
    writeln!(output)?;
    for (key, chain) in chains {
        writeln!(output, "   {key}.  {}", chain.name)?;
        writeln!(output, "       └─ {}", chain.rpc)?;
    }
    writeln!(output)?;
    Ok(())
}

/// Present the network menu and return the chosen chain.
///
/// An unknown or unparseable answer is an error.
pub fn select_chain<R: BufRead, W: Write>(
    registry: &ChainRegistry,
    input: &mut R,
    output: &mut W,
) -> Result<Chain> {
    writeln!(output, "\n\n{RULE}\n")?;
    render_group(output, "🌐 TESTNET NETWORKS", registry.testnets())?;
    render_group(output, "🚀 MAINNET NETWORKS", registry.mainnets())?;
    writeln!(output, "{RULE}")?;

    let (lo, hi) = registry
        .selection_range()
        .ok_or_else(|| eyre!("no networks configured"))?;
    let answer = ask(input, output, &format!("Select chain ({lo}-{hi}): "))?;

    let selection = answer
        .parse::<u32>()
        .map_err(|_| eyre!("invalid chain selection: {answer:?}"))?;
    chain_by_selection(registry, selection)
}

/// Resolve a menu number to its chain, as typed at the menu or passed on
/// the command line.
pub fn chain_by_selection(registry: &ChainRegistry, selection: u32) -> Result<Chain> {
    registry
        .get(selection)
        .cloned()
        .ok_or_else(|| eyre!("invalid chain selection: {selection}"))
}

/// Present the payload size menu and return the chosen size.
///
/// Option 5 asks for a custom size, which is parsed leniently. Any other
/// answer outside 1-5 is an error.
pub fn select_data_size<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<DataSize> {
    writeln!(output, "\n📦 DATA SIZE OPTIONS\n")?;
    writeln!(output, "   1.  Small    ({})", DataSize::SMALL)?;
    writeln!(output, "   2.  Medium   ({})", DataSize::MEDIUM)?;
    writeln!(output, "   3.  Large    ({})", DataSize::LARGE)?;
    writeln!(output, "   4.  Max      ({})", DataSize::MAX)?;
    writeln!(output, "   5.  Custom   (specify KB)")?;
    writeln!(output)?;

    let answer = ask(input, output, "Select data size (1-5): ")?;
    let size = match answer.parse::<u32>() {
        Ok(1) => DataSize::SMALL,
        Ok(2) => DataSize::MEDIUM,
        Ok(3) => DataSize::LARGE,
        Ok(4) => DataSize::MAX,
        Ok(5) => {
            let custom = ask(input, output, "Enter KB size (max 64): ")?;
            DataSize::parse_lenient(&custom)
        }
        _ => bail!("invalid data size selection: {answer:?}"),
    };
    Ok(size)
}
