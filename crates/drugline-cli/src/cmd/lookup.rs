//! `drugline lookup` - pathway count for a drug id

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use drugline_drugbank::{Document, PathwayCountIndex};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Drug ids to look up (e.g. DB00001)
    #[arg(required_unless_present = "stdin")]
    pub ids: Vec<String>,

    /// Answer `{"drug_id": ...}` JSON requests read line by line from stdin
    #[arg(long, conflicts_with = "ids")]
    pub stdin: bool,

    /// DrugBank XML export (default: from config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

pub fn run(args: LookupArgs, config: &Config) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.drugbank.input.clone());
    let doc = Document::from_path(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let index = PathwayCountIndex::from_root(doc.root(), &config.namespace())?;
    log::debug!("Indexed {} drug ids", index.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.stdin {
        serve_lines(&index, std::io::stdin().lock(), &mut out)
    } else {
        for id in &args.ids {
            writeln!(out, "{}", serde_json::to_string(&index.lookup(id))?)?;
        }
        Ok(())
    }
}

/// One JSON response line per request line; malformed requests are logged and skipped
fn serve_lines<R: BufRead, W: Write>(
    index: &PathwayCountIndex,
    input: R,
    out: &mut W,
) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match index.handle(&line) {
            Ok(response) => writeln!(out, "{response}")?,
            Err(e) => log::warn!("Bad request {line:?}: {e}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drugline_drugbank::model::PathwayDrugCount;

    #[test]
    fn serve_lines_answers_each_request() {
        let index = PathwayCountIndex::new(vec![PathwayDrugCount {
            id: "DB00001".to_string(),
            count: 3,
        }]);
        let input = "{\"drug_id\": \"DB00001\"}\n\nnot json\n{\"drug_id\": \"DB00002\"}\n";
        let mut out = Vec::new();
        serve_lines(&index, input.as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"count\":3}\n{\"error\":\"Drug not found\"}\n"
        );
    }
}
