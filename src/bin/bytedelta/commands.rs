use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::{Cli, Command, DiffArgs, PatchArgs, ShowArgs, StepsArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Steps(args) => cmd_steps(&args),
        Command::Diff(args) => cmd_diff(&args),
        Command::Patch(args) => cmd_patch(&args),
        Command::Show(args) => cmd_show(&args),
    }
}

fn cmd_steps(args: &StepsArgs) -> anyhow::Result<()> {
    let (a, b) = (args.a.as_bytes(), args.b.as_bytes());
    let deltas = bytedelta::diff(a, b);

    let mut out = io::stdout().lock();
    for (step, (delta, buffer)) in bytedelta::replay(a, &deltas).enumerate() {
        write!(out, "{} Offset: {}", step + 1, delta.offset)?;
        if delta.delete > 0 {
            write!(out, " Delete: {}", delta.delete)?;
        }
        if delta.has_insert() {
            write!(out, " Insert: '{}'", String::from_utf8_lossy(&delta.insert))?;
        }
        writeln!(out, " Result: {}", String::from_utf8_lossy(&buffer))?;
    }
    Ok(())
}

fn cmd_diff(args: &DiffArgs) -> anyhow::Result<()> {
    let old = read_file(&args.old)?;
    let new = read_file(&args.new)?;

    let deltas = bytedelta::diff(&old, &new);
    info!(
        records = deltas.len(),
        cost = bytedelta::cost(&deltas),
        "diffed {} against {}",
        args.old.display(),
        args.new.display()
    );

    let out = open_output(args.output.as_deref())?;
    bytedelta::write_to(out, &deltas, &old).context("failed to write patch")
}

fn cmd_patch(args: &PatchArgs) -> anyhow::Result<()> {
    let old = read_file(&args.old)?;
    let reader = open_input(&args.patch)?;
    let patched = bytedelta::patch(&old, reader)
        .with_context(|| format!("failed to apply {}", args.patch.display()))?;

    let mut out = open_output(args.output.as_deref())?;
    out.write_all(&patched)?;
    out.flush()?;
    Ok(())
}

fn cmd_show(args: &ShowArgs) -> anyhow::Result<()> {
    let patch = bytedelta::read_from(open_input(&args.patch)?)
        .with_context(|| format!("failed to read {}", args.patch.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&patch)?);
        return Ok(());
    }

    println!(
        "source:  {} bytes, blake3 {}",
        patch.source_len,
        patch.source_hash.to_hex()
    );
    println!("target:  {} bytes", patch.target_len);
    println!(
        "records: {} (cost {})",
        patch.deltas.len(),
        bytedelta::cost(&patch.deltas)
    );
    for (index, delta) in patch.deltas.iter().enumerate() {
        println!(
            "{:>6}  offset {:<8} delete {:<8} insert {}",
            index + 1,
            delta.offset,
            delta.delete,
            delta.insert.len()
        );
    }
    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn open_input(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}
