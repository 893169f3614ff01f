use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bytedelta",
    about = "Byte-level diff and patch",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log what the diff engine and codec are doing (to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two strings and print the buffer after every edit
    Steps(StepsArgs),
    /// Write a patch that turns OLD into NEW
    Diff(DiffArgs),
    /// Apply a patch to OLD
    Patch(PatchArgs),
    /// Print the header and records of a patch
    Show(ShowArgs),
}

#[derive(Args)]
pub struct StepsArgs {
    pub a: String,
    pub b: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Write the patch here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct PatchArgs {
    pub old: PathBuf,
    pub patch: PathBuf,
    /// Write the patched bytes here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub patch: PathBuf,
    /// Print the decoded patch as JSON
    #[arg(long)]
    pub json: bool,
}
