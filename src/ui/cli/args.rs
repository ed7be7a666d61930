// Sat Oct 17 2026 - Alex

use crate::memory::Endianness;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memory-renderer")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Render and edit memory dumps as hex, integer and ASCII tables", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Dump(DumpArgs),
    Edit(EditArgs),
    List(ListArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct BlockArgs {
    #[arg(short, long)]
    pub file: PathBuf,

    /// Address of the first byte of the file.
    #[arg(short, long, default_value = "0")]
    pub base: String,

    #[arg(long, default_value = "4")]
    pub address_size: usize,

    #[arg(long)]
    pub endianness: Option<Endianness>,
}

#[derive(Parser, Debug)]
pub struct DumpArgs {
    #[command(flatten)]
    pub block: BlockArgs,

    #[arg(short, long, default_value = "raw-hex")]
    pub rendering: String,

    #[arg(short, long)]
    pub address: Option<String>,

    #[arg(short = 'n', long, default_value = "256")]
    pub length: usize,

    #[arg(long)]
    pub column_units: Option<usize>,

    /// Earlier dump of the same memory; differing bytes are highlighted.
    #[arg(long)]
    pub compare: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    #[command(flatten)]
    pub block: BlockArgs,

    #[arg(short, long, default_value = "raw-hex")]
    pub rendering: String,

    #[arg(short, long)]
    pub address: String,

    #[arg(short, long)]
    pub text: String,

    #[arg(long)]
    pub column_units: Option<usize>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub view: Option<String>,

    #[arg(long, default_value = "1")]
    pub addressable_size: usize,
}

impl BlockArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.file.exists() {
            return Err(format!("Input file does not exist: {:?}", self.file));
        }
        if self.address_size == 0 {
            return Err("Address size must be at least 1".to_string());
        }
        Ok(())
    }
}

impl DumpArgs {
    pub fn validate(&self) -> Result<(), String> {
        self.block.validate()?;
        if self.length == 0 {
            return Err("Length must be at least 1".to_string());
        }
        Ok(())
    }
}

impl EditArgs {
    pub fn validate(&self) -> Result<(), String> {
        self.block.validate()?;
        if self.text.trim().is_empty() {
            return Err("Edit text must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump() {
        let args = Args::try_parse_from([
            "memory-renderer",
            "dump",
            "--file",
            "mem.bin",
            "--base",
            "0x1000",
            "--rendering",
            "signed-integer",
            "--endianness",
            "little",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Dump(dump) => {
                assert_eq!(dump.block.base, "0x1000");
                assert_eq!(dump.block.endianness, Some(Endianness::Little));
                assert_eq!(dump.rendering, "signed-integer");
                assert_eq!(dump.length, 256);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit_requires_text() {
        assert!(Args::try_parse_from(["memory-renderer", "edit", "--file", "m", "--address", "4"]).is_err());
    }
}
