//! Command-line interface definition and parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
};

/// Command-line arguments for the battery scheduler.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

/// The available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the schedule and report the decisions and profits
    Solve {
        /// Where to read inputs and write the report
        #[command(flatten)]
        io: IOArgs,
    },

    /// Construct the linear program and export to a standard format
    Export {
        /// Where to read inputs and write the model
        #[command(flatten)]
        io: IOArgs,

        /// The file format to use (if omitted, will infer based on filename)
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
}

/// Input and output locations shared by every subcommand
#[derive(Args, Debug)]
pub struct IOArgs {
    /// The input JSON file (defaults to stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// The output file (defaults to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl IOArgs {
    /// Open the input for reading
    pub fn read(&self) -> std::io::Result<Box<dyn Read>> {
        if let Some(path) = &self.input {
            Ok(Box::new(BufReader::new(File::open(path)?)))
        } else {
            Ok(Box::new(stdin().lock()))
        }
    }

    /// Open the output for writing
    pub fn write(&self) -> std::io::Result<Box<dyn Write>> {
        if let Some(path) = &self.output {
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        } else {
            Ok(Box::new(stdout().lock()))
        }
    }

    /// The extension of the output file, if any
    pub fn extension(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|path| path.extension())
            .and_then(|ext| ext.to_str())
    }
}

/// The model file formats `export` can write
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Free-form MPS
    Mps,
    /// CPLEX LP
    Lp,
}

impl ExportFormat {
    /// Choose the explicit format, falling back to the output's extension
    pub fn resolve(explicit: Option<Self>, io: &IOArgs) -> Option<Self> {
        explicit.or_else(|| match io.extension() {
            Some("mps") => Some(Self::Mps),
            Some("lp") => Some(Self::Lp),
            _ => None,
        })
    }
}
