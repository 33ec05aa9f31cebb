// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// main.rs
//
// Command-line entry point. Loads a program, steps the Tomasulo core to
// completion (or `--max-cycles`), and prints the final register file,
// metrics, and (with `--trace`) the rendered event log. `--json` swaps
// the human-readable summary for the full microarchitectural snapshot,
// for a non-terminal presenter to consume.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use tomasulo_rust::tomasulo::registers::register_name;
use tomasulo_rust::utils::logger::EventRenderer;
use tomasulo_rust::utils::parser;
use tomasulo_rust::{SimulatorConfig, TomasuloCore};

#[derive(Parser)]
#[command(name = "tomasulo")]
#[command(about = "A cycle-accurate Tomasulo out-of-order core simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program through the out-of-order core
    Run {
        /// Path to a program listing (one instruction per line)
        #[arg(short, long)]
        program: PathBuf,

        /// Stop after this many cycles even if the program has not retired
        #[arg(long, default_value = "10000")]
        max_cycles: u64,

        /// Log level (error, warn, info, debug, trace)
        #[arg(short, long, default_value = "info")]
        log_level: String,

        /// Print the full event log after the run
        #[arg(short, long)]
        trace: bool,

        /// Write the event log to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the final microarchitectural snapshot as JSON, for a
        /// non-terminal presenter (e.g. a GUI) to consume instead of the
        /// human-readable summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { program, max_cycles, log_level, trace, output, json } => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .init();

            run(&program, max_cycles, trace, output.as_deref(), json)
        }
    }
}

fn run(
    program_path: &PathBuf,
    max_cycles: u64,
    trace: bool,
    output: Option<&std::path::Path>,
    json: bool,
) -> ExitCode {
    let text = match std::fs::read_to_string(program_path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{} could not read {}: {}", "error:".red().bold(), program_path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let instructions = parser::parse_program(&text);
    if instructions.is_empty() {
        eprintln!("{} {} contained no recognizable instructions", "error:".red().bold(), program_path.display());
        return ExitCode::FAILURE;
    }

    let config = SimulatorConfig::new();
    let mut core = match TomasuloCore::new(config) {
        Ok(core) => core,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            return ExitCode::FAILURE;
        }
    };

    core.load(&text);

    log::info!("loaded {} instructions from {}", instructions.len(), program_path.display());

    let mut cycles_run = 0u64;
    while cycles_run < max_cycles && !core.is_done() {
        core.step();
        cycles_run += 1;
    }
    if !core.is_done() {
        log::warn!("stopped after {max_cycles} cycles with the program still in flight");
    }

    if json {
        return match serde_json::to_string_pretty(&core.snapshot()) {
            Ok(rendered) => {
                println!("{rendered}");
                ExitCode::SUCCESS
            },
            Err(err) => {
                eprintln!("{} could not serialize snapshot: {}", "error:".red().bold(), err);
                ExitCode::FAILURE
            },
        };
    }

    let metrics = core.metrics();
    println!();
    println!("{}", "== register file ==".bold());
    let config = core.config();
    for reg in 0..config.num_registers {
        let value = core.register(&register_name(reg));
        if value != 0 {
            println!("  {:<5} = {}", register_name(reg), value);
        }
    }

    println!();
    println!("{}", "== metrics ==".bold());
    println!("  clock        = {}", metrics.clock);
    println!("  retired      = {}", metrics.retired);
    println!("  stalls_rob   = {}", metrics.stalls_rob);
    println!("  stalls_rs    = {}", metrics.stalls_rs);
    println!("  branch_miss  = {}", metrics.branch_miss);
    println!("  ipc          = {:.3}", metrics.ipc());

    if trace {
        println!();
        println!("{}", "== event log ==".bold());
        let mut renderer = match output {
            Some(path) => match EventRenderer::to_file(&path.to_string_lossy()) {
                Ok(renderer) => renderer,
                Err(err) => {
                    eprintln!("{} could not open trace output: {}", "error:".red().bold(), err);
                    return ExitCode::FAILURE;
                }
            },
            None => EventRenderer::to_stdout(),
        };
        if let Err(err) = renderer.render(core.log()) {
            eprintln!("{} could not write trace: {}", "error:".red().bold(), err);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
