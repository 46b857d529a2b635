// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use clap::Parser;

use docrank::pipeline::{collect_stats, run_rank, RankOptions};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            input,
            output,
            top_sections,
            refine,
            budget,
        } => {
            let options = RankOptions {
                input_dir: input.into(),
                output_path: output.into(),
                top_sections,
                refine_top: refine,
                char_budget: budget,
            };
            if let Err(e) = run_rank(&options) {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
        Commands::Inspect { input } => match collect_stats(Path::new(&input)) {
            Ok(stats) => cli::display::render_stats(&input, &stats),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
    }
}
