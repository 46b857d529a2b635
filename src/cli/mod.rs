// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

pub mod display;

use clap::{Parser, Subcommand};

use docrank::pipeline::output::MAX_EXTRACTED_SECTIONS;
use docrank::refine::{DEFAULT_CHAR_BUDGET, DEFAULT_TOP_SECTIONS};

#[derive(Parser)]
#[command(
    name = "docrank",
    about = "Persona-driven document section ranking",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank document sections for a persona and write analysis.json
    Rank {
        /// Input directory containing config.json and documents/
        #[arg(short, long)]
        input: String,

        /// Output file path
        #[arg(short, long, default_value = "analysis.json")]
        output: String,

        /// Maximum number of ranked sections to emit
        #[arg(long, default_value_t = MAX_EXTRACTED_SECTIONS)]
        top_sections: usize,

        /// How many top sections get refined sub-section text
        #[arg(long, default_value_t = DEFAULT_TOP_SECTIONS)]
        refine: usize,

        /// Character budget per refined text
        #[arg(long, default_value_t = DEFAULT_CHAR_BUDGET)]
        budget: usize,
    },

    /// Show per-document segmentation statistics for an input directory
    Inspect {
        /// Input directory containing config.json and documents/
        input: String,
    },
}
