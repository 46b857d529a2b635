// Copyright 2025-present The docrank authors
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the docrank CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `DOCRANK_THEME` first (explicit control), then `COLORFGBG`, then defaults
//! to dark. Respects `NO_COLOR` and non-TTY output for pipelines.

use std::sync::OnceLock;

use docrank::pipeline::DocumentStats;

// Width between │ and │ (excluding border chars)
const BOX_WIDTH: usize = 80;

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    // 1. Explicit override via DOCRANK_THEME
    if let Ok(theme) = std::env::var("DOCRANK_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // 2. COLORFGBG (format: "fg;bg" where bg >= 7 typically means light)
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    // 3. Default to dark (most developer terminals)
    Theme::Dark
}

fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// OneDark / One Light palette pairs: (dark, light)
mod palette {
    pub const GREEN: ((u8, u8, u8), (u8, u8, u8)) = ((152, 195, 121), (80, 161, 79));
    pub const YELLOW: ((u8, u8, u8), (u8, u8, u8)) = ((229, 192, 123), (193, 132, 1));
    pub const BLUE: ((u8, u8, u8), (u8, u8, u8)) = ((97, 175, 239), (64, 120, 242));
    pub const CYAN: ((u8, u8, u8), (u8, u8, u8)) = ((86, 182, 194), (1, 132, 188));
    pub const GRAY: ((u8, u8, u8), (u8, u8, u8)) = ((92, 99, 112), (160, 161, 167));
    pub const BRIGHT_CYAN: ((u8, u8, u8), (u8, u8, u8)) = ((102, 217, 239), (1, 112, 158));
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        fn $name() -> String {
            let ((dr, dg, db), (lr, lg, lb)) = palette::$name;
            match theme() {
                Theme::Dark => rgb(dr, dg, db),
                Theme::Light => rgb(lr, lg, lb),
            }
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

/// Check if colors should be used (TTY detection)
fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Print a content line: │ content          │
fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// Print section header: ┌─ LABEL ──────────┐
fn section_top(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH - visible_len(&label_part);
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section footer: └──────────────────┘
fn section_bot() {
    let border = GRAY();
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), RESET);
}

/// Print centered title between double-line borders
fn title_banner(text: &str) {
    let border = BLUE();
    println!("{}╔{}╗{}", border, "═".repeat(BOX_WIDTH), RESET);
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let total_pad = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left_pad = total_pad / 2;
    println!(
        "{}║{}{}{}{}{}║{}",
        border,
        RESET,
        " ".repeat(left_pad),
        colored,
        " ".repeat(total_pad - left_pad),
        border,
        RESET
    );
    println!("{}╚{}╝{}", border, "═".repeat(BOX_WIDTH), RESET);
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let tail: String = name
            .chars()
            .rev()
            .take(max_len - 3)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}

/// Render the per-document segmentation table for `inspect`.
pub fn render_stats(input_dir: &str, stats: &[DocumentStats]) {
    println!();
    title_banner("DOCRANK INPUT INSPECTOR");
    println!();

    section_top("SEGMENTATION");
    row("");
    row(&format!("  Input:      {}", truncate_name(input_dir, 60)));
    row(&format!("  Documents:  {}", stats.len()));
    row("");
    row(&format!(
        "  {:<34} {:>8} {:>8} {:>5} {:>7}",
        "FILE", "SECTIONS", "HEADINGS", "PAGES", "WORDS"
    ));
    row(&format!(
        "  {:<34} {:>8} {:>8} {:>5} {:>7}",
        "─".repeat(34),
        "────────",
        "────────",
        "─────",
        "───────"
    ));

    for stat in stats {
        if stat.sections == 0 {
            let line = format!(
                "  {:<34} {:>34}",
                truncate_name(&stat.filename, 34),
                "skipped"
            );
            row(&themed(YELLOW, &[], &line));
            continue;
        }
        row(&format!(
            "  {:<34} {:>8} {:>8} {:>5} {:>7}",
            truncate_name(&stat.filename, 34),
            stat.sections,
            stat.detected_headings,
            stat.pages,
            stat.words
        ));
    }

    row("");
    let total_sections: usize = stats.iter().map(|s| s.sections).sum();
    let total_words: usize = stats.iter().map(|s| s.words).sum();
    let synthetic: usize = stats.iter().map(|s| s.synthetic_sections).sum();
    let summary = format!(
        "  Total: {} sections ({} synthetic) │ {} words",
        total_sections, synthetic, total_words
    );
    row(&themed(GREEN, &[BOLD], &summary));
    row("");
    section_bot();
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_len_ignores_ansi_codes() {
        assert_eq!(visible_len("plain"), 5);
        assert_eq!(visible_len("\x1b[32mgreen\x1b[0m"), 5);
    }

    #[test]
    fn truncate_name_keeps_short_names() {
        assert_eq!(truncate_name("a.pdf", 10), "a.pdf");
        let long = "a-very-long-document-filename.pdf";
        let cut = truncate_name(long, 12);
        assert_eq!(cut.chars().count(), 12);
        assert!(cut.starts_with("..."));
    }

    #[test]
    fn rgb_escape_format() {
        assert_eq!(rgb(1, 2, 3), "\x1b[38;2;1;2;3m");
    }
}
