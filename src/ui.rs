use console::style;

pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message); // Red color
}

pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message); // Green color
}

pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message); // Yellow color
}

/// End-of-project summary line: releases walked and rows written.
pub fn display_project_summary(project: &str, releases: usize, rows: usize) {
    println!(
        "\n{} {}: {} releases, {} rows\n",
        style("✓").green(),
        style(project).bold(),
        releases,
        rows
    );
}
