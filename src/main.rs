use anyhow::Result;
use clap::Parser;

use repo_miner::config::{self, ProjectConfig};
use repo_miner::dataset::{self, CsvWriter, OutputDirectory, DATASET_FIELDS};
use repo_miner::domain::VersionPattern;
use repo_miner::mining::RepositoryMiner;
use repo_miner::tracker::LocalTracker;
use repo_miner::ui;

#[derive(clap::Parser)]
#[command(
    name = "repo-miner",
    about = "Mine git history and tracker metadata into a per-release defect dataset"
)]
struct Args {
    /// Folder where the dataset CSV files are written
    #[arg(value_name = "output-folder")]
    output_folder: String,

    /// Folder where project repositories are cloned
    #[arg(value_name = "repository-folder")]
    repository_folder: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    if config.projects.is_empty() {
        ui::display_error("No projects configured in repo-miner.toml");
        std::process::exit(1);
    }

    // A bad tag pattern is fatal before any mining starts
    let mut patterns = Vec::new();
    for project in &config.projects {
        match VersionPattern::new(&project.tag_pattern) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => {
                ui::display_error(&format!("Project '{}': {}", project.name, e));
                std::process::exit(1);
            }
        }
    }

    let output = OutputDirectory::new(&args.output_folder, &args.repository_folder)?;

    // A failing project aborts its own analysis only; rows flushed for its
    // completed releases stay on disk and the run moves to the next project.
    for (project, pattern) in config.projects.iter().zip(&patterns) {
        ui::display_status(&format!("Analyzing project '{}'", project.name));
        match analyze_project(project, pattern, &output) {
            Ok(()) => {}
            Err(e) => {
                ui::display_error(&format!("Analysis of '{}' aborted: {}", project.name, e));
            }
        }
    }

    Ok(())
}

/// Full mining run for one project: clone-or-open, walk the timeline,
/// write eligible rows release-by-release.
fn analyze_project(
    project: &ProjectConfig,
    pattern: &VersionPattern,
    output: &OutputDirectory,
) -> Result<()> {
    let miner = RepositoryMiner::new(
        output.clone_path(&project.name),
        &project.git_url,
        Some(&project.tracker_key),
        pattern,
        Box::new(LocalTracker::new()),
    )?;
    ui::display_success(&format!(
        "Repository ready, {} releases on the timeline",
        miner.timeline().len()
    ));

    let mut writer = CsvWriter::create(output.csv_path(&project.name), &DATASET_FIELDS)?;
    writer.write_header()?;

    let mut state = miner.project_state();
    let mut rows = 0;
    while state.next()? {
        rows += dataset::write_release(&mut writer, &state)?;
    }

    ui::display_project_summary(&project.name, state.version(), rows);
    Ok(())
}
