//! Career matcher: compare a skill profile against job listings

use anyhow::Context;
use career_match::cli::{self, Cli, Commands, ConfigAction};
use career_match::config::Config;
use career_match::dataset::loader::load_listings;
use career_match::dataset::{Dataset, RoleFilter};
use career_match::error::CareerMatchError;
use career_match::input::InputManager;
use career_match::output::formatter::{save_report_to_file, suggest_filename};
use career_match::output::ReportGenerator;
use career_match::processing::market::MarketAggregator;
use career_match::processing::{CareerAnalyzer, Profile, SkillExtractor};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_file: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            profile,
            resume,
            data,
            output,
            save,
            charts_dir,
            no_charts,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(CareerMatchError::InvalidInput)?,
                None => config.output.format,
            };
            if let Some(dir) = charts_dir {
                config.charts.output_dir = dir;
            }
            if no_charts {
                config.charts.enabled = false;
            }

            let profile_json = tokio::fs::read_to_string(&profile)
                .await
                .with_context(|| format!("Failed to read profile {}", profile.display()))?;
            let candidate = Profile::from_json(&profile_json);

            let resume_text = match &resume {
                Some(path) => Some(read_resume(path).await?),
                None => None,
            };

            let dataset = load_dataset(data.as_deref().unwrap_or(config.data.listings_path.as_path()));
            let analyzer = CareerAnalyzer::from_config(&config)?;
            let report = analyzer.build_report(&dataset, candidate, resume_text.as_deref());

            for (name, failure) in report.failed_sections() {
                info!("{} unavailable: {}", name, failure.message);
            }

            // Colors only make sense on a terminal
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        let stem = report.profile.name.as_deref().unwrap_or("candidate");
                        path.join(suggest_filename(output_format, stem, true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Market { role, data } => {
            let dataset = load_dataset(data.as_deref().unwrap_or(config.data.listings_path.as_path()));
            let filter = RoleFilter::new(role.as_deref());
            let market = MarketAggregator::new(&config.analysis).analyze_market(dataset.listings(), &filter)?;

            let generator = ReportGenerator::with_options(config.output.color_output, false);
            println!("📊 Job Market Overview\n");
            println!("{}", generator.console().format_market(&market));
        }

        Commands::Skills { resume } => {
            let text = read_resume(&resume).await?;
            let skills = SkillExtractor::new()?.extract(&text);

            if skills.is_empty() {
                println!("No known skills found in {}", resume.display());
            } else {
                println!("🔤 Skills found in {} ({}):", resume.display(), skills.len());
                for (i, skill) in skills.iter().enumerate() {
                    println!("  {}. {}", i + 1, skill);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("{}", toml::to_string_pretty(&config)?);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                match &config_file {
                    Some(path) => default_config.save_to(path)?,
                    None => default_config.save()?,
                }
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

/// Read the listings CSV; a failed load leaves the dataset empty so every
/// report section reports missing data instead of aborting.
fn load_dataset(path: &Path) -> Dataset {
    match load_listings(path) {
        Ok(dataset) => {
            info!("Loaded {} listings from {}", dataset.len(), path.display());
            dataset
        }
        Err(e) => {
            error!("Failed to load listings from {}: {}", path.display(), e);
            Dataset::empty()
        }
    }
}

async fn read_resume(path: &Path) -> anyhow::Result<String> {
    cli::validate_file_extension(path, RESUME_EXTENSIONS)
        .map_err(|e| CareerMatchError::InvalidInput(format!("Resume file: {}", e)))?;

    let mut input_manager = InputManager::new();
    let text = input_manager
        .extract_text(path)
        .await
        .with_context(|| format!("Failed to read resume {}", path.display()))?;
    info!("Resume text length: {} characters", text.len());
    Ok(text)
}
