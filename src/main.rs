use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dropzone::{
    config::Settings,
    models::{
        duplicate_types, read_activity_rows, BasicParams, Projection, ProtocolInfo, ShareInput,
        ValuationParams,
    },
    projection::{AllocationNormalizer, HistoricalComparison, ProjectionCalculator, StaticHistory},
    utils::{format_currency, format_large_number, format_share},
};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod tui_main;

#[derive(Parser)]
#[clap(name = "dropzone")]
#[clap(about = "Project the value of a token airdrop from your protocol activity", long_about = None)]
struct Cli {
    /// Settings file to load instead of config/default and config/local
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ValuationArgs {
    /// Projected fully diluted valuation in USD
    #[clap(long)]
    fdv: Option<f64>,

    /// Share of token supply set aside for the airdrop, in percent
    #[clap(long)]
    airdrop_percentage: Option<f64>,

    /// Number of wallets expected to claim
    #[clap(long, allow_hyphen_values = true)]
    participants: Option<i64>,

    /// Print the projection as JSON
    #[clap(long)]
    json: bool,
}

impl ValuationArgs {
    fn apply(&self, defaults: ValuationParams) -> ValuationParams {
        ValuationParams {
            fdv: self.fdv.unwrap_or(defaults.fdv),
            airdrop_percentage: self.airdrop_percentage.unwrap_or(defaults.airdrop_percentage),
            total_participants: self.participants.unwrap_or(defaults.total_participants),
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ProtocolArgs {
    /// Protocol the activity was done on
    #[clap(long)]
    protocol: Option<String>,

    /// First day of the activity window (YYYY-MM-DD)
    #[clap(long)]
    start: Option<NaiveDate>,

    /// Last day of the activity window (YYYY-MM-DD)
    #[clap(long)]
    end: Option<NaiveDate>,
}

impl ProtocolArgs {
    fn into_info(self) -> anyhow::Result<ProtocolInfo> {
        let info = ProtocolInfo {
            name: self.protocol.unwrap_or_default(),
            start_date: self.start,
            end_date: self.end,
        };
        info.validate()?;
        Ok(info)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate from a single activity percentage
    Basic {
        /// Total activities across the protocol
        #[clap(long)]
        total_activities: Option<f64>,

        /// Your share of all activity, in percent
        #[clap(long)]
        user_percentage: Option<f64>,

        /// Multiplier applied to your activity
        #[clap(long)]
        weight: Option<f64>,

        #[clap(flatten)]
        valuation: ValuationArgs,
    },

    /// Estimate from a JSON file of weighted activity rows
    Advanced {
        /// Path to a JSON array of activity rows
        #[clap(short, long)]
        activities: PathBuf,

        #[clap(flatten)]
        protocol: ProtocolArgs,

        #[clap(flatten)]
        valuation: ValuationArgs,
    },

    /// Rank a total airdrop value against past airdrops
    Compare {
        /// Total airdrop value in USD
        #[clap(short, long, allow_hyphen_values = true)]
        value: f64,
    },

    /// Show the token distribution for an airdrop percentage
    Distribution {
        #[clap(long)]
        airdrop_percentage: Option<f64>,
    },

    /// Launch interactive TUI
    Tui {
        #[clap(flatten)]
        protocol: ProtocolArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::new().unwrap_or_else(|e| {
            eprintln!("Using default settings: {}", e);
            Settings::default()
        }),
    };

    // Initialize logging. The TUI owns the terminal, so its output is discarded.
    if matches!(cli.command, Commands::Tui { .. }) {
        tui_main::disable_logging_output();
    } else {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Validate settings
    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    let calculator = ProjectionCalculator::new(&settings);

    match cli.command {
        Commands::Basic {
            total_activities,
            user_percentage,
            weight,
            valuation,
        } => {
            let params = BasicParams {
                total_activities: total_activities.unwrap_or(settings.basic.total_activities),
                user_activity_percentage: user_percentage
                    .unwrap_or(settings.basic.user_activity_percentage),
                activity_weight: weight.unwrap_or(settings.basic.activity_weight),
            };
            let valuation_params = valuation.apply(settings.valuation);

            let projection = calculator.project(ShareInput::Basic(params), &valuation_params);
            print_projection(&projection, valuation.json)?;
        }

        Commands::Advanced {
            activities,
            protocol,
            valuation,
        } => {
            let protocol = protocol.into_info()?;
            let rows = read_activity_rows(&activities)
                .with_context(|| format!("Failed to load activity rows from {}", activities.display()))?;
            info!("Loaded {} activity rows", rows.len());

            for t in duplicate_types(&rows) {
                warn!("Activity type {} appears on more than one row; their contributions are merged", t);
            }

            let valuation_params = valuation.apply(settings.valuation);
            let mut projection = calculator.project(ShareInput::Advanced(&rows), &valuation_params);
            if !protocol.is_empty() {
                projection.protocol = Some(protocol);
            }
            print_projection(&projection, valuation.json)?;
        }

        Commands::Compare { value } => {
            let entries = HistoricalComparison::build(&StaticHistory, value);

            println!("\n=== Airdrop Comparison ===");
            for entry in &entries {
                let marker = if entry.is_current { "  <==" } else { "" };
                println!(
                    "{:>4}  {:<32} {:>12}  {}{}",
                    entry.rank_label(),
                    entry.name,
                    format_currency(entry.value_usd, 0),
                    entry.date_label(),
                    marker
                );
            }

            match HistoricalComparison::projected_rank(&StaticHistory, value) {
                Some(rank) => println!("\nProjected position: #{} of {}", rank, entries.len()),
                None => println!("\nNo projection to rank (value must be above zero)"),
            }
        }

        Commands::Distribution { airdrop_percentage } => {
            let pct = airdrop_percentage.unwrap_or(settings.valuation.airdrop_percentage);
            let breakdown = AllocationNormalizer::new(settings.allocation).normalize(pct);

            println!("\n=== Token Distribution ===");
            for slice in breakdown.visible() {
                println!("  {:<14} {:>6.2}%", slice.category.as_str(), slice.percentage);
            }
        }

        Commands::Tui { protocol } => {
            tui_main::run_tui(settings, protocol.into_info()?)?;
        }
    }

    Ok(())
}

fn print_projection(projection: &Projection, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(projection)?);
        return Ok(());
    }

    let valuation = &projection.valuation;
    println!("\n=== Airdrop Projection ({}) ===", projection.share.mode.as_str());
    if let Some(protocol) = &projection.protocol {
        println!("Protocol: {}", protocol.summary());
    }
    println!("Your Share: {}", format_share(projection.share.user_share));
    println!(
        "Total Protocol Activities: {}",
        format_large_number(projection.share.raw_total_protocol_activities)
    );
    println!("Total Airdrop Value: {}", format_currency(valuation.total_airdrop_value, 2));
    println!(
        "Estimated Airdrop: {}",
        format_currency(valuation.estimated_user_airdrop, 2)
    );
    println!(
        "Range: {} - {}",
        format_currency(valuation.min_estimate, 2),
        format_currency(valuation.max_estimate, 2)
    );

    if !projection.share.breakdown.is_empty() {
        println!("\nBreakdown:");
        for entry in &projection.share.breakdown {
            println!(
                "  {}: {:.6}% of pool",
                entry.activity_type.as_str(),
                entry.percentage_of_pool
            );
        }
    }

    Ok(())
}
