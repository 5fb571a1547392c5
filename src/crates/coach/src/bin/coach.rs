//! Coach CLI - Conversational nutrition tracker
//!
//! Main entry point for the coach command-line tool.

use clap::{Parser, Subcommand};
use coach::version_info;

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Coach - Conversational nutrition tracker", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize coach configuration and database
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,

    /// Check system health
    Health {
        /// Output format: text (default), json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Talk to the coach
    Chat {
        /// Run a single message instead of the interactive loop
        #[arg(long)]
        once: Option<String>,
    },

    /// Food catalog commands
    #[command(subcommand)]
    Food(FoodCommands),

    /// Daily goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Log a meal item without going through chat
    Log {
        /// Food name
        food: String,
        /// Serving count
        #[arg(short, long, default_value_t = 1.0)]
        qty: f64,
        /// Day to log to, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show the totals for a day
    Summary {
        /// Day to summarize, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Load the starter food catalog
    Seed,
}

#[derive(Subcommand)]
enum FoodCommands {
    /// Add or update a food
    Add {
        /// Food name
        name: String,
        /// Serving description, e.g. "1 large" or "100 g cooked"
        #[arg(short, long, default_value = "1 serving")]
        serving: String,
        /// Calories per serving
        #[arg(long)]
        cal: f64,
        /// Protein grams per serving
        #[arg(long)]
        protein: f64,
        /// Carb grams per serving
        #[arg(long)]
        carbs: f64,
        /// Fat grams per serving
        #[arg(long)]
        fat: f64,
    },
    /// List the food catalog
    List,
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Set the daily targets
    Set {
        /// Daily calories
        calories: f64,
        /// Daily protein grams
        protein: f64,
        /// Daily carb grams
        carbs: f64,
        /// Daily fat grams
        fat: f64,
    },
    /// Show the current goal
    Show,
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins; otherwise the configured logging level applies.
async fn init_tracing() {
    let logging = if coach::cli::is_initialized() {
        coach::load_config()
            .await
            .map(|config| config.logging)
            .unwrap_or_default()
    } else {
        coach::config::LoggingConfig::default()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(logging.colored);

    match logging.format.as_str() {
        "pretty" => builder.pretty().init(),
        _ => builder.compact().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing().await;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { force }) => {
            println!("Initializing Coach...");
            match coach::init::initialize(force) {
                Ok(_) => {
                    let db_path = coach::init::get_database_path()?;
                    coach::db::Database::initialize(&db_path).await?;

                    println!("✓ Coach initialized successfully");
                    println!(
                        "  Configuration: {}",
                        coach::init::get_user_config_path()?.display()
                    );
                    println!("  Database: {}", db_path.display());
                    println!("\nEdit the configuration file to pick a model provider.");
                    println!("The default 'offline' provider works without any model server.");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("✗ Initialization failed: {}", e);
                    Err(e.into())
                }
            }
        }
        Some(Commands::Version) => {
            println!("{}", version_info());
            Ok(())
        }
        Some(Commands::Health { format }) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            // Get context and run health check
            let context = coach::cli::get_or_create_context().await?;
            let report = coach::HealthChecker::check_context(&context).await?;

            // Output report
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                // Text format
                println!("System Health Check");
                println!("==================");
                println!();
                println!(
                    "Overall Status: {}",
                    match report.status {
                        coach::HealthStatus::Healthy => "✓ Healthy",
                        coach::HealthStatus::Degraded => "⚠ Degraded",
                        coach::HealthStatus::Unhealthy => "✗ Unhealthy",
                    }
                );
                println!("Total Response Time: {}ms", report.total_response_time_ms);
                println!();
                println!("Component Checks:");
                println!(
                    "{:<20} {:<12} {:<10} {}",
                    "Component", "Status", "Time (ms)", "Message"
                );
                println!("{}", "-".repeat(70));

                for check in &report.checks {
                    let status_icon = match check.status {
                        coach::HealthStatus::Healthy => "✓",
                        coach::HealthStatus::Degraded => "⚠",
                        coach::HealthStatus::Unhealthy => "✗",
                    };
                    let message = check.message.as_deref().unwrap_or("N/A");
                    println!(
                        "{:<20} {:<12} {:<10} {}",
                        check.name,
                        format!("{} {}", status_icon, check.status),
                        check.response_time_ms,
                        message
                    );
                }
            }

            if report.status == coach::HealthStatus::Unhealthy {
                return Err(anyhow::anyhow!("Health check failed"));
            }
            Ok(())
        }
        Some(Commands::Chat { once }) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            let context = coach::cli::get_or_create_context().await?;

            match once {
                Some(message) => coach::cli::chat::handle_once(&context, message).await?,
                None => coach::cli::chat::handle_chat(&context).await?,
            }
            Ok(())
        }
        Some(Commands::Food(food_cmd)) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            let context = coach::cli::get_or_create_context().await?;

            match food_cmd {
                FoodCommands::Add {
                    name,
                    serving,
                    cal,
                    protein,
                    carbs,
                    fat,
                } => {
                    coach::cli::food::handle_add(&context, name, serving, cal, protein, carbs, fat)
                        .await?;
                }
                FoodCommands::List => {
                    coach::cli::food::handle_list(&context).await?;
                }
            }
            Ok(())
        }
        Some(Commands::Goal(goal_cmd)) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            let context = coach::cli::get_or_create_context().await?;

            match goal_cmd {
                GoalCommands::Set {
                    calories,
                    protein,
                    carbs,
                    fat,
                } => {
                    coach::cli::goal::handle_set(&context, calories, protein, carbs, fat).await?;
                }
                GoalCommands::Show => {
                    coach::cli::goal::handle_show(&context).await?;
                }
            }
            Ok(())
        }
        Some(Commands::Log { food, qty, date }) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            let context = coach::cli::get_or_create_context().await?;
            coach::cli::log::handle_log(&context, food, qty, date).await?;
            Ok(())
        }
        Some(Commands::Summary { date }) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            let context = coach::cli::get_or_create_context().await?;
            coach::cli::summary::handle_summary(&context, date).await?;
            Ok(())
        }
        Some(Commands::Seed) => {
            // Check if initialized
            if !coach::cli::is_initialized() {
                eprintln!("{}", coach::cli::get_init_instructions());
                return Err(anyhow::anyhow!("Coach not initialized"));
            }

            let context = coach::cli::get_or_create_context().await?;
            coach::cli::seed::handle_seed(&context).await?;
            Ok(())
        }
        None => {
            println!("{}", version_info());
            println!("\nUse --help to see available commands");
            Ok(())
        }
    }
}
