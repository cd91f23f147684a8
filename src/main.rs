use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use native_image_report::cmd::{self, CompareOptions, CompareStyle, OutputOptions, ReportOptions};
use native_image_report::context::RunContext;
use std::path::PathBuf;
use std::process;

/// Build reports for GraalVM Native Image builds
///
/// native-image-report renders the build-output JSON written by native-image
/// as a job summary, and compares it against a baseline build to flag
/// regressions in reachability, image size and build resources.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji in console messages (verdict markers in the report are kept)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(flatten)]
    context: ContextArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// CI run metadata, read from the GitHub Actions environment by default
#[derive(Args)]
struct ContextArgs {
    /// Job name shown in the report header
    #[arg(long, env = "GITHUB_JOB", global = true, hide_env_values = true)]
    job: Option<String>,

    /// Run identifier used in the run link
    #[arg(long, env = "GITHUB_RUN_ID", global = true, hide_env_values = true)]
    run_id: Option<String>,

    /// Run number shown in the report header
    #[arg(long, env = "GITHUB_RUN_NUMBER", global = true, hide_env_values = true)]
    run_number: Option<String>,

    /// Server URL used in the run link
    #[arg(long, env = "GITHUB_SERVER_URL", global = true, hide_env_values = true)]
    server_url: Option<String>,

    /// Repository (`owner/name`) used in the run link
    #[arg(long, env = "GITHUB_REPOSITORY", global = true, hide_env_values = true)]
    repository: Option<String>,

    /// Branch the baseline was built from
    #[arg(long, env = "GITHUB_BASE_REF", global = true, hide_env_values = true)]
    base_branch: Option<String>,

    /// Branch the current build was built from
    #[arg(long, env = "GITHUB_HEAD_REF", global = true, hide_env_values = true)]
    head_branch: Option<String>,
}

impl ContextArgs {
    fn into_context(self) -> RunContext {
        // Actions sets the ref variables to empty strings outside pull requests
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        RunContext {
            job: present(self.job),
            run_id: present(self.run_id),
            run_number: present(self.run_number),
            server_url: present(self.server_url),
            repository: present(self.repository),
            base_branch: present(self.base_branch),
            head_branch: present(self.head_branch),
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output the JSON verdict summary instead of markup
    #[arg(long)]
    json: bool,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl OutputArgs {
    fn into_options(self, no_emoji: bool) -> OutputOptions {
        OutputOptions {
            json: self.json,
            output: self.output,
            use_emoji: !no_emoji,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report for one build
    Report {
        /// Build-output JSON written by native-image
        #[arg(value_name = "FILE")]
        snapshot: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare a build against a baseline build
    Compare {
        /// Build-output JSON of the current build
        #[arg(value_name = "CURRENT")]
        current: PathBuf,

        /// Build-output JSON of the baseline build
        #[arg(value_name = "BASELINE")]
        baseline: PathBuf,

        /// Configuration file (default: .native-image-report.toml if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Categories to render as charts, e.g. "image details, resource usage"
        #[arg(long, value_name = "CATEGORIES")]
        charts: Option<String>,

        /// Lower ratio bound in percent for the default policy
        #[arg(long)]
        lower_bound: Option<f64>,

        /// Upper ratio bound in percent for the default policy
        #[arg(long)]
        upper_bound: Option<f64>,

        /// Report layout
        #[arg(long, value_enum, default_value_t = CompareStyle::Mixed)]
        style: CompareStyle,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let no_emoji = cli.no_emoji;
    let context = cli.context.into_context();

    let result = match cli.command {
        Some(Commands::Report { snapshot, output }) => cmd::cmd_report(
            &ReportOptions {
                snapshot,
                output: output.into_options(no_emoji),
            },
            &context,
        ),
        Some(Commands::Compare {
            current,
            baseline,
            config,
            charts,
            lower_bound,
            upper_bound,
            style,
            output,
        }) => cmd::cmd_compare(
            &CompareOptions {
                current,
                baseline,
                config,
                charts,
                lower_bound,
                upper_bound,
                style,
                output: output.into_options(no_emoji),
            },
            &context,
        ),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("native-image-report v{}", env!("CARGO_PKG_VERSION"));
            println!("Build reports for GraalVM Native Image builds\n");
            println!("Usage: native-image-report <COMMAND>\n");
            println!("Commands:");
            println!("  report       Render the report for one build");
            println!("  compare      Compare a build against a baseline build");
            println!("  completions  Generate shell completions");
            println!(
                "\nRun 'native-image-report <COMMAND> --help' for more information on a command."
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        use native_image_report::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
