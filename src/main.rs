use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use emotions_prediction::cli_style::{
    get_styles, print_empty_list, print_error, print_list_item, print_primary_emotion,
    print_ranking, print_result_view, print_section_footer, print_section_header, TableBuilder,
};
use emotions_prediction::config::{AppConfig, CliConfig, FileConfig};
use emotions_prediction::emotions::{known_labels, EMOTION_CATALOG, SUGGESTIONS};
use emotions_prediction::normalize_predictions;
use emotions_prediction::predictor::{HttpPredictor, DEFAULT_ENDPOINT};
use emotions_prediction::report::AnalysisReport;
use emotions_prediction::session::{
    AnalysisSession, SubmissionOutcome, DEFAULT_MAX_RANKED, EMPTY_RESULT_MESSAGE, MIN_SUBMIT_CHARS,
};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles(), version = env!("APP_VERSION"), about = "Reveal the emotions behind a text")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, global = true, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// URL of the prediction route.
    #[clap(long, global = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Timeout in seconds for prediction requests. Set to 0 to wait indefinitely.
    #[clap(long, global = true, default_value_t = 0)]
    pub request_timeout_sec: u64,

    /// How many emotions the ranking shows.
    #[clap(long, global = true, default_value_t = DEFAULT_MAX_RANKED)]
    pub max_ranked: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sends a text to the prediction service and shows its emotions.
    Analyze {
        text: String,

        /// Print a JSON report instead of the styled output.
        #[clap(long)]
        json: bool,
    },

    /// Analyzes one of the built-in sample texts (1-based).
    Sample {
        index: usize,

        #[clap(long)]
        json: bool,
    },

    /// Lists the built-in sample texts.
    Samples,

    /// Shows every known emotion label with its title and description.
    Labels,

    /// Normalizes a prediction payload read from a file, or from stdin,
    /// without contacting the service.
    Normalize {
        #[clap(value_parser = parse_path)]
        file: Option<PathBuf>,

        #[clap(long)]
        json: bool,
    },
}

fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn resolve_config(cli_args: &CliArgs) -> Result<AppConfig> {
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let cli_config = CliConfig {
        endpoint: cli_args.endpoint.clone(),
        request_timeout_sec: cli_args.request_timeout_sec,
        max_ranked: cli_args.max_ranked,
    };

    AppConfig::resolve(&cli_config, file_config)
}

fn new_session(config: &AppConfig) -> Result<AnalysisSession> {
    let predictor = HttpPredictor::new(&config.endpoint, config.request_timeout)
        .with_context(|| format!("Could not create predictor for {}", config.endpoint))?;
    debug!(endpoint = %config.endpoint, timeout = ?config.request_timeout, "Predictor ready");
    Ok(AnalysisSession::new(Arc::new(predictor)))
}

/// Prints the session result and maps the outcome to an exit code.
fn report_outcome(
    session: &AnalysisSession,
    outcome: SubmissionOutcome,
    config: &AppConfig,
    json: bool,
) -> ExitCode {
    let state = session.snapshot();
    if json {
        println!("{}", AnalysisReport::from_state(&state, config.max_ranked).to_json());
    } else {
        print_result_view(
            &state.view(config.max_ranked),
            &state.analysis,
            session.threshold_hint(),
        );
    }

    match outcome {
        SubmissionOutcome::Failed => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

async fn analyze(config: &AppConfig, text: &str, json: bool) -> Result<ExitCode> {
    let session = new_session(config)?;
    session.set_text(text);
    if !session.can_submit() {
        bail!(
            "The text must contain at least {} characters",
            MIN_SUBMIT_CHARS
        );
    }

    let outcome = session.submit_current().await;
    Ok(report_outcome(&session, outcome, config, json))
}

async fn analyze_sample(config: &AppConfig, index: usize, json: bool) -> Result<ExitCode> {
    let session = new_session(config)?;
    match session.submit_sample(index).await {
        Some(outcome) => Ok(report_outcome(&session, outcome, config, json)),
        None => bail!(
            "There is no sample #{}, pick one between 1 and {}",
            index,
            SUGGESTIONS.len()
        ),
    }
}

fn show_samples() {
    print_section_header("Sample texts");
    for (i, sample) in SUGGESTIONS.iter().enumerate() {
        print_list_item(&format!("{}. {}", i + 1, sample), 0);
    }
    print_section_footer();
}

fn show_labels() {
    let mut table = TableBuilder::new(vec!["Id", "Title", "Description"]);
    for details in EMOTION_CATALOG.iter() {
        table.add_row(vec![details.id, details.title, details.description]);
    }
    table.print();
}

fn read_payload(file: Option<&PathBuf>) -> Result<Value> {
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file: {:?}", path))?,
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read payload from stdin")?;
            content
        }
    };

    // An empty body counts as a missing payload
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&content).context("Failed to parse prediction payload")
}

fn normalize(config: &AppConfig, file: Option<&PathBuf>, json: bool) -> Result<ExitCode> {
    let payload = read_payload(file)?;
    let predictions = normalize_predictions(&payload, known_labels());
    debug!(predictions = predictions.len(), "Normalized payload");

    let report = AnalysisReport::from_predictions(&predictions, config.max_ranked);
    if json {
        println!("{}", report.to_json());
        return Ok(ExitCode::SUCCESS);
    }

    print_section_header("Normalized predictions");
    match &report.primary {
        Some(primary) => {
            print_primary_emotion(primary);
            print_ranking(&report.ranking);
        }
        None => print_empty_list(EMPTY_RESULT_MESSAGE),
    }
    print_section_footer();
    Ok(ExitCode::SUCCESS)
}

async fn run(cli_args: CliArgs) -> Result<ExitCode> {
    let config = resolve_config(&cli_args)?;

    match cli_args.command {
        Command::Analyze { text, json } => analyze(&config, &text, json).await,
        Command::Sample { index, json } => analyze_sample(&config, index, json).await,
        Command::Samples => {
            show_samples();
            Ok(ExitCode::SUCCESS)
        }
        Command::Labels => {
            show_labels();
            Ok(ExitCode::SUCCESS)
        }
        Command::Normalize { file, json } => normalize(&config, file.as_ref(), json),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();

    if let Err(e) = init_logging() {
        eprintln!("{:#}", e);
    }

    match run(cli_args).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
