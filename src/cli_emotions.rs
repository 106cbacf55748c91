use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use emotions_prediction::cli_style::{
    flush, get_prompt, get_styles, print_empty_list, print_error, print_goodbye, print_help,
    print_info, print_key_value, print_list_item, print_result_view, print_section_footer,
    print_section_header, print_success, print_warning, print_welcome, CommandGroup, CommandHelp,
    TableBuilder,
};
use emotions_prediction::config::{AppConfig, CliConfig, FileConfig};
use emotions_prediction::emotions::{EMOTION_CATALOG, SUGGESTIONS};
use emotions_prediction::predictor::{HttpPredictor, DEFAULT_ENDPOINT};
use emotions_prediction::session::{
    AnalysisSession, SubmissionOutcome, DEFAULT_MAX_RANKED, IDLE_PLACEHOLDER, MIN_SUBMIT_CHARS,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// URL of the prediction route.
    #[clap(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Timeout in seconds for prediction requests. Set to 0 to wait indefinitely.
    #[clap(long, default_value_t = 0)]
    pub request_timeout_sec: u64,

    /// How many emotions the ranking shows.
    #[clap(long, default_value_t = DEFAULT_MAX_RANKED)]
    pub max_ranked: usize,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Analyzes one of the sample texts.
    Sample { index: usize },

    /// Lists the sample texts.
    Samples,

    /// Shows every known emotion label.
    Labels,

    /// Discards the text and the current result.
    Clear,

    /// Shows the prediction endpoint in use.
    Where,

    /// Shows the available commands.
    Help,

    /// Close this program.
    Exit,
}

const COMMANDS: [CommandHelp; 7] = [
    CommandHelp {
        name: "/sample",
        args: "<n>",
        description: "Analyze sample text number n",
        group: CommandGroup::Analysis,
    },
    CommandHelp {
        name: "/samples",
        args: "",
        description: "List the sample texts",
        group: CommandGroup::Analysis,
    },
    CommandHelp {
        name: "/clear",
        args: "",
        description: "Discard the text and the current result",
        group: CommandGroup::Analysis,
    },
    CommandHelp {
        name: "/labels",
        args: "",
        description: "Show every known emotion label",
        group: CommandGroup::Information,
    },
    CommandHelp {
        name: "/where",
        args: "",
        description: "Show the prediction endpoint in use",
        group: CommandGroup::Information,
    },
    CommandHelp {
        name: "/help",
        args: "",
        description: "Show this help",
        group: CommandGroup::System,
    },
    CommandHelp {
        name: "/exit",
        args: "",
        description: "Close this program",
        group: CommandGroup::System,
    },
];

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

struct Repl {
    session: AnalysisSession,
    config: AppConfig,
}

impl Repl {
    fn show_result(&self) {
        let state = self.session.snapshot();
        print_result_view(
            &state.view(self.config.max_ranked),
            &state.analysis,
            self.session.threshold_hint(),
        );
    }

    fn show_outcome(&self, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Cleared => print_info("Result cleared."),
            SubmissionOutcome::Superseded => {
                print_warning("A newer submission replaced this one.")
            }
            SubmissionOutcome::Completed { .. } | SubmissionOutcome::Failed => self.show_result(),
        }
    }

    async fn analyze(&self, text: &str) -> CommandExecutionResult {
        self.session.set_text(text);
        if !self.session.can_submit() {
            return CommandExecutionResult::Error(format!(
                "Type at least {} characters to analyze a text.",
                MIN_SUBMIT_CHARS
            ));
        }

        print_info("Analyzing…");
        flush();
        let outcome = self.session.submit_current().await;
        self.show_outcome(outcome);
        CommandExecutionResult::Ok
    }

    async fn execute_command(&self, line: String) -> CommandExecutionResult {
        let line = line.trim();
        if line.is_empty() {
            return CommandExecutionResult::Ok;
        }

        let Some(command_line) = line.strip_prefix('/') else {
            return self.analyze(line).await;
        };

        let args = shlex::split(command_line)
            .unwrap_or_else(|| command_line.split_whitespace().map(String::from).collect());

        let cli =
            InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

        match cli {
            Ok(cli) => match cli.command {
                InnerCommand::Sample { index } => match self.session.submit_sample(index).await {
                    Some(outcome) => self.show_outcome(outcome),
                    None => {
                        return CommandExecutionResult::Error(format!(
                            "There is no sample #{}, pick one between 1 and {}.",
                            index,
                            SUGGESTIONS.len()
                        ))
                    }
                },
                InnerCommand::Samples => {
                    print_section_header("Sample texts");
                    for (i, sample) in SUGGESTIONS.iter().enumerate() {
                        print_list_item(&format!("{}. {}", i + 1, sample), 0);
                    }
                    print_section_footer();
                }
                InnerCommand::Labels => {
                    let mut table = TableBuilder::new(vec!["Id", "Title"]);
                    for details in EMOTION_CATALOG.iter() {
                        table.add_row(vec![details.id, details.title]);
                    }
                    table.print();
                }
                InnerCommand::Clear => {
                    self.session.clear();
                    print_success("Text and result cleared.");
                    print_empty_list(IDLE_PLACEHOLDER);
                }
                InnerCommand::Where => {
                    print_key_value("Endpoint", &self.config.endpoint);
                    let timeout = self
                        .config
                        .request_timeout
                        .map(|t| format!("{}s", t.as_secs()))
                        .unwrap_or_else(|| "none".to_string());
                    print_key_value("Timeout", &timeout);
                }
                InnerCommand::Help => print_help(&COMMANDS),
                InnerCommand::Exit => return CommandExecutionResult::Exit,
            },

            Err(e) => {
                if e.print().is_err() {
                    println!("{}", e);
                }
            }
        }
        CommandExecutionResult::Ok
    }
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| format!("/{}", sc.get_name()))
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        endpoint: cli_args.endpoint,
        request_timeout_sec: cli_args.request_timeout_sec,
        max_ranked: cli_args.max_ranked,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let predictor = HttpPredictor::new(&config.endpoint, config.request_timeout)?;
    let repl = Repl {
        session: AnalysisSession::new(Arc::new(predictor)),
        config,
    };

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    // History lives only as long as the session
    let mut rl = Editor::<MyHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(MyHelper::new()));

    print_welcome(&repl.config.endpoint);
    repl.show_result();

    let prompt = get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match repl.execute_command(line).await {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }

    print_goodbye();
    Ok(())
}
