mod reports;
mod runner;
mod scenario;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use arthneeti_client::config::DEFAULT_API_BASE_URL;
use arthneeti_client::{AuthScheme, ClientConfig};
use runner::{ScenarioResult, ScenarioRunner};
use scenario::catalog::scenario_keys;
use scenario::{ChoicePolicy, Credentials, ScenarioCtx, get_scenario, list_scenarios};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "arthneeti-tester", version)]
#[command(about = "Automated end-to-end QA for the Arth-Neeti game API")]
struct Args {
    /// API root the scenarios talk to
    #[arg(long, env = "ARTHNEETI_API_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Account used for sign-in (the base name when registering)
    #[arg(long, env = "ARTHNEETI_TESTER_USER", default_value = "qa_tester")]
    username: String,

    /// Password for the account
    #[arg(long, env = "ARTHNEETI_TESTER_PASSWORD", default_value = "qa_password")]
    password: String,

    /// Register a fresh account per run instead of logging in
    #[arg(long)]
    register: bool,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// How cards are answered
    #[arg(long, value_enum, default_value_t = ChoicePolicy::Prudent)]
    policy: ChoicePolicy,

    /// Give up on a game after this many answers
    #[arg(long, default_value_t = 60)]
    max_turns: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Authorization scheme: token or bearer
    #[arg(long, default_value = "token", value_parser = ["token", "bearer"])]
    auth_scheme: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_auth_scheme(AuthScheme::parse(&self.auth_scheme).unwrap_or_default())
    }

    fn scenario_ctx(&self) -> ScenarioCtx {
        ScenarioCtx {
            config: self.client_config(),
            credentials: Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
                register: self.register,
            },
            policy: self.policy,
            max_turns: self.max_turns,
            verbose: self.verbose,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner(&args);

    let start_time = Instant::now();
    let ctx = args.scenario_ctx();
    let runner = ScenarioRunner::new(args.verbose);
    let mut results = Vec::new();

    for key in expand_scenarios(&args.scenarios) {
        let Some(scenario) = get_scenario(&key) else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
            continue;
        };
        let result = runner
            .run_scenario(scenario.as_ref(), &ctx, args.iterations)
            .await;
        let status = if result.passed { "✅" } else { "❌" };
        eprintln!("{status} {} ({:?})", result.scenario_name, result.average_duration);
        results.push(result);
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:12} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner(args: &Args) {
    eprintln!("{}", "💰 Arth-Neeti Automated Tester".bright_cyan().bold());
    eprintln!("{}", "==============================".cyan());
    eprintln!("API: {}", args.base_url);
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in scenario_keys() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Arth-Neeti Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
