use clap::Parser;
use guardkit::signature;
use guardkit::typecheck::{Kwargs, type_check};
use guardkit::utils::{PromptOptions, Terminal, TokioChannel, USAGE, get_user_input};
use guardkit::GuardError;
use serde_json::{Value, json};
use std::{path::PathBuf, process::ExitCode};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt};

/// Deliberately malformed: `max_retries` is not an integer.
const DEMO_OPTIONS: &str =
    r#"{"allowed_values": [], "pattern": "", "required_length": 3, "case_sensitive": true, "return_case": "upper", "trim": true, "max_retries": 3.3}"#;

#[derive(Debug, Parser)]
#[command(name = "guardkit-cli", version, about = "Demonstrates type-checked calls and validated prompts")]
struct Args {
    /// JSON file with prompt options
    #[arg(long, conflicts_with = "options")]
    config: Option<PathBuf>,

    /// Prompt options as an inline JSON object
    #[arg(long)]
    options: Option<String>,

    /// Text shown before each read
    #[arg(long, default_value = "Enter prompt ")]
    prompt: String,

    /// Skip the type-checked call demonstration
    #[arg(long)]
    skip_type_check: bool,

    /// Read the answer through the async prompt
    #[arg(long = "async")]
    use_async: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();

    println!("------------------------------------------------------------");
    println!("                        GUARDKIT                            ");
    println!("------------------------------------------------------------");

    if !args.skip_type_check {
        if let Err(e) = type_check_demo() {
            error!(error = %e, "type check demo could not run");
            return ExitCode::FAILURE;
        }
    }

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(GuardError::Io(e)) => {
            eprintln!("Could not read the options file: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("Incorrect argument specification");
            println!("{}", e);
            println!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    debug!(?options, "prompt options loaded");

    let answer = if args.use_async {
        let mut console = TokioChannel::console();
        Terminal::ask_async(&mut console, &args.prompt, &options)
            .await
            .map(|input| input.answer)
    } else {
        let prompt = args.prompt.clone();
        match tokio::task::spawn_blocking(move || get_user_input(&prompt, &options)).await {
            Ok(res) => res,
            Err(e) => {
                error!(error = %e, "prompt task failed");
                return ExitCode::FAILURE;
            }
        }
    };

    match answer {
        Ok(answer) => {
            println!("{}", answer);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_options(args: &Args) -> Result<PromptOptions, GuardError> {
    if let Some(path) = &args.config {
        let raw = std::fs::read_to_string(path)?;
        return PromptOptions::from_json_str(&raw);
    }

    PromptOptions::from_json_str(args.options.as_deref().unwrap_or(DEMO_OPTIONS))
}

fn type_check_demo() -> Result<(), GuardError> {
    let area = type_check(
        signature!(fn area(width: Number, height: Number) -> Number),
        |args: &[Value], _: &Kwargs| {
            let w = args.first().and_then(Value::as_f64).unwrap_or_default();
            let h = args.get(1).and_then(Value::as_f64).unwrap_or_default();
            json!(w * h)
        },
    )?;

    for args in [vec![json!(3), json!(2.5)], vec![json!("3"), json!(2.5)]] {
        let shown: Vec<String> = args.iter().map(Value::to_string).collect();
        match area.call_positional(&args) {
            Ok(v) => println!("area({}) = {}", shown.join(", "), v),
            Err(e) => println!("area({}) failed: {}", shown.join(", "), e),
        }
    }

    Ok(())
}
