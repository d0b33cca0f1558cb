//! Read one task request on stdin and write a synthesized thought + reply on
//! stdout.
//!
//! This is the process the daemon spawns in place of a language model. The
//! request and response are single JSON objects; failures are reported as
//! `{"error": "..."}` on stdout with exit status 0 so the daemon can surface
//! them. Logs go to stderr.
//!
//! # Examples
//!
//! ```sh
//! # Basic request
//! echo '{"goal": "check balance", "chain_action": "eth_getBalance", "address": "0xabc"}' \
//!   | taskmind-bridge
//!
//! # Attach snippets from a static knowledge file
//! taskmind-bridge --knowledge knowledge.json < request.json
//!
//! # Reproducible output
//! taskmind-bridge --now 0 < request.json
//!
//! # Describe the accepted request shape
//! taskmind-bridge --print-schema
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use taskmind_rs::config::{
    DEFAULT_CONTENT_MAX_CHARS, DEFAULT_HISTORY_LIMIT, DEFAULT_KNOWLEDGE_LIMIT,
    DEFAULT_SUMMARY_MAX_CHARS,
};
use taskmind_rs::json_schema_for;
use taskmind_rs::knowledge::DEFAULT_MAX_RESULTS;
use taskmind_rs::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Synthesize a thought + reply for a task request read from stdin.
#[derive(Parser)]
#[command(name = "taskmind-bridge")]
struct Cli {
    // ── Knowledge ──────────────────────────────────────────────
    /// JSON file of knowledge snippets to attach to matching requests
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// Maximum snippets taken from the knowledge file per request
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    knowledge_max_results: usize,

    // ── Display limits ─────────────────────────────────────────
    /// History tasks listed in the thought
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Knowledge entries listed in the thought
    #[arg(long, default_value_t = DEFAULT_KNOWLEDGE_LIMIT)]
    knowledge_limit: usize,

    /// Characters kept from each history summary
    #[arg(long, default_value_t = DEFAULT_SUMMARY_MAX_CHARS)]
    summary_max_chars: usize,

    /// Characters kept from each knowledge entry's content
    #[arg(long, default_value_t = DEFAULT_CONTENT_MAX_CHARS)]
    content_max_chars: usize,

    // ── Output control ─────────────────────────────────────────
    /// Freeze the clock at this Unix epoch second
    #[arg(long, allow_negative_numbers = true)]
    now: Option<i64>,

    /// Print the request JSON Schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    /// Display limits and, with `--now`, a frozen clock.
    fn synthesis_settings(&self) -> Result<(SynthesizerConfig, Option<FixedClock>), String> {
        let config = SynthesizerConfig::default()
            .with_history_limit(self.history_limit)
            .with_knowledge_limit(self.knowledge_limit)
            .with_summary_max_chars(self.summary_max_chars)
            .with_content_max_chars(self.content_max_chars);
        let clock = match self.now {
            Some(secs) => Some(FixedClock::at_epoch(secs).ok_or_else(|| {
                format!("--now {secs} is outside the representable time range")
            })?),
            None => None,
        };
        Ok((config, clock))
    }

    /// The stdout line for one raw request. Rejected requests are an `Ok`
    /// error envelope; `Err` means the process must exit non-zero.
    fn respond(&self, raw: &str, knowledge: Option<&StaticKnowledge>) -> Result<String, String> {
        let (config, clock) = self.synthesis_settings()?;
        let outcome = match clock {
            Some(clock) => {
                let synth = Synthesizer::with_clock(config, clock);
                handle_payload(raw, &synth, knowledge)
            }
            None => handle_payload(raw, &Synthesizer::new(config), knowledge),
        };
        Ok(render_outcome(&outcome))
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn write_line(text: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{text}").and_then(|()| stdout.flush()) {
        eprintln!("Error: failed to write output: {e}");
        process::exit(1);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.print_schema {
        let schema = json_schema_for::<BridgeRequest>();
        match serde_json::to_string_pretty(&schema) {
            Ok(text) => write_line(&text),
            Err(e) => {
                eprintln!("Error: failed to encode schema: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let knowledge = match &cli.knowledge {
        Some(path) => match StaticKnowledge::load(path, cli.knowledge_max_results) {
            Ok(kb) => Some(kb),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => None,
    };

    let mut raw = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut raw) {
        eprintln!("Error: failed to read stdin: {e}");
        process::exit(1);
    }
    info!("[bridge] read {} bytes from stdin", raw.len());

    match cli.respond(&raw, knowledge.as_ref()) {
        Ok(line) => write_line(&line),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
