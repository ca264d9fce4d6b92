use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use compiler::{DriverError, Pass, Pipeline};
use middle_end::check_ast::{CheckKind, VerifyConfig};
use middle_end::diagnostics::{report_fatal, Diagnostic};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "compiler")]
#[command(about = "Run the middle-end passes with structural AST verification")]
struct Args {
    /// Verify the AST after every pass
    #[arg(long)]
    verify: bool,

    /// Leave a check out of verification (repeatable)
    #[arg(long = "skip-check", value_enum, requires = "verify")]
    skip_check: Vec<CheckArg>,

    /// Stop after the given pass
    #[arg(long, value_enum)]
    stop_after: Option<Pass>,

    /// Log pass and check progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CheckArg {
    DuplicateUses,
    MissingDefs,
    Unresolveds,
    Primitives,
}

impl From<CheckArg> for CheckKind {
    fn from(arg: CheckArg) -> Self {
        match arg {
            CheckArg::DuplicateUses => CheckKind::DuplicateUses,
            CheckArg::MissingDefs => CheckKind::MissingDefs,
            CheckArg::Unresolveds => CheckKind::Unresolveds,
            CheckArg::Primitives => CheckKind::Primitives,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = if args.verify {
        args.skip_check
            .iter()
            .fold(VerifyConfig::default(), |config, &check| config.skipping(check.into()))
    } else {
        VerifyConfig::disabled()
    };

    println!("\n=== Starting compilation pipeline ===");
    let mut pipeline = Pipeline::new(config);
    if let Some(pass) = args.stop_after {
        pipeline = pipeline.stop_after(pass);
    }

    let (session, result) = pipeline.run();
    match result {
        Ok(()) => {
            println!("Symbols: {}", session.ast.symbols().len());
            println!("Phase: {:?}", session.ctx.phase.current());
            println!("\n=== Compilation pipeline complete ===");
            ExitCode::SUCCESS
        }
        Err(DriverError::Verification { pass, error }) => {
            let diagnostic = Diagnostic::from_internal(&error, &session.ast)
                .with_note(Diagnostic::note(format!("detected after the {} pass", pass)));
            report_fatal(&diagnostic)
        }
        Err(err) => {
            error!(%err, "compilation failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
