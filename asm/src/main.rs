use hackasm::{config::Limits, error::Error, source::SourceBuffer, util};
use log::info;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input assembly file
    input: String,

    /// Output file, one 16-digit binary word per line
    output: String,

    /// Dump assembly listing and symbol tables
    #[clap(short, long)]
    dump: bool,

    /// YAML file overriding buffer and table capacities
    #[clap(short, long)]
    config: Option<String>,

    /// Label table capacity
    #[clap(long)]
    max_labels: Option<usize>,

    /// Variable table capacity
    #[clap(long)]
    max_vars: Option<usize>,

    /// Log pipeline stages (-v) and symbol bindings (-vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut source = None;
    match run(&args, &mut source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.print_diag(source.as_ref());
            ExitCode::FAILURE
        }
    }
}

/// Leaves the loaded source in `slot` so diagnostics can point into it.
fn run(args: &Args, slot: &mut Option<SourceBuffer>) -> Result<(), Error> {
    let mut limits = match &args.config {
        Some(path) => Limits::load(path)?,
        None => Limits::default(),
    };
    if let Some(labels) = args.max_labels {
        limits.labels = labels;
    }
    if let Some(vars) = args.max_vars {
        limits.vars = vars;
    }

    let source = slot.insert(SourceBuffer::load(&args.input)?);
    let assembly = hackasm::assemble(source, &limits)?;
    let bin = assembly.encode();

    info!("5. Write {} ({} words)", args.output, assembly.insts.len());
    std::fs::write(&args.output, bin).map_err(|e| Error::FileWrite(args.output.clone(), e))?;

    if args.dump {
        util::print_dump(source, &assembly);
    }
    Ok(())
}
