use std::process::ExitCode;

use argh::FromArgs;
use bmp2array::{ArrayRequest, BitDepth, DecodeRequest, LogTrace, Unstoppable, dump_rows};

#[derive(FromArgs)]
/// Convert a 1-bit or 4-bit BMP into a C byte array.
struct Args {
    /// input BMP file
    #[argh(positional)]
    input: String,

    /// color depth in bits (1 or 4)
    #[argh(positional)]
    depth: u16,

    /// output source file
    #[argh(positional)]
    output: String,

    /// row order: R emits the last stored row first, N (default) keeps file order
    #[argh(positional)]
    order: Option<String>,

    /// log header fields and the decoded pixel rows
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let data = match std::fs::read(&args.input) {
        Ok(data) => data,
        Err(err) => {
            log::error!("cannot read {}: {err}", args.input);
            return ExitCode::FAILURE;
        }
    };

    let mut trace = LogTrace;
    let record = DecodeRequest::new(&data)
        .with_depth(BitDepth::from_bits(args.depth))
        .with_trace(&mut trace)
        .decode(Unstoppable);
    if let Err(err) = record.status() {
        log::error!("cannot convert {}: {err}", args.input);
        return ExitCode::FAILURE;
    }

    if log::log_enabled!(log::Level::Debug) {
        match dump_rows(&record) {
            Ok(dump) => log::debug!("stored rows:\n{dump}"),
            Err(err) => log::debug!("no row dump: {err}"),
        }
    }

    let reverse = args
        .order
        .as_deref()
        .is_some_and(|order| order.eq_ignore_ascii_case("R"));

    if let Err(err) = ArrayRequest::new()
        .reverse_rows(reverse)
        .write_file(&record, &args.output, Unstoppable)
    {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }

    log::info!(
        "wrote {}x{} {}-bit array to {}",
        record.width(),
        record.height(),
        record.header().depth.bits(),
        args.output
    );
    ExitCode::SUCCESS
}
