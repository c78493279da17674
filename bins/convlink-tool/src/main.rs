use clap::{ArgGroup, Parser};

use convlink_codec::messagecodec;
use convlink_config::{CodecConfig, toml_config};
use convlink_core::{BitBuffer, debug};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Convolutional encoder/decoder for short text messages",
    long_about = "Encodes text from stdin into a rate-1/2 convolutional bit stream, or decodes such a stream back into text"
)]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
struct Args {
    /// Encoding mode (input: stdin, ASCII alphanumerics)
    #[arg(short = 'e', long = "encode")]
    encode: bool,

    /// Decoding mode (input: stdin, '0'/'1' stream)
    #[arg(short = 'd', long = "decode")]
    decode: bool,

    /// Code parameters: X (delay cells), Y (upper feedback scheme), Z (lower feedback scheme)
    #[arg(
        short = 'p',
        long = "params",
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    params: Option<Vec<u32>>,

    /// TOML config file; explicit --params take precedence over it
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Verbose log file
    #[arg(long = "log")]
    log: Option<String>,
}

/// Resolve the effective configuration: defaults, overridden by the config
/// file if given, overridden by explicit --params.
fn resolve_config(args: &Args) -> (CodecConfig, Option<String>) {
    let mut code = CodecConfig::default();
    let mut debug_log = args.log.clone();

    if let Some(path) = &args.config {
        match toml_config::from_file(path) {
            Ok(cfg) => {
                code = cfg.code;
                if debug_log.is_none() {
                    debug_log = cfg.debug_log;
                }
            }
            Err(e) => {
                eprintln!("Failed to load configuration from {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    if let Some(p) = &args.params {
        code = CodecConfig::new(p[0] as usize, p[1], p[2]);
    }

    (code, debug_log)
}

fn main() {
    let args = Args::parse();

    let (code, debug_log) = resolve_config(&args);
    let _log_guard = debug::setup_logging_default(debug_log);

    if let Err(e) = code.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let input = match std::io::read_to_string(std::io::stdin()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read stdin: {}", e);
            std::process::exit(1);
        }
    };

    let result = if args.encode {
        // Only ASCII alphanumerics are encodable; everything else is dropped
        let message: String = input.chars().filter(char::is_ascii_alphanumeric).collect();
        if message.is_empty() {
            println!();
            return;
        }
        tracing::debug!("encoding {} characters with {:?}", message.len(), code);
        messagecodec::encode_message(&message, &code).map(|stream| stream.to_bitstr())
    } else {
        // Keep only '0'/'1'; whitespace and line noise are not part of the stream
        let stream: String = input.chars().filter(|c| *c == '0' || *c == '1').collect();
        if stream.is_empty() {
            println!();
            return;
        }
        tracing::debug!("decoding {} bits with {:?}", stream.len(), code);
        messagecodec::decode_message(BitBuffer::from_bitstr(&stream), &code)
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
