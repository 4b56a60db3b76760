//! Simple command that prints or inspects UUIDv7 strings
//!
//! ```text
//! uuid7 [-n count] [-t unix_ts_ms]
//! uuid7 inspect <uuid>
//! uuid7 timestamp <uuid>
//! ```
//!
//! Set `RUST_LOG=trace` to see why a string is rejected.

use std::{env, io, io::Write, process::ExitCode};

use tracing_subscriber::EnvFilter;

enum Command {
    Generate { count: usize, unix_ts_ms: Option<u64> },
    Inspect(String),
    Timestamp(String),
}

fn main() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args();
    let program = args.next();
    let command = match parse_args(args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {}", message);
            let program = program.as_deref().unwrap_or("uuid7");
            eprintln!("Usage: {} [-n count] [-t unix_ts_ms]", program);
            eprintln!("       {} inspect <uuid>", program);
            eprintln!("       {} timestamp <uuid>", program);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    match command {
        Command::Generate { count, unix_ts_ms } => {
            for _ in 0..count {
                match uuid7_codec::generate(unix_ts_ms) {
                    Ok(uuid) => writeln!(buf, "{}", uuid)?,
                    Err(err) => {
                        buf.flush()?;
                        eprintln!("Error: {}", err);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
        }
        Command::Inspect(text) => {
            let Some(fields) = uuid7_codec::decompose(&text) else {
                eprintln!("Error: not a valid UUIDv7: '{}'", text);
                return Ok(ExitCode::FAILURE);
            };
            writeln!(buf, "{}", text.to_ascii_lowercase())?;
            for field in &fields {
                let mut marker = [b' '; 36];
                for range in field.ranges() {
                    marker[range.clone()].fill(b'^');
                }
                writeln!(buf)?;
                writeln!(buf, "{} ({} bits)", field.name(), field.bits())?;
                writeln!(buf, "{}", String::from_utf8_lossy(&marker).trim_end())?;
                writeln!(buf, "  hex:    {}", field.hex())?;
                writeln!(buf, "  binary: {}", field.binary())?;
            }
        }
        Command::Timestamp(text) => {
            let Some(unix_ts_ms) = uuid7_codec::parse_timestamp(&text) else {
                eprintln!("Error: not a valid UUIDv7: '{}'", text);
                return Ok(ExitCode::FAILURE);
            };
            writeln!(buf, "{}", unix_ts_ms)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut count = None;
    let mut unix_ts_ms = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "inspect" | "timestamp" if count.is_none() && unix_ts_ms.is_none() => {
                let Some(text) = args.next() else {
                    return Err(format!("argument to '{}' missing", arg));
                };
                if let Some(extra) = args.next() {
                    return Err(format!("unrecognized argument '{}'", extra));
                }
                return Ok(if arg == "inspect" {
                    Command::Inspect(text)
                } else {
                    Command::Timestamp(text)
                });
            }
            "-n" => {
                if count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                count.replace(c);
            }
            "-t" => {
                if unix_ts_ms.is_some() {
                    return Err("option 't' given more than once".to_owned());
                }
                let Some(t_arg) = args.next() else {
                    return Err("argument to option 't' missing".to_owned());
                };
                let Ok(t) = t_arg.parse() else {
                    return Err(format!("invalid argument to option 't': '{}'", t_arg));
                };
                unix_ts_ms.replace(t);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(Command::Generate {
        count: count.unwrap_or(1),
        unix_ts_ms,
    })
}
