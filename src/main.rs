//! Offline IMEI checker.
//!
//! Validates each argument without touching the network and prints one line per input.
//! Exit status: 0 when every input is valid, 1 when any is invalid, 2 on usage errors.

use imei_gateway::{format_grouped, validate, Validation};
use std::io::{self, Write};
use std::process::ExitCode;

const EXIT_INVALID: u8 = 1;
const EXIT_USAGE: u8 = 2;

const USAGE: &str = concat!(
    "Usage: imei-gateway [--quiet] <IMEI>...\n",
    "\n",
    "Validates IMEIs offline (length, degenerate values, Luhn checksum).\n",
    "Spaces and dashes inside an IMEI are ignored; quote IMEIs that contain spaces.\n",
    "\n",
    "Options:\n",
    "  -q, --quiet   print nothing, report through the exit status only\n",
    "  -h, --help    show this message\n",
);

fn is_quiet_flag(arg: &str) -> bool {
    arg == "-q" || arg == "--quiet"
}

/// Checks every non-flag argument and returns the process exit status.
fn run(args: &[String], out: &mut impl Write, err: &mut impl Write) -> io::Result<u8> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        err.write_all(USAGE.as_bytes())?;
        return Ok(EXIT_USAGE);
    }

    let quiet = args.iter().any(|a| is_quiet_flag(a));
    let inputs: Vec<&String> = args.iter().filter(|a| !is_quiet_flag(a)).collect();
    if inputs.is_empty() {
        err.write_all(USAGE.as_bytes())?;
        return Ok(EXIT_USAGE);
    }

    let mut all_valid = true;
    for input in inputs {
        match validate(input) {
            Validation::Valid => {
                if !quiet {
                    writeln!(out, "{}\tvalid", format_grouped(input))?;
                }
            }
            Validation::Invalid(reason) => {
                all_valid = false;
                if !quiet {
                    writeln!(out, "{}\tinvalid\t{}\t{}", input, reason.code(), reason)?;
                }
            }
        }
    }

    Ok(if all_valid { 0 } else { EXIT_INVALID })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args, &mut io::stdout().lock(), &mut io::stderr().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("imei-gateway: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(args: &[&str]) -> (u8, String, String) {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(&args, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_all_valid() {
        let (code, out, err) = run_with(&["490154203237518", "35-693803-564380-9"]);
        assert_eq!(code, 0);
        assert_eq!(out, "4901 5420 3237 518\tvalid\n3569 3803 5643 809\tvalid\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_mixed_inputs() {
        let (code, out, _) = run_with(&["490154203237518", "12345", "490154203237519"]);
        assert_eq!(code, 1);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "4901 5420 3237 518\tvalid",
                "12345\tinvalid\twrong_length\tIMEI must be exactly 15 digits",
                "490154203237519\tinvalid\tbad_checksum\tInvalid IMEI checksum",
            ]
        );
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let (code, out, err) = run_with(&["--quiet", "000000000000000"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
        assert!(err.is_empty());

        let (code, out, _) = run_with(&["-q", "490154203237518"]);
        assert_eq!(code, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_inputs_is_usage_error() {
        let cases: [&[&str]; 2] = [&[], &["--quiet"]];
        for args in cases {
            let (code, out, err) = run_with(args);
            assert_eq!(code, 2);
            assert!(out.is_empty());
            assert!(err.starts_with("Usage: imei-gateway"));
        }
    }

    #[test]
    fn test_help_wins_over_inputs() {
        let (code, out, err) = run_with(&["490154203237518", "--help"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.contains("--quiet"));

        let (code, _, _) = run_with(&["-h"]);
        assert_eq!(code, 2);
    }
}
