//! Mock padring binary for integration testing
//!
//! Accepts the same command line as padring and decides its exit status from
//! directives in the configuration file, one per line:
//!
//! ```text
//! exit <n>            exit with status n (default 0)
//! require-lef <name>  exit 3 unless a --lef argument ends in <name>
//! stderr <text>       write text to stderr
//! stdout <text>       write text to stdout
//! ```
//!
//! Any other line is ignored. An unreadable configuration exits 1, like the
//! real tool does when it cannot parse its input.

use std::fs;
use std::path::Path;
use std::process::exit;

#[derive(Default)]
struct Args {
    lefs: Vec<String>,
    outputs: Vec<String>,
    positional: Vec<String>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-L" | "--lef" => args.lefs.extend(iter.next()),
            "-o" | "--output" | "--svg" | "--def" => args.outputs.extend(iter.next()),
            "--filler" => {
                iter.next();
            }
            "-q" | "--quiet" | "-v" | "--verbose" => {}
            _ => args.positional.push(arg),
        }
    }
    args
}

fn main() {
    let args = parse_args();

    if args.positional.len() != 1 {
        println!("Usage: padring [OPTION...] config_file");
        exit(0);
    }

    println!("PADRING version mock");

    let config = &args.positional[0];
    let content = match fs::read_to_string(config) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Cannot parse configuration file {}: {} -- aborting", config, e);
            exit(1);
        }
    };

    let mut code = 0;
    for line in content.lines() {
        let line = line.trim();
        let (directive, rest) = line.split_once(' ').unwrap_or((line, ""));
        match directive {
            "exit" => code = rest.trim().parse().unwrap_or(1),
            "stderr" => eprintln!("{}", rest),
            "stdout" => println!("{}", rest),
            "require-lef" => {
                let wanted = rest.trim();
                let found = args
                    .lefs
                    .iter()
                    .any(|lef| Path::new(lef).file_name().is_some_and(|n| n == wanted));
                if !found {
                    eprintln!("Cell library {} was not supplied", wanted);
                    exit(3);
                }
            }
            _ => {}
        }
    }

    for output in &args.outputs {
        if let Err(e) = fs::write(output, config) {
            eprintln!("Cannot open {} for writing: {}", output, e);
            exit(1);
        }
    }

    exit(code);
}
