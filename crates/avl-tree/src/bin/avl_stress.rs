//! `avl-stress` — randomized insert/remove check of the AVL invariants.
//!
//! Usage:
//!   avl-stress [--small] [--trees N] [--insertions N] [--range N]
//!              [--removes N] [--seed N] [-v...]
//!
//! Exits with status 1 on the first count or balance violation and with
//! status 2 on bad arguments.

use std::str::FromStr;

use avl_tree::stress::{self, StressConfig};

fn value<T: FromStr>(flag: &str, arg: Option<String>) -> T {
    match arg.as_deref().map(str::parse) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("{flag} expects a number.");
            std::process::exit(2);
        }
    }
}

fn parse_args() -> (StressConfig, usize) {
    let mut config = StressConfig::default();
    let mut verbosity = 0;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--small" => {
                config = StressConfig {
                    seed: config.seed,
                    ..StressConfig::SMALL
                }
            }
            "--trees" => config.trees = value(&arg, args.next()),
            "--insertions" => config.insertions = value(&arg, args.next()),
            "--range" => config.range = value(&arg, args.next()),
            "--removes" => config.removes = value(&arg, args.next()),
            "--seed" => config.seed = Some(value(&arg, args.next())),
            "-v" => verbosity += 1,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(2);
            }
        }
    }
    (config, verbosity)
}

fn main() {
    let (config, verbosity) = parse_args();
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("avl_tree")
        .verbosity(verbosity + 1)
        .init()
    {
        eprintln!("{e}");
    }

    let result = stress::run(&config, |report| {
        println!("[+] AVL node count: {}", report.count);
        println!("[+] Valid AVL: true");
        println!(
            "[+] AVL node count (Pos-Remove): {}",
            report.count_after_remove
        );
        println!("[+] Valid AVL (Pos-Remove): true");
        println!();
    });

    match result {
        Ok(()) => println!("[+] Successfully"),
        Err(e) => {
            eprintln!("[-] Error: {e}");
            std::process::exit(1);
        }
    }
}
