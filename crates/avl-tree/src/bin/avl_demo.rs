//! `avl-demo` — build a small tree and print its in-order traversal.
//!
//! Usage:
//!   avl-demo [-v...]
//!
//! Each node is printed as `(elem: KEY, bal: BALANCE_FACTOR)`.

use avl_tree::{format_in_order, insert, print, release, Link};
use log::debug;

const KEYS: [i32; 10] = [16, 7, 19, 6, 12, 20, 10, 13, 9, 8];

fn main() {
    let verbosity = std::env::args().skip(1).filter(|a| a == "-v").count();
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("avl_tree")
        .verbosity(verbosity + 1)
        .init()
    {
        eprintln!("{e}");
    }

    let mut root: Link = None;
    for key in KEYS {
        if let Err(e) = insert(key, &mut root) {
            eprintln!("[-] insert {key}: {e}");
            std::process::exit(1);
        }
    }
    debug!("tree:\n{}", print(root.as_deref(), ""));

    println!("[+] In-Order: {}", format_in_order(root.as_deref()));
    release(&mut root);
}
