//! File Reader
//!
//! This example drives a small line reader through a transition table.
//!
//! Key concepts:
//! - Declaring states with `states!`
//! - Sharing a mutable argument with every action
//! - Watching each phase through the default logging notifiers
//!
//! Run with: cargo run --example file_reader

use tablefsm::builder::TableBuilder;
use tablefsm::{states, ErrorChannel, FsmInfo, StateId};
use tracing_subscriber::EnvFilter;

states! {
    OPEN,
    READ,
    PRINT,
    CLOSE,
}

struct Document {
    lines: Vec<String>,
    next: usize,
}

fn read(_errors: &mut ErrorChannel, doc: &mut Document) -> StateId {
    if doc.next < doc.lines.len() {
        PRINT
    } else {
        CLOSE
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== File Reader Example ===\n");

    let table = TableBuilder::<Document>::new()
        .on(StateId::INIT, OPEN, |_, doc| {
            println!("opened document with {} lines", doc.lines.len());
            READ
        })
        .on(OPEN, READ, read)
        .on(PRINT, READ, read)
        .on(READ, PRINT, |_, doc| {
            println!("  {:>2}: {}", doc.next + 1, doc.lines[doc.next]);
            doc.next += 1;
            READ
        })
        .on(READ, CLOSE, |_, _| {
            println!("closed document");
            StateId::EXIT
        })
        .build();

    let mut info = FsmInfo::builder("file-reader")
        .with_default_notifiers()
        .build()
        .expect("descriptor");

    let mut doc = Document {
        lines: vec![
            "state machines".to_string(),
            "driven by tables".to_string(),
            "end at EXIT".to_string(),
        ],
        next: 0,
    };

    match info.run(&mut doc, &table) {
        Ok((from, to)) => println!("\nfinished at {} -> {}", from, to),
        Err(error) => println!("\nfailed: {}", error),
    }

    println!("\n=== Example Complete ===");
}
