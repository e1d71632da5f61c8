//! Recovering Parser
//!
//! This example shows how a machine keeps running after reported errors.
//!
//! Key concepts:
//! - Actions raise into the error channel and keep going
//! - A custom bad-change handler routes unknown pairs to a recovery state
//! - Only an error pending at `EXIT` reaches the caller
//!
//! Run with: cargo run --example recovering_parser

use tablefsm::builder::TableBuilder;
use tablefsm::{states, ErrorChannel, ErrorDomain, FsmInfo, StateId};

states! {
    NEXT_TOKEN,
    NUMBER,
    RECOVER,
}

struct Parser {
    tokens: Vec<&'static str>,
    position: usize,
    total: i64,
    skipped: usize,
}

fn next_token(_errors: &mut ErrorChannel, parser: &mut Parser) -> StateId {
    match parser.tokens.get(parser.position) {
        None => StateId::EXIT,
        Some(token) if token.parse::<i64>().is_ok() => NUMBER,
        // No entry handles this pair, so the bad-change handler decides.
        Some(_) => StateId::user(100),
    }
}

fn main() {
    println!("=== Recovering Parser Example ===\n");

    let table = TableBuilder::<Parser>::new()
        .on(StateId::INIT, NEXT_TOKEN, next_token)
        .on(NEXT_TOKEN, NUMBER, |_, parser| {
            if let Some(value) = parser
                .tokens
                .get(parser.position)
                .and_then(|t| t.parse::<i64>().ok())
            {
                parser.total += value;
            }
            parser.position += 1;
            NEXT_TOKEN
        })
        .on(NUMBER, NEXT_TOKEN, next_token)
        .on(RECOVER, NEXT_TOKEN, next_token)
        .on(NEXT_TOKEN, RECOVER, |errors, parser| {
            errors.raise(format!("skipping '{}'", parser.tokens[parser.position]), 2);
            parser.position += 1;
            parser.skipped += 1;
            NEXT_TOKEN
        })
        .build();

    let mut info = FsmInfo::builder("parser")
        .bad_change_handler(|info, _errors, from, to| {
            println!("{}: no transition {} -> {}, recovering", info.name(), from, to);
            RECOVER
        })
        .build()
        .expect("descriptor");

    let mut parser = Parser {
        tokens: vec!["4", "x", "10", "?", "28"],
        position: 0,
        total: 0,
        skipped: 0,
    };
    let mut errors = ErrorChannel::new(ErrorDomain::Fsm);

    let (from, to) = info.run_with(&mut errors, &mut parser, &table);

    println!("total = {}, skipped = {}", parser.total, parser.skipped);
    println!("finished at {} -> {}, error pending: {}", from, to, errors.has_error());

    println!("\n=== Example Complete ===");
}
