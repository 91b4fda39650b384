// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use zachlisp::context::{FileContext, StreamContext};
use zachlisp::eval::{eval_forms, Identity};
use zachlisp::form::{closing_char, Collkind};
use zachlisp::print::print_forms;
use zachlisp::read::{errors, read_file, read_str, write_all};
use zachlisp::settings::{Format, Modes, Settings, DEFAULT_FORMAT, DEFAULT_MODES};
use zachlisp::token::tokenize;
use clap::Parser as ClapParser;
use std::io::{stdin, stdout, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Read and print this file instead of prompting on stdin
    #[clap(short, long, value_parser)]
    file: Option<PathBuf>,
    /// Dump the tokens of the file instead of reading forms
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Show the token position (only with --tokens)
    #[clap(long, value_parser)]
    pos: bool,
    /// Show whitespace and comment tokens (only with --tokens)
    #[clap(short, long, value_parser)]
    all: bool,
    /// Report reader errors with their location on stderr; with
    /// --file, fail if there were any
    #[clap(short, long, value_parser)]
    strict: bool,
    /// Maximum nesting depth of collections and reader macros
    #[clap(long, value_parser, default_value_t = DEFAULT_MODES.depth_fuel)]
    max_depth: u32,
    /// Digits after the decimal point when printing floats
    #[clap(long, value_parser, default_value_t = DEFAULT_FORMAT.float_precision)]
    precision: usize,
}

fn dump_tokens(args: &Args, path: &Path) -> Result<()> {
    let input = std::fs::read_to_string(path)?;
    let mut depth: usize = 0;
    for token in tokenize(&input) {
        if token.kind.is_ignorable() && !args.all {
            continue;
        }
        let indentlevel;
        if Collkind::opened_by(&token).is_some() {
            indentlevel = depth;
            depth += 1;
        } else if closing_char(&token).is_some() {
            if depth == 0 {
                bail!("unexpected closing character {} at {:?}{}",
                      token, path, token.pos)
            }
            depth -= 1;
            indentlevel = depth;
        } else {
            indentlevel = depth;
        }
        if let Some(indent) = indentstr(indentlevel) {
            if args.pos {
                println!("{indent}{} {token}", token.pos);
            } else {
                println!("{indent}{token}");
            }
        } else {
            bail!("forms nested too deeply at {:?}{}", path, token.pos)
        }
    }
    println!(";; final depth = {depth}");
    Ok(())
}

fn run_file(args: &Args, settings: &Settings, path: &Path) -> Result<()> {
    let forms = eval_forms(&mut Identity, read_file(path, settings.modes)?);
    write_all(BufWriter::new(stdout()), &forms, settings.format)?;
    if args.strict {
        let mut n = 0;
        for e in errors(&forms) {
            let container = Box::new(FileContext { path: path.to_path_buf() });
            eprintln!("{}", e.clone().in_context(container));
            n += 1;
        }
        if n > 0 {
            bail!("{} reader error(s) in {:?}", n, path)
        }
    }
    Ok(())
}

fn run_prompt(args: &Args, settings: &Settings) -> Result<()> {
    let mut out = stdout();
    let mut line = String::new();
    let mut lines_before = 0;
    loop {
        write!(out, "user> ")?;
        out.flush()?;
        line.clear();
        if stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        let forms = eval_forms(&mut Identity, read_str(&line, settings.modes));
        if args.strict {
            for e in errors(&forms) {
                let container = Box::new(StreamContext::new("stdin", lines_before));
                eprintln!("{}", e.clone().in_context(container));
            }
        }
        write!(out, "{}", print_forms(&forms, settings.format))?;
        lines_before += 1;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let format = Format { float_precision: args.precision };
    let modes = Modes { depth_fuel: args.max_depth };
    let settings = Settings { format: &format, modes: &modes };

    match &args.file {
        Some(path) if args.tokens => dump_tokens(&args, path),
        Some(path) => run_file(&args, &settings, path),
        None if args.tokens => bail!("--tokens needs --file"),
        None => run_prompt(&args, &settings),
    }
}
