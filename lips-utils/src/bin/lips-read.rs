use anyhow::{bail, Context as _};
use clap::{Parser, ValueEnum};
use lips_reader::parse::{self, Feed, LabelScope, ReadStatus};
use lips_reader::{print, Datum, Printer};
use std::{
    fs::{self, File},
    io::{self, BufRead, BufWriter, Read, Write},
    path::PathBuf,
};

/// Reads Scheme data and prints it back in canonical notation.
#[derive(Parser, Debug)]
struct Args {
    /// File to read; standard input if omitted.
    input: Option<PathBuf>,
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Fold the case of symbols and character names, as after `#!fold-case`.
    #[arg(long)]
    fold_case: bool,
    /// Read `[` and `]` as vector brackets instead of list brackets.
    #[arg(long)]
    square_vectors: bool,
    #[arg(short, long, default_value = "form")]
    labels: Labels,
    /// Label all shared structure when printing, not only cycles.
    #[arg(long)]
    shared: bool,
    /// Abbreviate `(quote x)` and friends when printing.
    #[arg(short, long)]
    abbreviate: bool,
    /// Only check the input, printing nothing.
    #[arg(long, conflicts_with = "repl")]
    check: bool,
    /// Read standard input interactively, one datum at a time.
    #[arg(long, conflicts_with_all = ["input", "output"])]
    repl: bool,
}

impl Args {
    fn parse_options(&self) -> parse::Options {
        let brackets = if self.square_vectors {
            parse::Brackets::Vector
        } else {
            parse::Brackets::List
        };
        parse::Options::default()
            .with_fold_case(self.fold_case)
            .with_brackets(brackets)
            .with_label_scope(match self.labels {
                Labels::Form => LabelScope::Form,
                Labels::Session => LabelScope::Session,
            })
    }

    fn print_options(&self) -> print::Options {
        print::Options::default()
            .with_shared_labels(self.shared)
            .with_quote_abbreviation(self.abbreviate)
    }
}

/// Scope of datum labels.
#[derive(ValueEnum, Default, Clone, Copy, Debug)]
enum Labels {
    /// Labels are local to each top-level datum.
    #[default]
    Form,
    /// Labels stay visible in later top-level datums.
    Session,
}

fn print_datum<W: Write>(
    printer: &mut Printer<W, print::CustomizedFormatter>,
    datum: &Datum,
) -> io::Result<()> {
    printer.print_datum(datum)?;
    printer.write_all(b"\n")
}

fn read_file(args: &Args) -> anyhow::Result<()> {
    let (name, text) = if let Some(path) = &args.input {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read input file {}", path.display()))?;
        (path.display().to_string(), text)
    } else {
        let mut text = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut text)
            .context("cannot read standard input")?;
        ("<stdin>".to_owned(), text)
    };
    let output: Box<dyn io::Write> = if let Some(path) = &args.output {
        let file = File::create_new(path)
            .with_context(|| format!("cannot open output file {}", path.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(io::stdout().lock())
    };
    let mut parser = lips_reader::Parser::from_str_custom(&text, args.parse_options());
    let mut printer = Printer::with_options(output, args.print_options());
    let mut count = 0usize;
    for datum in parser.datum_iter() {
        let datum = datum.with_context(|| format!("cannot read {}", name))?;
        count += 1;
        if !args.check {
            print_datum(&mut printer, &datum)?;
        }
    }
    if args.check {
        eprintln!("{}: {} datums", name, count);
    }
    printer.flush()?;
    Ok(())
}

fn repl(args: &Args) -> anyhow::Result<()> {
    let mut feed = Feed::with_options(args.parse_options());
    let mut printer = Printer::with_options(io::stdout().lock(), args.print_options());
    let mut errors = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("cannot read standard input")?;
        feed.push_str(&line);
        feed.push_str("\n");
        loop {
            match feed.next_datum() {
                Ok(ReadStatus::Datum(datum)) => print_datum(&mut printer, &datum)?,
                Ok(ReadStatus::Incomplete) | Ok(ReadStatus::Exhausted) => break,
                Err(e) => {
                    errors += 1;
                    eprintln!("error: {}", e);
                    feed.clear();
                    break;
                }
            }
        }
        printer.flush()?;
    }
    if !feed.pending().trim().is_empty() {
        bail!("incomplete datum at end of input, starting at {}", feed.position());
    }
    if errors > 0 {
        bail!("{} datums could not be read", errors);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.repl {
        repl(&args)
    } else {
        read_file(&args)
    }
}
