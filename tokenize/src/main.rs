use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use kotoba::errors::KotobaError;
use kotoba::{Dictionary, FeatureLayout, Tokenizer, group_phrases};

use clap::Parser;
use thiserror::Error;

#[derive(Clone, Debug)]
enum OutputMode {
    Mecab,
    Wakati,
    Detail,
    Phrase,
}

impl FromStr for OutputMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "mecab" => Ok(Self::Mecab),
            "wakati" => Ok(Self::Wakati),
            "detail" => Ok(Self::Detail),
            "phrase" => Ok(Self::Phrase),
            _ => Err("Could not parse a mode"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Predicts morphemes")]
struct Args {
    /// System dictionary (sys.dic). Files ending in .gz or .zst are decompressed.
    #[clap(short = 'i', long)]
    sysdic: PathBuf,

    /// Connection matrix (matrix.bin). Files ending in .gz or .zst are decompressed.
    #[clap(short = 'm', long)]
    matrix: PathBuf,

    /// Output mode. Choices are mecab, wakati, detail, and phrase.
    #[clap(short = 'O', long, default_value = "mecab")]
    output_mode: OutputMode,

    /// Ignores white spaces in input strings.
    #[clap(short = 'S', long)]
    ignore_space: bool,

    /// Feature field holding the part of speech.
    #[clap(long, default_value = "0")]
    pos_field: usize,

    /// Feature field holding the dictionary form.
    #[clap(long, default_value = "10")]
    dictionary_form_field: usize,
}

#[derive(Debug, Error)]
enum TokenizeError {
    #[error(transparent)]
    Kotoba(#[from] KotobaError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), TokenizeError> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = Dictionary::from_paths(&args.sysdic, &args.matrix)?;
    eprintln!(
        "Loaded {} tokens ({}), matrix {}x{}",
        dict.lexicon().num_tokens(),
        dict.charset(),
        dict.header().left_size,
        dict.header().right_size,
    );

    let layout = FeatureLayout {
        pos: args.pos_field,
        pos_detail: args.pos_field + 1,
        dictionary_form: args.dictionary_form_field,
    };
    let tokenizer = Tokenizer::new(dict)
        .feature_layout(layout)
        .ignore_space(args.ignore_space);

    eprintln!("Ready to tokenize");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for (lineno, line) in lines.enumerate() {
        let line = line?;
        let morphemes = match tokenizer.parse(&line) {
            Ok(morphemes) => morphemes,
            Err(e) => {
                eprintln!("line {}: {e}", lineno + 1);
                continue;
            }
        };
        match args.output_mode {
            OutputMode::Mecab => {
                for m in &morphemes {
                    out.write_all(m.surface().as_bytes())?;
                    out.write_all(b"\t")?;
                    out.write_all(m.feature().as_bytes())?;
                    out.write_all(b"\n")?;
                }
                out.write_all(b"EOS\n")?;
            }
            OutputMode::Wakati => {
                for (i, m) in morphemes.iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(m.surface().as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Detail => {
                for m in &morphemes {
                    writeln!(
                        &mut out,
                        "{}\t{}\tpos_class={:?}\tleft_id={}\tright_id={}\tword_cost={}\ttotal_cost={}",
                        m.surface(),
                        m.feature(),
                        m.pos_class(),
                        m.left_id(),
                        m.right_id(),
                        m.word_cost(),
                        m.total_cost(),
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
            OutputMode::Phrase => {
                for (i, phrase) in group_phrases(&morphemes).into_iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    for m in &morphemes[phrase] {
                        out.write_all(m.surface().as_bytes())?;
                    }
                }
                out.write_all(b"\n")?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
