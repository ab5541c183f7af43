use clap::{Arg, ArgAction, ArgGroup, Command};
use color_eyre::eyre::{eyre, Result};
use lexdfa::{construct_comment_dfa, construct_word_dfa, load_dfa, visualize, DFA};
use std::path::PathBuf;

fn build_command() -> Command {
    Command::new("lexdfa")
        .version("1.0")
        .about("Run a word or comment recognizing DFA over the provided inputs")
        .arg(
            Arg::new("word")
                .short('w')
                .long("word")
                .value_name("WORD")
                .help("Build an automaton accepting exactly this word")
                .value_parser(clap::value_parser!(String))
                .num_args(1),
        )
        .arg(
            Arg::new("comment")
                .short('c')
                .long("comment")
                .help("Build an automaton accepting a single // line comment or /* */ block comment")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("load")
                .short('l')
                .long("load")
                .value_name("FILE")
                .help("Load an automaton previously saved with --save")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1),
        )
        .group(
            ArgGroup::new("automaton")
                .args(["word", "comment", "load"])
                .required(true),
        )
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .help("Strings to run the automaton on")
                .value_parser(clap::value_parser!(String))
                .num_args(0..),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Run the automaton on the whole contents of a file")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            Arg::new("escapes")
                .short('e')
                .long("escapes")
                .help("Interpret \\n, \\t and \\\\ inside INPUT strings")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save-dfa")
                .long("save-dfa")
                .help("Save the automaton as constructed_dfa.dot and render it with graphviz")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("save")
                .short('s')
                .long("save")
                .value_name("FILE")
                .help("Save the automaton as json")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            Arg::new("visualize")
                .short('v')
                .long("visualize")
                .help("Visualize the automaton inside an interactive window that allows for zooming, panning and clicking of elements")
                .action(ArgAction::SetTrue),
        )
}

fn unescape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {
        "accepted"
    } else {
        "rejected"
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = build_command().get_matches();

    let mut dfa: DFA = if let Some(word) = args.get_one::<String>("word") {
        construct_word_dfa(word)?
    } else if args.get_flag("comment") {
        construct_comment_dfa()
    } else if let Some(file_path) = args.get_one::<PathBuf>("load") {
        load_dfa(file_path)?
    } else {
        return Err(eyre!(
            "Error: One of --word, --comment or --load should be provided!"
        ));
    };

    let escapes = args.get_flag("escapes");

    for input in args.get_many::<String>("inputs").unwrap_or_default() {
        let input = if escapes {
            unescape(input)
        } else {
            input.to_string()
        };
        let accepted = dfa.run(&input);
        println!("{:?}: {}", input, verdict(accepted));
    }

    if let Some(file_path) = args.get_one::<PathBuf>("input") {
        let accepted = dfa.run_file(file_path)?;
        println!("{}: {}", file_path.display(), verdict(accepted));
    }

    if args.get_flag("save-dfa") {
        dfa.show_fa("constructed_dfa")?;
    }

    if let Some(file_path) = args.get_one::<PathBuf>("save") {
        dfa.save_dfa(file_path)?;
        println!("DFA saved as {}", file_path.display());
    }

    if args.get_flag("visualize") {
        visualize(&dfa)?;
    }

    Ok(())
}
