use std::process::ExitCode;

use clap::{Parser, Subcommand};

use retrace::Engine;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the compiled NFA as a transition table.
    Table {
        #[arg(long)]
        pattern: String,
    },
    /// Render the compiled NFA to an SVG file.
    Svg {
        #[arg(long)]
        pattern: String,
        #[arg(long, default_value = "./graph.svg")]
        out: String,
    },
    /// Run a pattern against an input and report matches.
    Match {
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        input: String,
        /// Report every non-overlapping match instead of only the first.
        #[arg(long)]
        all: bool,
        /// Also print capture-group spans.
        #[arg(long)]
        captures: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Commands::Table { pattern } => {
            let engine = Engine::compile(&pattern)?;
            println!("{engine}");
        }
        Commands::Svg { pattern, out } => {
            let engine = Engine::compile(&pattern)?;
            std::fs::write(&out, engine.to_svg())?;
        }
        Commands::Match {
            pattern,
            input,
            all,
            captures,
        } => {
            let engine = Engine::compile(&pattern)?;
            print_matches(&engine, &input, all, captures);
        }
    }

    Ok(())
}

fn print_matches(engine: &Engine, input: &str, all: bool, captures: bool) {
    if all {
        if captures {
            for caps in engine.captures_all(input) {
                print_capture_line(&caps);
            }
        } else {
            for m in engine.find_all(input) {
                println!("{}..{}", m.start, m.end);
            }
        }
        return;
    }

    if captures {
        match engine.captures(input) {
            Some(caps) => print_capture_line(&caps),
            None => println!("no match"),
        }
    } else {
        match engine.find(input) {
            Some(m) => println!("{}..{}", m.start, m.end),
            None => println!("no match"),
        }
    }
}

fn print_capture_line(caps: &[retrace::Capture]) {
    let rendered: Vec<String> = caps
        .iter()
        .map(|c| match &c.name {
            Some(name) => format!("{}({name})={}..{}", c.group, c.start, c.end),
            None => format!("{}={}..{}", c.group, c.start, c.end),
        })
        .collect();
    println!("{}", rendered.join(" "));
}
