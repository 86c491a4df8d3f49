//! specie CLI.

use std::io;

use specie::{init_tracing, parse_args, run, usage, Action, Driver};

fn main() {
    init_tracing();

    let action = match parse_args(std::env::args().skip(1)) {
        Ok(action) => action,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };

    match action {
        Action::Help => println!("{}", usage()),
        Action::Version => println!("specie {}", env!("CARGO_PKG_VERSION")),
        Action::Run(options) => {
            let mut driver = Driver::stderr();
            let stdin = io::stdin();
            if run(&mut driver, &options, stdin.lock(), &mut io::stdout()).is_err() {
                std::process::exit(1);
            }
        }
    }
}
