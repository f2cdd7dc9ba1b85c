//! cexr - run the artifact stored in a .cex file

use cex::cli::{init_logging, parse_args, RunArgs};

fn main() {
    let result = parse_args::<RunArgs>().and_then(|args| {
        init_logging(args.verbose);
        run(args)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: RunArgs) -> cex::Result<()> {
    if args.inspect {
        println!("{}", cex::inspect(&args.container)?);
        return Ok(());
    }

    let toolchain = args.toolchain.resolve();
    cex::run(&args.container, &toolchain)
}
