//! cexc - pack a project directory into a .cex file

use cex::cli::{init_logging, parse_args, PackArgs};

fn main() {
    let result = parse_args::<PackArgs>().and_then(|args| {
        init_logging(args.verbose);
        run(args)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: PackArgs) -> cex::Result<()> {
    let toolchain = args.toolchain.resolve();
    cex::pack(&args.project_dir, &args.output, &toolchain)?;
    println!("Successfully created .cex file: {}", args.output.display());
    Ok(())
}
