use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod logging;
mod util;

fn main() -> ExitCode {
    let opts = config::build_options(cli::parse());
    logging::init(opts.verbosity);

    let ctx = display::Context::detect().with_quiet(opts.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(opts, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
