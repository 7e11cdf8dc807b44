use clap::{Arg, ArgAction, Command};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("truely")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Host integrity inspector for interviews and proctored sessions")
        .long_about(
            "truely enumerates running processes, flags windows that hide from screen capture \
             or float above normal applications, and hashes executables for integrity checks.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("processes")
                .about("List running processes with window evasion signals")
                .arg(json_arg())
                .arg(
                    Arg::new("suspicious")
                        .long("suspicious")
                        .short('s')
                        .help("Only show processes with evasive or elevated windows")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("windows")
                .about("Show window properties for one process")
                .arg(
                    Arg::new("pid")
                        .help("Process ID to inspect")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("hash")
                .about("Print the SHA-256 digest of a file")
                .arg(Arg::new("path").help("File to hash").required(true)),
        )
        .subcommand(
            Command::new("scan")
                .about("Match running processes against the configured watchlist")
                .arg(json_arg()),
        )
}
