use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("confchain")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve typed build configuration values from ranked sources")
        .long_about("confchain looks up well-known build settings (versions, credentials, feature flags, secret material) across ranked sources: process environment variables, context-local properties, and process-wide properties. Values are parsed, validated, and fall back along descriptor links and static defaults.")
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .long("define")
                .value_name("KEY=VALUE")
                .help("Set a process-wide property (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("properties")
                .long("properties")
                .value_name("FILE")
                .help("TOML file of context-local properties (nested tables become dotted keys)")
                .global(true),
        )
        .arg(
            Arg::new("context")
                .long("context")
                .value_name("NAME")
                .help("Execution context identity shown in missing-value errors")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("get")
                .about("Resolve a catalog value; prints nothing when absent")
                .arg(
                    Arg::new("name")
                        .help("Catalog slug (e.g. toolchain.version) or any declared key")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("require")
                .about("Resolve a catalog value that must be present")
                .arg(
                    Arg::new("name")
                        .help("Catalog slug or any declared key")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List all catalog entries with their resolved values")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("encode").about("Base64-encode text").arg(
                Arg::new("text")
                    .help("Text to encode")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(
            Command::new("decode").about("Base64-decode text").arg(
                Arg::new("text")
                    .help("Base64 text to decode")
                    .required(true)
                    .index(1),
            ),
        )
}
