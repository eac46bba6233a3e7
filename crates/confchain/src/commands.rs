use std::collections::HashMap;
use std::path::Path;

use clap::ArgMatches;
use tracing::info;

use confchain_core::catalog;
use confchain_core::secret;
use confchain_core::sources::set_global_property;
use confchain_core::Environment;

/// Shown in `list` output in place of resolved secret material.
const REDACTED: &str = "********";

#[derive(serde::Serialize)]
struct EntryResponse {
    slug: &'static str,
    name: String,
    description: Option<String>,
    keys: Vec<String>,
    sensitive: bool,
    value: Option<String>,
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("get", sub)) => get_command(sub, &build_environment(matches)?),
        Some(("require", sub)) => require_command(sub, &build_environment(matches)?),
        Some(("list", sub)) => list_command(sub, &build_environment(matches)?),
        Some(("encode", sub)) => {
            let text = sub.get_one::<String>("text").expect("text is required");
            println!("{}", secret::encode(text));
            Ok(())
        }
        Some(("decode", sub)) => {
            let text = sub.get_one::<String>("text").expect("text is required");
            println!("{}", secret::decode(text)?);
            Ok(())
        }
        _ => unreachable!("subcommand is required"),
    }
}

/// Build the environment for this invocation: `-D` defines go into the
/// process-wide property table, `--properties` seeds the context-local
/// source, `--context` names the execution context for error messages.
fn build_environment(matches: &ArgMatches) -> Result<Environment, Box<dyn std::error::Error>> {
    if let Some(defines) = matches.get_many::<String>("define") {
        for define in defines {
            let (key, value) = parse_define(define)?;
            set_global_property(key, value);
        }
    }

    let local = match matches.get_one::<String>("properties") {
        Some(path) => load_properties_file(Path::new(path))?,
        None => HashMap::new(),
    };

    let context = matches
        .get_one::<String>("context")
        .cloned()
        .unwrap_or_else(|| "confchain".to_string());

    Ok(Environment::production(context, local))
}

fn parse_define(define: &str) -> Result<(String, String), String> {
    match define.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Invalid property '{define}', expected KEY=VALUE")),
    }
}

/// Load a flat properties map from a TOML file. Nested tables are flattened
/// into dotted keys, so `[publish] url = "..."` becomes `publish.url`.
fn load_properties_file(path: &Path) -> Result<HashMap<String, String>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read properties file '{}': {}", path.display(), e))?;
    let table: toml::Table = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse properties file '{}': {}", path.display(), e))?;

    let mut properties = HashMap::new();
    flatten_table(None, &table, &mut properties);
    Ok(properties)
}

fn flatten_table(prefix: Option<&str>, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(nested) => flatten_table(Some(&full_key), nested, out),
            toml::Value::String(text) => {
                out.insert(full_key, text.clone());
            }
            other => {
                out.insert(full_key, other.to_string());
            }
        }
    }
}

fn get_command(
    sub: &ArgMatches,
    environment: &Environment,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("name").expect("name is required");
    let entry = find_entry(name)?;

    match entry.resolve_display(environment)? {
        Some(value) => println!("{value}"),
        None => info!(event = "cli.get.absent", entry = entry.slug),
    }
    Ok(())
}

fn require_command(
    sub: &ArgMatches,
    environment: &Environment,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = sub.get_one::<String>("name").expect("name is required");
    let entry = find_entry(name)?;

    let value = entry.require_display(environment)?;
    println!("{value}");
    Ok(())
}

fn list_command(
    sub: &ArgMatches,
    environment: &Environment,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut responses = Vec::new();
    for entry in catalog::entries() {
        let value = entry.resolve_display(environment)?.map(|value| {
            if entry.sensitive {
                REDACTED.to_string()
            } else {
                value
            }
        });
        responses.push(EntryResponse {
            slug: entry.slug,
            name: entry.name.clone(),
            description: entry.description.clone(),
            keys: entry.keys.clone(),
            sensitive: entry.sensitive,
            value,
        });
    }

    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&responses)?);
    } else {
        for response in &responses {
            let value = response.value.as_deref().unwrap_or("(absent)");
            println!("{:<28} {}", response.slug, value);
        }
    }
    Ok(())
}

fn find_entry(name: &str) -> Result<&'static catalog::CatalogEntry, String> {
    catalog::find(name).ok_or_else(|| {
        format!("Unknown configuration '{name}'. Use 'confchain list' to see available values.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use std::io::Write;

    #[test]
    fn test_parse_define() {
        assert_eq!(
            parse_define("confchain.workflow=release").unwrap(),
            ("confchain.workflow".to_string(), "release".to_string())
        );
        assert_eq!(
            parse_define("key=a=b").unwrap(),
            ("key".to_string(), "a=b".to_string())
        );
        assert!(parse_define("no-equals").is_err());
        assert!(parse_define("=value").is_err());
    }

    #[test]
    fn test_load_properties_file_flattens_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
"confchain.workflow" = "release"

[confchain.toolchain]
version = 21

[confchain.log]
enabled = true
"#
        )
        .unwrap();

        let properties = load_properties_file(file.path()).unwrap();
        assert_eq!(
            properties.get("confchain.workflow"),
            Some(&"release".to_string())
        );
        assert_eq!(
            properties.get("confchain.toolchain.version"),
            Some(&"21".to_string())
        );
        assert_eq!(
            properties.get("confchain.log.enabled"),
            Some(&"true".to_string())
        );
    }

    #[test]
    fn test_load_properties_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "invalid toml [[[").unwrap();
        assert!(load_properties_file(file.path()).is_err());
    }

    #[test]
    fn test_run_get_with_define() {
        let matches = app::build_cli()
            .try_get_matches_from([
                "confchain",
                "get",
                "workflow",
                "-D",
                "confchain.workflow=release",
            ])
            .unwrap();
        assert!(run_command(&matches).is_ok());
    }

    #[test]
    fn test_run_get_unknown_entry_fails() {
        let matches = app::build_cli()
            .try_get_matches_from(["confchain", "get", "no.such.entry"])
            .unwrap();
        let error = run_command(&matches).unwrap_err();
        assert!(error.to_string().contains("Unknown configuration"));
    }

    #[test]
    fn test_run_require_missing_fails() {
        let matches = app::build_cli()
            .try_get_matches_from(["confchain", "--context", "project 'demo'", "require", "publish.password"])
            .unwrap();
        let error = run_command(&matches).unwrap_err();
        assert!(error.to_string().contains("project 'demo'"));
    }

    #[test]
    fn test_run_encode() {
        let matches = app::build_cli()
            .try_get_matches_from(["confchain", "encode", "Hello World!"])
            .unwrap();
        assert!(run_command(&matches).is_ok());
    }

    #[test]
    fn test_run_decode_rejects_garbage() {
        let matches = app::build_cli()
            .try_get_matches_from(["confchain", "decode", "not base64!"])
            .unwrap();
        assert!(run_command(&matches).is_err());
    }
}
