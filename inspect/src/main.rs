use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use paysdk_payloads::{DeviceData, Payee};

#[derive(Parser)]
struct Args {
    /// Pretty-print the output.
    #[clap(long, global = true)]
    pretty: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a payee from JSON. Reads stdin if no path is given, or if the path is `-`.
    Payee { path: Option<PathBuf> },

    /// Build device data for analytics.
    Device {
        #[clap(long)]
        app_name: String,

        #[clap(long)]
        app_id: String,

        #[clap(long)]
        simulator: bool,

        #[clap(long)]
        merchant_app_version: String,
    },
}

/// Read the payee JSON from `path`, or from `stdin` when there is no path or the path is `-`.
fn read_input<R: Read>(path: Option<&PathBuf>, mut stdin: R) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Unable to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Unable to read stdin")?;
            Ok(buf)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn payee_from_text(text: &str) -> Result<Payee> {
    Payee::from_json_str(text).context("Payee input is not valid JSON")
}

fn run<R: Read>(args: Args, stdin: R) -> Result<String> {
    match args.command {
        Command::Payee { path } => {
            let text = read_input(path.as_ref(), stdin)?;
            let payee = payee_from_text(&text)?;
            if payee.email_address.is_empty() {
                log::warn!("Payee has no email address");
            }
            to_json(&payee, args.pretty)
        }
        Command::Device {
            app_name,
            app_id,
            simulator,
            merchant_app_version,
        } => {
            let device = DeviceData::new(app_name, app_id, simulator, merchant_app_version);
            log::debug!("Built {:?}", device);
            to_json(&device, args.pretty)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    println!("{}", run(args, std::io::stdin())?);
    Ok(())
}

#[cfg(test)]
fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(argv).expect("Arguments should parse")
}

#[cfg(test)]
fn no_stdin() -> std::io::Empty {
    std::io::empty()
}

#[test]
fn test_device_command() {
    let out = run(
        parse(&[
            "paysdk_inspect",
            "device",
            "--app-name",
            "Shop",
            "--app-id",
            "com.example.shop",
            "--simulator",
            "--merchant-app-version",
            "1.0",
        ]),
        no_stdin(),
    )
    .unwrap();

    let back: DeviceData = serde_json::from_str(&out).unwrap();
    assert_eq!(back, DeviceData::new("Shop", "com.example.shop", true, "1.0"));
}

#[test]
fn test_device_requires_fields() {
    assert!(Args::try_parse_from(&["paysdk_inspect", "device", "--app-name", "Shop"]).is_err());
}

#[test]
fn test_payee_from_file() {
    let path = std::env::temp_dir().join(format!("paysdk_inspect_payee_{}.json", std::process::id()));
    std::fs::write(&path, r#"{"email_address": "a@b.com"}"#).unwrap();

    let out = run(parse(&["paysdk_inspect", "payee", path.to_str().unwrap()]), no_stdin());
    std::fs::remove_file(&path).unwrap();

    let back: Payee = serde_json::from_str(&out.unwrap()).unwrap();
    assert_eq!(back.email_address, "a@b.com");
}

#[test]
fn test_payee_from_stdin() {
    let input = r#"{"email_address": "stdin@b.com"}"#;

    for argv in [&["paysdk_inspect", "payee"][..], &["paysdk_inspect", "payee", "-"][..]] {
        let out = run(parse(argv), std::io::Cursor::new(input)).unwrap();
        let back: Payee = serde_json::from_str(&out).unwrap();
        assert_eq!(back, Payee::new("stdin@b.com"), "argv: {:?}", argv);
    }
}

#[test]
fn test_payee_from_empty_stdin_is_an_error() {
    assert!(run(parse(&["paysdk_inspect", "payee"]), no_stdin()).is_err());
}

#[test]
fn test_pretty_flag() {
    let input = r#"{"email_address": "a@b.com"}"#;

    let compact = run(parse(&["paysdk_inspect", "payee"]), std::io::Cursor::new(input)).unwrap();
    assert!(!compact.contains('\n'));
    assert_eq!(compact, r#"{"email_address":"a@b.com"}"#);

    let pretty = run(
        parse(&["paysdk_inspect", "payee", "--pretty"]),
        std::io::Cursor::new(input),
    )
    .unwrap();
    assert!(pretty.contains('\n'));
    assert_eq!(pretty, "{\n  \"email_address\": \"a@b.com\"\n}");

    let device = run(
        parse(&[
            "paysdk_inspect",
            "--pretty",
            "device",
            "--app-name",
            "Shop",
            "--app-id",
            "x",
            "--merchant-app-version",
            "1.0",
        ]),
        no_stdin(),
    )
    .unwrap();
    assert!(device.lines().count() > 1);
}

#[test]
fn test_payee_errors() {
    assert!(payee_from_text("nope").is_err());
    assert!(run(parse(&["paysdk_inspect", "payee", "/definitely/not/here.json"]), no_stdin()).is_err());
    assert_eq!(payee_from_text("{}").unwrap(), Payee::default());
}
