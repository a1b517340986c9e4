use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use lrl_chaincode::{ChaincodeConfig, LandRegisterContract, Operation, Response};
use lrl_store::FileStateStore;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    if let Command::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let store = FileStateStore::open(&cli.store)
        .with_context(|| format!("opening state file {}", cli.store.display()))?;
    debug!(path = %cli.store.display(), "state store opened");
    let contract = LandRegisterContract::new(store, config);

    match cli.command {
        Command::Init => cmd_init(&contract),
        Command::Query(args) => {
            let r = invoke(&contract, Operation::QueryLandRegister, &[args.id])?;
            print_payload(&r);
            Ok(())
        }
        Command::List => {
            let r = invoke::<String>(&contract, Operation::QueryAllLandRegisters, &[])?;
            print_payload(&r);
            Ok(())
        }
        Command::Create(args) => {
            let json = read_document(&args.document)?;
            invoke(&contract, Operation::CreateLandRegister, &[json])?;
            println!("{} Land register created", "✓".green().bold());
            Ok(())
        }
        Command::Reserve(args) => {
            let json = read_document(&args.document)?;
            invoke(&contract, Operation::CreateReservationNote, &[json])?;
            println!("{} Reservation note attached", "✓".green().bold());
            Ok(())
        }
        Command::Invoke(args) => cmd_invoke(&contract, args),
        Command::Config => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ChaincodeConfig> {
    match path {
        Some(path) => Ok(ChaincodeConfig::load(path)?),
        None => Ok(ChaincodeConfig::default()),
    }
}

/// Inline JSON, or the contents of the file named after a leading `@`.
fn read_document(arg: &str) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
        }
        None => Ok(arg.to_string()),
    }
}

fn invoke<A: AsRef<str>>(
    contract: &LandRegisterContract<FileStateStore>,
    operation: Operation,
    args: &[A],
) -> anyhow::Result<Response> {
    check(contract.invoke(operation.name(), args))
}

fn check(response: Response) -> anyhow::Result<Response> {
    if response.is_ok() {
        Ok(response)
    } else {
        eprintln!("{} {}", "✗".red().bold(), response.message);
        bail!("invocation failed with status {}", response.status)
    }
}

fn print_payload(response: &Response) {
    println!("{}", String::from_utf8_lossy(&response.payload));
}

fn cmd_init(contract: &LandRegisterContract<FileStateStore>) -> anyhow::Result<()> {
    let keys = contract.seed()?;
    println!("{} Ledger initialized", "✓".green().bold());
    for key in keys {
        println!("  {}", key.as_str().cyan());
    }
    Ok(())
}

fn cmd_invoke(
    contract: &LandRegisterContract<FileStateStore>,
    args: InvokeArgs,
) -> anyhow::Result<()> {
    let response = check(contract.invoke(&args.function, args.args.as_slice()))?;
    println!("{} status {}", "✓".green().bold(), response.status.to_string().bold());
    if !response.payload.is_empty() {
        print_payload(&response);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lrl_types::{sample_land_registers, ReservationNoteRequest};
    use std::path::PathBuf;

    fn cli(dir: &Path, command: Command) -> Cli {
        Cli {
            command,
            store: dir.join("state.json"),
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn read_document_inline_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{\"a\":1}").unwrap();

        assert_eq!(read_document("{}").unwrap(), "{}");
        assert_eq!(
            read_document(&format!("@{}", path.display())).unwrap(),
            "{\"a\":1}"
        );
        assert!(read_document("@/nonexistent/doc.json").is_err());
    }

    #[test]
    fn init_then_reserve_persists_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        run_command(cli(dir.path(), Command::Init)).unwrap();

        let request = ReservationNoteRequest::from(&sample_land_registers()[0]);
        let path = dir.path().join("request.json");
        std::fs::write(&path, serde_json::to_string(&request).unwrap()).unwrap();
        let reserve = || {
            Command::Reserve(DocumentArgs {
                document: format!("@{}", path.display()),
            })
        };

        run_command(cli(dir.path(), reserve())).unwrap();
        assert!(run_command(cli(dir.path(), reserve())).is_err());
    }

    #[test]
    fn unknown_invoke_fails() {
        let dir = tempfile::tempdir().unwrap();
        let command = Command::Invoke(InvokeArgs {
            function: "burn".into(),
            args: vec![],
        });
        assert!(run_command(cli(dir.path(), command)).is_err());
    }

    #[test]
    fn missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut c = cli(dir.path(), Command::Config);
        c.config = Some(PathBuf::from("/nonexistent/lrl.toml"));
        assert!(run_command(c).is_err());
    }
}
