use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError, MoneyCents, NewUserCmd};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "dompet_admin")]
#[command(about = "Admin utilities for Dompet (bootstrap users, verify drivers)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./dompet.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Driver(Driver),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    /// Opening balance of the main wallet, e.g. `150.00`.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    balance: MoneyCents,
}

#[derive(Args, Debug)]
struct Driver {
    #[command(subcommand)]
    command: DriverCommand,
}

#[derive(Subcommand, Debug)]
enum DriverCommand {
    Verify(DriverVerifyArgs),
}

#[derive(Args, Debug)]
struct DriverVerifyArgs {
    /// Driver profile id.
    #[arg(long)]
    id: i64,
    /// Revoke the verification instead of granting it.
    #[arg(long)]
    revoke: bool,
}

fn parse_amount(raw: &str) -> Result<MoneyCents, String> {
    let amount: MoneyCents = raw.parse().map_err(|err: EngineError| err.to_string())?;
    if amount.is_negative() {
        return Err("balance must not be negative".to_string());
    }
    Ok(amount)
}

type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

const MIN_PASSWORD_LEN: usize = 6;

/// Terminal in raw mode with echo replaced by `*`. Restored on drop.
struct MaskedTerminal {
    out: std::io::Stderr,
}

impl MaskedTerminal {
    fn open() -> CliResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self {
            out: std::io::stderr(),
        })
    }

    fn line(&mut self, text: &str) -> CliResult<()> {
        execute!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn read_secret(&mut self, label: &str) -> CliResult<String> {
        self.line(label)?;
        let mut secret = String::new();
        loop {
            let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            else {
                continue;
            };
            let ctrl = modifiers.contains(KeyModifiers::CONTROL);
            match code {
                KeyCode::Enter => break,
                KeyCode::Esc => return Err("cancelled".into()),
                KeyCode::Char('c') if ctrl => return Err("interrupted".into()),
                KeyCode::Backspace if secret.pop().is_some() => {
                    execute!(self.out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                }
                KeyCode::Char(ch) if !ctrl => {
                    secret.push(ch);
                    execute!(self.out, Print("*"))?;
                }
                _ => continue,
            }
            self.out.flush()?;
        }
        execute!(self.out, Print("\r\n"))?;
        Ok(secret)
    }
}

impl Drop for MaskedTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn check_new_password(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirmation {
        return Err("Passwords do not match. Try again.");
    }
    Ok(())
}

/// Three attempts at a password plus its confirmation.
fn prompt_new_password() -> CliResult<String> {
    let mut term = MaskedTerminal::open()?;
    for _ in 0..3 {
        let password = term.read_secret("Password: ")?;
        let confirmation = term.read_secret("Confirm password: ")?;
        match check_new_password(&password, &confirmation) {
            Ok(()) => return Ok(password),
            Err(reason) => term.line(&format!("{reason}\r\n"))?,
        }
    }
    Err("too many attempts".into())
}

async fn connect_db(database_url: &str) -> CliResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_new_password()?;

            let mut cmd = NewUserCmd::new(args.name, args.email, password)
                .opening_balance(args.balance);
            cmd.phone = args.phone;

            match engine.create_user(cmd).await {
                Ok(user) => println!("created user: {} ({})", user.email, user.id),
                Err(EngineError::ExistingKey(email)) => {
                    eprintln!("user already exists: {email}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Driver(Driver {
            command: DriverCommand::Verify(args),
        }) => {
            let driver = engine.verify_driver(args.id, !args.revoke).await?;
            println!(
                "driver {} ({}) verified: {}",
                driver.id, driver.vehicle_plate, driver.is_verified
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_argument_is_parsed_as_major_units() {
        assert_eq!(parse_amount("150.25").unwrap(), MoneyCents::new(15_025));
        assert_eq!(parse_amount("0").unwrap(), MoneyCents::ZERO);
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn new_password_needs_length_and_confirmation() {
        assert!(check_new_password("secret1", "secret1").is_ok());
        assert!(check_new_password("abc", "abc").is_err());
        assert_eq!(
            check_new_password("secret1", "secret2"),
            Err("Passwords do not match. Try again.")
        );
    }

    #[test]
    fn cli_parses_driver_verify() {
        let cli = Cli::try_parse_from(["dompet_admin", "driver", "verify", "--id", "7"]).unwrap();
        match cli.command {
            Command::Driver(Driver {
                command: DriverCommand::Verify(args),
            }) => {
                assert_eq!(args.id, 7);
                assert!(!args.revoke);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
