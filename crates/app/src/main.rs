//! Numberland Adventures - command-line sign-in driver.
//!
//! Wires the identity provider, the auth store, and the login forms, then
//! runs a single sign-in or sign-out and prints the outcome.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use numberland_application::{
    ApplicationError, ApplicationResult, AuthStore, StudentLogin, TeacherLogin,
};
use numberland_domain::User;
use numberland_infrastructure::{ConfigError, FirebaseConfig, SystemClock, connect};

#[derive(Debug, Parser)]
#[command(name = "numberland", version, about = "Sign in to Numberland Adventures")]
struct Cli {
    /// Fail instead of running offline when no identity provider is configured.
    #[arg(long, global = true)]
    require_provider: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an adventure as a student.
    Student {
        /// Your name.
        #[arg(long, default_value = "")]
        name: String,
        /// Class code from your teacher.
        #[arg(long, default_value = "")]
        class_code: String,
    },
    /// Sign in as a teacher.
    Teacher {
        /// Account email.
        #[arg(long, default_value = "")]
        email: String,
        /// Account password.
        #[arg(long, default_value = "", hide_default_value = true)]
        password: String,
    },
    /// Sign out of the current session.
    Logout,
}

#[tokio::main]
async fn main() -> Result<ExitCode, ApplicationError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "numberland starting");

    let store = open_store(cli.require_provider)?;
    store.ready().await;

    let outcome = run(&store, cli.command).await;
    store.shutdown();

    match outcome {
        Ok(line) => {
            println!("{line}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => match err.user_message() {
            Some(message) => {
                eprintln!("{message}");
                Ok(ExitCode::FAILURE)
            }
            None => Err(err),
        },
    }
}

fn open_store(require_provider: bool) -> ApplicationResult<AuthStore> {
    let configuration = |err: ConfigError| ApplicationError::Configuration(err.to_string());
    let config = FirebaseConfig::from_env().map_err(configuration)?;
    let provider = connect(config, require_provider).map_err(configuration)?;
    Ok(AuthStore::new(provider, Arc::new(SystemClock::new())))
}

async fn run(store: &AuthStore, command: Command) -> ApplicationResult<String> {
    match command {
        Command::Student { name, class_code } => {
            let form = StudentLogin::new(store.clone());
            form.set_name(name);
            form.set_class_code(class_code);
            let student = form.submit().await?;
            Ok(welcome(&student.into()))
        }
        Command::Teacher { email, password } => {
            let form = TeacherLogin::new(store.clone());
            form.set_email(email);
            form.set_password(password);
            let teacher = form.submit().await?;
            Ok(welcome(&teacher.into()))
        }
        Command::Logout => {
            store.logout().await;
            Ok("Signed out.".to_string())
        }
    }
}

fn welcome(user: &User) -> String {
    match user {
        User::Student(student) => format!(
            "Welcome, {}! Class {} - level {}, {} coins.",
            student.name, student.class_code, student.level, student.coins
        ),
        User::Teacher(teacher) => format!("Welcome back, {} ({}).", teacher.name, teacher.email),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use numberland_domain::{Student, Teacher};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_student_command() {
        let cli = Cli::parse_from([
            "numberland",
            "student",
            "--name",
            "Ada",
            "--class-code",
            "abc123",
        ]);
        assert!(!cli.require_provider);
        assert!(matches!(
            cli.command,
            Command::Student { ref name, ref class_code } if name == "Ada" && class_code == "abc123"
        ));
    }

    #[test]
    fn require_provider_is_global() {
        let cli = Cli::parse_from(["numberland", "logout", "--require-provider"]);
        assert!(cli.require_provider);
        assert!(matches!(cli.command, Command::Logout));
    }

    #[test]
    fn welcome_lines() {
        let now = chrono::Utc.timestamp_opt(1_750_000_000, 0).unwrap();
        let student = Student::new("s-1".to_string(), "Ada", "abc123", now);
        assert_eq!(
            welcome(&student.into()),
            "Welcome, Ada! Class ABC123 - level 1, 0 coins."
        );

        let teacher = Teacher::new("t-1".to_string(), None, "t@school.org".to_string());
        assert_eq!(
            welcome(&teacher.into()),
            "Welcome back, Teacher (t@school.org)."
        );
    }
}
