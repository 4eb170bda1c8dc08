use hive_core::auth_screen::{AuthForm, AuthOutcome};
use hive_core::backend::AuthBackend;

use crate::cli::AuthCommands;
use crate::error::CliError;

pub async fn run_auth<B: AuthBackend>(command: AuthCommands, backend: &B) -> Result<(), CliError> {
    match command {
        AuthCommands::Signup { email, password } => {
            let mut form = AuthForm::with_credentials(email, password);
            match form.sign_up(backend).await? {
                AuthOutcome::Enter => println!("Signed up and signed in as {}", form.email),
                AuthOutcome::Notice(message) => println!("{message}"),
            }
        }
        AuthCommands::Login { email, password } => {
            let mut form = AuthForm::with_credentials(email, password);
            form.sign_in(backend).await?;
            println!("Signed in as {}", form.email);
        }
        AuthCommands::Status => match backend.current_user().await? {
            Some(user) => {
                let label = user.email.as_deref().unwrap_or(user.id.as_str());
                println!("Signed in as {label}");
            }
            None => println!("Not signed in."),
        },
        AuthCommands::Logout => {
            backend.sign_out().await?;
            println!("Signed out");
        }
    }
    Ok(())
}
