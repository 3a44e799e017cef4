//! 重置管理员密码

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;
use crate::utils::password::hash_password;

const MIN_PASSWORD_LEN: usize = 8;

/// 从不同来源获取密码
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::InputError(format!("Failed to read from stdin: {}", e)))?;
        Ok(line.trim().to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or --stdin flag, or run interactively."
                .to_string(),
        ));
    }

    let read = |prompt: &str| {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| CliError::InputError(e.to_string()))?;
        rpassword::read_password()
            .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))
    };

    let password = read("Enter new password: ")?;
    let confirm = read("Confirm password: ")?;
    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }

    Ok(password)
}

fn validate_password(password: &str) -> Result<(), CliError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CliError::InputError(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// 运行 reset-admin-password 命令
pub async fn run_reset_password(
    storage: &SeaOrmStorage,
    username: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let new_password = get_password(password, stdin)?;
    validate_password(&new_password)?;

    let hashed = hash_password(&new_password)
        .map_err(|e| CliError::CommandError(format!("Failed to hash password: {}", e)))?;

    if !storage.update_admin_password(username, &hashed).await? {
        return Err(CliError::CommandError(format!(
            "Admin '{}' not found",
            username
        )));
    }

    println!(
        "{} Password for admin '{}' reset successfully",
        "✓".green().bold(),
        username
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_from_argument() {
        assert_eq!(
            get_password(Some("longenough".to_string()), false).unwrap(),
            "longenough"
        );
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("12345678").is_ok());
    }
}
