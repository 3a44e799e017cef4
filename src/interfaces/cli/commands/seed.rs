//! 初始化数据

use chrono::Utc;
use colored::Colorize;

use crate::config::BootstrapConfig;
use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::ensure_bootstrap_admin;
use crate::storage::{NewEmployee, SeaOrmStorage, TrackerSettings};
use crate::utils::password::hash_password;
use crate::utils::time::today;

const SAMPLE_USERNAME: &str = "employee1";
const SAMPLE_PASSWORD: &str = "password123";
const PRODUCTIVE: &str = "productive";

/// 示例员工及其当天的时段、活动、应用、网站和默认设置
async fn seed_sample(storage: &SeaOrmStorage) -> Result<bool, CliError> {
    if storage.employee_username_exists(SAMPLE_USERNAME).await? {
        return Ok(false);
    }

    let password_hash = hash_password(SAMPLE_PASSWORD)
        .map_err(|e| CliError::CommandError(format!("Failed to hash password: {}", e)))?;
    let employee = storage
        .insert_employee(NewEmployee {
            username: SAMPLE_USERNAME.to_string(),
            password_hash,
            name: "John Doe".to_string(),
            email: "john@company.com".to_string(),
            department: Some("Engineering".to_string()),
            position: Some("Developer".to_string()),
        })
        .await?;

    let now = Utc::now();
    let date = today();
    storage
        .put_session_figures(employee.id, date, now, 7.2, 0.8, 85)
        .await?;
    storage
        .append_activity(
            employee.id,
            "active",
            Some("Working on project".to_string()),
            None,
            now,
        )
        .await?;
    storage
        .add_app_usage(employee.id, "VS Code", 4.0, PRODUCTIVE, date, now)
        .await?;
    storage
        .put_website_visit(
            employee.id,
            "https://docs.example.com",
            1.5,
            3,
            PRODUCTIVE,
            date,
        )
        .await?;

    if storage.load_settings().await?.is_none() {
        storage.save_settings(&TrackerSettings::default()).await?;
    }

    Ok(true)
}

/// 运行 seed 命令，可重复执行
pub async fn run_seed(
    storage: &SeaOrmStorage,
    bootstrap: &BootstrapConfig,
    sample: bool,
) -> Result<(), CliError> {
    if ensure_bootstrap_admin(storage, bootstrap).await? {
        println!(
            "{} Created admin '{}'",
            "✓".green().bold(),
            bootstrap.admin_username
        );
    } else {
        println!(
            "{} Admin '{}' already exists",
            "•".dimmed(),
            bootstrap.admin_username
        );
    }

    if sample {
        if seed_sample(storage).await? {
            println!(
                "{} Created sample employee '{}' with today's data",
                "✓".green().bold(),
                SAMPLE_USERNAME
            );
        } else {
            println!(
                "{} Sample employee '{}' already exists",
                "•".dimmed(),
                SAMPLE_USERNAME
            );
        }
    }

    Ok(())
}
