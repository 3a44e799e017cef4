use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum TrackerError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    DateParse(String),
    NotFound(String),
    Serialization(String),
    AuthFailed(String),
    TokenInvalid(String),
    Forbidden(String),
    TokenGeneration(String),
    PasswordHash(String),
    ReportRender(String),
}

impl TrackerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::DatabaseConfig(_) => "E001",
            TrackerError::DatabaseConnection(_) => "E002",
            TrackerError::DatabaseOperation(_) => "E003",
            TrackerError::FileOperation(_) => "E004",
            TrackerError::Validation(_) => "E005",
            TrackerError::DateParse(_) => "E006",
            TrackerError::NotFound(_) => "E007",
            TrackerError::Serialization(_) => "E008",
            TrackerError::AuthFailed(_) => "E009",
            TrackerError::TokenInvalid(_) => "E010",
            TrackerError::Forbidden(_) => "E011",
            TrackerError::TokenGeneration(_) => "E012",
            TrackerError::PasswordHash(_) => "E013",
            TrackerError::ReportRender(_) => "E014",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TrackerError::DatabaseConfig(_) => "Database Configuration Error",
            TrackerError::DatabaseConnection(_) => "Database Connection Error",
            TrackerError::DatabaseOperation(_) => "Database Operation Error",
            TrackerError::FileOperation(_) => "File Operation Error",
            TrackerError::Validation(_) => "Validation Error",
            TrackerError::DateParse(_) => "Date Parse Error",
            TrackerError::NotFound(_) => "Resource Not Found",
            TrackerError::Serialization(_) => "Serialization Error",
            TrackerError::AuthFailed(_) => "Authentication Failed",
            TrackerError::TokenInvalid(_) => "Invalid Token",
            TrackerError::Forbidden(_) => "Access Denied",
            TrackerError::TokenGeneration(_) => "Token Generation Error",
            TrackerError::PasswordHash(_) => "Password Hash Error",
            TrackerError::ReportRender(_) => "Report Render Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TrackerError::DatabaseConfig(msg)
            | TrackerError::DatabaseConnection(msg)
            | TrackerError::DatabaseOperation(msg)
            | TrackerError::FileOperation(msg)
            | TrackerError::Validation(msg)
            | TrackerError::DateParse(msg)
            | TrackerError::NotFound(msg)
            | TrackerError::Serialization(msg)
            | TrackerError::AuthFailed(msg)
            | TrackerError::TokenInvalid(msg)
            | TrackerError::Forbidden(msg)
            | TrackerError::TokenGeneration(msg)
            | TrackerError::PasswordHash(msg)
            | TrackerError::ReportRender(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            TrackerError::Validation(_) | TrackerError::DateParse(_) => StatusCode::BAD_REQUEST,
            TrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::AuthFailed(_) | TrackerError::TokenInvalid(_) => {
                StatusCode::UNAUTHORIZED
            }
            TrackerError::Forbidden(_) => StatusCode::FORBIDDEN,
            TrackerError::DatabaseConfig(_)
            | TrackerError::DatabaseConnection(_)
            | TrackerError::DatabaseOperation(_)
            | TrackerError::FileOperation(_)
            | TrackerError::Serialization(_)
            | TrackerError::TokenGeneration(_)
            | TrackerError::PasswordHash(_)
            | TrackerError::ReportRender(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrackerError {}

// 便捷的构造函数
impl TrackerError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TrackerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TrackerError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TrackerError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TrackerError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TrackerError::Validation(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        TrackerError::DateParse(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TrackerError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TrackerError::Serialization(msg.into())
    }

    pub fn auth_failed<T: Into<String>>(msg: T) -> Self {
        TrackerError::AuthFailed(msg.into())
    }

    pub fn token_invalid<T: Into<String>>(msg: T) -> Self {
        TrackerError::TokenInvalid(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        TrackerError::Forbidden(msg.into())
    }

    pub fn token_generation<T: Into<String>>(msg: T) -> Self {
        TrackerError::TokenGeneration(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        TrackerError::PasswordHash(msg.into())
    }

    pub fn report_render<T: Into<String>>(msg: T) -> Self {
        TrackerError::ReportRender(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TrackerError {
    fn from(err: sea_orm::DbErr) -> Self {
        TrackerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TrackerError {
    fn from(err: chrono::ParseError) -> Self {
        TrackerError::DateParse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for TrackerError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        TrackerError::TokenInvalid(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for TrackerError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        TrackerError::PasswordHash(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
