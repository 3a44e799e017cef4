//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::TrackerError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 员工错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    InvalidDateFormat = 1012,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    AuthFailed = 2000,
    TokenInvalid = 2002,
    Forbidden = 2005,

    // 员工错误 3000-3099
    EmployeeNotFound = 3000,
}

impl From<&TrackerError> for ErrorCode {
    fn from(err: &TrackerError) -> Self {
        match err {
            TrackerError::Validation(_) => ErrorCode::BadRequest,
            TrackerError::DateParse(_) => ErrorCode::InvalidDateFormat,
            TrackerError::NotFound(_) => ErrorCode::EmployeeNotFound,
            TrackerError::AuthFailed(_) => ErrorCode::AuthFailed,
            TrackerError::TokenInvalid(_) => ErrorCode::TokenInvalid,
            TrackerError::Forbidden(_) => ErrorCode::Forbidden,
            TrackerError::DatabaseConfig(_)
            | TrackerError::DatabaseConnection(_)
            | TrackerError::DatabaseOperation(_)
            | TrackerError::FileOperation(_)
            | TrackerError::Serialization(_)
            | TrackerError::TokenGeneration(_)
            | TrackerError::PasswordHash(_)
            | TrackerError::ReportRender(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::TokenInvalid).unwrap(),
            "2002"
        );
    }

    #[test]
    fn test_from_tracker_error() {
        assert_eq!(
            ErrorCode::from(&TrackerError::date_parse("bad")),
            ErrorCode::InvalidDateFormat
        );
        assert_eq!(
            ErrorCode::from(&TrackerError::not_found("Employee not found!")),
            ErrorCode::EmployeeNotFound
        );
        assert_eq!(
            ErrorCode::from(&TrackerError::report_render("boom")),
            ErrorCode::InternalServerError
        );
    }
}
