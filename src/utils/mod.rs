pub mod password;
pub mod time;

/// 生成十六进制格式的随机 token
pub fn generate_secure_token(bytes: usize) -> String {
    use std::fmt::Write;

    (0..bytes).fold(String::with_capacity(bytes * 2), |mut out, _| {
        let _ = write!(out, "{:02x}", rand::random::<u8>());
        out
    })
}

/// 保留一位小数，.5 向偶数取整
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
