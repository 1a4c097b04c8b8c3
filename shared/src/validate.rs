//! 客户端表单校验
//!
//! 校验失败立即阻断提交，错误不会触网。文案与页面提示保持一致。

use crate::error::PosError;

/// 密码长度下限
pub const MIN_PASSWORD_LEN: usize = 6;

/// 头像体积上限（100 KB）
pub const MAX_IMAGE_BYTES: u64 = 100 * 1024;

/// 与 `\S+@\S+\.\S+` 等价的邮箱形状检查：不含空白，@ 前非空，
/// @ 之后要有被非空片段夹着的点号。
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    matches!(domain.rfind('.'), Some(i) if i > 0 && i + 1 < domain.len())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), PosError> {
    if !is_valid_email(email) {
        return Err(PosError::validation("Format email tidak valid."));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(PosError::validation("Password minimal 6 karakter."));
    }
    Ok(())
}

pub fn validate_registration(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), PosError> {
    if first_name.trim().is_empty() {
        return Err(PosError::validation("First name wajib diisi."));
    }
    if last_name.trim().is_empty() {
        return Err(PosError::validation("Last name wajib diisi."));
    }
    validate_login(email, password)
}

/// 头像文件校验：只收 JPG/PNG/WEBP 且不超过 100 KB
pub fn validate_profile_image(mime: &str, size_bytes: u64) -> Result<(), PosError> {
    let mime = mime.to_ascii_lowercase();
    let allowed = matches!(
        mime.as_str(),
        "image/png" | "image/jpg" | "image/jpeg" | "image/webp"
    );
    if !allowed {
        return Err(PosError::validation("Format gambar harus JPG/PNG/WEBP."));
    }
    if size_bytes > MAX_IMAGE_BYTES {
        return Err(PosError::validation("Ukuran gambar maksimal 100 KB."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("user@test.com"));
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@host"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("us er@test.com"));
        assert!(!is_valid_email("user@test."));
    }

    #[test]
    fn login_checks_email_then_password() {
        assert_eq!(
            validate_login("bukan-email", "secret1").unwrap_err().message,
            "Format email tidak valid."
        );
        assert_eq!(
            validate_login("user@test.com", "12345").unwrap_err().message,
            "Password minimal 6 karakter."
        );
        assert!(validate_login("user@test.com", "secret1").is_ok());
    }

    #[test]
    fn registration_requires_both_names() {
        assert!(validate_registration("", "Santoso", "u@t.co", "secret1").is_err());
        assert!(validate_registration("Budi", "  ", "u@t.co", "secret1").is_err());
        assert!(validate_registration("Budi", "Santoso", "u@t.co", "secret1").is_ok());
    }

    #[test]
    fn image_validation_checks_mime_then_size() {
        assert!(validate_profile_image("image/PNG", 1_024).is_ok());
        assert!(validate_profile_image("image/gif", 1_024).is_err());
        assert!(validate_profile_image("image/jpeg", MAX_IMAGE_BYTES + 1).is_err());
    }
}
