//! Input validation rules shared by every context.
//!
//! Each rule returns `Ok(())` on success and a 400 [`AppError`] carrying a
//! human-readable message otherwise.

use crate::error::app_error::{AppError, AppResult};

/// 必須チェック
///
/// `None`、空文字列、空白のみの文字列はすべて未入力として扱います。
///
/// ## Examples
/// ```rust
/// use kernel::validation::required;
///
/// assert!(required(Some("Maria"), "Nome").is_ok());
/// let err = required(Some("   "), "Nome").unwrap_err();
/// assert_eq!(err.message(), "Nome é obrigatório");
/// ```
pub fn required(value: Option<&str>, field: &str) -> AppResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(AppError::bad_request(format!("{} é obrigatório", field))),
    }
}

/// メールアドレス形式チェック
///
/// 空白と `@` を含まないローカル部、`@` ひとつ、先頭でも末尾でもない位置に
/// `.` を含むドメイン部で構成される場合のみ受け付けます。
pub fn email(value: &str) -> AppResult<()> {
    if is_email_shape(value) {
        Ok(())
    } else {
        Err(AppError::bad_request("Email inválido"))
    }
}

fn is_email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars
        .iter()
        .enumerate()
        .any(|(i, c)| *c == '.' && i > 0 && i + 1 < chars.len())
}

/// 最小文字数チェック（文字数は Unicode スカラー値で数える）
pub fn min_length(value: &str, min: usize, field: &str) -> AppResult<()> {
    if value.chars().count() < min {
        return Err(AppError::bad_request(format!(
            "{} deve ter no mínimo {} caracteres",
            field, min
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required(Some("x"), "Nome").is_ok());
        assert!(required(None, "Nome").is_err());
        assert!(required(Some(""), "Nome").is_err());
        let err = required(Some(" \t"), "Email").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Email é obrigatório");
    }

    #[test]
    fn test_email_accepts() {
        assert!(email("user@example.com").is_ok());
        assert!(email("a@b.c").is_ok());
        assert!(email("user+tag@sub.example.com.br").is_ok());
        assert!(email("a@.b.c").is_ok());
    }

    #[test]
    fn test_email_rejects() {
        for bad in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "user@example.",
            "user@.com",
            "us er@example.com",
            "a@b@c.com",
        ] {
            let err = email(bad).unwrap_err();
            assert_eq!(err.message(), "Email inválido", "{bad}");
        }
    }

    #[test]
    fn test_min_length() {
        assert!(min_length("123456", 6, "Senha").is_ok());
        assert!(min_length("çãoçãç", 6, "Senha").is_ok());
        let err = min_length("12345", 6, "Nova senha").unwrap_err();
        assert_eq!(err.message(), "Nova senha deve ter no mínimo 6 caracteres");
    }
}
