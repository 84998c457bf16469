//! Upload filename handling and storage.

use std::path::{Path, PathBuf};

use adlens_core::is_allowed_file;

use crate::error::{ApiError, ApiResult};

/// Reduce a client supplied filename to a safe, flat ASCII name.
///
/// Accented Latin letters lose their accent, path separators and runs of
/// whitespace become `_`, anything outside `[A-Za-z0-9_.-]` is dropped and
/// leading or trailing `.`/`_` are trimmed. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let folded: String = name
        .chars()
        .filter_map(fold_accent)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = folded.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// ASCII base letter of a Latin-1 character, `None` for other non-ASCII.
fn fold_accent(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let base = match c {
        'À'..='Å' => 'A',
        'à'..='å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò'..='Ö' => 'O',
        'ò'..='ö' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ý' => 'Y',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// Validate an uploaded filename and return its stored name.
pub fn accept_file_name(raw: Option<&str>) -> ApiResult<String> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::EmptyFileName);
    }
    if !is_allowed_file(raw) {
        return Err(ApiError::UnsupportedFileType(raw.to_string()));
    }

    let name = secure_filename(raw);
    if !is_allowed_file(&name) {
        return Err(ApiError::InvalidFileName(raw.to_string()));
    }
    Ok(name)
}

/// Write an upload under `dir`, replacing an earlier file of the same name.
pub async fn store_upload(dir: &Path, file_name: &str, bytes: &[u8]) -> ApiResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Stored upload");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("relatório de vendas.xlsx"), "relatorio_de_vendas.xlsx");
        assert_eq!(secure_filename("C:\\dados\\ação.csv"), "C_dados_acao.csv");
        assert_eq!(secure_filename("  _.hidden.csv "), "hidden.csv");
        assert_eq!(secure_filename("日本.csv"), "csv");
    }

    #[test]
    fn test_accept_file_name() {
        assert_eq!(accept_file_name(Some("vendas.CSV")).unwrap(), "vendas.CSV");
        assert!(matches!(accept_file_name(None), Err(ApiError::EmptyFileName)));
        assert!(matches!(accept_file_name(Some("")), Err(ApiError::EmptyFileName)));
        assert!(matches!(
            accept_file_name(Some("notas.pdf")),
            Err(ApiError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            accept_file_name(Some("日本.csv")),
            Err(ApiError::InvalidFileName(_))
        ));
    }

    #[tokio::test]
    async fn test_store_upload_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");

        store_upload(&uploads, "a.csv", b"first").await.unwrap();
        let path = store_upload(&uploads, "a.csv", b"second").await.unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }
}
