use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend classes
///
/// This enum names which class of Telegram backend handled an upload.
/// It's defined in core because it's used in configuration and database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::Type)]
#[sqlx(type_name = "upload_backend", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UploadBackend {
    /// Bot API account (token-authenticated).
    Bot,
    /// User-account session behind a self-hosted gateway.
    Client,
}

impl FromStr for UploadBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bot" => Ok(UploadBackend::Bot),
            "client" => Ok(UploadBackend::Client),
            _ => Err(anyhow::anyhow!("Invalid upload backend: {}", s)),
        }
    }
}

impl Display for UploadBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadBackend::Bot => write!(f, "bot"),
            UploadBackend::Client => write!(f, "client"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trip() {
        for backend in [UploadBackend::Bot, UploadBackend::Client] {
            let parsed: UploadBackend = backend.to_string().parse().unwrap();
            assert_eq!(parsed, backend);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            "BOT".parse::<UploadBackend>().unwrap(),
            UploadBackend::Bot
        );
        assert_eq!(
            "Client".parse::<UploadBackend>().unwrap(),
            UploadBackend::Client
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("aiogram".parse::<UploadBackend>().is_err());
        assert!("".parse::<UploadBackend>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UploadBackend::Client).unwrap();
        assert_eq!(json, "\"client\"");
        let back: UploadBackend = serde_json::from_str("\"bot\"").unwrap();
        assert_eq!(back, UploadBackend::Bot);
    }
}
