use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI-compatible completions endpoint base, e.g. `https://api.openai.com/v1`.
    pub openai_api_base: String,
    pub openai_api_key: String,
    pub model_name: String,
    pub sheets_api_key: String,
    /// Department name → candidate competency spreadsheet, in listing order.
    pub departments: Vec<Department>,
    /// The interviewer roster spreadsheet ("Карта интервьюеров").
    pub interviewer_spreadsheet_id: String,
    /// Row index of the header row in competency sheets. These sheets carry
    /// preamble rows (title, legend) above the real header.
    pub competency_header_offset: usize,
    /// Row index of the header row in roster sheets.
    pub roster_header_offset: usize,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct Department {
    pub name: String,
    pub spreadsheet_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_base: std::env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_api_key: require_env("OPENAI_API_KEY")?,
            model_name: require_env("MODEL_NAME")?,
            sheets_api_key: require_env("SHEETS_API_KEY")?,
            departments: parse_departments(&require_env("DEPARTMENTS")?)?,
            interviewer_spreadsheet_id: require_env("INTERVIEWER_SPREADSHEET_ID")?,
            competency_header_offset: parse_env_or("COMPETENCY_HEADER_OFFSET", 5)?,
            roster_header_offset: parse_env_or("ROSTER_HEADER_OFFSET", 0)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn department_spreadsheet(&self, name: &str) -> Option<&str> {
        self.departments
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.spreadsheet_id.as_str())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

/// Parses `DEPARTMENTS` in the form `1C=<spreadsheet id>;Data Platform=<id>`.
/// Listing order is preserved — it is the order shown to the user.
fn parse_departments(raw: &str) -> Result<Vec<Department>> {
    let mut departments = Vec::new();
    for pair in raw.split(';').filter(|p| !p.trim().is_empty()) {
        let Some((name, id)) = pair.split_once('=') else {
            bail!("DEPARTMENTS entry '{pair}' is not of the form NAME=SPREADSHEET_ID");
        };
        let (name, id) = (name.trim(), id.trim());
        if name.is_empty() || id.is_empty() {
            bail!("DEPARTMENTS entry '{pair}' has an empty name or spreadsheet id");
        }
        departments.push(Department {
            name: name.to_string(),
            spreadsheet_id: id.to_string(),
        });
    }
    if departments.is_empty() {
        bail!("DEPARTMENTS must list at least one department");
    }
    Ok(departments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_departments_preserves_order() {
        let departments = parse_departments("1C=abc123;Data Platform=def456").unwrap();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0].name, "1C");
        assert_eq!(departments[0].spreadsheet_id, "abc123");
        assert_eq!(departments[1].name, "Data Platform");
    }

    #[test]
    fn test_parse_departments_trims_whitespace() {
        let departments = parse_departments(" 1C = abc123 ; ").unwrap();
        assert_eq!(departments[0].name, "1C");
        assert_eq!(departments[0].spreadsheet_id, "abc123");
    }

    #[test]
    fn test_parse_departments_rejects_malformed_entries() {
        assert!(parse_departments("no-equals-sign").is_err());
        assert!(parse_departments("=id-without-name").is_err());
        assert!(parse_departments("").is_err());
    }
}
