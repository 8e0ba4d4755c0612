use crate::core::query::SortMode;
use crate::utils::error::{PortalError, Result};
use chrono::{NaiveDate, NaiveTime};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &str, allowed: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str());

    match extension {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {ext}. Allowed extensions: {}",
                allowed.join(", ")
            ),
        }),
        None => Err(PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_sort_mode(field_name: &str, value: &str) -> Result<SortMode> {
    value
        .parse()
        .map_err(|reason| PortalError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason,
        })
}

/// Survey dates are entered as `dd/mm/yyyy`.
pub fn validate_date(field_name: &str, value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .map(|_| ())
        .map_err(|e| PortalError::Validation {
            message: format!("{field_name} must be dd/mm/yyyy: {e}"),
        })
}

/// Survey times are entered as `HH.MM` (dot separator, as on the forms).
pub fn validate_time(field_name: &str, value: &str) -> Result<()> {
    NaiveTime::parse_from_str(value, "%H.%M")
        .map(|_| ())
        .map_err(|e| PortalError::Validation {
            message: format!("{field_name} must be HH.MM: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("export.filename_prefix", "laporan").is_ok());
        assert!(validate_non_empty_string("export.filename_prefix", "  ").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("data.path", "./data/portal.json", &["json"]).is_ok());
        assert!(validate_file_extension("data.path", "./data/portal.txt", &["json"]).is_err());
        assert!(validate_file_extension("data.path", "./data/portal", &["json"]).is_err());
    }

    #[test]
    fn test_validate_sort_mode() {
        assert_eq!(
            validate_sort_mode("report.default_sort", "highest_price").unwrap(),
            SortMode::HighestPrice
        );
        assert!(validate_sort_mode("report.default_sort", "loudest").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("date", "09/06/2025").is_ok());
        assert!(validate_date("date", "2025-06-09").is_err());
        assert!(validate_date("date", "31/02/2025").is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("time", "14.30").is_ok());
        assert!(validate_time("time", "14:30").is_err());
        assert!(validate_time("time", "25.00").is_err());
    }
}
