use chrono::NaiveDate;
use serde::Deserialize;

/// A horse record as the server reports it. Read-only to this client;
/// unknown or missing fields render as "N/A".
#[derive(Debug, Clone, Deserialize)]
pub struct Horse {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub horse_number: Option<String>,
    #[serde(default)]
    pub country_origin: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub paternity_certificate: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub training_horse: bool,
    #[serde(default)]
    pub is_out: bool,
    #[serde(default)]
    pub out_reason: Option<String>,
    #[serde(default)]
    pub out_time: Option<String>,
    #[serde(default)]
    pub other_registers: Option<String>,
    #[serde(default)]
    pub other_injuries: Option<String>,
    #[serde(default)]
    pub production_place: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub registers: Vec<String>,
    #[serde(default)]
    pub user: Option<Owner>,
    #[serde(default)]
    pub place: Option<Place>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gender {
    #[serde(default)]
    pub name_en: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub service_category: Option<ServiceCategory>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCategory {
    #[serde(default)]
    pub name_en: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub category: Option<PlaceCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceCategory {
    #[serde(default)]
    pub name: Option<String>,
}

impl Horse {
    /// Age rendered the way the catalog cards show it: whole years if at
    /// least one, otherwise months, otherwise days
    pub fn age(&self, today: NaiveDate) -> Option<String> {
        let dob = self.date_of_birth.as_deref()?;
        let birth = NaiveDate::parse_from_str(dob, "%Y-%m-%d").ok()?;
        let days = (today - birth).num_days().max(0);

        let years = days / 365;
        let months = (days % 365) / 30;
        let remaining_days = (days % 365) % 30;

        Some(if years > 0 {
            format!("{} year{}", years, if years > 1 { "s" } else { "" })
        } else if months > 0 {
            format!("{} month{}", months, if months > 1 { "s" } else { "" })
        } else {
            format!("{} day{}", remaining_days, if remaining_days != 1 { "s" } else { "" })
        })
    }
}

/// "N/A" fallback for optional scalar fields
pub fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

/// "N/A" fallback for fields whose JSON type is not pinned down by the
/// server (prices come back as either strings or numbers)
pub fn value_or_na(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    }
}

// Response envelopes

/// `POST login` reply
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
}

/// `GET horses` reply; the array is nested one level
#[derive(Debug, Deserialize)]
pub struct HorsesEnvelope {
    pub data: HorsesPage,
}

#[derive(Debug, Deserialize)]
pub struct HorsesPage {
    #[serde(default)]
    pub data: Vec<Horse>,
}

/// `GET horses/{id}` reply; a missing `horse` means not found
#[derive(Debug, Deserialize)]
pub struct HorseEnvelope {
    #[serde(default)]
    pub horse: Option<Horse>,
}

/// Error body the server sends alongside non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub msg: Option<String>,
    /// Field name -> list of messages
    #[serde(default)]
    pub data: Option<std::collections::BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    /// Flatten field-level errors in field order
    pub fn field_errors(&self) -> Vec<String> {
        self.data
            .iter()
            .flat_map(|map| map.values())
            .flatten()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn horse_with_dob(dob: &str) -> Horse {
        serde_json::from_str(&format!(r#"{{"id": 1, "name": "Bolt", "date_of_birth": "{dob}"}}"#))
            .unwrap()
    }

    #[test]
    fn test_age_in_years_months_days() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(horse_with_dob("2020-05-01").age(today), Some("4 years".to_string()));
        assert_eq!(horse_with_dob("2024-03-01").age(today), Some("3 months".to_string()));
        assert_eq!(horse_with_dob("2024-05-25").age(today), Some("7 days".to_string()));
    }

    #[test]
    fn test_age_handles_missing_or_garbage_dob() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut horse = horse_with_dob("2020-05-01");
        horse.date_of_birth = None;
        assert_eq!(horse.age(today), None);
        horse.date_of_birth = Some("soon".to_string());
        assert_eq!(horse.age(today), None);
    }

    #[test]
    fn test_horses_envelope_is_nested_one_level() {
        let body = r#"{"data": {"data": [{"id": 1, "name": "Bolt"}, {"id": 2, "name": "Star"}]}}"#;
        let envelope: HorsesEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.data.len(), 2);
        assert_eq!(envelope.data.data[0].name, "Bolt");
    }

    #[test]
    fn test_sparse_record_deserializes_with_defaults() {
        let horse: Horse = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert_eq!(horse.name, "");
        assert!(horse.services.is_empty());
        assert!(horse.user.is_none());
        assert_eq!(or_na(horse.breed.as_deref()), "N/A");
    }

    #[test]
    fn test_field_errors_flatten_in_order() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"status": false, "data": {"email": ["Email is required"], "password": ["Too short", "Too weak"]}}"#,
        )
        .unwrap();
        assert_eq!(
            body.field_errors(),
            vec!["Email is required", "Too short", "Too weak"]
        );
    }

    #[test]
    fn test_price_value_rendering() {
        assert_eq!(value_or_na(Some(&serde_json::json!("150.00"))), "150.00");
        assert_eq!(value_or_na(Some(&serde_json::json!(150))), "150");
        assert_eq!(value_or_na(None), "N/A");
    }
}
