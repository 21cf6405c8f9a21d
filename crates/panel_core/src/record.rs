use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Directory entry for a user; also embedded in records as `user_info`.
///
/// Every field defaults to empty so that a bare `{}` reference parses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// A provisioned product as reported by the service catalog.
///
/// Fields the panel does not interpret are kept in `extra` so the raw
/// payload can be shown back to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedProduct {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(with = "created_time")]
    pub created_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub user_arn_session: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaleProduct {
    pub index: usize,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserRef>,
    #[serde(flatten)]
    pub product: ProvisionedProduct,
}

/// Per-user launch count (the `launches` list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLaunches {
    pub index: usize,
    pub email: String,
    pub product_count: usize,
    pub product_info: ProvisionedProduct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameDiscrepancy {
    pub index: usize,
    pub provided_name: String,
    pub expected_name: String,
    pub email: String,
    pub reason: String,
    pub product_info: ProvisionedProduct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnauthorizedUser {
    pub index: usize,
    pub email: String,
    pub reason: String,
    pub product_info: ProvisionedProduct,
}

/// One labelled value of a record's detail view. Values are plain text;
/// hosts must never interpret them as markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
    pub emphasis: bool,
}

impl DetailField {
    fn plain(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            emphasis: false,
        }
    }

    fn emphasized(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            emphasis: true,
        }
    }
}

/// Behaviour shared by every record the panel can list and select.
pub trait Record {
    /// Address of the user this record concerns, if it carries a non-empty one.
    fn user_email(&self) -> Option<&str>;
    /// One-line summary used for list rows.
    fn row_label(&self) -> String;
    fn detail_fields(&self) -> Vec<DetailField>;
    /// Underlying service catalog payload.
    fn payload(&self) -> &ProvisionedProduct;
}

fn non_empty(email: &str) -> Option<&str> {
    if email.trim().is_empty() {
        None
    } else {
        Some(email)
    }
}

impl Record for ProvisionedProduct {
    fn user_email(&self) -> Option<&str> {
        non_empty(crate::compliance::email_from_arn_session(
            &self.user_arn_session,
        ))
    }

    fn row_label(&self) -> String {
        format!("{} ({})", self.name, self.status)
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::plain("Product Name", &self.name),
            DetailField::plain("Product", &self.product_name),
            DetailField::plain("Status", &self.status),
            DetailField::plain("Created", self.created_time.to_rfc3339()),
            DetailField::plain(
                "Owner",
                crate::compliance::email_from_arn_session(&self.user_arn_session),
            ),
        ]
    }

    fn payload(&self) -> &ProvisionedProduct {
        self
    }
}

impl Record for StaleProduct {
    fn user_email(&self) -> Option<&str> {
        self.user_info
            .as_ref()
            .and_then(|user| non_empty(&user.email))
    }

    fn row_label(&self) -> String {
        format!("{} ({})", self.product.name, self.duration)
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        let user = match &self.user_info {
            Some(user) if !user.email.is_empty() => {
                format!("{} {} <{}>", user.first_name, user.last_name, user.email)
            }
            _ => String::from("unknown"),
        };
        vec![
            DetailField::plain("Product Name", &self.product.name),
            DetailField::emphasized("Duration", &self.duration),
            DetailField::plain("Status", &self.product.status),
            DetailField::plain("User", user),
        ]
    }

    fn payload(&self) -> &ProvisionedProduct {
        &self.product
    }
}

impl Record for UserLaunches {
    fn user_email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    fn row_label(&self) -> String {
        format!("{} ({} products)", self.email, self.product_count)
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::plain("Email", &self.email),
            DetailField::emphasized("Product Count", self.product_count.to_string()),
        ]
    }

    fn payload(&self) -> &ProvisionedProduct {
        &self.product_info
    }
}

impl Record for NameDiscrepancy {
    fn user_email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    fn row_label(&self) -> String {
        format!("{} -> {}", self.provided_name, self.expected_name)
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::emphasized("Provided Name", &self.provided_name),
            DetailField::plain("Expected Name", &self.expected_name),
            DetailField::plain("Email", &self.email),
            DetailField::plain("Reason", &self.reason),
        ]
    }

    fn payload(&self) -> &ProvisionedProduct {
        &self.product_info
    }
}

impl Record for UnauthorizedUser {
    fn user_email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    fn row_label(&self) -> String {
        format!("{} ({})", self.email, self.product_info.name)
    }

    fn detail_fields(&self) -> Vec<DetailField> {
        vec![
            DetailField::emphasized("Email", &self.email),
            DetailField::plain("Reason", &self.reason),
        ]
    }

    fn payload(&self) -> &ProvisionedProduct {
        &self.product_info
    }
}

/// Service catalog timestamps come as `%Y-%m-%dT%H:%M:%S.%f%z`
/// (`+0000`, no colon); RFC 3339 is accepted as well.
mod created_time {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    const CATALOG_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

    pub fn serialize<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .or_else(|_| DateTime::parse_from_str(&raw, CATALOG_FORMAT))
            .map_err(serde::de::Error::custom)
    }
}
