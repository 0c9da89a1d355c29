//! Warehouse storage requests from the logistics module

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::{self, FieldErrors};
use crate::domain::Resource;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_name: String,
    pub type_of_goods: String,
    /// Free-text duration as entered in the form, e.g. "3 months".
    pub storage_duration: String,
    pub quantity: String,
    pub special_requirements: String,
    pub preferred_location: String,
    pub drop_off_date: DateTime<Utc>,
    pub pick_up_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Resource for WarehouseRequest {
    fn resource_name() -> &'static str {
        "warehouserequests"
    }

    fn resource_name_singular() -> &'static str {
        "warehouse request"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequestInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub type_of_goods: Option<String>,
    #[serde(default)]
    pub storage_duration: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub special_requirements: Option<String>,
    #[serde(default)]
    pub preferred_location: Option<String>,
    #[serde(default)]
    pub drop_off_date: Option<String>,
    #[serde(default)]
    pub pick_up_date: Option<String>,
}

impl WarehouseRequestInput {
    /// Every field is required; the two dates must parse as RFC 3339 or
    /// plain `YYYY-MM-DD` (what the date picker submits).
    fn check(&self) -> (FieldErrors, Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let mut errors = FieldErrors::default();
        errors.check("name", validation::required(self.name.as_deref()));
        errors.check("address", validation::required(self.address.as_deref()));
        errors.check("contactName", validation::required(self.contact_name.as_deref()));
        errors.check("typeOfGoods", validation::required(self.type_of_goods.as_deref()));
        errors.check(
            "storageDuration",
            validation::required(self.storage_duration.as_deref()),
        );
        errors.check("quantity", validation::required(self.quantity.as_deref()));
        errors.check(
            "specialRequirements",
            validation::required(self.special_requirements.as_deref()),
        );
        errors.check(
            "preferredLocation",
            validation::required(self.preferred_location.as_deref()),
        );

        let drop_off = checked_date(&mut errors, "dropOffDate", self.drop_off_date.as_deref());
        let pick_up = checked_date(&mut errors, "pickUpDate", self.pick_up_date.as_deref());

        (errors, drop_off, pick_up)
    }

    pub fn into_new_request(self) -> Result<WarehouseRequest, FieldErrors> {
        match self.check() {
            (errors, Some(drop_off), Some(pick_up)) if errors.is_empty() => {
                Ok(self.assemble(Uuid::new_v4(), drop_off, pick_up, Utc::now()))
            }
            (errors, _, _) => Err(errors),
        }
    }

    pub fn into_update_of(self, existing: &WarehouseRequest) -> Result<WarehouseRequest, FieldErrors> {
        match self.check() {
            (errors, Some(drop_off), Some(pick_up)) if errors.is_empty() => {
                Ok(self.assemble(existing.id, drop_off, pick_up, existing.created_at))
            }
            (errors, _, _) => Err(errors),
        }
    }

    fn assemble(
        self,
        id: Uuid,
        drop_off: DateTime<Utc>,
        pick_up: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> WarehouseRequest {
        WarehouseRequest {
            id,
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            contact_name: self.contact_name.unwrap_or_default(),
            type_of_goods: self.type_of_goods.unwrap_or_default(),
            storage_duration: self.storage_duration.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            special_requirements: self.special_requirements.unwrap_or_default(),
            preferred_location: self.preferred_location.unwrap_or_default(),
            drop_off_date: drop_off,
            pick_up_date: pick_up,
            created_at,
        }
    }
}

fn checked_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<DateTime<Utc>> {
    let Some(raw) = value else {
        errors.insert(field, "is required");
        return None;
    };
    if raw.trim().is_empty() {
        errors.insert(field, "is required");
        return None;
    }
    match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            errors.insert(field, "must be a valid date");
            None
        }
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date: NaiveDate = value.parse().ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
