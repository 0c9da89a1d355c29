//! Delivery orders and the four-stage shipment status pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::validation::{self, FieldErrors};
use crate::domain::Resource;

/// Shipment status vocabulary.
///
/// Exactly four canonical values; the wire representation is the exact
/// uppercase string, matched case-sensitively. Any canonical value may be
/// written over any other — the progression in [`DeliveryStatus::next`] is
/// the intended order, not an enforced one, so operators can legally move
/// an order backward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "FIRST MILE RECEIVE SCAN")]
    FirstMileReceiveScan,
    #[serde(rename = "RECEIVED IN FACILITY")]
    ReceivedInFacility,
    #[serde(rename = "OUT FOR DELIVERY")]
    OutForDelivery,
    #[serde(rename = "DELIVERED")]
    Delivered,
}

impl DeliveryStatus {
    /// All canonical statuses, in pipeline order.
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::FirstMileReceiveScan,
        DeliveryStatus::ReceivedInFacility,
        DeliveryStatus::OutForDelivery,
        DeliveryStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::FirstMileReceiveScan => "FIRST MILE RECEIVE SCAN",
            DeliveryStatus::ReceivedInFacility => "RECEIVED IN FACILITY",
            DeliveryStatus::OutForDelivery => "OUT FOR DELIVERY",
            DeliveryStatus::Delivered => "DELIVERED",
        }
    }

    /// Exact, case-sensitive match against the canonical set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// The next stage in the intended progression, `None` once delivered.
    pub fn next(self) -> Option<Self> {
        match self {
            DeliveryStatus::FirstMileReceiveScan => Some(DeliveryStatus::ReceivedInFacility),
            DeliveryStatus::ReceivedInFacility => Some(DeliveryStatus::OutForDelivery),
            DeliveryStatus::OutForDelivery => Some(DeliveryStatus::Delivered),
            DeliveryStatus::Delivered => None,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery order moving through the logistics pipeline.
///
/// `order_id` is the caller-assigned tracking identifier — unique across
/// all orders and immutable after creation. `id` is the storage-assigned
/// surrogate used for direct lookups.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder {
    pub id: Uuid,
    pub order_id: String,
    pub delivery_address: String,
    pub contact_number: String,
    pub email: String,
    #[serde(default)]
    pub refrigerated_packing: bool,
    #[serde(default)]
    pub insulated_packing: bool,
    #[serde(default)]
    pub custom_packing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub is_bulk_order: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_order_weight: Option<f64>,
    pub preferred_packing: String,
    pub preferred_vehicle_type: String,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
}

impl Resource for DeliveryOrder {
    fn resource_name() -> &'static str {
        "deliveryorders"
    }

    fn resource_name_singular() -> &'static str {
        "delivery order"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn unique_fields() -> &'static [&'static str] {
        &["orderId"]
    }

    fn field_str(&self, field: &str) -> Option<String> {
        match field {
            "orderId" => Some(self.order_id.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

/// Request body for creating or updating a delivery order.
///
/// Every field is optional at the deserialization layer; presence and shape
/// are enforced by [`DeliveryOrderInput::into_new_order`] and
/// [`DeliveryOrderInput::into_update_of`] so a missing field produces a
/// field-keyed validation message rather than a deserialization failure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrderInput {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub refrigerated_packing: bool,
    #[serde(default)]
    pub insulated_packing: bool,
    #[serde(default)]
    pub custom_packing: bool,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub is_bulk_order: bool,
    #[serde(default)]
    pub bulk_order_id: Option<String>,
    #[serde(default)]
    pub bulk_delivery_address: Option<String>,
    #[serde(default)]
    pub bulk_contact_number: Option<String>,
    #[serde(default)]
    pub bulk_order_weight: Option<f64>,
    #[serde(default)]
    pub preferred_packing: Option<String>,
    #[serde(default)]
    pub preferred_vehicle_type: Option<String>,
}

impl DeliveryOrderInput {
    /// Field checks shared by create and update.
    ///
    /// Bulk fields are only validated when `isBulkOrder` is set; if it is,
    /// all four must be present and the weight strictly positive.
    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        errors.check("orderId", validation::required(self.order_id.as_deref()));
        errors.check(
            "deliveryAddress",
            validation::required(self.delivery_address.as_deref()),
        );
        errors.check(
            "contactNumber",
            validation::required(self.contact_number.as_deref()),
        );
        if let Some(contact) = self.contact_number.as_deref() {
            errors.check("contactNumber", validation::contact_number(contact));
        }
        errors.check("email", validation::required(self.email.as_deref()));
        if let Some(email) = self.email.as_deref() {
            errors.check("email", validation::email(email));
        }
        errors.check(
            "preferredPacking",
            validation::required(self.preferred_packing.as_deref()),
        );
        errors.check(
            "preferredVehicleType",
            validation::required(self.preferred_vehicle_type.as_deref()),
        );

        if self.is_bulk_order {
            errors.check(
                "bulkOrderId",
                validation::required(self.bulk_order_id.as_deref()),
            );
            errors.check(
                "bulkDeliveryAddress",
                validation::required(self.bulk_delivery_address.as_deref()),
            );
            errors.check(
                "bulkContactNumber",
                validation::required(self.bulk_contact_number.as_deref()),
            );
            if let Some(contact) = self.bulk_contact_number.as_deref() {
                errors.check("bulkContactNumber", validation::contact_number(contact));
            }
            errors.check("bulkOrderWeight", validation::positive(self.bulk_order_weight));
        }

        errors
    }

    /// Validate and build a new order with a fresh surrogate id and the
    /// initial `FIRST MILE RECEIVE SCAN` status.
    pub fn into_new_order(self) -> Result<DeliveryOrder, FieldErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        let order_id = self.order_id.clone().unwrap_or_default();
        Ok(self.assemble(
            Uuid::new_v4(),
            order_id,
            DeliveryStatus::FirstMileReceiveScan,
            Utc::now(),
        ))
    }

    /// Validate and apply onto an existing record.
    ///
    /// The surrogate id, `orderId`, `status`, and `createdAt` of the
    /// existing record are preserved; a payload that tries to change
    /// `orderId` fails validation on that field.
    pub fn into_update_of(self, existing: &DeliveryOrder) -> Result<DeliveryOrder, FieldErrors> {
        let mut errors = self.check();
        if let Some(order_id) = self.order_id.as_deref() {
            if order_id != existing.order_id {
                errors.insert("orderId", "cannot be changed after creation");
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.assemble(
            existing.id,
            existing.order_id.clone(),
            existing.status,
            existing.created_at,
        ))
    }

    fn assemble(
        self,
        id: Uuid,
        order_id: String,
        status: DeliveryStatus,
        created_at: DateTime<Utc>,
    ) -> DeliveryOrder {
        DeliveryOrder {
            id,
            order_id,
            delivery_address: self.delivery_address.unwrap_or_default(),
            contact_number: self.contact_number.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            refrigerated_packing: self.refrigerated_packing,
            insulated_packing: self.insulated_packing,
            custom_packing: self.custom_packing,
            special_instructions: self.special_instructions,
            is_bulk_order: self.is_bulk_order,
            bulk_order_id: self.bulk_order_id,
            bulk_delivery_address: self.bulk_delivery_address,
            bulk_contact_number: self.bulk_contact_number,
            bulk_order_weight: self.bulk_order_weight,
            preferred_packing: self.preferred_packing.unwrap_or_default(),
            preferred_vehicle_type: self.preferred_vehicle_type.unwrap_or_default(),
            status,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> DeliveryOrderInput {
        DeliveryOrderInput {
            order_id: Some("ORD-1001".to_string()),
            delivery_address: Some("42 Farm Lane, Green Valley".to_string()),
            contact_number: Some("1234567890".to_string()),
            email: Some("buyer@example.com".to_string()),
            preferred_packing: Some("Crates".to_string()),
            preferred_vehicle_type: Some("Refrigerated Truck".to_string()),
            ..Default::default()
        }
    }

    // === DeliveryStatus ===

    #[test]
    fn status_round_trips_exact_wire_strings() {
        for status in DeliveryStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
            let back: DeliveryStatus = serde_json::from_value(json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert_eq!(
            DeliveryStatus::parse("DELIVERED"),
            Some(DeliveryStatus::Delivered)
        );
        assert_eq!(DeliveryStatus::parse("delivered"), None);
        assert_eq!(DeliveryStatus::parse("SHIPPED"), None);
        assert_eq!(DeliveryStatus::parse(""), None);
    }

    #[test]
    fn status_progression_ends_at_delivered() {
        assert_eq!(
            DeliveryStatus::FirstMileReceiveScan.next(),
            Some(DeliveryStatus::ReceivedInFacility)
        );
        assert_eq!(
            DeliveryStatus::OutForDelivery.next(),
            Some(DeliveryStatus::Delivered)
        );
        assert_eq!(DeliveryStatus::Delivered.next(), None);
    }

    // === Create validation ===

    #[test]
    fn valid_input_builds_order_with_initial_status() {
        let order = valid_input().into_new_order().unwrap();
        assert_eq!(order.order_id, "ORD-1001");
        assert_eq!(order.status, DeliveryStatus::FirstMileReceiveScan);
        assert!(!order.is_bulk_order);
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let errors = DeliveryOrderInput::default().into_new_order().unwrap_err();
        for field in [
            "orderId",
            "deliveryAddress",
            "contactNumber",
            "email",
            "preferredPacking",
            "preferredVehicleType",
        ] {
            assert!(errors.get(field).is_some(), "expected error for {field}");
        }
    }

    #[test]
    fn short_contact_number_fails_naming_the_field() {
        let mut input = valid_input();
        input.contact_number = Some("12345".to_string());
        let errors = input.into_new_order().unwrap_err();
        assert_eq!(errors.get("contactNumber"), Some("must be a 10-digit number"));
    }

    #[test]
    fn separator_contact_number_fails() {
        let mut input = valid_input();
        input.contact_number = Some("123-456-7890".to_string());
        let errors = input.into_new_order().unwrap_err();
        assert!(errors.get("contactNumber").is_some());
    }

    #[test]
    fn bulk_order_requires_all_bulk_fields() {
        let mut input = valid_input();
        input.is_bulk_order = true;
        let errors = input.into_new_order().unwrap_err();
        for field in [
            "bulkOrderId",
            "bulkDeliveryAddress",
            "bulkContactNumber",
            "bulkOrderWeight",
        ] {
            assert!(errors.get(field).is_some(), "expected error for {field}");
        }
    }

    #[test]
    fn bulk_order_weight_must_be_positive() {
        let mut input = valid_input();
        input.is_bulk_order = true;
        input.bulk_order_id = Some("BULK-7".to_string());
        input.bulk_delivery_address = Some("9 Depot Road".to_string());
        input.bulk_contact_number = Some("0987654321".to_string());
        input.bulk_order_weight = Some(0.0);

        let errors = input.clone().into_new_order().unwrap_err();
        assert_eq!(errors.get("bulkOrderWeight"), Some("must be a positive number"));

        input.bulk_order_weight = Some(25.0);
        let order = input.into_new_order().unwrap();
        assert_eq!(order.bulk_order_weight, Some(25.0));
    }

    #[test]
    fn bulk_fields_ignored_when_not_a_bulk_order() {
        let mut input = valid_input();
        input.is_bulk_order = false;
        input.bulk_order_weight = Some(-5.0);
        assert!(input.into_new_order().is_ok());
    }

    // === Update validation ===

    #[test]
    fn update_preserves_identity_status_and_creation_time() {
        let mut existing = valid_input().into_new_order().unwrap();
        existing.status = DeliveryStatus::OutForDelivery;

        let mut input = valid_input();
        input.delivery_address = Some("New address 7".to_string());
        let updated = input.into_update_of(&existing).unwrap();

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.order_id, existing.order_id);
        assert_eq!(updated.status, DeliveryStatus::OutForDelivery);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.delivery_address, "New address 7");
    }

    #[test]
    fn update_rejects_order_id_change() {
        let existing = valid_input().into_new_order().unwrap();
        let mut input = valid_input();
        input.order_id = Some("ORD-OTHER".to_string());
        let errors = input.into_update_of(&existing).unwrap_err();
        assert_eq!(errors.get("orderId"), Some("cannot be changed after creation"));
    }

    // === Wire format ===

    #[test]
    fn order_serializes_with_camel_case_names() {
        let order = valid_input().into_new_order().unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderId"], "ORD-1001");
        assert_eq!(json["status"], "FIRST MILE RECEIVE SCAN");
        assert!(json.get("contactNumber").is_some());
        assert!(json.get("createdAt").is_some());
        // optional bulk fields are omitted, not null
        assert!(json.get("bulkOrderId").is_none());
    }
}
