//! # Schemas
//!
//! Typed records for every document collection, one type per collection.
//! The collection name is the lowercased type name, exposed as
//! `COLLECTION` on each record.
//!
//! Validation is pure and exhaustive: `validate()` reports every offending
//! field at once. Unknown input fields are ignored, not rejected.
//!
//! The reservation form uses short wire names (`date`, `time`) while the
//! record keeps descriptive internal names. The rename lives at the serde
//! boundary: input accepts either name, serialization re-emits the wire
//! name, so stored documents carry `date`/`time`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

fn default_true() -> bool {
    true
}

/// One item on the café menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl MenuItem {
    pub const COLLECTION: &'static str = "menuitem";
}

/// A table reservation submitted from the website form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Reservation {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub phone: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(rename = "date", alias = "reservation_date")]
    pub reservation_date: String,
    /// Wall-clock time, e.g. `18:30`.
    #[serde(rename = "time", alias = "reservation_time")]
    pub reservation_time: String,
    #[validate(range(min = 1, max = 20, message = "must be between 1 and 20"))]
    pub guests: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Reservation {
    pub const COLLECTION: &'static str = "reservation";

    /// Builds a reservation from an untyped payload.
    ///
    /// Serde's derive stops at the first missing field, but a form response
    /// must name every problem at once. So presence and type are checked
    /// here field by field, and the range/format checks from `validate()`
    /// are merged into the same per-field map.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_string(payload, &["name"], "name", &mut errors);
        let email = required_string(payload, &["email"], "email", &mut errors);
        let phone = required_string(payload, &["phone"], "phone", &mut errors);
        let reservation_date = required_string(
            payload,
            &["date", "reservation_date"],
            "reservation_date",
            &mut errors,
        );
        let reservation_time = required_string(
            payload,
            &["time", "reservation_time"],
            "reservation_time",
            &mut errors,
        );
        let guests = required_integer(payload, "guests", &mut errors);
        let message = optional_string(payload, "message", &mut errors);

        // Neutral stand-ins for absent fields keep the range and format
        // checks running over the fields that did arrive.
        let reservation = Self {
            name: name.unwrap_or_else(|| "-".into()),
            email: email.unwrap_or_else(|| "missing@example.com".into()),
            phone: phone.unwrap_or_else(|| "-".into()),
            reservation_date: reservation_date.unwrap_or_default(),
            reservation_time: reservation_time.unwrap_or_default(),
            guests: guests.unwrap_or(1),
            message,
        };

        if let Err(more) = reservation.validate() {
            for (field, field_errors) in more.field_errors() {
                for error in field_errors {
                    if let ValidationErrorsKind::Field(vec) = errors
                        .errors_mut()
                        .entry(field.clone())
                        .or_insert_with(|| ValidationErrorsKind::Field(vec![]))
                    {
                        vec.push(error.clone());
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(reservation)
        } else {
            Err(errors)
        }
    }
}

fn add_error(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: &'static str,
) {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    errors.add(field.into(), error);
}

/// Looks a required string up under any of its accepted names.
fn required_string(
    payload: &Value,
    keys: &[&str],
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    for key in keys {
        match payload.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) => return Some(s.clone()),
            Some(_) => {
                add_error(errors, field, "type", "must be a string");
                return None;
            }
        }
    }

    add_error(errors, field, "required", "is required");
    None
}

fn required_integer(
    payload: &Value,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            add_error(errors, field, "required", "is required");
            None
        }
        Some(Value::Number(n)) => match n.as_i64() {
            Some(value) => Some(value),
            None => {
                add_error(errors, field, "type", "must be an integer");
                None
            }
        },
        Some(_) => {
            add_error(errors, field, "type", "must be an integer");
            None
        }
    }
}

fn optional_string(
    payload: &Value,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            add_error(errors, field, "type", "must be a string");
            None
        }
    }
}

/// Site account. No route uses this yet; the type pins the collection shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub address: String,
    #[validate(range(min = 0, max = 120, message = "must be between 0 and 120"))]
    pub age: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl User {
    pub const COLLECTION: &'static str = "user";
}

/// Retail product. No route uses this yet; the type pins the collection shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Product {
    pub const COLLECTION: &'static str = "product";
}

/// Curated menu shown when the store yields no items. The storefront never
/// renders empty, whether the collection is bare or the database is away.
pub fn fallback_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            name: "Signature Latte".into(),
            description: Some("Velvety espresso with house-made syrup".into()),
            price: 4.5,
            category: "Coffee".into(),
            image_url: Some("https://images.unsplash.com/photo-1495474472287-4d71bcdd2085".into()),
            is_featured: true,
        },
        MenuItem {
            name: "Croissant".into(),
            description: Some("Buttery flaky pastry, baked daily".into()),
            price: 3.0,
            category: "Bakery".into(),
            image_url: Some("https://images.unsplash.com/photo-1519681393784-d120267933ba".into()),
            is_featured: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use mongodb::bson;
    use serde_json::json;

    use super::*;

    fn reservation_payload(guests: i64) -> serde_json::Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "date": "2026-09-01",
            "time": "18:30",
            "guests": guests,
        })
    }

    #[test]
    fn menu_item_survives_storage_shape_coercion() {
        let item: MenuItem = serde_json::from_value(json!({
            "name": "Flat White",
            "description": "Double ristretto, silky milk",
            "price": 3.9,
            "category": "Coffee",
            "image_url": null,
            "is_featured": true,
        }))
        .unwrap();
        item.validate().unwrap();

        // Through the document form and back, as a stored menu item travels.
        let mut doc = bson::to_document(&item).unwrap();
        doc.insert("created_at", "2026-08-24T10:00:00Z");
        let back: MenuItem = bson::from_document(doc).unwrap();

        assert_eq!(back, item);
    }

    #[test]
    fn menu_item_defaults_and_negative_price() {
        let item: MenuItem = serde_json::from_value(json!({
            "name": "Espresso",
            "price": 2.0,
            "category": "Coffee",
        }))
        .unwrap();
        assert!(!item.is_featured);
        assert_eq!(item.description, None);
        item.validate().unwrap();

        let cheap = MenuItem { price: -0.01, ..item };
        let errors = cheap.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn reservation_accepts_wire_and_internal_field_names() {
        let wire: Reservation = serde_json::from_value(reservation_payload(4)).unwrap();

        let internal: Reservation = serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "reservation_date": "2026-09-01",
            "reservation_time": "18:30",
            "guests": 4,
        }))
        .unwrap();

        assert_eq!(wire, internal);
        wire.validate().unwrap();
    }

    #[test]
    fn reservation_serializes_wire_names_for_storage() {
        let reservation: Reservation = serde_json::from_value(reservation_payload(2)).unwrap();
        let value = serde_json::to_value(&reservation).unwrap();

        assert_eq!(value["date"], "2026-09-01");
        assert_eq!(value["time"], "18:30");
        assert!(value.get("reservation_date").is_none());
        assert!(value.get("reservation_time").is_none());
        // Omitted optional message stays out of the stored document.
        assert!(value.get("message").is_none());
    }

    #[test]
    fn reservation_guest_count_boundaries() {
        for guests in [1, 20] {
            let r: Reservation = serde_json::from_value(reservation_payload(guests)).unwrap();
            r.validate().unwrap();
        }

        for guests in [0, 21] {
            let r: Reservation = serde_json::from_value(reservation_payload(guests)).unwrap();
            let errors = r.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("guests"));
        }
    }

    #[test]
    fn reservation_missing_phone_names_the_field() {
        let mut payload = reservation_payload(2);
        payload.as_object_mut().unwrap().remove("phone");

        let errors = Reservation::from_payload(&payload).unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn reservation_names_every_missing_field_at_once() {
        let mut payload = reservation_payload(2);
        let form = payload.as_object_mut().unwrap();
        form.remove("name");
        form.remove("phone");

        let errors = Reservation::from_payload(&payload).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn reservation_reports_missing_and_out_of_range_fields_together() {
        let mut payload = reservation_payload(21);
        payload.as_object_mut().unwrap().remove("phone");
        payload["email"] = json!(7);

        let errors = Reservation::from_payload(&payload).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("guests"));
    }

    #[test]
    fn reservation_from_payload_accepts_either_field_name() {
        let wire = Reservation::from_payload(&reservation_payload(4)).unwrap();

        let internal = Reservation::from_payload(&json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "reservation_date": "2026-09-01",
            "reservation_time": "18:30",
            "guests": 4,
        }))
        .unwrap();

        assert_eq!(wire, internal);
    }

    #[test]
    fn reservation_rejects_malformed_email() {
        let mut payload = reservation_payload(2);
        payload["email"] = json!("not-an-email");

        let r: Reservation = serde_json::from_value(payload).unwrap();
        let errors = r.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn reservation_ignores_unknown_fields() {
        let mut payload = reservation_payload(2);
        payload["table_preference"] = json!("window");

        let r: Reservation = serde_json::from_value(payload).unwrap();
        r.validate().unwrap();
    }

    #[test]
    fn user_age_boundaries_and_default() {
        let user: User = serde_json::from_value(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "address": "1 Harbor St",
            "age": 120,
        }))
        .unwrap();
        assert!(user.is_active);
        user.validate().unwrap();

        let too_old = User { age: Some(121), ..user };
        let errors = too_old.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("age"));
    }

    #[test]
    fn product_defaults_in_stock() {
        let product: Product = serde_json::from_value(json!({
            "title": "House Blend Beans",
            "price": 12.0,
            "category": "Retail",
        }))
        .unwrap();
        assert!(product.in_stock);
        product.validate().unwrap();
    }

    #[test]
    fn fallback_menu_is_the_fixed_two_items() {
        let menu = fallback_menu();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].name, "Signature Latte");
        assert_eq!(menu[0].category, "Coffee");
        assert!(menu[0].is_featured);
        assert_eq!(menu[1].name, "Croissant");
        assert_eq!(menu[1].category, "Bakery");
        assert!(!menu[1].is_featured);
        for item in &menu {
            item.validate().unwrap();
        }
    }
}
