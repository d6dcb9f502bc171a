//! JSON record builders matching the remote base's schema.

use serde_json::{json, Value};

/// A company record with linked location references and typical profile
/// fields populated.
pub fn company_record(record_id: &str, name: &str) -> Value {
    json!({
        "id": record_id,
        "fields": {
            "Name": name,
            "Logo": [{ "url": format!("https://cdn.example.com/{record_id}/logo.png") }],
            "Website": format!("https://{}.example.com", record_id.to_lowercase()),
            "Intro": format!("{name} is a vacation rental management company."),
            "One Liner": format!("{name} in one line."),
            "Listings": 120,
            "Reviews": 48,
            "Rating": 4.5,
            "Verified": true,
        }
    })
}

/// A company record carrying links into the location reference tables.
pub fn company_record_in(
    record_id: &str,
    name: &str,
    country_id: &str,
    state_id: Option<&str>,
    city_id: Option<&str>,
) -> Value {
    let mut record = company_record(record_id, name);
    let fields = record["fields"].as_object_mut().unwrap();

    fields.insert("HQ Country".to_string(), json!([country_id]));
    if let Some(id) = state_id {
        fields.insert("HQ State".to_string(), json!([id]));
    }
    if let Some(id) = city_id {
        fields.insert("HQ City".to_string(), json!([id]));
    }

    record
}

/// A location reference record. `name_field` is the table's display name
/// column (for example "Country Name").
pub fn location_record(record_id: &str, name_field: &str, name: &str) -> Value {
    json!({
        "id": record_id,
        "fields": { name_field: name }
    })
}

/// A location reference record with a bio column populated.
pub fn location_record_with_bio(
    record_id: &str,
    name_field: &str,
    name: &str,
    bio_field: &str,
    bio: &str,
) -> Value {
    json!({
        "id": record_id,
        "fields": {
            name_field: name,
            bio_field: bio,
        }
    })
}

/// Wraps records into a single-page listing response.
pub fn record_page(records: Vec<Value>) -> Value {
    json!({ "records": records })
}

/// Wraps records into a listing page that points at a further page.
pub fn record_page_with_offset(records: Vec<Value>, offset: &str) -> Value {
    json!({ "records": records, "offset": offset })
}
