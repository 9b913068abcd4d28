//! RECEIVED to VALIDATED: typed, range-checked request fields.
//!
//! Every field is checked and all violations are returned together, so a
//! client can fix a request in one round trip.

use features_core::{calendar_of, parse_timestamp};
use features_spi::{CalendarInput, FeatureInput, RouteInput, ZipPrefix};
use prediction_spi::{PredictionRequest, ValidationError, ZipCode};

/// Half the Earth's circumference; no two points are further apart.
pub const MAX_DISTANCE_KM: f64 = 20_038.0;

/// Check a request and turn it into featurizer input.
pub fn validate(request: &PredictionRequest) -> Result<FeatureInput, ValidationError> {
    let mut errors = ValidationError::new();

    let calendar = calendar(request, &mut errors);
    let route = route(request, &mut errors);

    for (field, value) in [
        ("price", request.price),
        ("freight_value", request.freight_value),
        ("product_weight_g", request.product_weight_g),
        ("product_vol_cm3", request.product_vol_cm3),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(field, "must be finite and non-negative");
        }
    }

    let customer_state = state("customer_state", request.customer_state.as_deref(), &mut errors);
    let seller_state = state("seller_state", request.seller_state.as_deref(), &mut errors);
    let product_category = request
        .product_category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    errors.into_result()?;
    match (calendar, route) {
        (Some(calendar), Some(route)) => Ok(FeatureInput {
            route,
            calendar,
            customer_state,
            seller_state,
            product_category,
            price: request.price,
            freight_value: request.freight_value,
            product_weight_g: request.product_weight_g,
            product_vol_cm3: request.product_vol_cm3,
        }),
        // calendar and route only come back empty alongside a violation
        _ => Err(ValidationError::single("request", "incomplete")),
    }
}

fn calendar(request: &PredictionRequest, errors: &mut ValidationError) -> Option<CalendarInput> {
    let month = request.purchase_month;
    let dow = request.purchase_day_of_week;

    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            errors.push("purchase_month", format!("{m} is not in 1..=12"));
        }
    }
    if let Some(d) = dow {
        if !(0..=6).contains(&d) {
            errors.push("purchase_day_of_week", format!("{d} is not in 0..=6"));
        }
    }

    match request.purchase_timestamp.as_deref() {
        Some(raw) => {
            let Ok(ts) = parse_timestamp(raw) else {
                errors.push("purchase_timestamp", format!("'{raw}' is not a recognised timestamp"));
                return None;
            };
            let derived = calendar_of(&ts);
            if month.is_some_and(|m| (1..=12).contains(&m) && m != i64::from(derived.month)) {
                errors.push(
                    "purchase_month",
                    format!("does not match purchase_timestamp (month {})", derived.month),
                );
            }
            if dow.is_some_and(|d| (0..=6).contains(&d) && d != i64::from(derived.day_of_week)) {
                errors.push(
                    "purchase_day_of_week",
                    format!(
                        "does not match purchase_timestamp (day {})",
                        derived.day_of_week
                    ),
                );
            }
            Some(derived)
        }
        None => {
            if month.is_none() {
                errors.push("purchase_month", "required when purchase_timestamp is absent");
            }
            if dow.is_none() {
                errors.push(
                    "purchase_day_of_week",
                    "required when purchase_timestamp is absent",
                );
            }
            match (month, dow) {
                (Some(m), Some(d)) if (1..=12).contains(&m) && (0..=6).contains(&d) => {
                    Some(CalendarInput {
                        month: m as u32,
                        day_of_week: d as u32,
                    })
                }
                _ => None,
            }
        }
    }
}

fn route(request: &PredictionRequest, errors: &mut ValidationError) -> Option<RouteInput> {
    let customer = request
        .customer_zip_prefix
        .as_ref()
        .map(|z| zip("customer_zip_prefix", z, errors));
    let seller = request
        .seller_zip_prefix
        .as_ref()
        .map(|z| zip("seller_zip_prefix", z, errors));

    let distance = request.distance_km.and_then(|km| {
        if km.is_finite() && (0.0..=MAX_DISTANCE_KM).contains(&km) {
            Some(km)
        } else {
            errors.push(
                "distance_km",
                format!("{km} is not in [0, {MAX_DISTANCE_KM}]"),
            );
            None
        }
    });

    match (customer, seller, request.distance_km) {
        (Some(_), Some(_), Some(_)) => {
            errors.push(
                "distance_km",
                "give either both zip prefixes or distance_km, not both",
            );
            None
        }
        (Some(c), Some(s), None) => Some(RouteInput::ZipPrefixes {
            customer: c?,
            seller: s?,
        }),
        (Some(_), None, _) => {
            errors.push("seller_zip_prefix", "required together with customer_zip_prefix");
            None
        }
        (None, Some(_), _) => {
            errors.push("customer_zip_prefix", "required together with seller_zip_prefix");
            None
        }
        (None, None, Some(_)) => distance.map(|km| RouteInput::Distance { km }),
        (None, None, None) => {
            errors.push(
                "route",
                "either customer_zip_prefix and seller_zip_prefix or distance_km is required",
            );
            None
        }
    }
}

fn zip(field: &str, value: &ZipCode, errors: &mut ValidationError) -> Option<ZipPrefix> {
    let text = value.as_text();
    match text.parse::<ZipPrefix>() {
        Ok(zip) => Some(zip),
        Err(_) => {
            errors.push(field, format!("'{text}' is not a 1-5 digit prefix"));
            None
        }
    }
}

fn state(field: &str, value: Option<&str>, errors: &mut ValidationError) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        errors.push(field, format!("'{trimmed}' is not a two-letter state code"));
        None
    }
}
