//! Reading and joining the Olist CSV export.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use features_facade::{parse_optional_timestamp, parse_timestamp, GeoIndex, OrderRecord, ZipPrefix};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::rows::{CustomerRow, GeolocationRow, ItemRow, OrderRow, ProductRow, SellerRow};
use crate::error::{Result, TrainingDataError};

const ORDERS: &str = "olist_orders_dataset.csv";
const ITEMS: &str = "olist_order_items_dataset.csv";
const PRODUCTS: &str = "olist_products_dataset.csv";
const CUSTOMERS: &str = "olist_customers_dataset.csv";
const SELLERS: &str = "olist_sellers_dataset.csv";
const GEOLOCATION: &str = "olist_geolocation_dataset.csv";

/// Files expected in a dataset directory.
pub const DATASET_FILES: [&str; 6] = [ORDERS, ITEMS, PRODUCTS, CUSTOMERS, SELLERS, GEOLOCATION];

const DELIVERED: &str = "delivered";

/// Row counts gathered while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub orders: usize,
    pub delivered_orders: usize,
    pub items: usize,
    /// Items of orders that are not delivered.
    pub undelivered_items: usize,
    /// Items of delivered orders whose product, seller or customer is unknown.
    pub unmatched_items: usize,
    pub records: usize,
    pub geolocation_rows: usize,
    pub geo_prefixes: usize,
    pub geo_rejected: usize,
    /// Files decoded as Latin-1 because they were not valid UTF-8.
    pub latin1_files: Vec<String>,
}

/// Joined order-item records plus the zip centroid table.
#[derive(Debug, Clone)]
pub struct OlistDataset {
    /// One record per item of a delivered order.
    pub records: Vec<OrderRecord>,
    pub geo: GeoIndex,
    pub report: LoadReport,
}

struct DeliveredOrder {
    customer_id: String,
    purchased_at: NaiveDateTime,
    approved_at: Option<NaiveDateTime>,
    estimated_delivery_at: Option<NaiveDateTime>,
    delivered_at: Option<NaiveDateTime>,
}

struct Party {
    zip_prefix: ZipPrefix,
    state: String,
}

impl OlistDataset {
    /// Load and join the six CSV files found in `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        for file in DATASET_FILES {
            if !dir.join(file).is_file() {
                return Err(TrainingDataError::MissingFile {
                    path: dir.join(file),
                });
            }
        }
        let mut report = LoadReport::default();

        let mut builder = GeoIndex::builder();
        let geolocation: Vec<(u64, GeolocationRow)> = read_table(dir, GEOLOCATION, &mut report)?;
        report.geolocation_rows = geolocation.len();
        for (line, row) in &geolocation {
            let zip = zip_prefix(
                GEOLOCATION,
                *line,
                "geolocation_zip_code_prefix",
                &row.geolocation_zip_code_prefix,
            )?;
            builder.add(zip, row.geolocation_lat, row.geolocation_lng, &row.geolocation_state);
        }
        report.geo_rejected = builder.rejected();
        let geo = builder.build();
        report.geo_prefixes = geo.len();

        let products: HashMap<String, ProductRow> = read_table::<ProductRow>(dir, PRODUCTS, &mut report)?
            .into_iter()
            .map(|(_, p)| (p.product_id.clone(), p))
            .collect();

        let mut customers = HashMap::new();
        for (line, row) in read_table::<CustomerRow>(dir, CUSTOMERS, &mut report)? {
            let zip_prefix = zip_prefix(CUSTOMERS, line, "customer_zip_code_prefix", &row.customer_zip_code_prefix)?;
            customers.insert(
                row.customer_id,
                Party {
                    zip_prefix,
                    state: row.customer_state,
                },
            );
        }

        let mut sellers = HashMap::new();
        for (line, row) in read_table::<SellerRow>(dir, SELLERS, &mut report)? {
            let zip_prefix = zip_prefix(SELLERS, line, "seller_zip_code_prefix", &row.seller_zip_code_prefix)?;
            sellers.insert(
                row.seller_id,
                Party {
                    zip_prefix,
                    state: row.seller_state,
                },
            );
        }

        let order_rows: Vec<(u64, OrderRow)> = read_table(dir, ORDERS, &mut report)?;
        report.orders = order_rows.len();
        let mut orders = HashMap::new();
        for (line, row) in order_rows {
            if row.order_status != DELIVERED {
                continue;
            }
            let order = DeliveredOrder {
                customer_id: row.customer_id,
                purchased_at: timestamp(line, &row.order_purchase_timestamp)?,
                approved_at: optional_timestamp(line, &row.order_approved_at)?,
                estimated_delivery_at: optional_timestamp(line, &row.order_estimated_delivery_date)?,
                delivered_at: optional_timestamp(line, &row.order_delivered_customer_date)?,
            };
            orders.insert(row.order_id, order);
        }
        report.delivered_orders = orders.len();

        let mut records = Vec::new();
        for (_, item) in read_table::<ItemRow>(dir, ITEMS, &mut report)? {
            report.items += 1;
            let Some(order) = orders.get(&item.order_id) else {
                report.undelivered_items += 1;
                continue;
            };
            let (Some(product), Some(seller), Some(customer)) = (
                products.get(&item.product_id),
                sellers.get(&item.seller_id),
                customers.get(&order.customer_id),
            ) else {
                report.unmatched_items += 1;
                continue;
            };
            records.push(OrderRecord {
                order_id: item.order_id,
                purchased_at: order.purchased_at,
                approved_at: order.approved_at,
                estimated_delivery_at: order.estimated_delivery_at,
                delivered_at: order.delivered_at,
                price: item.price,
                freight_value: item.freight_value,
                product_category: product
                    .product_category_name
                    .clone()
                    .filter(|c| !c.trim().is_empty()),
                product_weight_g: product.product_weight_g,
                product_vol_cm3: product.volume_cm3(),
                customer_zip_prefix: customer.zip_prefix,
                customer_state: customer.state.clone(),
                seller_zip_prefix: seller.zip_prefix,
                seller_state: seller.state.clone(),
            });
        }
        report.records = records.len();

        if records.is_empty() {
            return Err(TrainingDataError::EmptyDataset(format!(
                "no delivered order items in {}",
                dir.display()
            )));
        }
        if report.unmatched_items > 0 {
            warn!(unmatched = report.unmatched_items, "order items without product, seller or customer");
        }
        info!(
            orders = report.orders,
            delivered = report.delivered_orders,
            records = report.records,
            geo_prefixes = report.geo_prefixes,
            "loaded olist dataset"
        );

        Ok(Self {
            records,
            geo,
            report,
        })
    }
}

/// File contents as text, falling back to Latin-1 for non-UTF-8 bytes.
fn read_text(dir: &Path, file: &str, report: &mut LoadReport) -> Result<String> {
    let path = dir.join(file);
    let bytes = fs::read(&path).map_err(|source| TrainingDataError::Io {
        path: path.clone(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(file, "file is not valid UTF-8, decoding as Latin-1");
            report.latin1_files.push(file.to_string());
            Ok(err.into_bytes().into_iter().map(char::from).collect())
        }
    }
}

/// Deserialize every row of a CSV file, keeping its line number.
fn read_table<T: DeserializeOwned>(
    dir: &Path,
    file: &'static str,
    report: &mut LoadReport,
) -> Result<Vec<(u64, T)>> {
    let text = read_text(dir, file, report)?;
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().map_err(|e| csv_error(file, &e))?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(file, &e))?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .deserialize(Some(&headers))
            .map_err(|e| TrainingDataError::Csv {
                file: file.to_string(),
                line,
                message: e.to_string(),
            })?;
        rows.push((line, row));
    }
    Ok(rows)
}

fn csv_error(file: &str, err: &csv::Error) -> TrainingDataError {
    TrainingDataError::Csv {
        file: file.to_string(),
        line: err.position().map_or(0, |p| p.line()),
        message: err.to_string(),
    }
}

fn zip_prefix(file: &str, line: u64, field: &str, value: &str) -> Result<ZipPrefix> {
    value.parse().map_err(|_| TrainingDataError::MalformedField {
        file: file.to_string(),
        line,
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn timestamp(line: u64, value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).map_err(|_| malformed_timestamp(line, value))
}

fn optional_timestamp(line: u64, value: &str) -> Result<Option<NaiveDateTime>> {
    parse_optional_timestamp(value).map_err(|_| malformed_timestamp(line, value))
}

fn malformed_timestamp(line: u64, value: &str) -> TrainingDataError {
    TrainingDataError::MalformedTimestamp {
        file: ORDERS.to_string(),
        line,
        value: value.to_string(),
    }
}
