//! Deterministic sample data for the built-in reports.

use chrono::{Days, NaiveDate};

use crate::model::{Invoice, InvoiceItem, InvoiceTotals, Party, UserRecord};

const ROLES: [&str; 3] = ["Admin", "Editor", "Viewer"];

const PRODUCTS: [&str; 8] = [
    "Web Development",
    "UI/UX Design",
    "Cloud Hosting",
    "Technical Support",
    "API Integration",
    "Database Setup",
    "Security Audit",
    "Performance Optimization",
];

pub const DISCOUNT_RATE: f64 = 0.05;
pub const TAX_RATE: f64 = 0.10;

/// `count` roster users. User N (from 1) is `usr-N`, created N-1 days after
/// 2026-01-01.
pub fn sample_users(count: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let id = i as u32 + 1;
            UserRecord {
                id,
                name: format!("usr-{}", id),
                email: format!("user{}@example.com", id),
                role: ROLES[i % ROLES.len()].to_string(),
                created_at: date_after_epoch(i as u64),
            }
        })
        .collect()
}

/// An invoice with `item_count` line items cycling through the product list.
pub fn sample_invoice(item_count: usize) -> Invoice {
    let items: Vec<InvoiceItem> = (0..item_count)
        .map(|i| {
            let quantity = (i % 5) as u32 + 1;
            let unit_price = 100.0 + (i % 10) as f64 * 25.0;
            InvoiceItem::new(
                format!("{} - Service {}", PRODUCTS[i % PRODUCTS.len()], i + 1),
                quantity,
                unit_price,
            )
        })
        .collect();
    let totals = InvoiceTotals::compute(&items, DISCOUNT_RATE, TAX_RATE, 0.0);

    Invoice {
        number: "INV-001".to_string(),
        date: "2026-02-21".to_string(),
        due_date: "2026-03-21".to_string(),
        from: Party {
            name: "Velorona LLC".to_string(),
            address: "Kathmandu".to_string(),
            city: "Kathmandu".to_string(),
            state: "Bagmati".to_string(),
            zip: "44600".to_string(),
            country: "Nepal".to_string(),
        },
        to: Party {
            name: "Client Name".to_string(),
            address: "Lalitpur".to_string(),
            city: "Lalitpur".to_string(),
            state: "Bagmati".to_string(),
            zip: "44700".to_string(),
            country: "Nepal".to_string(),
        },
        items,
        totals,
    }
}

fn date_after_epoch(days: u64) -> String {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|epoch| epoch.checked_add_days(Days::new(days)))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
