//! Report data: roster users and invoices.

/// One row of the user roster.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Creation date as `YYYY-MM-DD`.
    pub created_at: String,
}

impl UserRecord {
    /// Table cells in roster column order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.clone(),
            self.created_at.clone(),
        ]
    }
}

/// A billing party shown in the invoice party block.
#[derive(Debug, Clone, PartialEq)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl Party {
    /// Lines under the party label: name, street, locality, country.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            format!("{}, {} {}", self.city, self.state, self.zip),
            self.country.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

impl InvoiceItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        InvoiceItem {
            description: description.into(),
            quantity,
            unit_price,
            amount: quantity as f64 * unit_price,
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.description.clone(),
            self.quantity.to_string(),
            format_money(self.unit_price),
            format_money(self.amount),
        ]
    }
}

/// Invoice totals.
///
/// `discount = subtotal * discount_rate`, tax is charged on the discounted
/// subtotal, and `total = subtotal - discount + tax + shipping`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub discount_rate: f64,
    pub discount: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

impl InvoiceTotals {
    pub fn compute(items: &[InvoiceItem], discount_rate: f64, tax_rate: f64, shipping: f64) -> Self {
        let subtotal: f64 = items.iter().map(|item| item.amount).sum();
        let discount = subtotal * discount_rate;
        let tax = (subtotal - discount) * tax_rate;
        InvoiceTotals {
            subtotal,
            discount_rate,
            discount,
            tax_rate,
            tax,
            shipping,
            total: subtotal - discount + tax + shipping,
        }
    }

    /// Label/value pairs shown above the rule, in display order.
    pub fn ledger(&self) -> Vec<(String, String)> {
        vec![
            ("Subtotal:".to_string(), format_money(self.subtotal)),
            ("Discount:".to_string(), format!("-{}", format_money(self.discount))),
            (format!("Tax ({}%):", format_rate(self.tax_rate)), format_money(self.tax)),
            ("Shipping:".to_string(), format_money(self.shipping)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub date: String,
    pub due_date: String,
    pub from: Party,
    pub to: Party,
    pub items: Vec<InvoiceItem>,
    pub totals: InvoiceTotals,
}

impl Invoice {
    /// `label: value` lines under the invoice title.
    pub fn info_lines(&self) -> Vec<String> {
        vec![
            format!("Invoice #: {}", self.number),
            format!("Date: {}", self.date),
            format!("Due Date: {}", self.due_date),
        ]
    }
}

/// `$1234.50`: dollar sign, no grouping, two decimals.
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// A rate as a percentage without trailing zeros: 0.1 -> "10", 0.075 -> "7.5".
fn format_rate(rate: f64) -> String {
    let pct = format!("{:.2}", rate * 100.0);
    pct.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_amount_is_quantity_times_price() {
        let item = InvoiceItem::new("Audit", 3, 125.0);
        assert_eq!(item.amount, 375.0);
        assert_eq!(item.cells(), vec!["Audit", "3", "$125.00", "$375.00"]);
    }

    #[test]
    fn totals_apply_discount_before_tax() {
        let items = vec![InvoiceItem::new("a", 2, 100.0), InvoiceItem::new("b", 1, 300.0)];
        let totals = InvoiceTotals::compute(&items, 0.05, 0.10, 0.0);
        assert_eq!(totals.subtotal, 500.0);
        assert!((totals.discount - 25.0).abs() < 1e-9);
        assert!((totals.tax - 47.5).abs() < 1e-9);
        assert!((totals.total - 522.5).abs() < 1e-9);
    }

    #[test]
    fn ledger_labels_follow_rates() {
        let totals = InvoiceTotals::compute(&[InvoiceItem::new("a", 1, 200.0)], 0.05, 0.075, 4.0);
        let ledger = totals.ledger();
        assert_eq!(ledger[1], ("Discount:".to_string(), "-$10.00".to_string()));
        assert_eq!(ledger[2].0, "Tax (7.5%):");
        assert_eq!(ledger[3].1, "$4.00");
    }

    #[test]
    fn party_lines_join_locality() {
        let party = Party {
            name: "Acme".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62701".into(),
            country: "USA".into(),
        };
        assert_eq!(party.lines()[2], "Springfield, IL 62701");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(1234.5), "$1234.50");
        assert_eq!(format_money(0.0), "$0.00");
    }
}
