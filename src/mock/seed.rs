use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{Customer, Invoice, InvoiceLine, InvoiceStatus, Product};

pub fn seed_customers() -> Vec<Customer> {
    [
        ("1", "Innovate LLC", "contact@innovate.com", "123 Tech Park, Silicon Valley, CA"),
        ("2", "Solutions Co.", "support@solutions.co", "456 Business Ave, New York, NY"),
        ("3", "Creative Inc.", "hello@creative.inc", "789 Design St, Los Angeles, CA"),
    ]
    .into_iter()
    .map(|(id, name, email, address)| Customer {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        address: address.into(),
    })
    .collect()
}

pub fn seed_products() -> Vec<Product> {
    [
        ("prod-1", "Web Design Package", "Full website design and development", dec!(2500)),
        ("prod-2", "Logo Design", "Custom logo and branding guide", dec!(800)),
        ("prod-3", "SEO Consultation", "Monthly SEO and analytics report", dec!(500)),
        ("prod-4", "Content Writing", "10 pages of web content", dec!(1200)),
        ("prod-5", "Hosting Service", "1 year of premium web hosting", dec!(240)),
    ]
    .into_iter()
    .map(|(id, name, description, price)| Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        price,
    })
    .collect()
}

struct SeedLine {
    description: &'static str,
    quantity: u32,
    unit_price: Decimal,
    total: Decimal,
}

struct SeedInvoice {
    customer: usize,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    lines: &'static [SeedLine],
    subtotal: Decimal,
    tax: Decimal,
    discount: Decimal,
    total: Decimal,
    status: InvoiceStatus,
}

const fn seed_date(month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(2024, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

// Evaluated at compile time, so a bad date fails the build.
const SEED_INVOICES: [SeedInvoice; 3] = [
    SeedInvoice {
        customer: 0,
        issue_date: seed_date(7, 1),
        due_date: seed_date(7, 31),
        lines: &[
            SeedLine {
                description: "Web Design Package",
                quantity: 1,
                unit_price: dec!(2500),
                total: dec!(2500),
            },
            SeedLine {
                description: "Hosting Service",
                quantity: 1,
                unit_price: dec!(240),
                total: dec!(240),
            },
        ],
        subtotal: dec!(2740),
        tax: dec!(8),
        discount: dec!(0),
        total: dec!(2959.20),
        status: InvoiceStatus::Paid,
    },
    SeedInvoice {
        customer: 1,
        issue_date: seed_date(7, 15),
        due_date: seed_date(8, 15),
        lines: &[
            SeedLine {
                description: "Logo Design",
                quantity: 1,
                unit_price: dec!(800),
                total: dec!(800),
            },
            SeedLine {
                description: "SEO Consultation",
                quantity: 2,
                unit_price: dec!(500),
                total: dec!(1000),
            },
        ],
        subtotal: dec!(1800),
        tax: dec!(5),
        discount: dec!(10),
        total: dec!(1710),
        status: InvoiceStatus::Pending,
    },
    SeedInvoice {
        customer: 2,
        issue_date: seed_date(6, 20),
        due_date: seed_date(7, 20),
        lines: &[SeedLine {
            description: "Content Writing",
            quantity: 1,
            unit_price: dec!(1200),
            total: dec!(1200),
        }],
        subtotal: dec!(1200),
        tax: dec!(10),
        discount: dec!(0),
        total: dec!(1320),
        status: InvoiceStatus::Overdue,
    },
];

/// Invoices 2024-001..003.
pub fn seed_invoices() -> Vec<Invoice> {
    let customers = seed_customers();
    SEED_INVOICES
        .iter()
        .zip(1..)
        .map(|(seed, n)| Invoice {
            id: format!("inv-{n:03}"),
            invoice_number: format!("2024-{n:03}"),
            customer: customers[seed.customer].clone(),
            issue_date: seed.issue_date,
            due_date: seed.due_date,
            line_items: seed
                .lines
                .iter()
                .zip(1..)
                .map(|(line, i)| InvoiceLine {
                    id: format!("li-{i}"),
                    description: line.description.into(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    total: line.total,
                })
                .collect(),
            subtotal: seed.subtotal,
            tax: seed.tax,
            discount: seed.discount,
            total: seed.total,
            status: seed.status,
        })
        .collect()
}
