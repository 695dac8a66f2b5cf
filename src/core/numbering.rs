use chrono::{Datelike, NaiveDate};

/// Per-year invoice numbers: "2024-001", "2024-002", ...
///
/// Numbering follows the issue date. An invoice dated in a later year
/// restarts the counter at 1; a back-dated invoice keeps the current year's
/// sequence so numbers are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNumberSequence {
    year: i32,
    next: u64,
}

impl InvoiceNumberSequence {
    pub fn starting_at(year: i32, next: u64) -> Self {
        Self { year, next }
    }

    /// Continue after the highest number already issued for `year`.
    ///
    /// Numbers from other years, or not of the `{year}-{n}` form, are ignored.
    pub fn resume<'a>(year: i32, issued: impl IntoIterator<Item = &'a str>) -> Self {
        let prefix = format!("{year}-");
        let last = issued
            .into_iter()
            .filter_map(|number| number.strip_prefix(&prefix)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self::starting_at(year, last + 1)
    }

    /// Assign the number for an invoice issued on `issue_date`.
    pub fn number_for(&mut self, issue_date: NaiveDate) -> String {
        if issue_date.year() > self.year {
            self.year = issue_date.year();
            self.next = 1;
        }
        let number = format!("{}-{:03}", self.year, self.next);
        self.next += 1;
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn numbers_within_a_year() {
        let mut seq = InvoiceNumberSequence::starting_at(2024, 1);
        assert_eq!(seq.number_for(date(2024, 3, 1)), "2024-001");
        assert_eq!(seq.number_for(date(2024, 3, 2)), "2024-002");
    }

    #[test]
    fn new_year_restarts_at_one() {
        let mut seq = InvoiceNumberSequence::starting_at(2024, 17);
        assert_eq!(seq.number_for(date(2025, 1, 2)), "2025-001");
        assert_eq!(seq.number_for(date(2025, 1, 3)), "2025-002");
    }

    #[test]
    fn back_dated_invoice_continues_current_year() {
        let mut seq = InvoiceNumberSequence::starting_at(2025, 4);
        assert_eq!(seq.number_for(date(2024, 12, 30)), "2025-004");
    }

    #[test]
    fn resume_after_highest_issued() {
        let issued = ["2024-002", "2024-010", "2023-099", "draft", "2024-x"];
        let mut seq = InvoiceNumberSequence::resume(2024, issued);
        assert_eq!(seq.number_for(date(2024, 7, 1)), "2024-011");
    }

    #[test]
    fn resume_with_nothing_issued() {
        assert_eq!(
            InvoiceNumberSequence::resume(2024, []),
            InvoiceNumberSequence::starting_at(2024, 1)
        );
    }

    #[test]
    fn counter_grows_past_padding() {
        let mut seq = InvoiceNumberSequence::starting_at(2024, 999);
        assert_eq!(seq.number_for(date(2024, 1, 1)), "2024-999");
        assert_eq!(seq.number_for(date(2024, 1, 1)), "2024-1000");
    }
}
