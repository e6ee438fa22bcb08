//! A1-notation helpers.

/// Zero-based column index to its A1 letters: `0 -> A`, `25 -> Z`, `26 -> AA`.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = u8::try_from((n - 1) % 26).unwrap_or_default();
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Range covering `width` cells of one 1-based `row`, e.g. `'Products'!A5:G5`.
#[must_use]
pub fn row_range(tab: &str, row: usize, width: usize) -> String {
    let last = column_letter(width.saturating_sub(1));
    format!("{}!A{row}:{last}{row}", quote_tab(tab))
}

/// Whole-column range for the product id column.
pub(crate) fn key_column_range(tab: &str) -> String {
    format!("{}!A:A", quote_tab(tab))
}

/// Range the append endpoint searches for the end of the table.
pub(crate) fn table_range(tab: &str, width: usize) -> String {
    let last = column_letter(width.saturating_sub(1));
    format!("{}!A:{last}", quote_tab(tab))
}

/// Tab names are single-quoted; embedded quotes are doubled.
fn quote_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letter_single_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(6), "G");
        assert_eq!(column_letter(25), "Z");
    }

    #[test]
    fn column_letter_rolls_over_to_two_letters() {
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn row_range_quotes_tab() {
        assert_eq!(row_range("Products", 5, 6), "'Products'!A5:F5");
        assert_eq!(row_range("Bob's list", 2, 1), "'Bob''s list'!A2:A2");
    }

    #[test]
    fn helper_ranges() {
        assert_eq!(key_column_range("Products"), "'Products'!A:A");
        assert_eq!(table_range("Products", 7), "'Products'!A:G");
    }
}
