//! Folder and file naming rules.
//!
//! Uploaded files are named `<sequence>_<base>.<ext>`. The sequence prefix is
//! what makes folder reuse append-only: the next free number is always one
//! past the highest prefix already present.

use std::sync::LazyLock;

use regex::Regex;

static SEQUENCE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)_").expect("valid sequence prefix regex"));

/// Characters allowed in folder names: letters (including German umlauts),
/// digits, space, hyphen, underscore and dot.
static FOLDER_NAME_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9äöüÄÖÜß \-_.]").expect("valid folder name regex")
});

static BASE_NAME_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid base name regex"));

const BASE_NAME_MAX_CHARS: usize = 30;
const ID_FALLBACK_CHARS: usize = 8;

/// Display name for a new product folder.
///
/// Falls back to the first eight characters of the product id when nothing
/// survives sanitising.
#[must_use]
pub fn folder_display_name(product_name: &str, product_id: &str) -> String {
    let cleaned = FOLDER_NAME_STRIP_RE.replace_all(product_name, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        product_id.chars().take(ID_FALLBACK_CHARS).collect()
    } else {
        cleaned.to_owned()
    }
}

/// Base name shared by every file uploaded for a product.
///
/// Uses the SKU when present. Otherwise the product name reduced to
/// `[A-Za-z0-9_-]` and cut to thirty characters. When that is empty too the
/// sanitised product id prefix is used, then the literal `product`.
#[must_use]
pub fn file_base_name(sku: Option<&str>, product_name: &str, product_id: &str) -> String {
    if let Some(sku) = sku.map(str::trim).filter(|s| !s.is_empty()) {
        return sku.to_owned();
    }

    let from_name: String = BASE_NAME_STRIP_RE
        .replace_all(product_name, "")
        .chars()
        .take(BASE_NAME_MAX_CHARS)
        .collect();
    if !from_name.is_empty() {
        return from_name;
    }

    let from_id: String = BASE_NAME_STRIP_RE
        .replace_all(product_id, "")
        .chars()
        .take(ID_FALLBACK_CHARS)
        .collect();
    if from_id.is_empty() {
        "product".to_owned()
    } else {
        from_id
    }
}

#[must_use]
pub fn file_name(sequence: u64, base_name: &str, extension: &str) -> String {
    format!("{sequence}_{base_name}.{extension}")
}

/// Leading `<digits>_` of a file name, if any.
#[must_use]
pub fn sequence_prefix(name: &str) -> Option<u64> {
    SEQUENCE_PREFIX_RE
        .captures(name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// One past the highest sequence prefix among `names`, or `1` when none has one.
pub fn next_sequence<'a, I>(names: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(sequence_prefix)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
