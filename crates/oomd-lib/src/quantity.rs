//! Canonical display of Kubernetes resource quantities

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

/// Binary suffixes, largest last (power of 1024)
const BINARY_SUFFIXES: &[(&str, u32)] = &[
    ("Ki", 1),
    ("Mi", 2),
    ("Gi", 3),
    ("Ti", 4),
    ("Pi", 5),
    ("Ei", 6),
];

/// Decimal SI suffixes, largest last (power of 1000)
const DECIMAL_SUFFIXES: &[(&str, u32)] = &[
    ("k", 1),
    ("M", 2),
    ("G", 3),
    ("T", 4),
    ("P", 5),
    ("E", 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    BinarySi,
    DecimalSi,
}

/// Render an optional quantity, "0" when it is absent
pub fn display(quantity: Option<&Quantity>) -> String {
    match quantity {
        Some(q) => canonicalize(&q.0),
        None => "0".to_string(),
    }
}

/// Rewrite a quantity string in canonical form, e.g. "1024Mi" as "1Gi".
///
/// Values that do not reduce to a whole number of bytes are returned as given.
pub fn canonicalize(raw: &str) -> String {
    let raw = raw.trim();
    match parse(raw) {
        Some((value, format)) => render(value, format),
        None => raw.to_string(),
    }
}

fn parse(raw: &str) -> Option<(u128, Format)> {
    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);

    let (format, multiplier) = match suffix {
        "" => (Format::DecimalSi, 1),
        s => {
            if let Some((_, power)) = BINARY_SUFFIXES.iter().find(|(name, _)| *name == s) {
                (Format::BinarySi, 1024u128.pow(*power))
            } else if let Some((_, power)) = DECIMAL_SUFFIXES.iter().find(|(name, _)| *name == s) {
                (Format::DecimalSi, 1000u128.pow(*power))
            } else {
                return None;
            }
        }
    };

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let digits: u128 = format!("{whole}{fraction}").parse().ok()?;
    let scale = 10u128.checked_pow(fraction.len() as u32)?;
    let scaled = digits.checked_mul(multiplier)?;
    if scaled % scale != 0 {
        return None;
    }

    Some((scaled / scale, format))
}

fn render(value: u128, format: Format) -> String {
    if value == 0 {
        return "0".to_string();
    }

    // Binary values that no binary suffix divides fall back to decimal form
    if format == Format::BinarySi {
        if let Some(s) = largest_exact(value, 1024, BINARY_SUFFIXES) {
            return s;
        }
    }

    largest_exact(value, 1000, DECIMAL_SUFFIXES).unwrap_or_else(|| value.to_string())
}

fn largest_exact(value: u128, base: u128, suffixes: &[(&str, u32)]) -> Option<String> {
    suffixes.iter().rev().find_map(|(suffix, power)| {
        let unit = base.pow(*power);
        (value % unit == 0).then(|| format!("{}{}", value / unit, suffix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_quantities() {
        assert_eq!(canonicalize("128Mi"), "128Mi");
        assert_eq!(canonicalize("1024Mi"), "1Gi");
        assert_eq!(canonicalize("0.5Gi"), "512Mi");
        assert_eq!(canonicalize("1.5Ki"), "1536");
    }

    #[test]
    fn test_decimal_quantities() {
        assert_eq!(canonicalize("1000"), "1k");
        assert_eq!(canonicalize("1.5G"), "1500M");
        assert_eq!(canonicalize("134217728"), "134217728");
        assert_eq!(canonicalize("0"), "0");
    }

    #[test]
    fn test_unreducible_quantities_are_verbatim() {
        assert_eq!(canonicalize("500m"), "500m");
        assert_eq!(canonicalize("1e3"), "1e3");
        assert_eq!(canonicalize("0.5"), "0.5");
        assert_eq!(canonicalize("lots"), "lots");
        assert_eq!(canonicalize("1.2.3Mi"), "1.2.3Mi");
    }

    #[test]
    fn test_display_absent_quantity() {
        assert_eq!(display(None), "0");
        assert_eq!(display(Some(&Quantity("64Mi".into()))), "64Mi");
    }
}
