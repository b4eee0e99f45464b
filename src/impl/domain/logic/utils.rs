use std::collections::BTreeMap;

/// `numerator / denominator * 100`, or `0` when the denominator is zero.
pub fn rate(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

pub(crate) fn accumulate<K: Ord>(map: &mut BTreeMap<K, f64>, key: K, amount: f64) {
    *map.entry(key).or_insert(0.0) += amount;
}

/// Lowercased concatenation of an item name and its activity name, the text
/// every keyword table is matched against.
pub(crate) fn haystack(item_name: &str, activity_name: Option<&str>) -> String {
    match activity_name {
        Some(activity) => format!("{} {}", item_name, activity).to_lowercase(),
        None => item_name.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_guards_zero_denominator() {
        assert_eq!(rate(0.0, 0.0), 0.0);
        assert_eq!(rate(42.0, 0.0), 0.0);
        assert!(!rate(0.0, 0.0).is_nan());
    }

    #[test]
    fn rate_is_a_percentage() {
        assert_eq!(rate(25.0, 100.0), 25.0);
        assert_eq!(rate(150.0, 100.0), 150.0);
    }

    #[test]
    fn haystack_joins_and_lowercases() {
        assert_eq!(haystack("Cement", Some("School REPAIR")), "cement school repair");
        assert_eq!(haystack("Cement", None), "cement");
    }
}
