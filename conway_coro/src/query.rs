// query.rs - Grid size share strings ("?width=40&height=30")
// Only the size is shared; cell contents and run state never are.

use life_engine::Dimensions;

/// Raw `width` and `height` values, present only when both keys have a
/// non-empty value. A leading `?` is optional, other keys are ignored and
/// the first occurrence of a key wins. Values are validated by the engine.
/// Only plain `key=value` text is understood: nothing is percent-decoded,
/// so an escaped value such as `%34%30` reaches the engine as written and
/// is rejected there.
pub fn dimensions(query: &str) -> Option<(&str, &str)> {
    let query = query.trim().trim_start_matches('?');
    let lookup = |key: &str| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|&(name, _)| name == key)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    };
    Some((lookup("width")?, lookup("height")?))
}

/// Share string for `dims`.
pub fn encode(dims: Dimensions) -> String {
    format!("?width={}&height={}", dims.width(), dims.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_keys_in_any_order() {
        assert_eq!(dimensions("?width=40&height=30"), Some(("40", "30")));
        assert_eq!(dimensions("height=30&width=40"), Some(("40", "30")));
        assert_eq!(dimensions("theme=dark&width=1&height=2"), Some(("1", "2")));
    }

    #[test]
    fn needs_both_non_empty_values() {
        assert_eq!(dimensions("?width=40"), None);
        assert_eq!(dimensions("?width=&height=30"), None);
        assert_eq!(dimensions(""), None);
        assert_eq!(dimensions("width&height"), None);
    }

    #[test]
    fn escaped_values_are_not_decoded() {
        assert_eq!(dimensions("width=%34%30&height=3"), Some(("%34%30", "3")));
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(dimensions("width=5&width=6&height=7"), Some(("5", "7")));
    }

    #[test]
    fn passes_values_through_unvalidated() {
        assert_eq!(dimensions("width=-3&height=abc"), Some(("-3", "abc")));
    }

    #[test]
    fn encode_round_trips_through_dimensions() {
        let share = encode(Dimensions::new(64, 48));
        assert_eq!(share, "?width=64&height=48");
        assert_eq!(dimensions(&share), Some(("64", "48")));
    }
}
