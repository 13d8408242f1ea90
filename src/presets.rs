use crate::series::Series;

/// Rows of the English series, most frequent characters first.
const EN_US: [[&str; 16]; 4] = [
    [
        " ", "e", "t", "a", "o", "i", "n", "s", "h", "r", "d", "l", "^^>1", "^^>2", "^^>3",
        "^^ascii",
    ],
    [
        "u", "c", "m", "w", "f", "g", "y", "p", "b", "v", "k", ".", ",", "\n", "'", "I",
    ],
    [
        "T", "A", "S", "H", "W", "B", "C", "M", "x", "j", "q", "z", "\"", "-", "?", "!",
    ],
    [
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ":", ";", "(", ")", "\t", "Y",
    ],
];

/// A four-row series for English prose.
///
/// The twelve most frequent characters cost one code, the next three rows
/// cost two, and anything else goes through the ascii escape for three.
pub fn en_us() -> Series {
    Series::from_text_rows(EN_US).expect("built-in series is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_codes, encode_symbol};
    use crate::tests::setup;

    #[test]
    fn test_en_us_is_valid() {
        setup();
        let series = en_us();
        assert_eq!(series.len(), 4);
        assert_eq!(series.null_nibble().unwrap(), 15);
    }

    #[test]
    fn test_en_us_costs() {
        setup();
        let series = en_us();
        assert_eq!(encode_symbol(&series, 'e').unwrap(), vec![1]);
        assert_eq!(encode_symbol(&series, 'I').unwrap(), vec![12, 15]);
        assert_eq!(encode_symbol(&series, '7').unwrap(), vec![14, 7]);
        assert_eq!(encode_symbol(&series, 'Z').unwrap(), vec![15, 5, 10]);

        let text = "the rain in spain stays mainly in the plain";
        let codes = encode_codes(&series, text).unwrap();
        assert!(codes.len() < text.len() * 2);
    }
}
