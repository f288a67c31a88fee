#![allow(missing_docs)]

mod common;

use common::{Age, NUMBERS_TO_WRITE, letter_culture, utf16};
use glyphfmt::{
    ConfigError, Encoding, FormatError, FormatErrorKind, FormattingData, INVARIANT_UTF16,
    StringFormatter,
};

#[test]
fn decimal_default_table() {
    let mut sb = StringFormatter::with_capacity(16);
    sb.append_with(12345, "D").unwrap();
    assert_eq!(sb.to_text().unwrap(), "12345");
}

#[test]
fn hex_case_selection() {
    let mut sb = StringFormatter::new();
    sb.append_with(10, "X").unwrap();
    assert_eq!(sb.to_text().unwrap(), "A");
    sb.clear();
    sb.append_with(10, "x").unwrap();
    assert_eq!(sb.to_text().unwrap(), "a");
}

#[test]
fn custom_culture_negative() {
    for encoding in [Encoding::Utf8, Encoding::Utf16] {
        let culture = letter_culture(encoding);
        let mut sb = StringFormatter::with_formatting_data(8, &culture);
        sb.append_with(-5, "D").unwrap();
        assert_eq!(sb.to_text().unwrap(), "_?F");
        assert_eq!(sb.len(), 3 * encoding.code_unit_size());
    }
}

#[test]
fn minimum_i64() {
    let mut sb = StringFormatter::new();
    sb.append_with(i64::MIN, "D").unwrap();
    let text = sb.to_text().unwrap();
    assert_eq!(text, "-9223372036854775808");
    assert_eq!(text.len(), 20);
}

#[test]
fn many_single_digits() {
    let mut sb = StringFormatter::with_capacity(NUMBERS_TO_WRITE);
    for i in 0..NUMBERS_TO_WRITE {
        sb.append_with(i % 10, "D").unwrap();
    }
    assert_eq!(sb.to_text().unwrap().len(), NUMBERS_TO_WRITE);
}

#[test]
fn many_single_hex_digits() {
    let mut sb = StringFormatter::with_capacity(NUMBERS_TO_WRITE);
    for i in 0..NUMBERS_TO_WRITE {
        sb.append_format(i % 10, glyphfmt::FormatSpecifier::HEX_UPPERCASE)
            .unwrap();
    }
    assert_eq!(sb.to_text().unwrap().len(), NUMBERS_TO_WRITE);
}

#[test]
fn many_ages() {
    let mut sb = StringFormatter::with_capacity(NUMBERS_TO_WRITE * 2);
    for i in 0..NUMBERS_TO_WRITE {
        sb.append(Age::new(i32::try_from(i % 10).unwrap())).unwrap();
    }
    let text = sb.to_text().unwrap();
    assert_eq!(text.len(), NUMBERS_TO_WRITE * 2);
    assert!(text.starts_with("0y1y2y"));
}

#[test]
fn age_respects_specifier_and_table() {
    let culture = letter_culture(Encoding::Utf16);
    let mut sb = StringFormatter::with_formatting_data(0, &culture);
    sb.append_with(Age::new(-12), "D3").unwrap();
    assert_eq!(sb.to_text().unwrap(), "_?ABCy");
    assert!(sb.append_with(Age::new(1), "x9x").is_err());
    assert_eq!(sb.to_text().unwrap(), "_?ABCy");
}

#[test]
fn custom_culture_reuse() {
    let culture = letter_culture(Encoding::Utf16);
    let mut sb = StringFormatter::with_formatting_data(NUMBERS_TO_WRITE * 3, &culture);
    let mut previous = None;
    for _ in 0..3 {
        sb.clear();
        for i in 0..NUMBERS_TO_WRITE {
            sb.append((i % 128) + 101).unwrap();
        }
        let text = sb.to_text().unwrap();
        assert_eq!(text.chars().count(), NUMBERS_TO_WRITE * 3);
        assert!(text.starts_with("BABBACBAD"));
        if let Some(previous) = &previous {
            assert_eq!(previous, &text);
        }
        previous = Some(text);
    }
}

#[test]
fn shared_table_across_threads() {
    let culture = letter_culture(Encoding::Utf8);
    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let culture = &culture;
                scope.spawn(move || {
                    let mut sb = StringFormatter::with_formatting_data(0, culture);
                    sb.append(t * 11).unwrap();
                    sb.to_text().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(outputs, ["A", "BB", "CC", "DD"]);
}

#[test]
fn raw_bytes_match_encoding() {
    let mut sb = StringFormatter::with_formatting_data(0, &INVARIANT_UTF16);
    sb.append(-7).unwrap();
    sb.append_with(0xbeef_u32, "X").unwrap();
    assert_eq!(sb.as_bytes(), utf16("-7BEEF").as_slice());
}

#[test]
fn invalid_specifier_reports_reason() {
    let mut sb = StringFormatter::new();
    assert_eq!(
        sb.append_with(1, "N2"),
        Err(FormatError::InvalidFormat {
            text: "N2".into(),
            reason: FormatErrorKind::UnknownKind('N'),
        })
    );
    assert!(sb.is_empty());
}

#[test]
fn invalid_tables_fail_at_construction() {
    assert_eq!(
        FormattingData::from_strs(
            ["0", "1", "2", "3", "", "5", "6", "7", "8", "9"],
            [".", ",", "-"],
            Encoding::Utf8,
        ),
        Err(ConfigError::EmptyEntry { index: 4 })
    );
    let mut digits: [Vec<u8>; 10] = std::array::from_fn(|d| utf16(&d.to_string()));
    digits[9] = vec![0x00, 0xDC];
    assert_eq!(
        FormattingData::new(digits, [utf16("."), utf16(","), utf16("-")], Encoding::Utf16),
        Err(ConfigError::InvalidEncoding {
            index: 9,
            encoding: Encoding::Utf16,
        })
    );
}
