#![no_main]
use std::fmt::Write;

use arbitrary::Arbitrary;
use glyphfmt::{Encoding, FormatKind, FormatSpecifier, FormattingData, StringFormatter};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Value {
    I64(i64),
    U64(u64),
    I128(i128),
    I8(i8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    specifier: String,
    values: Vec<Value>,
    /// Raw table entries; most inputs are rejected at construction.
    table: Option<[Vec<u8>; 13]>,
    utf16: bool,
}

/// Reference rendering with `core::fmt` for the invariant table.
fn expected(value: &Value, spec: FormatSpecifier, out: &mut String) {
    let width = usize::from(spec.precision.unwrap_or(0));
    macro_rules! render {
        ($v:expr) => {{
            let v = $v;
            let written = match (spec.kind, spec.uppercase) {
                (FormatKind::Hex, true) => write!(out, "{v:0width$X}"),
                (FormatKind::Hex, false) => write!(out, "{v:0width$x}"),
                (FormatKind::General, _) => write!(out, "{v}"),
                (FormatKind::Decimal, _) => {
                    let signed = width + usize::from(v.to_string().starts_with('-'));
                    write!(out, "{v:0signed$}")
                }
            };
            written.unwrap();
        }};
    }
    match *value {
        Value::I64(v) => render!(v),
        Value::U64(v) => render!(v),
        Value::I128(v) => render!(v),
        Value::I8(v) => render!(v),
    }
}

fn run(input: Input) {
    let Ok(spec) = FormatSpecifier::parse(&input.specifier) else {
        // Rejected specifiers must leave the buffer untouched.
        let mut sb = StringFormatter::new();
        sb.append(1).unwrap();
        assert!(sb.append_with(2, &input.specifier).is_err());
        assert_eq!(sb.as_bytes(), b"1");
        return;
    };
    assert_eq!(FormatSpecifier::parse(&spec.to_string()), Ok(spec));

    let encoding = if input.utf16 { Encoding::Utf16 } else { Encoding::Utf8 };
    let custom = input
        .table
        .and_then(|table| FormattingData::from_table(table, encoding).ok());
    let data = custom.as_ref().unwrap_or(if input.utf16 {
        FormattingData::invariant_utf16()
    } else {
        FormattingData::invariant_utf8()
    });

    let mut sb = StringFormatter::with_formatting_data(0, data);
    let mut reference = String::new();
    for value in &input.values {
        let appended = match *value {
            Value::I64(v) => sb.append_format(v, spec),
            Value::U64(v) => sb.append_format(v, spec),
            Value::I128(v) => sb.append_format(v, spec),
            Value::I8(v) => sb.append_format(v, spec),
        };
        appended.unwrap();
        expected(value, spec, &mut reference);
    }

    let text = sb.to_text().expect("table entries are valid text");
    if custom.is_none() {
        assert_eq!(text, reference);
    }
}

fuzz_target!(|input: Input| run(input));
