//! Common test helpers and utilities shared across test suite.

use marc_discovery::{Field, Record};

/// Builds a field from `(code, value)` pairs.
pub fn field(tag: &str, ind1: char, ind2: char, subfields: &[(char, &str)]) -> Field {
    let mut field = Field::new(tag.to_string(), ind1, ind2);
    for &(code, value) in subfields {
        field.add_subfield_str(code, value);
    }
    field
}

/// An 008 with the given date type, dates, and language.
#[allow(dead_code)]
pub fn fixed_field(date_type: char, date1: &str, date2: &str, lang: &str) -> String {
    format!("970616{date_type}{date1}{date2}enka          000 0 {lang} d")
}

/// Creates a realistic book record for extraction testing.
///
/// Includes a personal main entry with an Arabic-script alternate, a title
/// with a non-filing article and its own alternate, subjects from several
/// vocabularies, notes, a series, and added entries.
#[allow(dead_code)]
pub fn create_realistic_record() -> Record {
    Record::builder()
        .control_field_str("001", "9912345")
        .control_field_str("005", "20230115103045.0")
        .control_field_str("008", &fixed_field('s', "1997", "    ", "ara"))
        .field(field("041", '1', ' ', &[('a', "ara"), ('h', "eng")]))
        .field(field("050", ' ', '4', &[('a', "PJ7846.A46"), ('b', "K5 1997")]))
        .field(field(
            "100",
            '1',
            ' ',
            &[('6', "880-01"), ('a', "Mahfuz, Najib,"), ('d', "1911-2006,"), ('4', "aut")],
        ))
        .field(field(
            "245",
            '1',
            '4',
            &[('6', "880-02"), ('a', "The book of life :"), ('b', "a novel /"), ('c', "Najib Mahfuz.")],
        ))
        .field(field("246", '3', ' ', &[('a', "Book of life")]))
        .field(field("490", '1', ' ', &[('a', "Modern Arabic writing ;"), ('v', "7")]))
        .field(field("500", ' ', ' ', &[('a', "Translated from the Arabic.")]))
        .field(field("504", ' ', ' ', &[('a', "Includes bibliographical references.")]))
        .field(field("520", ' ', ' ', &[('a', "A family saga set in Cairo.")]))
        .field(field("650", ' ', '0', &[('a', "Families"), ('z', "Egypt"), ('v', "Fiction.")]))
        .field(field("650", ' ', '7', &[('a', "Families."), ('2', "fast")]))
        .field(field("651", ' ', '0', &[('a', "Cairo (Egypt)"), ('v', "Fiction.")]))
        .field(field("700", '1', ' ', &[('a', "Smith, Jane,"), ('e', "translator.")]))
        .field(field("830", ' ', '0', &[('a', "Modern Arabic writing ;"), ('v', "7.")]))
        .field(field(
            "880",
            '1',
            ' ',
            &[('6', "100-01/(3/r"), ('a', "محفوظ، نجيب،"), ('d', "1911-2006,"), ('4', "aut")],
        ))
        .field(field("880", '1', '4', &[('6', "245-02/(3/r"), ('a', "كتاب الحياة :"), ('b', "رواية /")]))
        .build()
}

/// Creates a record with no data fields and no control fields.
#[allow(dead_code)]
pub fn create_empty_record() -> Record {
    Record::new()
}
