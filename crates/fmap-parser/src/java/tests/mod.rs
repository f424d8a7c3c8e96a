use super::*;
pub(super) use fmap_core::MethodRecord;

mod variables;

fn parse_default(source: &str) -> Vec<MethodRecord> {
    parse(source).expect("source should parse")
}

fn parse_with(source: &str, options: ParseOptions) -> Vec<MethodRecord> {
    JavaParser::new(options)
        .parse(source)
        .expect("source should parse")
}

fn find_by_name<'a>(records: &'a [MethodRecord], name: &str) -> &'a MethodRecord {
    records
        .iter()
        .find(|record| record.name == name)
        .unwrap_or_else(|| panic!("should find method named '{name}'"))
}

fn names(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

fn fixture_records() -> Vec<MethodRecord> {
    let source = include_str!("../../../tests/fixtures/Physics.java");
    parse_default(source)
}
