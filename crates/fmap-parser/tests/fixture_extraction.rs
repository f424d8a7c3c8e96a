use fmap_core::{ParseFailure, VariablePolicy};
use fmap_parser::{JavaParser, ParseOptions, extract_body, parse};
use pretty_assertions::assert_eq;

const ENERGY: &str = r"public class Relativity {
    /**
     * Formula: E = m * c^2
     */
    public double calculateEnergy(double mass) {
        double speedOfLight = 299792458.0;
        double energy = mass*speedOfLight*speedOfLight;
        return energy;
    }
}
";

#[test]
fn energy_method_record() {
    let records = parse(ENERGY).expect("parses");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.name, "calculateEnergy");
    assert_eq!(record.documentation, "Formula: E = m * c^2");
    assert_eq!(
        record.variables.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["energy", "mass", "speedOfLight"]
    );
    assert!(record.calls.is_empty());
    assert_eq!(record.start_line, 5);
    assert_eq!(record.code, extract_body(ENERGY, 5));
    assert!(record.code.starts_with("    public double calculateEnergy(double mass) {"));
}

#[test]
fn policy_choice_is_visible_in_records() {
    let source = "class A {\n    double f(String label, double x) { boolean ok = true; return x; }\n}";

    let numeric = JavaParser::new(ParseOptions::default())
        .parse(source)
        .expect("parses");
    assert_eq!(
        numeric[0].variables.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["x"]
    );

    let all = JavaParser::with_policy(VariablePolicy::AllDeclared)
        .parse(source)
        .expect("parses");
    assert_eq!(
        all[0].variables.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["label", "ok", "x"]
    );
}

#[test]
fn interface_default_and_static_methods_are_found() {
    let source = "interface Shape {\n    double area();\n    default double twice() { return 2 * area(); }\n    static double unit() { return 1.0; }\n}";
    let records = parse(source).expect("parses");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["area", "twice", "unit"]);
    assert!(records[1].calls.contains("area()"));
}

#[test]
fn no_methods_is_distinct_from_empty_success() {
    assert_eq!(
        parse("enum Unit { METER, SECOND }"),
        Err(ParseFailure::NoMethodsFound)
    );
}
