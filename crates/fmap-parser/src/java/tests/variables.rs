use super::*;
use pretty_assertions::assert_eq;

#[test]
fn numeric_parameters_and_locals() {
    let records = fixture_records();
    let energy = find_by_name(&records, "calculateEnergy");
    assert_eq!(names(&energy.variables), vec!["energy", "mass", "speedOfLight"]);
}

#[test]
fn non_numeric_locals_are_filtered_by_default() {
    let records = fixture_records();
    let distance = find_by_name(&records, "calculateDistance");
    assert_eq!(
        names(&distance.variables),
        vec![
            "acceleration",
            "distance",
            "initialVelocity",
            "logLevel",
            "temp1",
            "temp2",
            "temp3",
            "time",
        ]
    );
    assert!(!distance.variables.contains("debugMsg"));
    assert!(!distance.variables.contains("i"), "loop counter excluded by default");
}

#[test]
fn loop_counters_opt_in() {
    let source = include_str!("../../../tests/fixtures/Physics.java");
    let records = parse_with(
        source,
        ParseOptions {
            include_loop_counters: true,
            ..ParseOptions::default()
        },
    );
    let distance = find_by_name(&records, "calculateDistance");
    assert!(distance.variables.contains("i"));
}

#[test]
fn enhanced_for_variable_follows_loop_counter_switch() {
    let source = "class A {\n    double total(double[] xs) {\n        double sum = 0;\n        for (double x : xs) { sum += x; }\n        return sum;\n    }\n}";

    let default = parse_default(source);
    assert_eq!(names(&default[0].variables), vec!["sum"]);

    let with_loops = parse_with(
        source,
        ParseOptions {
            include_loop_counters: true,
            ..ParseOptions::default()
        },
    );
    assert_eq!(names(&with_loops[0].variables), vec!["sum", "x"]);
}

#[test]
fn all_declared_policy_keeps_every_name() {
    let source = include_str!("../../../tests/fixtures/Physics.java");
    let records = JavaParser::with_policy(VariablePolicy::AllDeclared)
        .parse(source)
        .expect("source should parse");

    let distance = find_by_name(&records, "calculateDistance");
    assert!(distance.variables.contains("debugMsg"));
    assert!(!distance.variables.contains("i"));

    let describe = find_by_name(&records, "describe");
    assert_eq!(names(&describe.variables), vec!["value"]);
}

#[test]
fn qualified_big_decimal_counts_as_numeric() {
    let source = "class A {\n    java.math.BigDecimal f(java.math.BigDecimal principal, String label) {\n        java.math.BigDecimal rate = principal;\n        return rate;\n    }\n}";
    let records = parse_default(source);
    assert_eq!(names(&records[0].variables), vec!["principal", "rate"]);
}

#[test]
fn arrays_and_varargs_are_not_numeric() {
    let source = "class A {\n    double f(double[] xs, double scale, double... rest) {\n        double ys[] = xs;\n        double total = 0;\n        return total * scale;\n    }\n}";
    let records = parse_default(source);
    assert_eq!(names(&records[0].variables), vec!["scale", "total"]);

    let all = JavaParser::with_policy(VariablePolicy::AllDeclared)
        .parse(source)
        .expect("source should parse");
    assert_eq!(
        names(&all[0].variables),
        vec!["rest", "scale", "total", "xs", "ys"]
    );
}

#[test]
fn duplicate_names_across_blocks_are_deduplicated() {
    let source = "class A {\n    int f(int n) {\n        if (n > 0) { int k = 1; return k; }\n        int k = 2;\n        return k;\n    }\n}";
    let records = parse_default(source);
    assert_eq!(names(&records[0].variables), vec!["k", "n"]);
}

#[test]
fn abstract_method_collects_parameters_only() {
    let source = "abstract class Shape {\n    /** Formula: A = w * h */\n    abstract double area(double w, double h);\n}";
    let records = parse_default(source);
    assert_eq!(names(&records[0].variables), vec!["h", "w"]);
    assert!(records[0].calls.is_empty());
}
