use indoc::indoc;
use patternmap::analyzers::analyze;
use patternmap::core::{Priority, RefactoringSuggestion};

fn suggestions_for(source: &str) -> Vec<RefactoringSuggestion> {
    analyze(source, "python").unwrap().refactoring_suggestions
}

fn kinds(suggestions: &[RefactoringSuggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.kind.as_str()).collect()
}

fn function_of_length(total_lines: usize) -> String {
    let mut source = String::from("def long_function():\n");
    for i in 0..total_lines - 1 {
        source.push_str(&format!("    x{} = {}\n", i, i));
    }
    source
}

#[test]
fn extract_method_fires_above_fifty_lines() {
    let suggestions = suggestions_for(&function_of_length(51));
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "extract_method")
        .expect("expected an extract_method suggestion");
    assert_eq!(suggestion.priority, Priority::Medium);
    assert_eq!(suggestion.location, "long_function:1");
    assert_eq!(
        suggestion.description,
        "Function 'long_function' is too long (51 lines)"
    );
}

#[test]
fn extract_method_spares_exactly_fifty_lines() {
    let suggestions = suggestions_for(&function_of_length(50));
    assert!(!kinds(&suggestions).contains(&"extract_method"));
}

#[test]
fn reduce_complexity_fires_above_ten() {
    // ten if statements push the approximation to 11
    let mut source = String::from("def branchy(x):\n");
    for i in 0..10 {
        source.push_str(&format!("    if x > {}:\n        pass\n", i));
    }
    let suggestions = suggestions_for(&source);
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "reduce_complexity")
        .expect("expected a reduce_complexity suggestion");
    assert_eq!(suggestion.priority, Priority::High);
    assert_eq!(
        suggestion.description,
        "Function 'branchy' has high complexity (11)"
    );
}

#[test]
fn parameter_thresholds_are_separate_checks() {
    // six parameters trips the soft check only
    let six = "def f(a, b, c, d, e, g):\n    pass\n";
    let suggestions = suggestions_for(six);
    assert!(kinds(&suggestions).contains(&"parameter_object"));
    assert!(!kinds(&suggestions).contains(&"introduce_parameter_object"));

    // eight parameters trips both
    let eight = "def f(a, b, c, d, e, g, h, i):\n    pass\n";
    let suggestions = suggestions_for(eight);
    assert!(kinds(&suggestions).contains(&"parameter_object"));
    assert!(kinds(&suggestions).contains(&"introduce_parameter_object"));

    // five parameters trips neither
    let five = "def f(a, b, c, d, e):\n    pass\n";
    let suggestions = suggestions_for(five);
    assert!(!kinds(&suggestions).contains(&"parameter_object"));
    assert!(!kinds(&suggestions).contains(&"introduce_parameter_object"));
}

#[test]
fn split_class_fires_above_twenty_methods() {
    let mut source = String::from("class Huge:\n");
    for i in 0..21 {
        source.push_str(&format!("    def method_{}(self):\n        pass\n", i));
    }
    let suggestions = suggestions_for(&source);
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "split_class")
        .expect("expected a split_class suggestion");
    assert_eq!(suggestion.priority, Priority::High);
    assert_eq!(suggestion.location, "Huge:1");
}

#[test]
fn reduce_coupling_fires_above_five_bases() {
    let source = indoc! {"
        class Kitchen(A, B, C, D, E, F):
            pass
    "};
    let suggestions = suggestions_for(source);
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "reduce_coupling")
        .expect("expected a reduce_coupling suggestion");
    assert_eq!(suggestion.priority, Priority::Medium);
    assert_eq!(
        suggestion.description,
        "Class 'Kitchen' lists 6 base classes"
    );
}

#[test]
fn reduce_nesting_fires_above_depth_four() {
    let source = indoc! {"
        def tangled(items):
            for group in items:
                if group:
                    while group.pending:
                        with group.lock:
                            if group.ready:
                                group.flush()
    "};
    let suggestions = suggestions_for(source);
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "reduce_nesting")
        .expect("expected a reduce_nesting suggestion");
    assert_eq!(
        suggestion.description,
        "Function 'tangled' has deep nesting (depth 5)"
    );
}

#[test]
fn nesting_at_depth_four_is_tolerated() {
    let source = indoc! {"
        def layered(items):
            for group in items:
                if group:
                    while group.pending:
                        with group.lock:
                            group.flush()
    "};
    let suggestions = suggestions_for(source);
    assert!(!kinds(&suggestions).contains(&"reduce_nesting"));
}

#[test]
fn extract_common_code_reports_both_functions() {
    let source = indoc! {"
        def load_users(path):
            with open(path) as handle:
                data = json.load(handle)
            results = []
            for item in data:
                if item.active:
                    results.append(item.name)
            return results

        def load_customers(path):
            with open(path) as handle:
                data = json.load(handle)
            results = []
            for item in data:
                if item.active:
                    results.append(item.name)
            return results
    "};
    let suggestions = suggestions_for(source);
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "extract_common_code")
        .expect("expected an extract_common_code suggestion");
    assert_eq!(suggestion.location, "load_users:1, load_customers:10");
    assert_eq!(
        suggestion.description,
        "Functions 'load_users' and 'load_customers' have similar implementations"
    );
}

#[test]
fn extract_common_code_tolerates_a_renamed_variable() {
    // same bodies apart from one variable name
    let source = indoc! {"
        def load_users(path):
            with open(path) as handle:
                data = json.load(handle)
            results = []
            for item in data:
                if item.active:
                    results.append(item.name)
            return results

        def load_customers(path):
            with open(path) as handle:
                payload = json.load(handle)
            results = []
            for item in payload:
                if item.active:
                    results.append(item.name)
            return results
    "};
    let suggestions = suggestions_for(source);
    let suggestion = suggestions
        .iter()
        .find(|s| s.kind == "extract_common_code")
        .expect("expected an extract_common_code suggestion");
    assert_eq!(suggestion.location, "load_users:1, load_customers:10");
}

#[test]
fn heavily_renamed_bodies_are_not_duplicates() {
    // every local renamed pushes the token overlap below the cutoff
    let source = indoc! {"
        def load_users(path):
            with open(path) as handle:
                data = json.load(handle)
            results = []
            for item in data:
                if item.active:
                    results.append(item.name)
            return results

        def load_customers(src):
            with open(src) as fh:
                payload = json.load(fh)
            out = []
            for row in payload:
                if row.active:
                    out.append(row.name)
            return out
    "};
    let suggestions = suggestions_for(source);
    assert!(!kinds(&suggestions).contains(&"extract_common_code"));
}

#[test]
fn short_identical_bodies_are_not_reported() {
    let source = indoc! {"
        def a():
            return 1

        def b():
            return 1
    "};
    let suggestions = suggestions_for(source);
    assert!(!kinds(&suggestions).contains(&"extract_common_code"));
}

#[test]
fn suggestion_order_is_stable() {
    let source = function_of_length(51);
    let first = suggestions_for(&source);
    let second = suggestions_for(&source);
    assert_eq!(first, second);
}
