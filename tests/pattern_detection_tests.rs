use indoc::indoc;
use patternmap::analyzers::analyze;
use patternmap::core::PatternCategory;

fn class_with_methods(name: &str, method_count: usize) -> String {
    let mut source = format!("class {}:\n", name);
    for i in 0..method_count {
        source.push_str(&format!("    def method_{}(self):\n        pass\n", i));
    }
    source
}

fn pattern_names(source: &str) -> Vec<String> {
    analyze(source, "python")
        .unwrap()
        .detected_patterns
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[test]
fn god_object_flags_class_over_twenty_methods() {
    let source = class_with_methods("Blob", 21);
    let report = analyze(&source, "python").unwrap();
    let pattern = report
        .detected_patterns
        .iter()
        .find(|p| p.name == "God Object")
        .expect("expected a God Object finding");
    assert_eq!(pattern.category, PatternCategory::AntiPattern);
    assert_eq!(pattern.confidence, 0.7);
    assert_eq!(pattern.locations[0].class_name.as_deref(), Some("Blob"));
    assert_eq!(
        pattern.description,
        "Class 'Blob' has 21 methods, suggesting God Object anti-pattern"
    );
}

#[test]
fn god_object_spares_class_at_exactly_twenty_methods() {
    let source = class_with_methods("Busy", 20);
    assert!(!pattern_names(&source).contains(&"God Object".to_string()));
}

#[test]
fn factory_detected_by_name_hint_and_multiple_returns() {
    let source = indoc! {"
        def create_widget(kind):
            if kind == 'round':
                return RoundWidget()
            return SquareWidget()
    "};
    let report = analyze(source, "python").unwrap();
    let pattern = report
        .detected_patterns
        .iter()
        .find(|p| p.name == "Factory Pattern")
        .expect("expected a Factory finding");
    assert_eq!(pattern.category, PatternCategory::DesignPattern);
    assert_eq!(pattern.confidence, 0.6);
    assert_eq!(pattern.locations[0].function.as_deref(), Some("create_widget"));
}

#[test]
fn factory_needs_at_least_two_returns() {
    let source = indoc! {"
        def create_widget(kind):
            return SquareWidget()
    "};
    assert!(!pattern_names(source).contains(&"Factory Pattern".to_string()));
}

#[test]
fn factory_ignores_functions_without_name_hint() {
    let source = indoc! {"
        def dispatch(kind):
            if kind == 'round':
                return RoundWidget()
            return SquareWidget()
    "};
    assert!(!pattern_names(source).contains(&"Factory Pattern".to_string()));
}

#[test]
fn singleton_detected_by_new_and_instance_attribute() {
    let source = indoc! {"
        class Registry:
            def __new__(cls):
                if cls._instance is None:
                    cls._instance = super().__new__(cls)
                return cls._instance
    "};
    let report = analyze(source, "python").unwrap();
    let pattern = report
        .detected_patterns
        .iter()
        .find(|p| p.name == "Singleton Pattern")
        .expect("expected a Singleton finding");
    assert_eq!(pattern.confidence, 0.8);
    assert_eq!(pattern.locations[0].class_name.as_deref(), Some("Registry"));
}

#[test]
fn plain_new_without_instance_is_not_singleton() {
    let source = indoc! {"
        class Plain:
            def __new__(cls):
                return super().__new__(cls)
    "};
    assert!(!pattern_names(source).contains(&"Singleton Pattern".to_string()));
}

#[test]
fn feature_envy_reports_the_envied_object() {
    let source = indoc! {"
        class Invoice:
            def total(self):
                subtotal = order.items + order.shipping
                return subtotal * order.tax_rate
    "};
    let report = analyze(source, "python").unwrap();
    let pattern = report
        .detected_patterns
        .iter()
        .find(|p| p.name == "Feature Envy")
        .expect("expected a Feature Envy finding");
    assert_eq!(pattern.category, PatternCategory::CodeSmell);
    assert_eq!(pattern.locations[0].function.as_deref(), Some("total"));
    assert_eq!(pattern.locations[0].envied_object.as_deref(), Some("order"));
}

#[test]
fn feature_envy_not_flagged_when_self_dominates() {
    // 4 self accesses vs 3 order accesses
    let source = indoc! {"
        class Invoice:
            def total(self):
                base = self.items + self.shipping + self.fees + self.extra
                return base + order.tax + order.fee + order.duty
    "};
    assert!(!pattern_names(source).contains(&"Feature Envy".to_string()));
}

#[test]
fn dead_code_flags_uncalled_top_level_functions_in_order() {
    let source = indoc! {"
        def zebra():
            pass

        def apple():
            pass

        def used():
            pass

        used()
    "};
    let report = analyze(source, "python").unwrap();
    let dead: Vec<&str> = report
        .detected_patterns
        .iter()
        .filter(|p| p.name == "Dead Code")
        .map(|p| p.locations[0].function.as_deref().unwrap())
        .collect();
    assert_eq!(dead, vec!["zebra", "apple"]);
}

#[test]
fn dead_code_excludes_privates_main_and_tests() {
    let source = indoc! {"
        def _helper():
            pass

        def main():
            pass

        def test_something():
            pass
    "};
    assert!(!pattern_names(source).contains(&"Dead Code".to_string()));
}

#[test]
fn attribute_call_counts_as_usage() {
    let source = indoc! {"
        def refresh():
            pass

        class App:
            def run(self):
                self.refresh()
    "};
    assert!(!pattern_names(source).contains(&"Dead Code".to_string()));
}
