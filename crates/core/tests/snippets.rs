//! End-to-end tests: document lines in, snippet text out.

mod helpers;

use doxydoc_core::types::{DeclarationKind, DocConfig, FallbackReason, Outcome};
use helpers::{assert_sequential_placeholders, position, Harness};

// ---------------------------------------------------------------------------
// Fallback and continuation
// ---------------------------------------------------------------------------

#[test]
fn no_opener_yields_fallback() {
    let h = Harness::from_lines(&["// not a doc comment", "int add(int a, int b);"]);
    assert_eq!(h.snippet(), "\n * ${0}\n */");
}

#[test]
fn fallback_ignores_tag_prefix() {
    let h = Harness::from_lines(&["/* plain */", "int f();"])
        .with_config(DocConfig::default().with_javadoc(false));
    assert_eq!(h.snippet(), "\n * ${0}\n */");
}

#[test]
fn existing_body_yields_continuation() {
    let h = Harness::from_lines(&["/**", "  * @brief exists", " */", "int f();"]);
    assert_eq!(h.snippet(), "\n * ");
}

#[test]
fn opener_at_end_of_document() {
    let h = Harness::from_lines(&["int x;", "/**", ""]);
    let analysis = h.at_line(1);
    assert_eq!(analysis.outcome, Outcome::Fallback { reason: FallbackReason::EndOfDocument });
    assert_eq!(analysis.snippet, "\n * ${0}\n */");
}

#[test]
fn unrecognized_declaration_yields_fallback() {
    let h = Harness::from_lines(&["/**", "#define MAX 10"]);
    assert_eq!(h.snippet(), "\n * ${0}\n */");
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

#[test]
fn plain_function_with_return() {
    let s = Harness::from_lines(&["/**", "int add(int a, int b);"]).snippet();
    let order = [
        "@brief ${1:",
        "@details ${2:",
        "@param a ${3:",
        "@param b ${4:",
        "@return ${5:",
    ];
    let positions: Vec<usize> = order.iter().map(|n| position(&s, n)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "out of order: {s}");
    assert_sequential_placeholders(&s);
}

#[test]
fn templated_function_consumes_matching_tparam() {
    let s = Harness::from_lines(&["/**", "template<typename T>", "void f(T x);"]).snippet();
    assert!(position(&s, "@brief ${1:") < position(&s, "@details ${2:"));
    assert!(position(&s, "@details ${2:") < position(&s, "@param x ${3:"));
    assert!(!s.contains("@tparam"));
    assert!(!s.contains("@return"));
    assert_sequential_placeholders(&s);
}

#[test]
fn templated_function_keeps_unused_tparams() {
    let s = Harness::from_lines(&[
        "/**",
        "template <typename R, typename T = int>",
        "R convert(const T& value);",
    ])
    .snippet();
    assert!(s.contains("@param value ${3:"));
    assert!(s.contains("@tparam R ${4:"));
    assert!(!s.contains("@tparam T"));
    assert!(s.contains("@return ${5:"));
    assert_sequential_placeholders(&s);
}

#[test]
fn templated_constructor_consumes_tparam() {
    let s = Harness::from_lines(&["/**", "template<typename It>", "Range(It first, It last) {"])
        .snippet();
    assert!(s.contains("@param first ${3:"));
    assert!(s.contains("@param last ${4:"));
    assert!(!s.contains("@tparam"));
    assert!(!s.contains("@return"));
    assert_sequential_placeholders(&s);
}

#[test]
fn member_initializer_list_adds_no_params() {
    let analysis =
        Harness::from_lines(&["/**", "Point(int x, int y, int z) : x_(x), y_(y), z_(z) {}"])
            .at_line(0);
    let decl = analysis.declaration().expect("constructor recognized");
    assert_eq!(decl.kind, DeclarationKind::PlainConstructorOrDestructor);
    let names: Vec<&str> = decl.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "z"]);
    assert_eq!(analysis.snippet.matches("@param").count(), 3);
    assert_sequential_placeholders(&analysis.snippet);
}

#[test]
fn void_parameter_list_has_no_params() {
    let s = Harness::from_lines(&["/**", "void reset(void);"]).snippet();
    assert!(!s.contains("@param"));
    assert!(!s.contains("@return"));
    assert_eq!(
        s,
        "\n * @brief ${1:[brief description]}\n * @details ${2:[long description]}\n * \n */"
    );
}

#[test]
fn friend_adds_relates_first() {
    let plain = Harness::from_lines(&["/**", "bool operator==(const A& a, const A& b);"]).snippet();
    let friend =
        Harness::from_lines(&["/**", "friend bool operator==(const A& a, const A& b);"]).snippet();

    assert!(!plain.contains("@relates"));
    assert!(friend.starts_with("\n * @relates ${1:[class name]}"));
    assert!(plain.contains("@param b ${4:"));
    assert!(friend.contains("@param b ${5:"));
    assert_eq!(friend.matches("@relates").count(), 1);
    assert_sequential_placeholders(&friend);
}

#[test]
fn backslash_style() {
    let h = Harness::from_lines(&["/**", "double area() const;"])
        .with_config(DocConfig::default().with_javadoc(false));
    let s = h.snippet();
    assert!(s.contains("\\brief ${1:"));
    assert!(s.contains("\\return ${3:"));
    assert!(!s.contains('@'));
}

#[test]
fn lookahead_limit_is_honoured() {
    let lines = ["/**", "int sum(int a,", "int b,", "int c);"];
    let wide = Harness::from_lines(&lines);
    assert!(wide.snippet().contains("@param c"));

    let narrow = Harness::from_lines(&lines)
        .with_config(DocConfig::default().with_max_lookahead_lines(0));
    let analysis = narrow.at_line(0);
    assert_eq!(analysis.outcome, Outcome::Fallback { reason: FallbackReason::Unrecognized });
}

// ---------------------------------------------------------------------------
// Fixture file
// ---------------------------------------------------------------------------

#[test]
fn fixture_declarations_classify_as_expected() {
    let h = Harness::from_fixture("shapes.hpp");
    let expected = [
        (0, DeclarationKind::PlainClass),
        (1, DeclarationKind::PlainConstructorOrDestructor),
        (2, DeclarationKind::PlainConstructorOrDestructor),
        (3, DeclarationKind::PlainFunction),
        (4, DeclarationKind::PlainFunction),
        (5, DeclarationKind::PlainFunction),
        (6, DeclarationKind::TemplatedClass),
        (7, DeclarationKind::TemplatedFunction),
    ];
    for (nth, kind) in expected {
        let analysis = h.at_line(h.opener_line(nth));
        let decl = analysis
            .declaration()
            .unwrap_or_else(|| panic!("opener {nth}: {:?}", analysis.outcome));
        assert_eq!(decl.kind, kind, "opener {nth}: {}", decl.raw_match_text);
        assert_sequential_placeholders(&analysis.snippet);
    }
}

#[test]
fn fixture_constructor_has_no_return() {
    let h = Harness::from_fixture("shapes.hpp");
    let analysis = h.at_line(h.opener_line(1));
    let s = &analysis.snippet;
    assert!(s.contains("@param x ${3:"));
    assert!(s.contains("@param y ${4:"));
    assert_eq!(s.matches("@param").count(), 2);
    assert!(!s.contains("@return"));
}

#[test]
fn fixture_multi_line_and_friend() {
    let h = Harness::from_fixture("shapes.hpp");

    let moved = h.at_line(h.opener_line(4)).snippet;
    assert!(moved.contains("@param dx") && moved.contains("@param dy"));

    let streamed = h.at_line(h.opener_line(5));
    assert!(streamed.declaration().is_some_and(|d| d.is_friend));
    assert!(streamed.snippet.starts_with("\n * @relates"));
}

#[test]
fn fixture_template_class_lists_tparams() {
    let h = Harness::from_fixture("shapes.hpp");
    let s = h.at_line(h.opener_line(6)).snippet;
    assert!(s.contains("@tparam T ${3:"));
    assert!(s.contains("@tparam Alloc ${4:"));
}

#[test]
fn fixture_documented_and_trailing_openers() {
    let h = Harness::from_fixture("shapes.hpp");
    assert_eq!(h.at_line(h.opener_line(8)).outcome, Outcome::Continuation);
    assert_eq!(
        h.at_line(h.opener_line(9)).outcome,
        Outcome::Fallback { reason: FallbackReason::EndOfDocument }
    );
}
