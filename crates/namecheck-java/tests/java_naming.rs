//! End-to-end: Java source through the front-end and the checker.

use namecheck_core::{check_tree, DeclTree, Frontend, MethodScan, NameChecker};
use namecheck_java::JavaFrontend;

const SERVICE: &str = r#"package com.example;

public class myService {
    public static final int MAX_RETRIES = 3;
    public static final int maxValue = 10;
    private static final String DEFAULT_NAME = "svc";
    private int Count;
    private String userName;

    public myService(int initialCount) {
        this.Count = initialCount;
    }

    public void myService() {
    }

    public int getHTTPCode(int StatusCode) {
        int tempValue = StatusCode;
        return tempValue;
    }

    enum Color { RED, green }

    interface Limits {
        int version = 1;
        int MAX__SIZE = 2;
    }
}
"#;

fn parse(source: &str) -> DeclTree {
    JavaFrontend::new()
        .parse(source)
        .expect("source should parse")
        .with_path("Sample.java")
}

fn render(tree: &DeclTree, checker: &NameChecker) -> String {
    check_tree(tree, checker)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn service_diagnostics() {
    let tree = parse(SERVICE);
    insta::assert_snapshot!(render(&tree, &NameChecker::new()), @r"
    Sample.java:3:14: warning [NC001] name `myService` should start with an uppercase letter
    Sample.java:5:29: warning [NC003] constant `maxValue` should be named using only uppercase letters or underscores, and must start with a letter
    Sample.java:7:17: warning [NC002] name `Count` should start with a lowercase letter
    Sample.java:14:17: warning [NC005] an ordinary method `myService` should avoid duplicating the class name, to prevent confusion with a constructor
    Sample.java:17:16: warning [NC004] name `getHTTPCode` does not follow camel-case convention
    Sample.java:17:32: warning [NC002] name `StatusCode` should start with a lowercase letter
    Sample.java:22:23: warning [NC003] constant `green` should be named using only uppercase letters or underscores, and must start with a letter
    Sample.java:25:13: warning [NC003] constant `version` should be named using only uppercase letters or underscores, and must start with a letter
    Sample.java:26:13: warning [NC003] constant `MAX__SIZE` should be named using only uppercase letters or underscores, and must start with a letter
    ");
}

#[test]
fn on_collision_only_checks_colliding_methods() {
    let tree = parse(SERVICE);
    let checker = NameChecker::new().with_method_scan(MethodScan::OnCollision);
    let codes: Vec<String> = check_tree(&tree, &checker)
        .into_iter()
        .map(|d| format!("{} {}", d.code, d.name))
        .collect();
    assert_eq!(
        codes,
        [
            "NC001 myService",
            "NC003 maxValue",
            "NC002 Count",
            "NC005 myService",
            "NC003 green",
            "NC003 version",
            "NC003 MAX__SIZE",
        ]
    );
}

#[test]
fn conventional_source_is_clean() {
    let tree = parse(
        r#"package com.example.clean;

import java.util.List;

public final class OrderBook<T extends Comparable<T>> {
    public static final int MAX_DEPTH = 64;
    private static final String KIND = "book";
    private final List<T> entries;
    private int size;

    public OrderBook(List<T> entries) {
        this.entries = entries;
    }

    public <R> R applyTo(R seed, int... weights) {
        for (int weight : weights) {
            size += weight;
        }
        try (var reader = open()) {
            reader.close();
        } catch (RuntimeException ex) {
            size = 0;
        }
        return seed;
    }

    private java.io.Closeable open() { return null; }

    public enum Side { BUY, SELL, HTTP2_PROXY }

    public record Level(int price, int quantity) {}
}
"#,
    );
    assert_eq!(render(&tree, &NameChecker::new()), "");
}

#[test]
fn unicode_names_are_classified_by_code_point() {
    let tree = parse(
        "class Größe {\n    static final int ÜBER_MAX = 1;\n    int ÄnderungsZähler;\n    int 名前;\n}\n",
    );
    let names: Vec<String> = check_tree(&tree, &NameChecker::new())
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["ÄnderungsZähler"]);
}

#[test]
fn repeated_checks_match() {
    let tree = parse(SERVICE);
    let checker = NameChecker::new();
    assert_eq!(render(&tree, &checker), render(&tree, &checker));
}
