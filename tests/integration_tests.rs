//! Integration tests for the templating pipeline

use std::sync::Arc;

use fig_html::parser::{Node, ParsedDocument};
use fig_html::template::{compose, PLACEHOLDER_PREFIX};
use fig_html::{
    FalsyPolicy, Fig, FigConfig, FigError, HostNode, Identity, MarkupParser, NameTable,
    ParseError, PlaceholderCounter, Template, Templater, TreeHost, Value,
};
use pretty_assertions::assert_eq;

fn templater() -> Templater<TreeHost> {
    Fig::new(TreeHost)
        .with_counter(Arc::new(PlaceholderCounter::new()))
        .dict(None)
}

fn with_names(names: NameTable<String>) -> Templater<TreeHost> {
    Fig::new(TreeHost)
        .with_counter(Arc::new(PlaceholderCounter::new()))
        .dict(Some(names))
}

fn single(values: Vec<Value<HostNode>>) -> HostNode {
    assert_eq!(values.len(), 1, "Expected one value, got {:?}", values);
    match values.into_iter().next() {
        Some(Value::Element(node)) => node,
        other => panic!("Expected element, got {:?}", other),
    }
}

#[test]
fn test_static_markup_round_trips() {
    let markup = r#"<ul class="menu"><li id="a">one</li><li>two<br></li></ul>"#;
    let out = templater().render(Template::literal(markup)).expect("Should render");
    assert_eq!(single(out).to_markup(), markup);
}

#[test]
fn test_number_rendered_as_value_not_string() {
    let counter = PlaceholderCounter::new();
    let comp = compose(
        Template::<HostNode>::from_parts(&["<p>", "</p>"], vec![Value::from(42)]),
        &counter,
        true,
    );
    assert_eq!(comp.markup, format!("<p>{}0</p>", PLACEHOLDER_PREFIX));

    let out = templater()
        .call(&["<p>", "</p>"], vec![Value::from(42)])
        .expect("Should render");
    let p = single(out);
    assert_eq!(p.children, vec![Value::Number(42.0)]);
    assert_ne!(p.children, vec![Value::from("42")]);
}

#[test]
fn test_text_position_values_keep_identity() {
    let handler = Value::callback(|_| Value::Null);
    let badge = TreeHost.dynamic_badge();
    let out = templater()
        .render(
            Template::literal("<p>a")
                .value(handler.clone())
                .text(" ")
                .value(Value::Element(badge.clone()))
                .text("</p>"),
        )
        .expect("Should render");

    let p = single(out);
    assert_eq!(p.children.len(), 4);
    assert_eq!(p.children[0], Value::from("a"));
    let restored = p.children[1].as_callback().expect("callback child");
    assert!(restored.ptr_eq(handler.as_callback().unwrap()));
    assert_eq!(p.children[2], Value::from(" "));
    assert_eq!(p.children[3], Value::Element(badge));
}

trait BadgeExt {
    fn dynamic_badge(&self) -> HostNode;
}

impl BadgeExt for TreeHost {
    fn dynamic_badge(&self) -> HostNode {
        use fig_html::Host;
        self.create(
            Identity::Tag("span".to_string()),
            [("class".to_string(), Value::from("badge"))].into_iter().collect(),
            vec![Value::from("new")],
        )
    }
}

#[test]
fn test_top_level_text_expands_to_siblings() {
    let out = templater()
        .render(Template::literal("Hello ").value("World").text("!"))
        .expect("Should render");
    assert_eq!(
        out,
        vec![Value::from("Hello "), Value::from("World"), Value::from("!")]
    );
}

#[test]
fn test_list_value_stays_one_child() {
    let items = Value::List(vec![Value::from("x"), Value::from("y")]);
    let out = templater()
        .render(Template::literal("<div>").value(items.clone()).text("</div>"))
        .expect("Should render");
    assert_eq!(single(out).children, vec![items]);
}

#[test]
fn test_single_value_attribute_keeps_identity() {
    let handler = Value::callback(|_| Value::Bool(true));
    let out = templater()
        .render(
            Template::literal("<button on:click=")
                .value(handler.clone())
                .text(">Go</button>"),
        )
        .expect("Should render");

    let button = single(out);
    let restored = button
        .prop("onClick")
        .and_then(Value::as_callback)
        .expect("onClick callback");
    assert!(restored.ptr_eq(handler.as_callback().unwrap()));
    assert_eq!(restored.call(&[]), Value::Bool(true));
}

#[test]
fn test_mixed_attribute_concatenates() {
    let out = templater()
        .render(
            Template::literal(r#"<div class="card "#)
                .value("wide")
                .text(r#"" tabindex="#)
                .value(3)
                .text("></div>"),
        )
        .expect("Should render");

    let div = single(out);
    assert_eq!(div.prop("class"), Some(&Value::from("card wide")));
    assert_eq!(div.prop("tabindex"), Some(&Value::Number(3.0)));
}

#[test]
fn test_namespaced_attribute_camel_cased() {
    let out = templater()
        .render(Template::literal(r#"<div data:testId="card"></div>"#))
        .expect("Should render");
    let div = single(out);
    assert_eq!(div.prop("dataTestId"), Some(&Value::from("card")));
    assert_eq!(div.prop("data:testId"), None);
}

#[test]
fn test_valueless_attribute_skipped() {
    let out = templater()
        .render(Template::literal("<input disabled>"))
        .expect("Should render");
    assert!(single(out).props.is_empty());
}

#[test]
fn test_namespaced_tag_resolution() {
    let names = NameTable::new()
        .with("ui:button", "Button".to_string())
        .expect("Should build");
    let html = with_names(names);

    let out = html
        .render(Template::literal(
            "<ui:button kind=primary>ok</ui:button><ui:link></ui:link>",
        ))
        .expect("Should render");
    assert_eq!(out.len(), 2);

    let button = out[0].as_element().unwrap();
    assert_eq!(button.identity, Identity::Component("Button".to_string()));
    assert_eq!(button.prop("kind"), Some(&Value::from("primary")));
    assert_eq!(button.children, vec![Value::from("ok")]);

    let link = out[1].as_element().unwrap();
    assert_eq!(link.identity, Identity::Tag("ui:link".to_string()));
}

#[test]
fn test_resolution_falls_back_without_table() {
    let out = templater()
        .render(Template::literal("<ui:button/>"))
        .expect("Should render");
    assert_eq!(single(out).tag(), Some("ui:button"));
}

#[test]
fn test_malformed_markup_fails_generically() {
    let err = templater()
        .render(Template::literal("<section><em>x</section>"))
        .expect_err("Should fail");
    assert!(matches!(err, FigError::InvalidDocument));
    assert_eq!(err.to_string(), "invalid document structure");
}

#[test]
fn test_omitted_end_tags_render() {
    let html = templater();
    for (markup, parent, kids) in [
        ("<ul><li>a<li>b</ul>", Some("ul"), vec!["li", "li"]),
        ("<select><option>a<option>b</select>", Some("select"), vec!["option", "option"]),
        ("<p>one<p>two", None, vec!["p", "p"]),
    ] {
        let out = html
            .render(Template::literal(markup))
            .unwrap_or_else(|e| panic!("{} should render: {}", markup, e));
        let names: Vec<_> = match parent {
            Some(tag) => {
                let root = single(out);
                assert_eq!(root.tag(), Some(tag));
                root.elements().map(|n| n.name().to_string()).collect()
            }
            None => out
                .iter()
                .filter_map(Value::as_element)
                .map(|n| n.name().to_string())
                .collect(),
        };
        assert_eq!(names, kids, "{}", markup);
    }
}

#[test]
fn test_script_body_is_raw_text() {
    let out = templater()
        .render(
            Template::literal("<script>if (a<b) { run(")
                .value("x")
                .text(") }</script>"),
        )
        .expect("Should render");
    let script = single(out);
    assert_eq!(
        script.children,
        vec![Value::from("if (a<b) { run("), Value::from("x"), Value::from(") }")]
    );
}

#[test]
fn test_formatted_document_yields_only_elements() {
    let out = templater()
        .render(Template::literal(
            "<html>\n<head><title>T</title></head>\n<body><p>x</p></body>\n</html>",
        ))
        .expect("Should render");
    let names: Vec<_> = out
        .iter()
        .map(|v| v.as_element().map(|n| n.name().to_string()))
        .collect();
    assert_eq!(names, vec![Some("title".to_string()), Some("p".to_string())]);
}

#[test]
fn test_repeated_attribute_keeps_first() {
    let out = templater()
        .render(Template::literal(r#"<a class="one" class="two"></a>"#))
        .expect("Should render");
    assert_eq!(single(out).prop("class"), Some(&Value::from("one")));
}

#[test]
fn test_structural_error_fails_generically() {
    let err = templater()
        .render(Template::literal("<body></body><body></body>"))
        .expect_err("Should fail");
    assert!(matches!(err, FigError::InvalidDocument));
}

#[test]
fn test_empty_template_yields_nothing() {
    let html = templater();
    assert_eq!(html.render(Template::empty()).expect("Should render"), vec![]);
    assert_eq!(html.render(Template::new()).expect("Should render"), vec![]);
}

#[test]
fn test_head_rendered_before_body() {
    let out = templater()
        .render(Template::literal(
            "<title>Page</title><main>x</main><link rel=icon>",
        ))
        .expect("Should render");
    let names: Vec<_> = out
        .iter()
        .filter_map(Value::as_element)
        .map(|n| n.name().to_string())
        .collect();
    assert_eq!(names, vec!["title", "main", "link"]);
}

#[test]
fn test_placeholders_unique_across_calls() {
    let counter = Arc::new(PlaceholderCounter::new());
    let html = Fig::new(TreeHost)
        .with_counter(Arc::clone(&counter))
        .dict(None);

    html.render(Template::literal("<b>").value(1).text("</b>"))
        .expect("Should render");
    html.render(Template::literal("<b>").value(2).value(3).text("</b>"))
        .expect("Should render");
    assert_eq!(counter.minted(), 3);

    let first = compose(Template::<()>::new().value(1), &counter, true);
    let second = compose(Template::<()>::new().value(1), &counter, true);
    assert_ne!(first.markup, second.markup);
}

#[test]
fn test_falsy_values_dropped_by_default() {
    let out = templater()
        .render(
            Template::literal("<p>")
                .value(0)
                .value(false)
                .value("")
                .value(Value::Null)
                .text("</p>"),
        )
        .expect("Should render");
    assert!(single(out).children.is_empty());
}

#[test]
fn test_falsy_values_kept_when_configured() {
    let html = Fig::new(TreeHost)
        .with_counter(Arc::new(PlaceholderCounter::new()))
        .with_config(FigConfig::new().with_falsy(FalsyPolicy::Keep))
        .dict(None);
    let out = html
        .render(Template::literal("<p>").value(0).text("</p>"))
        .expect("Should render");
    assert_eq!(single(out).children, vec![Value::Number(0.0)]);
}

/// Parser stand-in returning the markup as one body text node
struct TextOnlyParser;

impl MarkupParser for TextOnlyParser {
    fn parse_document(&self, markup: &str) -> Result<ParsedDocument, Vec<ParseError>> {
        if markup.contains("fail") {
            return Err(vec![ParseError::structure(0..markup.len(), "refused")]);
        }
        Ok(ParsedDocument {
            head: vec![],
            body: vec![Node::Text(markup.to_string())],
        })
    }
}

#[test]
fn test_custom_parser_seam() {
    let html = Fig::new(TreeHost)
        .with_counter(Arc::new(PlaceholderCounter::new()))
        .with_parser(TextOnlyParser)
        .dict(None);

    let out = html
        .render(Template::literal("<not parsed>").value(7))
        .expect("Should render");
    assert_eq!(out, vec![Value::from("<not parsed>"), Value::Number(7.0)]);

    assert!(matches!(
        html.render(Template::literal("fail")),
        Err(FigError::InvalidDocument)
    ));
}
