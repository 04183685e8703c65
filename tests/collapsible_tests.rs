use foldmark::{Block, Options, convert_with_options, limits, parse, to_html};
use pretty_assertions::assert_eq;

fn open(index: usize, summary: &str) -> String {
    format!(
        "<div class=\"collapsible\" id=\"collapsible-{index}\">\
         <button type=\"button\" class=\"collapsible-toggle\" aria-expanded=\"true\" \
         data-toggle-target=\"collapsible-{index}-content\">{summary}</button>\
         <div class=\"collapsible-content\" id=\"collapsible-{index}-content\">\n"
    )
}

const CLOSE: &str = "</div></div>\n";

#[test]
fn test_collapsible_with_summary() {
    let html = to_html("<!-- collapsible: Show more -->\nHidden text.\n<!-- /collapsible -->");
    assert_eq!(html, format!("{}<p>Hidden text.</p>\n{CLOSE}", open(0, "Show more")));
}

#[test]
fn test_collapsible_default_summary() {
    let html = to_html("<!-- collapsible -->\nx\n<!-- /collapsible -->");
    assert_eq!(html, format!("{}<p>x</p>\n{CLOSE}", open(0, "Details")));
}

#[test]
fn test_summary_escaped() {
    let html = to_html("<!-- collapsible: <b>&</b> -->\nx\n<!-- /collapsible -->");
    assert!(html.contains(">&lt;b&gt;&amp;&lt;/b&gt;</button>"), "{html}");
}

#[test]
fn test_nested_collapsibles_balance() {
    let input = "\
<!-- collapsible: Outer -->
# Title
<!-- collapsible: Inner -->
- a
- b
<!-- /collapsible -->
tail
<!-- /collapsible -->
after";
    let expected = format!(
        "{}<h1 id=\"title\">Title</h1>\n{}<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n{CLOSE}<p>tail</p>\n{CLOSE}<p>after</p>\n",
        open(0, "Outer"),
        open(1, "Inner"),
    );
    assert_eq!(to_html(input), expected);
}

#[test]
fn test_sibling_collapsibles_numbered_in_order() {
    let input = "<!-- collapsible -->\na\n<!-- /collapsible -->\n<!-- collapsible -->\nb\n<!-- /collapsible -->";
    let html = to_html(input);
    assert!(html.contains("id=\"collapsible-0\""));
    assert!(html.contains("id=\"collapsible-1\""));
}

#[test]
fn test_unterminated_collapsible_takes_rest() {
    let html = to_html("before\n<!-- collapsible -->\nafter one\n\nafter two");
    assert_eq!(
        html,
        format!(
            "<p>before</p>\n{}<p>after one</p>\n<p>after two</p>\n{CLOSE}",
            open(0, "Details")
        )
    );
}

#[test]
fn test_stray_end_marker_ignored() {
    assert_eq!(to_html("a\n\n<!-- /collapsible -->\n\nb"), "<p>a</p>\n<p>b</p>\n");
}

#[test]
fn test_marker_inside_code_is_content() {
    let input = "<!-- collapsible -->\n```\n<!-- /collapsible -->\n```\n<!-- /collapsible -->";
    let html = to_html(input);
    assert!(html.contains("&lt;!-- /collapsible --&gt;"), "{html}");
    assert!(html.ends_with(&format!("</code></pre></div>\n{CLOSE}")), "{html}");
}

#[test]
fn test_collapsible_code_block_numbering_continues() {
    let input = "```\na\n```\n<!-- collapsible -->\n```\nb\n```\n<!-- /collapsible -->";
    let html = to_html(input);
    assert!(html.contains("id=\"code-block-0\""));
    assert!(html.contains("id=\"code-block-1\""));
}

#[test]
fn test_nesting_cap_flattens() {
    let depth = limits::MAX_COLLAPSIBLE_NESTING + 3;
    let input = format!(
        "{}core\n{}",
        "<!-- collapsible -->\n".repeat(depth),
        "<!-- /collapsible -->\n".repeat(depth)
    );

    let html = to_html(&input);
    assert_eq!(
        html.matches("class=\"collapsible\"").count(),
        limits::MAX_COLLAPSIBLE_NESTING
    );
    assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
    assert!(html.contains("<p>core</p>"));
}

#[test]
fn test_collapsible_children_are_blocks() {
    let doc = parse("<!-- collapsible -->\n> q\n---\n<!-- /collapsible -->");
    match &doc.blocks()[0] {
        Block::Collapsible { children, .. } => {
            assert!(matches!(children[0], Block::Blockquote { .. }));
            assert!(matches!(children[1], Block::HorizontalRule));
        }
        other => panic!("expected collapsible, got {other:?}"),
    }
}

#[test]
fn test_marker_needs_whole_line() {
    let html = to_html("text <!-- collapsible --> more");
    assert_eq!(html, "<p>text &lt;!-- collapsible --&gt; more</p>\n");
}

#[test]
fn test_fence_after_list_item_is_code() {
    let html = to_html("<!-- collapsible -->\n- item\n  ```\n  code\n  ```\n<!-- /collapsible -->\nafter");
    assert!(html.contains("<li>item</li>\n</ul>\n<div class=\"code-block\">"), "{html}");
    assert!(html.ends_with(&format!("</code></pre></div>\n{CLOSE}<p>after</p>\n")), "{html}");
}

#[test]
fn test_open_fence_after_list_item_keeps_end_marker_as_code() {
    let options = Options {
        highlight: false,
        ..Options::default()
    };
    let input = "<!-- collapsible -->\n- item\n  ```\n<!-- /collapsible -->\nafter";
    let html = convert_with_options(input, &options).html;
    assert!(html.starts_with(&open(0, "Details")), "{html}");
    assert!(
        html.ends_with(&format!("&lt;!-- /collapsible --&gt;\nafter</code></pre></div>\n{CLOSE}")),
        "{html}"
    );
    assert!(!html.contains("<p>after</p>"), "{html}");
}
