use markdown_stream_engine::{
    Node, PrefixRule, RenderTree, SanitizationPolicy, StableCache, Stream, complete_and_sanitize,
    parsing::scan,
    sanitize::Outcome,
    snapshot, to_html,
};
use pulldown_cmark::{Options, Parser, html};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::mem::{Discriminant, discriminant};

fn render_with(text: &str, policy: &SanitizationPolicy) -> RenderTree {
    complete_and_sanitize(text, StableCache::default(), policy).0
}

fn render(text: &str) -> RenderTree {
    render_with(text, &SanitizationPolicy::default())
}

/// Every char-boundary prefix of `text`, including the empty one.
fn prefixes(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain([text.len()])
        .map(move |i| &text[..i])
}

fn top_nodes(tree: &RenderTree) -> Vec<Node> {
    tree.blocks.iter().flat_map(|b| b.nodes.clone()).collect()
}

#[test]
fn unclosed_strong_is_closed_at_the_end() {
    let tree = render("Hello **wor");
    assert_eq!(tree.completed_text(), "Hello **wor**");
    assert_eq!(
        top_nodes(&tree),
        vec![Node::Paragraph {
            children: vec![
                Node::text("Hello "),
                Node::Strong {
                    children: vec![Node::text("wor")]
                },
            ]
        }]
    );
}

#[test]
fn unclosed_fence_gets_a_closing_fence() {
    let tree = render("```js\nconsole.log(1)");
    assert_eq!(tree.completed_text(), "```js\nconsole.log(1)\n```");
    let nodes = top_nodes(&tree);
    let [Node::CodeBlock { language, code }] = nodes.as_slice() else {
        panic!("expected one code block, got {nodes:?}");
    };
    assert_eq!(language.as_deref(), Some("js"));
    assert_eq!(code.trim_end(), "console.log(1)");
}

#[test]
fn disallowed_link_degrades_to_its_label() {
    let policy = SanitizationPolicy {
        allowed_link_prefixes: PrefixRule::list(["https://example.com"]),
        ..SanitizationPolicy::default()
    };
    let tree = render_with("[click](https://malicious-site.com", &policy);
    assert_eq!(
        top_nodes(&tree),
        vec![Node::Paragraph {
            children: vec![Node::text("click")]
        }]
    );
    assert_eq!(tree.decisions.len(), 1);
    assert_eq!(tree.decisions[0].outcome, Outcome::Stripped);
}

#[test]
fn header_row_without_separator_is_literal() {
    let tree = render("| a | b |\n");
    assert!(tree.blocks[0].literal);
    assert!(tree.patches().next().is_none());
    assert_eq!(
        top_nodes(&tree),
        vec![Node::Paragraph {
            children: vec![Node::text("| a | b |")]
        }]
    );
}

#[test]
fn header_row_becomes_a_table_once_the_separator_arrives() {
    let tree = render("| a | b |\n|---|---|\n| 1 | 2");
    assert!(!tree.blocks[0].literal);
    assert!(matches!(top_nodes(&tree).as_slice(), [Node::Table { .. }]));
}

#[test]
fn hash_and_space_is_an_empty_heading() {
    let tree = render("# ");
    assert!(tree.patches().next().is_none());
    assert_eq!(
        top_nodes(&tree),
        vec![Node::Heading {
            level: 1,
            children: vec![]
        }]
    );
}

#[test]
fn streamed_emphasis_converges_on_the_direct_render() {
    let mut stream = Stream::default();

    let first = stream.push("*");
    assert!(first.blocks[0].literal);

    let middle = stream.push("a");
    assert_eq!(middle.completed_text(), "*a*");
    assert_eq!(
        top_nodes(&middle),
        vec![Node::Paragraph {
            children: vec![Node::Emphasis {
                children: vec![Node::text("a")]
            }]
        }]
    );

    let last = stream.push("*");
    assert!(last.patches().next().is_none());
    assert_eq!(last.blocks, render("*a*").blocks);
}

#[rstest]
#[case::strong("Hello **world**")]
#[case::fence("```js\nx\n```\n")]
#[case::link("see [a](https://x.example/) now")]
#[case::table("| a |\n|---|\n| 1 |\n")]
#[case::list("- one\n- two\n")]
#[case::heading("## Done\n")]
fn complete_text_needs_no_patches(#[case] text: &str) {
    let tree = render(text);
    assert_eq!(tree.patches().count(), 0);
    assert_eq!(tree.completed_text(), text);
}

const DOCUMENT: &str = "# Title\n\nSome **bold** text with `code`, a [link](https://example.com/a) and ~~gone~~.\n\n```rust\nfn main() {}\n```\n\n- one\n- two\n\n> quoted *text*\n\n$$\nx^2\n$$\n\nDone.\n";

#[test]
fn stable_blocks_never_change_as_text_arrives() {
    let full = render(DOCUMENT);
    for prefix in prefixes(DOCUMENT) {
        let partial = render(prefix);
        snapshot::check_stable_prefix(&partial, &full);
    }
}

#[test]
fn streaming_char_by_char_matches_a_cold_render() {
    let mut stream = Stream::default();
    let mut previous = RenderTree::default();
    for (i, c) in DOCUMENT.char_indices() {
        let tree = stream.push(&DOCUMENT[i..i + c.len_utf8()]);
        snapshot::check_stable_prefix(&previous, &tree);
        previous = tree;
    }
    let cold = render(DOCUMENT);
    assert_eq!(previous.blocks, cold.blocks);
    assert_eq!(previous.decisions, cold.decisions);
}

#[test]
fn scans_of_every_prefix_tile_the_text() {
    for prefix in prefixes(DOCUMENT) {
        let s = scan(prefix, 0);
        snapshot::invariants(prefix, 0, &s);
        let resumed = scan(prefix, s.stable_end);
        snapshot::invariants(prefix, s.stable_end, &resumed);
    }
}

#[test]
fn completed_text_is_balanced() {
    let line = "Some **bold** text with `code`, a [link](https://example.com/a) and ~~gone~~.";
    for prefix in prefixes(line) {
        let completed = render(prefix).completed_text();
        let again = render(&completed);
        assert_eq!(
            again.patches().count(),
            0,
            "completing {prefix:?} gave {completed:?}, which still needed closers"
        );
    }
}

#[rstest]
#[case("[a](https://example.com/x)")]
#[case("[a](http://plain.example)")]
#[case("![img](https://cdn.example/i.png)")]
#[case("<https://auto.example/link>")]
fn wildcard_never_strips_http_destinations(#[case] text: &str) {
    let tree = render(text);
    assert!(!tree.decisions.is_empty());
    assert!(
        tree.decisions
            .iter()
            .all(|d| d.outcome == Outcome::Allowed),
        "{:?}",
        tree.decisions
    );
}

#[test]
fn decisions_are_deterministic() {
    let policy = SanitizationPolicy {
        allowed_link_prefixes: PrefixRule::list(["https://example.com"]),
        default_origin: Some("https://example.com/".parse().unwrap()),
        ..SanitizationPolicy::default()
    };
    let text = "[a](/x) [b](https://evil.example) [c](javascript:void(0)) <b>raw</b>";
    assert_eq!(
        render_with(text, &policy).decisions,
        render_with(text, &policy).decisions
    );
}

#[test]
fn script_link_is_stripped_under_a_wildcard() {
    let tree = render("[x](javascript:alert(1))");
    assert_eq!(
        top_nodes(&tree),
        vec![Node::Paragraph {
            children: vec![Node::text("x")]
        }]
    );
}

#[test]
fn half_closed_strong_takes_its_second_closer() {
    let tree = render("**a*");
    assert_eq!(tree.completed_text(), "**a**");
    assert_eq!(to_html(&tree).trim_end(), "<p><strong>a</strong></p>");
}

#[rstest]
#[case::decimal_entity("<a href=\"&#106;avascript:alert(1)\">x</a>")]
#[case::hex_entity("<a href=\"&#x6A;avascript:alert(1)\">x</a>")]
#[case::entity_tab("<a href=\"java&#09;script:alert(1)\">x</a>")]
#[case::block("<div><a href=\"&#x6a;avascript:x\">x</a></div>\n")]
fn encoded_script_url_never_reaches_the_html(#[case] text: &str) {
    let policy = SanitizationPolicy {
        allow_raw_markup: true,
        ..SanitizationPolicy::default()
    };
    let tree = render_with(text, &policy);
    let out = to_html(&tree);
    assert!(!out.contains("avascript"), "{out}");
    assert!(
        tree.decisions
            .iter()
            .any(|d| d.outcome == Outcome::Stripped),
        "{:?}",
        tree.decisions
    );
}

/// The full document parsed in one go, newlines dropped.
fn whole_document_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_MATH;
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(text, options));
    out.replace('\n', "")
}

#[rstest]
#[case::indented_code_depth("- a\n\n    b\n")]
#[case::content_depth("- a\n\n  b\n")]
#[case::ordered("1. first\n\n   more text\n")]
#[case::two_blank_lines("- a\n\n\n  b\n")]
#[case::paragraph_after_list("- a\n\nafter\n")]
fn list_items_across_blank_lines_match_a_whole_parse(#[case] text: &str) {
    let cold = render(text);
    assert_eq!(to_html(&cold).replace('\n', ""), whole_document_html(text));

    let mut stream = Stream::default();
    let mut previous = RenderTree::default();
    for (i, c) in text.char_indices() {
        let tree = stream.push(&text[i..i + c.len_utf8()]);
        snapshot::check_stable_prefix(&previous, &tree);
        previous = tree;
    }
    assert_eq!(previous.blocks, cold.blocks);
}

/// Top-level node kinds of every final block overlapping `start..end`.
fn final_kinds_at(full: &RenderTree, start: usize, end: usize) -> Vec<Discriminant<Node>> {
    full.blocks
        .iter()
        .filter(|b| b.span.start < end.max(start + 1) && start < b.span.end)
        .flat_map(|b| b.nodes.iter().map(discriminant))
        .collect()
}

// A block may show as plain text while its shape is undecided, but never as
// a structure the finished document does not have there.
#[rstest]
#[case::list_under_paragraph("Steps:\n- one\n- two\n\nDone.\n")]
#[case::loose_list("- a\n\n    b\n\n- c\n")]
#[case::ordered_list("Intro text\n\n1. first\n\n   more\n2. second\n")]
#[case::table("# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n")]
#[case::document(DOCUMENT)]
fn block_kinds_never_flash_while_streaming(#[case] text: &str) {
    let full = render(text);
    let paragraph = discriminant(&Node::Paragraph { children: vec![] });
    for prefix in prefixes(text) {
        let partial = render(prefix);
        for block in &partial.blocks {
            let allowed = final_kinds_at(&full, block.span.start, block.span.end);
            for node in &block.nodes {
                let kind = discriminant(node);
                assert!(
                    kind == paragraph || allowed.contains(&kind),
                    "{prefix:?} rendered {node:?} at {:?}",
                    block.span
                );
            }
        }
    }
}
