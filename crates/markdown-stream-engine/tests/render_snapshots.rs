use markdown_stream_engine::{
    PrefixRule, SanitizationPolicy, StableCache, complete_and_sanitize, snapshot::outline, to_html,
};

fn outline_of(text: &str, policy: &SanitizationPolicy) -> String {
    let (tree, _) = complete_and_sanitize(text, StableCache::default(), policy);
    outline(&tree)
}

fn default_outline(text: &str) -> String {
    outline_of(text, &SanitizationPolicy::default())
}

#[test]
fn open_strong() {
    insta::assert_snapshot!(default_outline("Hello **wor"), @r#"
    #0 paragraph 0..11 open
      + "**" at 11 (unclosed strong)
      paragraph
        text "Hello "
        strong
          text "wor"
    "#);
}

#[test]
fn open_code_fence() {
    insta::assert_snapshot!(default_outline("```js\nconsole.log(1)"), @r#"
    #0 fenced-code 0..20 open
      + "\n```" at 20 (unclosed code fence)
      code-block js "console.log(1)\n"
    placement #0.0 Code Plain
    "#);
}

#[test]
fn link_outside_the_allow_list() {
    let policy = SanitizationPolicy {
        allowed_link_prefixes: PrefixRule::list(["https://example.com"]),
        ..SanitizationPolicy::default()
    };
    insta::assert_snapshot!(outline_of("[click](https://malicious-site.com", &policy), @r#"
    #0 paragraph 0..34 open
      + ")" at 34 (unclosed link)
      paragraph
        text "click"
    decision #0.0.0 "https://malicious-site.com" stripped
    ! Policy violation: link destination "https://malicious-site.com/" is not allow-listed
    "#);
}

#[test]
fn header_row_waiting_for_separator() {
    insta::assert_snapshot!(default_outline("| a | b |\n"), @r#"
    #0 paragraph 0..10 open literal
      paragraph
        text "| a | b |"
    ! Malformed table header at byte 0, rendered as text
    "#);
}

#[test]
fn empty_heading() {
    insta::assert_snapshot!(default_outline("# "), @r#"
    #0 heading 0..2 open
      heading h1
    "#);
}

#[test]
fn relative_link_after_a_stable_heading() {
    let policy = SanitizationPolicy {
        default_origin: Some("https://example.com/".parse().unwrap()),
        ..SanitizationPolicy::default()
    };
    insta::assert_snapshot!(outline_of("# Title\n\nSee [docs](/guide) and *more", &policy), @r#"
    #0 heading 0..8 stable
      heading h1
        text "Title"
    #1 paragraph 8..37 open
      + "*" at 37 (unclosed emphasis)
      paragraph
        text "See "
        link -> https://example.com/guide
          text "docs"
        text " and "
        em
          text "more"
    decision #1.0.1 "/guide" rewritten to https://example.com/guide
    "#);
}

#[test]
fn raw_markup_under_the_default_policy() {
    insta::assert_snapshot!(default_outline("<script>alert(1)</script>\n\nok <b>x</b>\n"), @r#"
    #0 paragraph 0..26 stable
    #1 paragraph 26..39 open
      paragraph
        text "ok <b>x</b>"
    decision #0.0 "<script>alert(1)</script>\n" stripped
    decision #1.0.1 "<b>" escaped
    decision #1.0.3 "</b>" escaped
    ! Policy violation: Raw markup can run script: "<script>alert(1)</script>"
    "#);
}

#[test]
fn html_of_a_streamed_list() {
    let (tree, _) = complete_and_sanitize(
        "- one\n- **two",
        StableCache::default(),
        &SanitizationPolicy::default(),
    );
    insta::assert_snapshot!(to_html(&tree), @r"
    <ul>
    <li>one</li>
    <li><strong>two</strong></li>
    </ul>
    ");
}
