// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **some** content and a [link](https://example.com/a).\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n";
    base.repeat(size)
}

/// Splits `text` into chunks of about `chunk` bytes, on char boundaries,
/// the way a token stream delivers it.
#[allow(dead_code)]
pub fn chunks(text: &str, chunk: usize) -> Vec<&str> {
    let mut out = vec![];
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + chunk).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        out.push(&text[start..end]);
        start = end;
    }
    out
}

/// A document ending in the middle of an emphasis, a link and a fence.
#[allow(dead_code)]
pub fn generate_open_tail(size: usize) -> String {
    let mut content = generate_markdown_content(size);
    content.push_str("Trailing *emphasis with a [link](https://example.com/path and\n\n```rust\nfn open() {");
    content
}
