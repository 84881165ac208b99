//! End-to-end behaviour of the content pipeline.

use folio_content::{
    CodeBlock, EmbedKind, EmbedScanner, Fragment, FragmentAssembler, Gallery, GalleryImage,
    PlaygroundScanner, RichTextPolicy, Scanner, assemble, parse_embed,
};
use pretty_assertions::assert_eq;

const POST: &str = r#"<h1>Shipping the new site</h1>
<p>The setup:</p>
```toml:Cargo.toml
[package]
name = "site"
```
<p>Screenshots:</p>
<div class="gallery-container" data-gallery='{"images":[{"url":"home.png","caption":"Home"},{"url":"blog.png"}]}'></div>
<p>That's it.</p>"#;

#[test]
fn test_plain_text_is_single_fragment() {
    let raw = "<p>Just words, and a link to https://example.com/docs.</p>";
    assert_eq!(assemble(raw), vec![Fragment::text(raw)]);
}

#[test]
fn test_code_block_between_text() {
    assert_eq!(
        assemble("pre```js:foo.js\nconsole.log(1)\n```post"),
        vec![
            Fragment::text("pre"),
            Fragment::Code(CodeBlock {
                language: "js".to_owned(),
                filename: "foo.js".to_owned(),
                code: "console.log(1)".to_owned(),
                highlighted_lines: Vec::new(),
            }),
            Fragment::text("post"),
        ]
    );
}

#[test]
fn test_youtube_ids() {
    let short = parse_embed("https://youtu.be/abc123").unwrap();
    let long = parse_embed("https://www.youtube.com/watch?v=abc123").unwrap();

    assert_eq!(short.kind, EmbedKind::YouTube);
    assert_eq!(short.id, "abc123");
    assert_eq!(long.kind, EmbedKind::YouTube);
    assert_eq!(long.id, short.id);
}

#[test]
fn test_unrecognized_host_passthrough() {
    assert_eq!(
        EmbedScanner::new().scan("https://example.com/page"),
        vec![Fragment::text("https://example.com/page")]
    );
}

#[test]
fn test_malformed_playground_is_original_text() {
    let raw = "```playground {bad json}\ncode\n```";
    assert_eq!(PlaygroundScanner::new().scan(raw), vec![Fragment::text(raw)]);
    assert_eq!(assemble(raw), vec![Fragment::text(raw)]);
}

#[test]
fn test_passthrough_is_idempotent() {
    let raw = "<p>Nothing to see here.</p>";
    let first = assemble(raw);
    let content = first[0].as_text().unwrap();
    assert_eq!(assemble(content), first);
}

#[test]
fn test_gallery_between_text() {
    let raw = r#"<p>a</p><div class="gallery-container" data-gallery='{"images":[{"url":"a.png"}]}'></div><p>b</p>"#;
    assert_eq!(
        assemble(raw),
        vec![
            Fragment::text("<p>a</p>"),
            Fragment::Gallery(Gallery {
                images: vec![GalleryImage::new("a.png")],
            }),
            Fragment::text("<p>b</p>"),
        ]
    );
}

#[test]
fn test_gallery_caption_with_angle_bracket() {
    let raw = r#"<p>a</p><div class="gallery-container" data-gallery='{"images":[{"url":"a.png","caption":"1 > 0"}]}'></div><p>b</p>"#;
    let kinds: Vec<_> = assemble(raw).iter().map(Fragment::kind).collect();

    assert_eq!(kinds, ["text", "gallery", "text"]);
}

#[test]
fn test_backtick_run_without_block() {
    let raw = format!("<p>{}</p>\n", "`".repeat(100_000));
    assert_eq!(assemble(&raw), vec![Fragment::text(raw.as_str())]);
}

#[test]
fn test_full_post_order() {
    let fragments = assemble(POST);
    let kinds: Vec<_> = fragments.iter().map(Fragment::kind).collect();

    assert_eq!(kinds, ["text", "code", "text", "gallery", "text"]);
    assert_eq!(fragments[4], Fragment::text("\n<p>That's it.</p>"));

    let Fragment::Gallery(gallery) = &fragments[3] else {
        panic!("expected gallery");
    };
    assert_eq!(gallery.images.len(), 2);
    assert_eq!(gallery.images[0].caption.as_deref(), Some("Home"));
}

#[test]
fn test_text_and_code_reconstruct_input() {
    let raw = "a\n```\nx\n```\nb\n```py\ny\n```\nc";
    let fragments = assemble(raw);
    let texts: String = fragments.iter().filter_map(Fragment::as_text).collect();

    assert_eq!(texts, "a\n\nb\n\nc");
}

#[test]
fn test_rich_segment_drop_is_default() {
    let raw = "<p>Talk:</p> https://youtu.be/talk <p>Flow:</p>```mermaid\ngraph LR\n```";
    let fragments = assemble(raw);
    let kinds: Vec<_> = fragments.iter().map(Fragment::kind).collect();

    assert_eq!(kinds, ["embed", "diagram"]);
}

#[test]
fn test_rich_segment_interleave_keeps_source_order() {
    let raw = "```mermaid\ngraph LR\n```<p>Talk:</p> https://youtu.be/talk";
    let fragments = FragmentAssembler::new()
        .rich_text(RichTextPolicy::Interleave)
        .assemble(raw);
    let kinds: Vec<_> = fragments.iter().map(Fragment::kind).collect();

    assert_eq!(kinds, ["diagram", "text", "embed"]);
}

#[test]
fn test_fragments_serialize_for_renderer() {
    let fragments = assemble("```chart {\"type\":\"bar\"}\n[1]\n```");
    let json = serde_json::to_value(&fragments).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{"type": "chart", "chartType": "bar", "data": [1], "options": {}}])
    );
}

#[test]
fn test_assembler_shared_across_threads() {
    let assembler = FragmentAssembler::new();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(assembler.assemble(POST).len(), 5);
            });
        }
    });
}
