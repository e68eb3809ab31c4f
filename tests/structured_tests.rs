use postrender::{
    render_blocks, Block, BlockType, ContentBlock, ContentEntity, EntityMap, InlineStyle, Options,
};
use pretty_assertions::assert_eq;

fn html(blocks: &[ContentBlock], entities: &EntityMap) -> String {
    render_blocks(blocks, entities, &Options::default()).to_html()
}

fn unstyled(text: &str) -> ContentBlock {
    ContentBlock::new(BlockType::Unstyled, text)
}

const LINK_ATTRS: &str = "target=\"_blank\" rel=\"noopener noreferrer\"";

#[test]
fn test_plain_fallback_has_no_styling() {
    let out = html(&[unstyled("just <text> & more")], &EntityMap::new());
    assert_eq!(out, "<p id=\"section-block-0\">just &lt;text&gt; &amp; more</p>\n");
}

#[test]
fn test_overlapping_bold_italic() {
    let block = unstyled("0123456789")
        .with_style(0, 5, InlineStyle::Bold)
        .with_style(3, 5, InlineStyle::Italic);
    let out = html(&[block], &EntityMap::new());
    assert_eq!(
        out,
        "<p id=\"section-block-0\"><strong>012</strong><em><strong>34</strong></em><em>567</em>89</p>\n"
    );
}

#[test]
fn test_entity_precedence_later_wins() {
    let block = unstyled("0123456789").with_entity(2, 4, "A").with_entity(5, 3, "B");
    let entities = EntityMap::new()
        .with("A", ContentEntity::link("https://a.example"))
        .with("B", ContentEntity::link("https://b.example"));
    let out = html(&[block], &entities);
    assert_eq!(
        out,
        format!(
            "<p id=\"section-block-0\">01<a href=\"https://a.example\" {LINK_ATTRS}>234</a>\
             <a href=\"https://b.example\" {LINK_ATTRS}>567</a>89</p>\n"
        )
    );
}

#[test]
fn test_javascript_link_is_dropped() {
    let block = unstyled("click me").with_entity(0, 8, 0u32);
    let entities = EntityMap::new().with(0u32, ContentEntity::link("javascript:alert(1)"));
    let out = html(&[block], &entities);
    assert_eq!(out, "<p id=\"section-block-0\">click me</p>\n");
    assert!(!out.contains("<a"), "Got: {out}");
}

#[test]
fn test_list_grouping() {
    use BlockType::*;
    let blocks = [
        ContentBlock::new(UnorderedListItem, "a"),
        ContentBlock::new(UnorderedListItem, "b"),
        ContentBlock::new(OrderedListItem, "c"),
        ContentBlock::new(UnorderedListItem, "d"),
    ];
    let out = html(&blocks, &EntityMap::new());
    assert_eq!(
        out,
        "<ul id=\"section-block-0\">\n<li>a</li>\n<li>b</li>\n</ul>\n\
         <ol id=\"section-block-1\">\n<li>c</li>\n</ol>\n\
         <ul id=\"section-block-2\">\n<li>d</li>\n</ul>\n"
    );
}

#[test]
fn test_atomic_blocks() {
    let blocks = [
        ContentBlock::new(BlockType::Atomic, " ").with_entity(0, 1, "img"),
        ContentBlock::new(BlockType::Atomic, " ").with_entity(0, 1, "code"),
        ContentBlock::new(BlockType::Atomic, " ").with_entity(0, 1, "hr"),
    ];
    let entities = EntityMap::new()
        .with(
            "img",
            ContentEntity::Media {
                image_url: "https://pbs.example/img.jpg".into(),
                alt: "A chart".into(),
            },
        )
        .with("code", ContentEntity::markdown("```python\nprint('<hi>')\n```"))
        .with("hr", ContentEntity::Divider);
    let doc = render_blocks(&blocks, &entities, &Options::default());
    let kinds: Vec<&Block> = doc.iter().map(|s| &s.block).collect();
    assert_eq!(
        kinds,
        vec![
            &Block::Image {
                url: "https://pbs.example/img.jpg".into(),
                alt: "A chart".into(),
            },
            &Block::CodeBlock {
                code: "print('&lt;hi&gt;')".into(),
                language: Some("python".into()),
            },
            &Block::Divider,
        ]
    );
}

#[test]
fn test_code_block_type_is_not_fence_stripped() {
    let block = ContentBlock::new(BlockType::CodeBlock, "```\nx\n```");
    let out = html(&[block], &EntityMap::new());
    assert_eq!(out, "<pre id=\"section-block-0\"><code>```\nx\n```</code></pre>\n");
}

#[test]
fn test_whitespace_block_is_spacer() {
    let blocks = [unstyled("one"), ContentBlock::new(BlockType::Blockquote, " \t"), unstyled("two")];
    let doc = render_blocks(&blocks, &EntityMap::new(), &Options::default());
    assert_eq!(doc.sections[1].block, Block::Spacer);
    assert_eq!(doc.sections[2].anchor.as_str(), "section-block-2");
}

#[test]
fn test_linkify_only_outside_entities() {
    let block = unstyled("see https://a.com and @bob").with_entity(4, 13, "0");
    let entities = EntityMap::new().with("0", ContentEntity::link("https://other.example"));
    let out = html(&[block], &entities);
    assert_eq!(
        out,
        format!(
            "<p id=\"section-block-0\">see <a href=\"https://other.example\" {LINK_ATTRS}>https://a.com</a> and \
             <a href=\"https://x.com/bob\" {LINK_ATTRS}>@bob</a></p>\n"
        )
    );
}

#[test]
fn test_emoji_offsets_are_utf16() {
    let block = unstyled("🎉 Launch day").with_style(3, 6, InlineStyle::Bold);
    let out = html(&[block], &EntityMap::new());
    assert_eq!(out, "<p id=\"section-block-0\">🎉 <strong>Launch</strong> day</p>\n");
}

#[test]
fn test_idempotent() {
    let blocks = [
        ContentBlock::new(BlockType::HeaderTwo, "Title").with_style(0, 5, InlineStyle::Italic),
        unstyled("Body with #tag"),
        ContentBlock::new(BlockType::OrderedListItem, "first"),
    ];
    let first = render_blocks(&blocks, &EntityMap::new(), &Options::default());
    let second = render_blocks(&blocks, &EntityMap::new(), &Options::default());
    assert_eq!(first, second);
    assert_eq!(first.to_html(), second.to_html());
}

#[test]
fn test_empty_input() {
    assert!(render_blocks(&[], &EntityMap::new(), &Options::default()).is_empty());
}
