//! Embed parsing.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// File embed pattern: ![[file.ext]], ![[file.ext|alias]], ![[file.ext#sub|alias]]
// !\[\[                                  - Opening ![[
// ([^\[\]\|#\r\n]*\.[^\[\]\|#\r\n]*)     - Target (group 1), must contain a dot
// (?:#([^\[\]\|\r\n]*))?                 - Fragment: heading, block or pdf page (group 2)
// (?:\|([^\[\]\r\n]*))?                  - Display alias (group 3)
// \]\]                                   - Closing ]]
// No group crosses a line break or a bracket, so an unclosed `![[` never
// swallows the embed that follows it.
static FILE_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"!\[\[([^\[\]\|#\r\n]*\.[^\[\]\|#\r\n]*)(?:#([^\[\]\|\r\n]*))?(?:\|([^\[\]\r\n]*))?\]\]",
    )
    .unwrap()
});

/// A file embed found in note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Target as written, trimmed. May contain a folder path.
    pub target: String,

    /// The part after `#`, if any.
    pub fragment: Option<String>,

    /// The part after `|`, if any.
    pub alias: Option<String>,

    /// Line number where this embed appears (1-indexed).
    pub line: usize,
}

impl Embed {
    /// The referenced base filename, in NFC form.
    ///
    /// `![[assets/img.png]]` refers to `img.png`.
    pub fn file_name(&self) -> String {
        let base = self
            .target
            .rsplit('/')
            .next()
            .unwrap_or(&self.target)
            .trim();
        base.nfc().collect()
    }
}

/// Parse all file embeds from content.
///
/// Embeds whose target has no dot (`![[Some Heading]]`) are not file embeds
/// and are ignored. Code blocks are not skipped.
pub fn parse_embeds(content: &str) -> Vec<Embed> {
    let mut embeds = Vec::new();

    for cap in FILE_EMBED.captures_iter(content) {
        let start = cap.get(0).map(|m| m.start()).unwrap_or(0);
        // Inside tables the alias pipe is escaped: ![[photo.png\|100]]
        let target = cap
            .get(1)
            .map(|m| strip_pipe_escape(m.as_str()).trim())
            .unwrap_or("");

        if target.is_empty() {
            continue;
        }

        let fragment = cap.get(2).map(|m| strip_pipe_escape(m.as_str()).to_string());
        let alias = cap.get(3).map(|m| m.as_str().to_string());
        let line = content[..start].matches('\n').count() + 1;

        embeds.push(Embed {
            target: target.to_string(),
            fragment,
            alias,
            line,
        });
    }

    embeds
}

fn strip_pipe_escape(s: &str) -> &str {
    s.strip_suffix('\\').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_names(content: &str) -> Vec<String> {
        parse_embeds(content).iter().map(Embed::file_name).collect()
    }

    #[test]
    fn test_simple_embed() {
        let embeds = parse_embeds("![[image.png]]");
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].target, "image.png");
        assert!(embeds[0].alias.is_none());
        assert!(embeds[0].fragment.is_none());
    }

    #[test]
    fn test_embed_with_alias() {
        let embeds = parse_embeds("See ![[diagram.png]] and ![[notes.md|Notes]]");
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0].target, "diagram.png");
        assert_eq!(embeds[1].target, "notes.md");
        assert_eq!(embeds[1].alias, Some("Notes".to_string()));
    }

    #[test]
    fn test_embed_without_dot_ignored() {
        assert!(parse_embeds("![[Some Heading]]").is_empty());
        assert!(parse_embeds("![[Note#Section.1]]").is_empty());
        assert!(parse_embeds("![[Heading|a.b]]").is_empty());
    }

    #[test]
    fn test_plain_links_ignored() {
        assert!(parse_embeds("[[image.png]] and ![alt](photo.jpg)").is_empty());
    }

    #[test]
    fn test_target_trimmed() {
        assert_eq!(file_names("![[  spaced name.png  | alias ]]"), vec!["spaced name.png"]);
    }

    #[test]
    fn test_size_alias_discarded() {
        assert_eq!(file_names("![[photo.jpg|400x300]]"), vec!["photo.jpg"]);
    }

    #[test]
    fn test_fragment_stripped() {
        let embeds = parse_embeds("![[doc.pdf#page=3]] ![[other.md#Heading|H]]");
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0].file_name(), "doc.pdf");
        assert_eq!(embeds[0].fragment, Some("page=3".to_string()));
        assert_eq!(embeds[1].file_name(), "other.md");
        assert_eq!(embeds[1].alias, Some("H".to_string()));
    }

    #[test]
    fn test_folder_target_uses_base_name() {
        assert_eq!(file_names("![[assets/2024/img.png]]"), vec!["img.png"]);
    }

    #[test]
    fn test_file_name_is_nfc() {
        assert_eq!(file_names("![[cafe\u{301}.png]]"), vec!["caf\u{e9}.png"]);
    }

    #[test]
    fn test_embed_in_code_block_counts() {
        let content = "```\n![[kept.png]]\n```\n`![[inline.png]]`";
        assert_eq!(file_names(content), vec!["kept.png", "inline.png"]);
    }

    #[test]
    fn test_multiple_embeds_on_one_line() {
        assert_eq!(
            file_names("![[a.png]]![[b.gif|b]] text ![[c.mp4]]"),
            vec!["a.png", "b.gif", "c.mp4"]
        );
    }

    #[test]
    fn test_embed_line_numbers() {
        let embeds = parse_embeds("Line 1\n![[a.png]]\nLine 3\n![[b.png]]");
        assert_eq!(embeds[0].line, 2);
        assert_eq!(embeds[1].line, 4);
    }

    #[test]
    fn test_unclosed_embed_does_not_swallow_next() {
        let content = "Type ![[ to embed a file.\n\n![[diagram.png]]";
        assert_eq!(file_names(content), vec!["diagram.png"]);

        let content = "![[broken.png and ![[real.png]] ![[a.png| alias ![[b.png]]";
        assert_eq!(file_names(content), vec!["real.png", "b.png"]);
    }

    #[test]
    fn test_embed_does_not_span_lines() {
        assert!(parse_embeds("![[half\nof.png]]").is_empty());
        assert!(parse_embeds("![[img.png|first\nsecond]]").is_empty());
    }

    #[test]
    fn test_escaped_table_pipe() {
        let embeds = parse_embeds("| ![[photo.png\\|100]] | ![[doc.pdf#page=2\\|p]] |");
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0].target, "photo.png");
        assert_eq!(embeds[0].alias, Some("100".to_string()));
        assert_eq!(embeds[1].file_name(), "doc.pdf");
        assert_eq!(embeds[1].fragment, Some("page=2".to_string()));
    }

    #[test]
    fn test_empty_embed_ignored() {
        assert!(parse_embeds("![[]]").is_empty());
        assert!(parse_embeds("![[|alias.png]]").is_empty());
    }
}
