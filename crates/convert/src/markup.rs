//! Ordered substitution passes from wikitext to Markdown.
//!
//! There is no parse tree. Each pass is a regular-expression substitution
//! over the output of the previous one, so the order is part of the
//! behaviour:
//!
//! 1. **Tables** – `{| … |}` blocks become pipe tables
//! 2. **Unordered lists** – `* item` → `- item`
//! 3. **Ordered lists** – `# item` → `1. item`
//! 4. **Headings** – `== Title ==` → `## Title`
//! 5. **Bold** – `'''x'''` → `**x**`
//! 6. **Italic** – `''x''` → `*x*` (after bold, which it would otherwise split)
//! 7. **Piped links** – `[[Target|Label]]` → `[Label](Target)`
//! 8. **Bare links** – `[[Target]]` → `[Target](Target)`
//! 9. **Block quotes** – `:text` → `> text`
//! 10. **Inline code** – `<code>x</code>` → `` `x` ``
//! 11. **Images** – `[[File:x.png|Label]]` → `![Label](x.png)`
//!
//! Passes 7 and 8 match any double-bracketed text, `File:` references
//! included, so by the time pass 11 runs there is usually nothing left for it.
//! `[[File:x.png|Label]]` therefore comes out as `[Label](File:x.png)`.

use crate::consts::*;
use crate::table::render_table;
use regex::Captures;
use std::borrow::Cow;

/// A single substitution pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Tables,
    UnorderedLists,
    OrderedLists,
    Headings,
    Bold,
    Italic,
    PipedLinks,
    BareLinks,
    BlockQuotes,
    InlineCode,
    Images,
}

impl Pass {
    /// Every pass, in the order [`convert`] applies them.
    pub const ALL: [Pass; 11] = [
        Pass::Tables,
        Pass::UnorderedLists,
        Pass::OrderedLists,
        Pass::Headings,
        Pass::Bold,
        Pass::Italic,
        Pass::PipedLinks,
        Pass::BareLinks,
        Pass::BlockQuotes,
        Pass::InlineCode,
        Pass::Images,
    ];

    /// Apply this pass alone. Text it doesn't match is returned untouched
    /// (and unallocated).
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self {
            Self::Tables => TABLE_REGEX.replace_all(text, |caps: &Captures| render_table(&caps[0])),
            Self::UnorderedLists => UNORDERED_ITEM_REGEX.replace_all(text, "- ${1}"),
            Self::OrderedLists => ORDERED_ITEM_REGEX.replace_all(text, "1. ${1}"),
            Self::Headings => HEADING_REGEX.replace_all(text, |caps: &Captures| {
                // Both runs of `=` count, even when they're unbalanced.
                let level = caps[0].matches('=').count() / 2;
                format!("{} {}", "#".repeat(level), &caps[1])
            }),
            Self::Bold => BOLD_REGEX.replace_all(text, "**${1}**"),
            Self::Italic => ITALIC_REGEX.replace_all(text, "*${1}*"),
            Self::PipedLinks => PIPED_LINK_REGEX.replace_all(text, "[${2}](${1})"),
            Self::BareLinks => BARE_LINK_REGEX.replace_all(text, "[${1}](${1})"),
            Self::BlockQuotes => QUOTE_REGEX.replace_all(text, "> ${1}"),
            Self::InlineCode => CODE_REGEX.replace_all(text, "`${1}`"),
            Self::Images => FILE_REGEX.replace_all(text, "![${2}](${1})"),
        }
    }
}

/// Convert a wikitext document to Markdown.
///
/// Never fails: markup that no pass recognizes is carried through as-is.
///
/// ```
/// use wikidump_convert::convert;
/// assert_eq!(convert("== Intro ==\n'''Bold''' and [[Main Page|home]]"), "## Intro\n**Bold** and [home](Main Page)");
/// ```
pub fn convert(text: &str) -> String {
    Pass::ALL.iter().fold(text.to_string(), |text, pass| pass.apply(&text).into_owned())
}
